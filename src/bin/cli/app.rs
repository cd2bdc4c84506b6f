use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use cram::storage::SemesterStore;
use cram::study::{
    Card, Confidence, Course, Material, MaterialKind, Semester, StudyCollection, Topic,
};

/// Shared application state for CLI commands
pub struct App {
    pub store: SemesterStore,
}

impl App {
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => SemesterStore::default_data_dir()
                .context("failed to locate a data directory")?,
        };
        Ok(Self {
            store: SemesterStore::new(data_dir),
        })
    }

    /// Loads a semester by name (case-insensitive prefix match against the
    /// store).
    pub fn load_semester(&self, name: &str) -> Result<Semester> {
        let names = self.store.list().context("failed to list semesters")?;
        let resolved = resolve_name(name, names.iter().map(String::as_str), "semester")?;
        self.store
            .read(&resolved)
            .with_context(|| format!("failed to read semester '{}'", resolved))
    }

    pub fn save(&self, semester: &Semester) -> Result<()> {
        self.store
            .write(semester)
            .context("failed to save semester")?;
        Ok(())
    }
}

/// Case-insensitive exact-then-prefix resolution, used for semester names
/// and every path segment.
pub fn resolve_name<'a>(
    query: &str,
    candidates: impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<String> {
    let all: Vec<&str> = candidates.collect();
    let query_lower = query.to_lowercase();

    if let Some(name) = all.iter().find(|n| n.to_lowercase() == query_lower) {
        return Ok(name.to_string());
    }

    let matches: Vec<&str> = all
        .iter()
        .copied()
        .filter(|n| n.to_lowercase().starts_with(&query_lower))
        .collect();

    match matches.len() {
        0 => bail!(
            "no {} matching '{}'. Available:\n{}",
            what,
            query,
            format_candidates(&all)
        ),
        1 => Ok(matches[0].to_string()),
        _ => bail!(
            "ambiguous {} '{}'. Matches:\n{}",
            what,
            query,
            format_candidates(&matches)
        ),
    }
}

fn format_candidates(names: &[&str]) -> String {
    if names.is_empty() {
        return "  (none)".to_string();
    }
    names
        .iter()
        .map(|n| format!("  - {}", n))
        .collect::<Vec<_>>()
        .join("\n")
}

fn resolve_child<'a, M>(
    sc: &'a StudyCollection<M>,
    query: &str,
    what: &str,
) -> Result<&'a M> {
    let key = resolve_name(query, sc.all().keys().map(String::as_str), what)?;
    match sc.get(&key) {
        Some(material) => Ok(material),
        None => bail!("no {} named '{}'", what, key),
    }
}

fn resolve_child_mut<'a, M>(
    sc: &'a mut StudyCollection<M>,
    query: &str,
    what: &str,
) -> Result<&'a mut M> {
    let key = resolve_name(query, sc.all().keys().map(String::as_str), what)?;
    match sc.get_mut(&key) {
        Some(material) => Ok(material),
        None => bail!("no {} named '{}'", what, key),
    }
}

/// A borrowed view of any node in the hierarchy.
#[derive(Clone, Copy)]
pub enum Node<'a> {
    Semester(&'a Semester),
    Course(&'a Course),
    Topic(&'a Topic),
    Card(&'a Card),
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> MaterialKind {
        match self {
            Node::Semester(m) => m.kind(),
            Node::Course(m) => m.kind(),
            Node::Topic(m) => m.kind(),
            Node::Card(m) => m.kind(),
        }
    }

    pub fn name(&self) -> &'a str {
        match *self {
            Node::Semester(m) => m.name(),
            Node::Course(m) => m.name(),
            Node::Topic(m) => m.name(),
            Node::Card(m) => m.name(),
        }
    }

    pub fn confidence(&self) -> Confidence {
        match self {
            Node::Semester(m) => m.confidence(),
            Node::Course(m) => m.confidence(),
            Node::Topic(m) => m.confidence(),
            Node::Card(m) => m.confidence(),
        }
    }

    pub fn times_studied(&self) -> usize {
        match self {
            Node::Semester(m) => m.times_studied(),
            Node::Course(m) => m.times_studied(),
            Node::Topic(m) => m.times_studied(),
            Node::Card(m) => m.times_studied(),
        }
    }

    pub fn last_studied(&self) -> NaiveDate {
        match self {
            Node::Semester(m) => m.last_studied(),
            Node::Course(m) => m.last_studied(),
            Node::Topic(m) => m.last_studied(),
            Node::Card(m) => m.last_studied(),
        }
    }

    pub fn days_since_studied(&self) -> i64 {
        match self {
            Node::Semester(m) => m.days_since_studied(),
            Node::Course(m) => m.days_since_studied(),
            Node::Topic(m) => m.days_since_studied(),
            Node::Card(m) => m.days_since_studied(),
        }
    }

    pub fn count_cards(&self) -> usize {
        match self {
            Node::Semester(m) => m.count_cards(),
            Node::Course(m) => m.count_cards(),
            Node::Topic(m) => m.count_cards(),
            Node::Card(m) => m.count_cards(),
        }
    }

    /// Every card under this node, flattened.
    pub fn cards(&self) -> Vec<&'a Card> {
        match *self {
            Node::Semester(m) => m.all_cards(),
            Node::Course(m) => m.all_cards(),
            Node::Topic(m) => m.all_cards(),
            Node::Card(m) => vec![m],
        }
    }

    fn descend(&self, segment: &str) -> Result<Node<'a>> {
        match *self {
            Node::Semester(s) => Ok(Node::Course(resolve_child(s, segment, "course")?)),
            Node::Course(c) => Ok(Node::Topic(resolve_child(c, segment, "topic")?)),
            Node::Topic(t) => Ok(Node::Card(resolve_child(t, segment, "card")?)),
            Node::Card(c) => bail!("'{}' is a card; the path cannot go deeper", c.question()),
        }
    }
}

/// Resolves `path` from the semester root, returning the node it addresses
/// together with the exact (case-correct) names along the way.
pub fn walk<'a>(semester: &'a Semester, path: &[String]) -> Result<(Node<'a>, Vec<String>)> {
    let mut node = Node::Semester(semester);
    let mut exact = Vec::with_capacity(path.len());
    for segment in path {
        node = node.descend(segment)?;
        exact.push(node.name().to_string());
    }
    Ok((node, exact))
}

pub fn node_at<'a>(semester: &'a Semester, path: &[String]) -> Result<Node<'a>> {
    walk(semester, path).map(|(node, _)| node)
}

/// A mutable view of any node in the hierarchy.
pub enum NodeMut<'a> {
    Semester(&'a mut Semester),
    Course(&'a mut Course),
    Topic(&'a mut Topic),
    Card(&'a mut Card),
}

pub fn node_at_mut<'a>(semester: &'a mut Semester, path: &[String]) -> Result<NodeMut<'a>> {
    let mut node = NodeMut::Semester(semester);
    for segment in path {
        node = match node {
            NodeMut::Semester(s) => NodeMut::Course(resolve_child_mut(s, segment, "course")?),
            NodeMut::Course(c) => NodeMut::Topic(resolve_child_mut(c, segment, "topic")?),
            NodeMut::Topic(t) => NodeMut::Card(resolve_child_mut(t, segment, "card")?),
            NodeMut::Card(c) => {
                bail!("'{}' is a card; the path cannot go deeper", c.question())
            }
        };
    }
    Ok(node)
}

/// Records a study event on whatever node the path resolved to.
pub fn track_study_node(node: NodeMut<'_>, date: Option<NaiveDate>, confidence: Confidence) {
    fn study<M: Material>(material: &mut M, date: Option<NaiveDate>, confidence: Confidence) {
        match date {
            Some(date) => material.track_study_on(date, confidence),
            None => material.track_study(confidence),
        }
    }

    match node {
        NodeMut::Semester(m) => study(m, date, confidence),
        NodeMut::Course(m) => study(m, date, confidence),
        NodeMut::Topic(m) => study(m, date, confidence),
        NodeMut::Card(m) => study(m, date, confidence),
    }
}

/// A mutable view of a node that can hold children.
pub enum CollectionMut<'a> {
    Semester(&'a mut Semester),
    Course(&'a mut Course),
    Topic(&'a mut Topic),
}

pub fn collection_at_mut<'a>(
    semester: &'a mut Semester,
    path: &[String],
) -> Result<CollectionMut<'a>> {
    match node_at_mut(semester, path)? {
        NodeMut::Semester(s) => Ok(CollectionMut::Semester(s)),
        NodeMut::Course(c) => Ok(CollectionMut::Course(c)),
        NodeMut::Topic(t) => Ok(CollectionMut::Topic(t)),
        NodeMut::Card(c) => bail!("'{}' is a card and holds nothing", c.question()),
    }
}

impl CollectionMut<'_> {
    pub fn name(&self) -> &str {
        match self {
            CollectionMut::Semester(m) => m.name(),
            CollectionMut::Course(m) => m.name(),
            CollectionMut::Topic(m) => m.name(),
        }
    }

    /// What this collection's children are called.
    pub fn child_kind(&self) -> MaterialKind {
        match self {
            CollectionMut::Semester(_) => MaterialKind::Course,
            CollectionMut::Course(_) => MaterialKind::Topic,
            CollectionMut::Topic(_) => MaterialKind::Card,
        }
    }

    /// Resolves a child name the same way path segments resolve.
    pub fn resolve(&self, query: &str) -> Result<String> {
        let what = self.child_kind().as_str().to_lowercase();
        match self {
            CollectionMut::Semester(s) => {
                resolve_name(query, s.all().keys().map(String::as_str), &what)
            }
            CollectionMut::Course(c) => {
                resolve_name(query, c.all().keys().map(String::as_str), &what)
            }
            CollectionMut::Topic(t) => {
                resolve_name(query, t.all().keys().map(String::as_str), &what)
            }
        }
    }

    pub fn remove_child(&mut self, name: &str) -> Result<()> {
        match self {
            CollectionMut::Semester(s) => s.remove(name).map(|_| ())?,
            CollectionMut::Course(c) => c.remove(name).map(|_| ())?,
            CollectionMut::Topic(t) => t.remove(name).map(|_| ())?,
        }
        Ok(())
    }

    pub fn rename_child(&mut self, name: &str, new_name: &str) -> Result<()> {
        match self {
            CollectionMut::Semester(s) => s.edit_name(name, new_name).map(|_| ())?,
            CollectionMut::Course(c) => c.edit_name(name, new_name).map(|_| ())?,
            CollectionMut::Topic(t) => t.edit_name(name, new_name).map(|_| ())?,
        }
        Ok(())
    }
}
