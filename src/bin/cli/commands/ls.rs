use anyhow::{bail, Result};

use cram::study::{Material, MaterialKind, StudyCollection};

use crate::app::{node_at, App, Node};

struct Row {
    name: String,
    kind: MaterialKind,
    times_studied: usize,
    last_studied: String,
    confidence: String,
}

pub fn run(app: &App, semester_name: &str, path: &[String]) -> Result<()> {
    let semester = app.load_semester(semester_name)?;
    let node = node_at(&semester, path)?;

    let rows = match node {
        Node::Semester(s) => rows(s),
        Node::Course(c) => rows(c),
        Node::Topic(t) => rows(t),
        Node::Card(c) => bail!("'{}' is a card; use 'show' to see it", c.question()),
    };

    if rows.is_empty() {
        println!("There is nothing under \"{}\".", node.name());
        return Ok(());
    }

    let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(4).max(4);
    println!(
        "{:<name_w$}  {:<8}  {:>7}  {:<12}  {}",
        "Name",
        "Kind",
        "Studied",
        "Last",
        "Confidence",
        name_w = name_width
    );
    for row in &rows {
        println!(
            "{:<name_w$}  {:<8}  {:>7}  {:<12}  {}",
            row.name,
            row.kind.as_str(),
            row.times_studied,
            row.last_studied,
            row.confidence,
            name_w = name_width
        );
    }
    println!("\n{} thing(s) to study, most urgent first", rows.len());

    Ok(())
}

/// Children sorted by study priority, rendered into display rows.
fn rows<M: Material>(sc: &StudyCollection<M>) -> Vec<Row> {
    sc.sorted_by_priority()
        .into_iter()
        .map(|m| Row {
            name: m.name().to_string(),
            kind: m.kind(),
            times_studied: m.times_studied(),
            last_studied: m.last_studied().format("%Y-%m-%d").to_string(),
            confidence: m.confidence().to_string(),
        })
        .collect()
}
