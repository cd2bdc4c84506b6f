//! Generic, priority-ordered collections of study materials
//!
//! A [`StudyCollection`] keys its children by name and is itself a
//! material, which is what makes the four-level hierarchy work: a
//! [`Semester`] holds [`Course`]s, a course holds [`Topic`]s, and a topic
//! holds [`Card`]s. All structural edits enforce the invariant that a
//! child's map key equals its name, and fail cleanly before mutating
//! anything.

use std::collections::HashMap;

use thiserror::Error;

use super::models::{Card, ChildMaterial, Confidence, Material, MaterialKind, StudyInfo};

/// Error raised by structural edits on a collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StudyError {
    /// The target name is already taken in the collection being edited.
    #[error("{kind} {collection} already contains {element}")]
    DuplicateElement {
        kind: MaterialKind,
        collection: String,
        element: String,
    },

    /// The named entry does not exist in the collection being edited.
    #[error("{kind} {collection} does not contain {element}")]
    NoElement {
        kind: MaterialKind,
        collection: String,
        element: String,
    },
}

impl StudyError {
    /// The name the failed edit was about.
    pub fn element(&self) -> &str {
        match self {
            StudyError::DuplicateElement { element, .. } => element,
            StudyError::NoElement { element, .. } => element,
        }
    }
}

pub type Result<T> = std::result::Result<T, StudyError>;

/// A named collection of study materials, keyed by child name.
///
/// Storage is unordered; [`sorted_by_priority`](Self::sorted_by_priority)
/// produces the study order.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyCollection<M> {
    pub(crate) info: StudyInfo,
    pub(crate) children: HashMap<String, M>,
}

/// A topic holding the cards you drill.
pub type Topic = StudyCollection<Card>;
/// A course holding topics.
pub type Course = StudyCollection<Topic>;
/// The root of the hierarchy, holding courses.
pub type Semester = StudyCollection<Course>;

impl<M> StudyCollection<M> {
    pub fn new(name: &str) -> Self {
        Self::with_confidence(name, Confidence::None)
    }

    pub fn with_confidence(name: &str, confidence: Confidence) -> Self {
        Self {
            info: StudyInfo::new(name, confidence),
            children: HashMap::new(),
        }
    }

    /// Looks up a child by name. Read-only lookups never fail.
    pub fn get(&self, name: &str) -> Option<&M> {
        self.children.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut M> {
        self.children.get_mut(name)
    }

    /// All children, keyed by name.
    pub fn all(&self) -> &HashMap<String, M> {
        &self.children
    }

    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<M: Material> StudyCollection<M> {
    /// Inserts `material` keyed by its name. Fails with
    /// [`StudyError::DuplicateElement`] if the name is taken; the collection
    /// is left unchanged.
    pub fn add(&mut self, material: M) -> Result<()> {
        if self.children.contains_key(material.name()) {
            return Err(self.err_duplicate(material.name()));
        }
        self.children.insert(material.name().to_string(), material);
        Ok(())
    }

    /// Best-effort bulk insert. Duplicates are skipped and logged, never
    /// propagated. Returns how many materials were actually inserted.
    pub fn add_all<I>(&mut self, materials: I) -> usize
    where
        I: IntoIterator<Item = M>,
    {
        let mut added = 0;
        for material in materials {
            match self.add(material) {
                Ok(()) => added += 1,
                Err(err) => log::warn!("skipping duplicate: {}", err),
            }
        }
        added
    }

    /// Removes and returns the child with `name`. Fails with
    /// [`StudyError::NoElement`] if absent.
    pub fn remove(&mut self, name: &str) -> Result<M> {
        match self.children.remove(name) {
            Some(material) => Ok(material),
            None => Err(self.err_no_element(name)),
        }
    }

    /// Removes a child by value identity, using its name as the key.
    pub fn remove_material(&mut self, material: &M) -> Result<M> {
        let name = material.name().to_string();
        self.remove(&name)
    }

    /// Renames the child `name` to `new_name` and re-keys it, returning the
    /// edited child. The duplicate check runs before the presence check, and
    /// nothing is modified on failure.
    pub fn edit_name(&mut self, name: &str, new_name: &str) -> Result<&M> {
        if self.children.contains_key(new_name) {
            return Err(self.err_duplicate(new_name));
        }
        let Some(mut material) = self.children.remove(name) else {
            return Err(self.err_no_element(name));
        };
        material.info_mut().set_name(new_name.to_string());
        self.children.insert(new_name.to_string(), material);
        Ok(&self.children[new_name])
    }

    /// Membership by value: true if an equal material is a child.
    pub fn contains_material(&self, material: &M) -> bool
    where
        M: PartialEq,
    {
        self.children.values().any(|m| m == material)
    }

    /// Children whose confidence equals `confidence` exactly.
    pub fn at_confidence(&self, confidence: Confidence) -> HashMap<&str, &M> {
        self.children
            .values()
            .filter(|m| m.confidence() == confidence)
            .map(|m| (m.name(), m))
            .collect()
    }

    /// Children whose confidence is at or below `confidence`.
    pub fn below_confidence(&self, confidence: Confidence) -> HashMap<&str, &M> {
        self.children
            .values()
            .filter(|m| m.confidence() <= confidence)
            .map(|m| (m.name(), m))
            .collect()
    }

    /// All children ordered by study priority: lowest confidence first,
    /// oldest last-study date first within a level. The sort is stable.
    pub fn sorted_by_priority(&self) -> Vec<&M> {
        let mut materials: Vec<&M> = self.children.values().collect();
        materials.sort_by(|a, b| a.priority_cmp(b));
        materials
    }

    /// Every card reachable below this collection, flattened.
    pub fn all_cards(&self) -> Vec<&Card> {
        let mut cards = Vec::new();
        self.collect_cards(&mut cards);
        cards
    }

    fn err_duplicate(&self, element: &str) -> StudyError {
        StudyError::DuplicateElement {
            kind: Self::KIND,
            collection: self.info.name.clone(),
            element: element.to_string(),
        }
    }

    fn err_no_element(&self, element: &str) -> StudyError {
        StudyError::NoElement {
            kind: Self::KIND,
            collection: self.info.name.clone(),
            element: element.to_string(),
        }
    }
}

impl<M: ChildMaterial> StudyCollection<M> {
    /// Creates a child of this collection's child kind and inserts it,
    /// returning the created material. Same duplicate-name failure as
    /// [`add`](Self::add).
    pub fn create(&mut self, name: &str, confidence: Confidence) -> Result<&M> {
        let material = M::named(name, confidence);
        let key = material.name().to_string();
        if self.children.contains_key(&key) {
            return Err(self.err_duplicate(&key));
        }
        self.children.insert(key.clone(), material);
        Ok(&self.children[&key])
    }
}

impl<M: Material> Material for StudyCollection<M> {
    const KIND: MaterialKind = M::KIND.container();

    fn info(&self) -> &StudyInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut StudyInfo {
        &mut self.info
    }

    fn count_cards(&self) -> usize {
        self.children.values().map(M::count_cards).sum()
    }

    fn collect_cards<'a>(&'a self, cards: &mut Vec<&'a Card>) {
        for material in self.children.values() {
            material.collect_cards(cards);
        }
    }
}

impl<M: ChildMaterial> ChildMaterial for StudyCollection<M> {
    fn named(name: &str, confidence: Confidence) -> Self {
        Self::with_confidence(name, confidence)
    }
}

/// Card-specific operations on topics.
impl StudyCollection<Card> {
    /// Adds a card with the given question and answer.
    pub fn add_card(&mut self, question: &str, answer: &str) -> Result<&Card> {
        let card = Card::new(question, answer);
        let key = card.question().to_string();
        if self.children.contains_key(&key) {
            return Err(self.err_duplicate(&key));
        }
        self.children.insert(key.clone(), card);
        Ok(&self.children[&key])
    }

    /// Replaces the answer of the card with `question`.
    pub fn edit_card_answer(&mut self, question: &str, answer: &str) -> Result<&Card> {
        let missing = self.err_no_element(question);
        match self.children.get_mut(question) {
            Some(card) => {
                card.set_answer(answer);
                Ok(card)
            }
            None => Err(missing),
        }
    }

    /// Renames a card's question; wrapper around
    /// [`edit_name`](Self::edit_name).
    pub fn edit_card_question(&mut self, question: &str, new_question: &str) -> Result<&Card> {
        self.edit_name(question, new_question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::study::models::today;
    use chrono::Duration;

    /// Semester with `courses` courses of `topics` topics of `cards` cards,
    /// named course0.., t0.., q0.. the way the persistence tests expect.
    fn seeded_semester(courses: usize, topics: usize, cards: usize) -> Semester {
        let mut semester = Semester::new("UBC");
        for c in 0..courses {
            let mut course = Course::new(&format!("course{}", c));
            for t in 0..topics {
                let mut topic = Topic::new(&format!("t{}", t));
                for q in 0..cards {
                    topic
                        .add_card(&format!("q{}", q), &format!("a{}", q))
                        .unwrap();
                }
                course.add(topic).unwrap();
            }
            semester.add(course).unwrap();
        }
        semester
    }

    #[test]
    fn test_add_two_distinct() {
        let mut course = Course::new("Biology");
        assert_eq!(course.len(), 0);

        course.add(Topic::new("Cells")).unwrap();
        course.add(Topic::new("Genetics")).unwrap();

        assert_eq!(course.len(), 2);
        assert!(course.get("Cells").is_some());
        assert!(course.get("Genetics").is_some());
        assert!(course.contains("Cells"));
        assert!(!course.contains("Evolution"));
        assert!(course.get("Evolution").is_none());
    }

    #[test]
    fn test_add_duplicate_leaves_collection_unchanged() {
        let mut course = Course::new("Biology");
        course.add(Topic::new("Cells")).unwrap();

        let err = course.add(Topic::new("Cells")).unwrap_err();
        assert_eq!(
            err,
            StudyError::DuplicateElement {
                kind: MaterialKind::Course,
                collection: "Biology".to_string(),
                element: "Cells".to_string(),
            }
        );
        assert_eq!(err.to_string(), "Course Biology already contains Cells");
        assert_eq!(course.len(), 1);
    }

    #[test]
    fn test_create_uses_child_factory() {
        let mut course = Course::new("Biology");
        let topic = course.create("Cells", Confidence::Low).unwrap();
        assert_eq!(topic.name(), "Cells");
        assert_eq!(topic.confidence(), Confidence::Low);
        assert_eq!(topic.kind(), MaterialKind::Topic);

        assert!(course.create("Cells", Confidence::None).is_err());
        assert_eq!(course.len(), 1);
    }

    #[test]
    fn test_remove_returns_subtree() {
        let mut semester = seeded_semester(1, 2, 3);
        let course = semester.remove("course0").unwrap();
        assert_eq!(course.count_cards(), 6);
        assert!(semester.is_empty());
    }

    #[test]
    fn test_remove_absent_fails_without_change() {
        let mut course = Course::new("Biology");
        course.add(Topic::new("Cells")).unwrap();

        let err = course.remove("Genetics").unwrap_err();
        assert!(matches!(err, StudyError::NoElement { .. }));
        assert_eq!(err.to_string(), "Course Biology does not contain Genetics");
        assert_eq!(course.len(), 1);
    }

    #[test]
    fn test_remove_material_by_value() {
        let mut course = Course::new("Biology");
        let topic = Topic::new("Cells");
        course.add(topic.clone()).unwrap();

        course.remove_material(&topic).unwrap();
        assert!(course.is_empty());
        assert!(course.remove_material(&topic).is_err());
    }

    #[test]
    fn test_edit_name_rekeys_and_renames() {
        let mut course = Course::new("Biology");
        course.add(Topic::new("Cells")).unwrap();

        let edited = course.edit_name("Cells", "Cell Biology").unwrap();
        assert_eq!(edited.name(), "Cell Biology");
        assert!(course.contains("Cell Biology"));
        assert!(!course.contains("Cells"));
        assert_eq!(course.len(), 1);

        // key and child name stay in sync
        for (key, topic) in course.all() {
            assert_eq!(key, topic.name());
        }
    }

    #[test]
    fn test_edit_name_duplicate_target_is_untouched() {
        let mut course = Course::new("Biology");
        let mut genetics = Topic::new("Genetics");
        genetics.track_study(Confidence::High);
        course.add(Topic::new("Cells")).unwrap();
        course.add(genetics.clone()).unwrap();

        let err = course.edit_name("Cells", "Genetics").unwrap_err();
        assert!(matches!(err, StudyError::DuplicateElement { .. }));
        assert!(course.contains("Cells"));
        assert_eq!(course.get("Genetics"), Some(&genetics));
    }

    #[test]
    fn test_edit_name_checks_duplicate_before_presence() {
        let mut course = Course::new("Biology");
        course.add(Topic::new("Genetics")).unwrap();

        // both failures apply; the duplicate check must win
        let err = course.edit_name("Missing", "Genetics").unwrap_err();
        assert!(matches!(err, StudyError::DuplicateElement { .. }));

        let err = course.edit_name("Missing", "Elsewhere").unwrap_err();
        assert!(matches!(err, StudyError::NoElement { .. }));
    }

    #[test]
    fn test_add_all_skips_duplicates() {
        let mut course = Course::new("Biology");
        course.add(Topic::new("Cells")).unwrap();

        let added = course.add_all(vec![
            Topic::new("Cells"),
            Topic::new("Genetics"),
            Topic::new("Genetics"),
        ]);

        assert_eq!(added, 1);
        assert_eq!(course.len(), 2);
    }

    #[test]
    fn test_contains_material() {
        let mut course = Course::new("Biology");
        let topic = Topic::new("Cells");
        course.add(topic.clone()).unwrap();

        assert!(course.contains_material(&topic));

        let mut studied = topic.clone();
        studied.track_study(Confidence::High);
        assert!(!course.contains_material(&studied));
    }

    #[test]
    fn test_at_confidence_is_exact() {
        let mut topic = Topic::new("Cells");
        topic.create("q1", Confidence::None).unwrap();
        topic.create("q2", Confidence::Low).unwrap();
        topic.create("q3", Confidence::Medium).unwrap();
        topic.create("q4", Confidence::Medium).unwrap();

        let medium = topic.at_confidence(Confidence::Medium);
        assert_eq!(medium.len(), 2);
        assert!(medium.contains_key("q3"));
        assert!(medium.contains_key("q4"));
        assert!(topic.at_confidence(Confidence::High).is_empty());
    }

    #[test]
    fn test_below_confidence_is_inclusive() {
        let mut topic = Topic::new("Cells");
        topic.create("q1", Confidence::None).unwrap();
        topic.create("q2", Confidence::Low).unwrap();
        topic.create("q3", Confidence::Medium).unwrap();
        topic.create("q4", Confidence::High).unwrap();

        let below = topic.below_confidence(Confidence::Medium);
        assert_eq!(below.len(), 3);
        assert!(below.contains_key("q1"));
        assert!(below.contains_key("q2"));
        assert!(below.contains_key("q3"));

        assert_eq!(topic.below_confidence(Confidence::High).len(), 4);
    }

    #[test]
    fn test_sorted_by_priority() {
        let mut topic = Topic::new("Cells");
        topic.add(Card::with_confidence("known", "a", Confidence::High)).unwrap();
        topic.add(Card::with_confidence("shaky", "a", Confidence::Low)).unwrap();
        topic.add(Card::with_confidence("new", "a", Confidence::None)).unwrap();

        let mut stale = Card::with_confidence("stale", "a", Confidence::Low);
        stale
            .info_mut()
            .set_study_dates(vec![today() - Duration::days(10)]);
        topic.add(stale).unwrap();

        let names: Vec<&str> = topic
            .sorted_by_priority()
            .iter()
            .map(|c| c.question())
            .collect();
        assert_eq!(names, vec!["new", "stale", "shaky", "known"]);

        // non-decreasing priority key, stable across repeated calls
        let sorted = topic.sorted_by_priority();
        for pair in sorted.windows(2) {
            assert_ne!(
                pair[0].priority_cmp(pair[1]),
                std::cmp::Ordering::Greater
            );
        }
        assert_eq!(names, topic
            .sorted_by_priority()
            .iter()
            .map(|c| c.question())
            .collect::<Vec<_>>());
    }

    #[test]
    fn test_count_cards_recurses() {
        let mut semester = seeded_semester(2, 3, 4);
        assert_eq!(semester.count_cards(), 24);
        assert_eq!(semester.get("course0").unwrap().count_cards(), 12);
        assert_eq!(
            semester.get("course0").unwrap().get("t0").unwrap().count_cards(),
            4
        );

        semester
            .get_mut("course0")
            .unwrap()
            .get_mut("t0")
            .unwrap()
            .add_card("q99", "a99")
            .unwrap();
        assert_eq!(semester.count_cards(), 25);

        semester.get_mut("course1").unwrap().remove("t1").unwrap();
        assert_eq!(semester.count_cards(), 21);
    }

    #[test]
    fn test_all_cards_flattens() {
        let semester = seeded_semester(2, 3, 4);
        let cards = semester.all_cards();
        assert_eq!(cards.len(), 24);
        assert!(cards.iter().all(|c| c.question().starts_with('q')));

        let topic = semester.get("course0").unwrap().get("t0").unwrap();
        assert_eq!(topic.all_cards().len(), topic.len());
    }

    #[test]
    fn test_collection_kinds() {
        assert_eq!(Topic::KIND, MaterialKind::Topic);
        assert_eq!(Course::KIND, MaterialKind::Course);
        assert_eq!(Semester::KIND, MaterialKind::Semester);
        assert_eq!(Semester::new("s").kind(), MaterialKind::Semester);
    }

    #[test]
    fn test_card_answer_editing() {
        let mut topic = Topic::new("Bio");
        topic.add_card("What is DNA?", "").unwrap();

        let card = topic
            .edit_card_answer("What is DNA?", "Deoxyribonucleic acid")
            .unwrap();
        assert_eq!(card.answer(), "Deoxyribonucleic acid");
        assert_eq!(topic.count_cards(), 1);
        assert_eq!(
            topic.get("What is DNA?").unwrap().answer(),
            "Deoxyribonucleic acid"
        );

        let err = topic.edit_card_answer("What is RNA?", "x").unwrap_err();
        assert!(matches!(err, StudyError::NoElement { .. }));
    }

    #[test]
    fn test_card_question_editing() {
        let mut topic = Topic::new("Bio");
        topic.add_card("What is DNA", "Deoxyribonucleic acid").unwrap();

        let card = topic
            .edit_card_question("What is DNA", "What is DNA?")
            .unwrap();
        assert_eq!(card.question(), "What is DNA?");
        assert!(topic.contains("What is DNA?"));
        assert!(!topic.contains("What is DNA"));
    }

    #[test]
    fn test_collection_equality() {
        let semester = seeded_semester(2, 2, 2);
        let mut clone = semester.clone();
        assert_eq!(semester, clone);

        clone
            .get_mut("course0")
            .unwrap()
            .track_study(Confidence::High);
        assert_ne!(semester, clone);
    }

    #[test]
    fn test_track_study_on_collection() {
        let mut semester = Semester::new("UBC");
        semester.track_study(Confidence::Medium);
        assert_eq!(semester.confidence(), Confidence::Medium);
        assert_eq!(semester.times_studied(), 2);
    }
}
