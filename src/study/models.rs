//! Data models for study materials
//!
//! Every node in the semester hierarchy shares the same study record: a
//! name, a self-assessed confidence level, and the list of dates it was
//! studied, most recent first. Creating a material counts as its first
//! study event, so the date list is never empty.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Self-assessed confidence in a material, lowest to highest.
///
/// The ordering drives study priority: lower confidence sorts first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::None => "NONE",
            Confidence::Low => "LOW",
            Confidence::Medium => "MEDIUM",
            Confidence::High => "HIGH",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Confidence {
    type Err = String;

    /// Accepts the level name (any case) or its 0-3 ordinal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "0" => Ok(Confidence::None),
            "low" | "1" => Ok(Confidence::Low),
            "medium" | "2" => Ok(Confidence::Medium),
            "high" | "3" => Ok(Confidence::High),
            other => Err(format!(
                "unknown confidence '{}', expected none/low/medium/high or 0-3",
                other
            )),
        }
    }
}

/// Runtime tag naming the concrete material type at each hierarchy level.
///
/// Carried explicitly so callers (and the on-disk format) can name a node's
/// level without reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Card,
    Topic,
    Course,
    Semester,
}

impl MaterialKind {
    /// The kind of collection that holds children of this kind. Semesters
    /// are never contained in anything and map to themselves.
    pub const fn container(self) -> MaterialKind {
        match self {
            MaterialKind::Card => MaterialKind::Topic,
            MaterialKind::Topic => MaterialKind::Course,
            MaterialKind::Course => MaterialKind::Semester,
            MaterialKind::Semester => MaterialKind::Semester,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialKind::Card => "Card",
            MaterialKind::Topic => "Topic",
            MaterialKind::Course => "Course",
            MaterialKind::Semester => "Semester",
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Today's calendar date in the local timezone.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The study record shared by every material.
///
/// `study_dates` is ordered most recent first and never empty; element 0 is
/// written at construction time. Names are only renamed through the owning
/// collection so the parent's map key always matches.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyInfo {
    pub(crate) name: String,
    pub(crate) confidence: Confidence,
    pub(crate) study_dates: Vec<NaiveDate>,
}

impl StudyInfo {
    /// New record named `name` (surrounding whitespace trimmed), studied
    /// today for the first time.
    pub fn new(name: &str, confidence: Confidence) -> Self {
        Self {
            name: name.trim().to_string(),
            confidence,
            study_dates: vec![today()],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// All study dates, most recent first.
    pub fn study_dates(&self) -> &[NaiveDate] {
        &self.study_dates
    }

    pub fn last_studied(&self) -> NaiveDate {
        self.study_dates[0]
    }

    /// How many times this was studied; creation counts.
    pub fn times_studied(&self) -> usize {
        self.study_dates.len()
    }

    pub fn days_since_studied(&self) -> i64 {
        (today() - self.last_studied()).num_days()
    }

    /// Records a study event today and overwrites the confidence.
    pub fn track_study(&mut self, confidence: Confidence) {
        self.track_study_on(today(), confidence);
    }

    /// Records a study event on `date`. Dates are prepended as given; no
    /// chronological ordering is enforced.
    pub fn track_study_on(&mut self, date: NaiveDate, confidence: Confidence) {
        self.study_dates.insert(0, date);
        self.confidence = confidence;
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_study_dates(&mut self, dates: Vec<NaiveDate>) {
        debug_assert!(!dates.is_empty(), "study dates must never be empty");
        self.study_dates = dates;
    }

    fn priority_key(&self) -> (Confidence, NaiveDate) {
        (self.confidence, self.last_studied())
    }
}

/// Uniform access to the study record of any node in the hierarchy.
pub trait Material {
    /// Tag for this concrete type.
    const KIND: MaterialKind;

    fn info(&self) -> &StudyInfo;
    fn info_mut(&mut self) -> &mut StudyInfo;

    /// Number of card leaves reachable from this node.
    fn count_cards(&self) -> usize;

    /// Collects every reachable card, depth first.
    fn collect_cards<'a>(&'a self, cards: &mut Vec<&'a Card>);

    fn kind(&self) -> MaterialKind {
        Self::KIND
    }

    fn name(&self) -> &str {
        self.info().name()
    }

    fn confidence(&self) -> Confidence {
        self.info().confidence()
    }

    fn study_dates(&self) -> &[NaiveDate] {
        self.info().study_dates()
    }

    fn last_studied(&self) -> NaiveDate {
        self.info().last_studied()
    }

    fn times_studied(&self) -> usize {
        self.info().times_studied()
    }

    fn days_since_studied(&self) -> i64 {
        self.info().days_since_studied()
    }

    fn track_study(&mut self, confidence: Confidence) {
        self.info_mut().track_study(confidence);
    }

    fn track_study_on(&mut self, date: NaiveDate, confidence: Confidence) {
        self.info_mut().track_study_on(date, confidence);
    }

    /// Ascending order is highest study priority first: lowest confidence,
    /// then oldest last-study date.
    fn priority_cmp(&self, other: &Self) -> Ordering {
        self.info().priority_key().cmp(&other.info().priority_key())
    }
}

/// A material that can live inside a collection: it can be constructed
/// from just a name and confidence by the parent's factory.
pub trait ChildMaterial: Material + PartialEq {
    fn named(name: &str, confidence: Confidence) -> Self;
}

/// A flashcard. Its name doubles as the question.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub(crate) info: StudyInfo,
    pub(crate) answer: String,
}

impl Card {
    pub fn new(question: &str, answer: &str) -> Self {
        Self::with_confidence(question, answer, Confidence::None)
    }

    pub fn with_confidence(question: &str, answer: &str, confidence: Confidence) -> Self {
        Self {
            info: StudyInfo::new(question, confidence),
            answer: answer.to_string(),
        }
    }

    pub fn question(&self) -> &str {
        self.info.name()
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub(crate) fn set_answer(&mut self, answer: &str) {
        self.answer = answer.to_string();
    }
}

impl Material for Card {
    const KIND: MaterialKind = MaterialKind::Card;

    fn info(&self) -> &StudyInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut StudyInfo {
        &mut self.info
    }

    fn count_cards(&self) -> usize {
        1
    }

    fn collect_cards<'a>(&'a self, cards: &mut Vec<&'a Card>) {
        cards.push(self);
    }
}

impl ChildMaterial for Card {
    /// Cards created through a collection factory start with a blank answer.
    fn named(name: &str, confidence: Confidence) -> Self {
        Self::with_confidence(name, "", confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::None < Confidence::Low);
        assert!(Confidence::Low < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::High);
    }

    #[test]
    fn test_confidence_labels() {
        assert_eq!(Confidence::None.to_string(), "NONE");
        assert_eq!(Confidence::High.to_string(), "HIGH");
        assert_eq!("medium".parse::<Confidence>(), Ok(Confidence::Medium));
        assert_eq!("HIGH".parse::<Confidence>(), Ok(Confidence::High));
        assert_eq!("2".parse::<Confidence>(), Ok(Confidence::Medium));
        assert!("great".parse::<Confidence>().is_err());
    }

    #[test]
    fn test_new_info_counts_creation_as_first_study() {
        let info = StudyInfo::new("Cell Biology", Confidence::None);
        assert_eq!(info.name(), "Cell Biology");
        assert_eq!(info.confidence(), Confidence::None);
        assert_eq!(info.times_studied(), 1);
        assert_eq!(info.last_studied(), today());
        assert_eq!(info.days_since_studied(), 0);
    }

    #[test]
    fn test_new_info_trims_name() {
        let info = StudyInfo::new("  Mitosis \n", Confidence::Low);
        assert_eq!(info.name(), "Mitosis");
    }

    #[test]
    fn test_track_study_prepends_and_overwrites_confidence() {
        let mut info = StudyInfo::new("Mitosis", Confidence::None);
        let yesterday = today() - Duration::days(1);

        info.track_study_on(yesterday, Confidence::Low);
        info.track_study(Confidence::High);

        assert_eq!(info.times_studied(), 3);
        assert_eq!(info.confidence(), Confidence::High);
        assert_eq!(info.study_dates()[0], today());
        assert_eq!(info.study_dates()[1], yesterday);
        assert_eq!(info.study_dates()[2], today());
    }

    #[test]
    fn test_days_since_studied() {
        let mut info = StudyInfo::new("Mitosis", Confidence::None);
        info.track_study_on(today() - Duration::days(3), Confidence::Low);
        assert_eq!(info.days_since_studied(), 3);
    }

    #[test]
    fn test_card_question_and_answer() {
        let card = Card::new(" What is DNA? ", "Deoxyribonucleic acid");
        assert_eq!(card.question(), "What is DNA?");
        assert_eq!(card.name(), "What is DNA?");
        assert_eq!(card.answer(), "Deoxyribonucleic acid");
        assert_eq!(card.kind(), MaterialKind::Card);
        assert_eq!(card.count_cards(), 1);
    }

    #[test]
    fn test_card_factory_uses_blank_answer() {
        let card = Card::named("What is RNA?", Confidence::Low);
        assert_eq!(card.answer(), "");
        assert_eq!(card.confidence(), Confidence::Low);
    }

    #[test]
    fn test_priority_orders_by_confidence_then_recency() {
        let mut weak = Card::new("q1", "a1");
        let mut strong = Card::new("q2", "a2");
        weak.track_study_on(today(), Confidence::Low);
        strong.track_study_on(today(), Confidence::High);
        assert_eq!(weak.priority_cmp(&strong), Ordering::Less);

        let mut stale = Card::new("q3", "a3");
        let mut fresh = Card::new("q4", "a4");
        stale.info_mut().set_study_dates(vec![today() - Duration::days(7)]);
        fresh.info_mut().set_study_dates(vec![today()]);
        stale.info_mut().confidence = Confidence::Low;
        fresh.info_mut().confidence = Confidence::Low;
        assert_eq!(stale.priority_cmp(&fresh), Ordering::Less);
    }

    #[test]
    fn test_card_equality_includes_dates_and_confidence() {
        let a = Card::new("q", "a");
        let mut b = a.clone();
        assert_eq!(a, b);

        b.track_study(Confidence::Low);
        assert_ne!(a, b);
    }
}
