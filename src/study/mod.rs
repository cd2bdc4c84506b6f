//! The study hierarchy: Semester → Course → Topic → Card
//!
//! This module provides:
//! - The shared study record (name, confidence, study-date history)
//! - Flashcards with a question/answer pair
//! - The generic name-keyed collection the three upper levels are built on
//! - Priority ordering and the structural-edit error taxonomy

pub mod collection;
pub mod models;

pub use collection::{Course, Semester, StudyCollection, StudyError, Topic};
pub use models::{Card, ChildMaterial, Confidence, Material, MaterialKind, StudyInfo};
