//! cram — a personal study tracker
//!
//! Study material is organized in a four-level hierarchy (semester →
//! course → topic → card). Every node records when it was studied and how
//! confident you are in it, and collections can rank their children by
//! what most needs studying next. Semesters round-trip through JSON
//! documents on disk.

pub mod storage;
pub mod study;
