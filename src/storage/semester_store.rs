//! File-backed storage for semesters
//!
//! Each semester is one pretty-printed JSON document named after it, kept
//! flat in a data directory (e.g. `~/.local/share/cram/UBC.json`).

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::study::{Material, Semester};

use super::json;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed semester document: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage manager for semester documents.
pub struct SemesterStore {
    data_dir: PathBuf,
}

impl SemesterStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Platform data directory for the app (e.g. `~/.local/share/cram`).
    pub fn default_data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("cram"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Where the named semester lives on disk.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", name))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }

    /// Names of all stored semesters, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.data_dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Reads the named semester from the store.
    pub fn read(&self, name: &str) -> Result<Semester> {
        Self::read_path(&self.path_for(name))
    }

    /// Reads a semester document from an arbitrary path.
    pub fn read_path(path: &Path) -> Result<Semester> {
        let content = fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        json::semester_from_value(&value)
    }

    /// Writes the semester to its file, creating the data directory if
    /// needed. Returns the path written.
    pub fn write(&self, semester: &Semester) -> Result<PathBuf> {
        fs::create_dir_all(&self.data_dir)?;
        let path = self.path_for(semester.name());
        Self::write_path(semester, &path)?;
        Ok(path)
    }

    /// Writes a semester document to an arbitrary path.
    pub fn write_path(semester: &Semester, path: &Path) -> Result<()> {
        let value = json::semester_to_value(semester);
        fs::write(path, serde_json::to_string_pretty(&value)?)?;
        log::debug!("saved semester {} to {}", semester.name(), path.display());
        Ok(())
    }

    /// Deletes the named semester's file.
    pub fn delete(&self, name: &str) -> Result<()> {
        fs::remove_file(self.path_for(name))?;
        log::info!("deleted semester {}", name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::study::{Confidence, Course, Semester, Topic};

    fn store() -> (tempfile::TempDir, SemesterStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SemesterStore::new(dir.path().join("cram"));
        (dir, store)
    }

    #[test]
    fn test_write_then_read_round_trips() {
        let (_dir, store) = store();

        let mut semester = Semester::new("UBC");
        let mut course = Course::with_confidence("Biology", Confidence::Low);
        let mut topic = Topic::new("Cells");
        topic.add_card("What is DNA?", "Deoxyribonucleic acid").unwrap();
        course.add(topic).unwrap();
        semester.add(course).unwrap();

        let path = store.write(&semester).unwrap();
        assert!(path.ends_with("UBC.json"));

        let parsed = store.read("UBC").unwrap();
        assert_eq!(parsed, semester);
        assert_eq!(parsed.count_cards(), 1);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let (_dir, store) = store();
        let err = store.read("nope").unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }

    #[test]
    fn test_read_invalid_json_is_json_error() {
        let (_dir, store) = store();
        fs::create_dir_all(store.data_dir()).unwrap();
        fs::write(store.path_for("broken"), "not json {").unwrap();

        let err = store.read("broken").unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }

    #[test]
    fn test_read_wrong_shape_is_malformed() {
        let (_dir, store) = store();
        fs::create_dir_all(store.data_dir()).unwrap();
        fs::write(store.path_for("shape"), r#"{"name": "x"}"#).unwrap();

        let err = store.read("shape").unwrap_err();
        assert!(matches!(err, StorageError::Malformed(_)));
    }

    #[test]
    fn test_list_and_delete() {
        let (_dir, store) = store();
        assert!(store.list().unwrap().is_empty());

        store.write(&Semester::new("Winter")).unwrap();
        store.write(&Semester::new("Fall")).unwrap();
        assert_eq!(store.list().unwrap(), vec!["Fall", "Winter"]);
        assert!(store.exists("Fall"));

        store.delete("Fall").unwrap();
        assert_eq!(store.list().unwrap(), vec!["Winter"]);
        assert!(!store.exists("Fall"));
        assert!(store.delete("Fall").is_err());
    }
}
