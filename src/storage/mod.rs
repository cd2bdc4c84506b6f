mod json;
mod semester_store;

pub use semester_store::{SemesterStore, StorageError};
