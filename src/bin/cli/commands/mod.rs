pub mod edit;
pub mod list;
pub mod ls;
pub mod quiz;
pub mod show;
pub mod study;
pub mod tree;
