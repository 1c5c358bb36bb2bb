pub mod index;
pub mod records;
pub mod students;
pub mod teachers;
