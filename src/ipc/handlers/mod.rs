pub mod core;
pub mod grades;
pub mod journal;
pub mod students;
