pub mod school;
pub mod student;
