pub mod info;
pub mod schools;
pub mod students;
