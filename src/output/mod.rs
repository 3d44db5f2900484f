pub mod csv;
pub mod dashboard;
