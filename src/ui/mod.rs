pub mod dashboard;
pub mod panels;
