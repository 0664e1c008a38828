pub mod access;
pub mod dashboard;
pub mod pages;
pub mod reports;
