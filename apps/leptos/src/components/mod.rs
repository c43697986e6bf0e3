pub mod appointments;
pub mod common;
pub mod dashboard;
pub mod entry;
pub mod forms;
pub mod patients;
pub mod records;
pub mod registration;
pub mod reports;
pub mod sidebar;
pub mod toast;
