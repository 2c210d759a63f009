pub mod error;
pub mod patient_repo;
