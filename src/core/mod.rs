// Core domain layer - models and error types, free of I/O

pub mod errors;
pub mod models;
