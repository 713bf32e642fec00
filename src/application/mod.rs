/// Application layer - Use cases, DTOs and read models
///
/// This layer orchestrates the pipeline stages and talks to the
/// outside world only through ports.
pub mod dto;
pub mod read_models;
pub mod use_cases;
