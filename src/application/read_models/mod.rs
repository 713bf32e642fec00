//! Read models for CQRS-lite pattern
//!
//! This module contains the view-optimized report model: the rows of both
//! spreadsheet sheets, denormalized and in display order.

pub mod report_read_model;
pub mod report_read_model_builder;

pub use report_read_model::ReportReadModel;
pub use report_read_model_builder::ReportReadModelBuilder;
