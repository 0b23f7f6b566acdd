//! Financial report generation.
//!
//! This module derives reports from posted lines:
//! - Trial Balance
//! - Income Statement
//! - Balance Sheet

pub mod aggregate;
pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::{ReportEngine, ReportService};
pub use types::*;
