//! # Domain Module
//!
//! Business logic for the Planifica+ reporting core.
//!
//! ## Module Organization
//!
//! - **time_range_service**: natural-language (Spanish) period parsing into
//!   concrete time intervals
//! - **report_service**: range filtering, totals, category breakdowns,
//!   monthly grouping with carry-over balances
//! - **assistant_service**: orchestration of a free-text period question
//!   into a structured summary
//! - **models**: internal domain model with parsed timestamps
//! - **commands**: domain-level query types, distinct from the public DTOs
//!
//! ## Business Rules
//!
//! - A missing or non-numeric amount counts as zero; it never fails a query
//! - An unparseable timestamp aborts the operation with a typed error
//! - Weeks start on Monday; all dates are local wall-clock
//! - Every derived value is recomputed from the live record collection on
//!   each call; nothing is cached or mutated in place

pub mod assistant_service;
pub mod commands;
pub mod models;
pub mod report_service;
pub mod time_range_service;

pub use assistant_service::AssistantService;
pub use report_service::ReportService;
pub use time_range_service::TimeRangeService;
