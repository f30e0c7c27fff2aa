//! # Planifica+ Core
//!
//! Contains all non-UI logic for the Planifica+ finance tracker: the
//! natural-language time-range parser and the financial aggregation and
//! reporting services.
//!
//! This crate is designed to be UI-agnostic. It performs no I/O, never reads
//! the system clock, and holds no state between calls: every operation is a
//! pure function of the record collection and the query parameters the
//! caller passes in. Authentication, persistence, and rendering live in
//! external layers that consume the DTOs defined in the `shared` crate.
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (chat assistant, statement table, charts)
//!     ↓
//! Domain Layer (time range parsing, aggregation, reporting)
//!     ↓
//! External data layer (records supplied read-only by the caller)
//! ```

pub mod domain;
pub mod error;

pub use domain::assistant_service::AssistantService;
pub use domain::report_service::ReportService;
pub use domain::time_range_service::TimeRangeService;
pub use error::ReportError;
