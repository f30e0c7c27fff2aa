//! Error taxonomy for the reporting domain.
//!
//! An unrecognised time expression is *not* an error (the parser returns
//! `None` and the assistant returns `AssistantReply::NotRecognized`), and an
//! empty record collection is not an error either. The only hard failure is
//! a record whose timestamp cannot be parsed.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    /// A record carried an unparseable `occurred_at` timestamp. Aggregation
    /// aborts rather than silently dropping the record from date buckets.
    #[error("record {id} has an unparseable timestamp: {raw:?}")]
    MalformedRecord { id: String, raw: String },
}
