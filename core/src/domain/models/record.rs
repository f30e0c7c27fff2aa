//! Domain view of a transaction record with a parsed timestamp.
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use shared::TransactionRecord;

use crate::error::ReportError;

/// A transaction record paired with its parsed instant and coerced amount.
///
/// The DTO carries `occurred_at` as a string and `amount` as an optional
/// float; aggregation works on this view instead, so date parsing happens
/// exactly once per record per operation and a bad timestamp surfaces as a
/// typed error instead of a nonsensical bucket.
#[derive(Debug, Clone)]
pub struct ParsedRecord<'a> {
    pub record: &'a TransactionRecord,
    pub occurred_at: NaiveDateTime,
    pub amount: f64,
}

impl<'a> ParsedRecord<'a> {
    /// Build the domain view of a record.
    ///
    /// Fails with `MalformedRecord` when `occurred_at` is unparseable; a
    /// missing or non-finite amount coerces to zero and never fails.
    pub fn try_from_dto(record: &'a TransactionRecord) -> Result<Self, ReportError> {
        let occurred_at =
            parse_instant(&record.occurred_at).ok_or_else(|| ReportError::MalformedRecord {
                id: record.id.clone(),
                raw: record.occurred_at.clone(),
            })?;
        Ok(Self {
            record,
            occurred_at,
            amount: coerce_amount(record.amount),
        })
    }

    /// Parse the whole collection, aborting on the first malformed record.
    pub fn parse_all(records: &'a [TransactionRecord]) -> Result<Vec<Self>, ReportError> {
        records.iter().map(Self::try_from_dto).collect()
    }
}

/// Parse a timestamp string into a local wall-clock instant.
///
/// Accepts RFC 3339 (any offset is taken at face value and discarded),
/// "YYYY-MM-DDTHH:MM:SS" with optional fractional seconds, and a bare
/// "YYYY-MM-DD" which means midnight of that day.
pub fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?);
    }
    None
}

/// Coerce an optional amount into a usable non-negative number.
///
/// Missing, NaN, infinite, and negative amounts all count as zero so that
/// aggregation is total over any input collection.
pub fn coerce_amount(amount: Option<f64>) -> f64 {
    match amount {
        Some(a) if a.is_finite() && a >= 0.0 => a,
        _ => 0.0,
    }
}
