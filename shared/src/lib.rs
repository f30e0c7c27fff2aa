use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single income or expense movement, as delivered by the external data
/// store. The core never creates, mutates, or persists these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Opaque unique identifier, stable for the record's lifetime
    pub id: String,
    /// Whether this movement is money spent or money received
    pub kind: TransactionKind,
    /// Free-text category label ("Comida", "Transporte", ...); no closed
    /// taxonomy is enforced here
    pub category: String,
    /// Transaction amount in the account currency. A missing or non-numeric
    /// amount is treated as zero by every aggregation operation
    pub amount: Option<f64>,
    /// When the transaction happened (RFC 3339 or "YYYY-MM-DD[THH:MM:SS]").
    /// This is the sole ordering and bucketing key
    pub occurred_at: String,
    /// Optional free-text annotation
    pub description: Option<String>,
}

/// Kind of transaction for aggregation and rendering purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money received
    Income,
    /// Money spent
    Expense,
}

/// A concrete time window produced by the time-range parser.
///
/// Bounds are inclusive on both ends and carry local wall-clock semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Human-readable description of the window (e.g. "esta semana")
    pub label: String,
}

/// Expense or income total for a single category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Summary of activity inside a queried time window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSummary {
    /// Label of the analysed period, as produced by the parser
    pub label: String,
    pub total_expense: f64,
    pub total_income: f64,
    /// `total_income - total_expense`
    pub balance: f64,
    /// Expense category with the highest in-range total; absent when the
    /// window contains no expenses
    pub top_category: Option<CategoryTotal>,
    /// Mean amount over all expense records ever supplied, not range-filtered
    pub historical_average_expense: f64,
    /// Set when in-range spending exceeds the historical average by more
    /// than 40%
    pub overspending_alert: bool,
    /// Set when the window contains neither expenses nor incomes.
    /// Informational, not an error
    pub no_activity: bool,
}

/// Totals for one calendar month of activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Year-month key in "YYYY-MM" format; unique per calendar month and
    /// chronologically sortable
    pub key: String,
    pub expense_total: f64,
    pub income_total: f64,
    /// `income_total - expense_total` for this month alone
    pub net_balance: f64,
    /// Running sum of `net_balance` over all months up to and including this
    /// one; a deficit this month carries into the next month's position
    pub cumulative_balance: f64,
    /// Expense records belonging to the month, in insertion order
    pub expenses: Vec<TransactionRecord>,
    /// Income records belonging to the month, in insertion order
    pub incomes: Vec<TransactionRecord>,
}

/// Statement of results: every month of activity in chronological order,
/// plus the grand-totals column of the statement table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStatement {
    pub months: Vec<MonthBucket>,
    pub total_expense: f64,
    pub total_income: f64,
    /// Overall net position (equals the last month's cumulative balance)
    pub total_net: f64,
}

/// Outcome of a natural-language period question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssistantReply {
    /// The question contained no recognisable temporal expression; the
    /// caller should render a fallback hint
    NotRecognized,
    /// The period was understood and analysed
    Summary(RangeSummary),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_time_interval_serializes_wall_clock_instants() {
        let interval = TimeInterval {
            start: NaiveDate::from_ymd_opt(2024, 3, 6)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 10)
                .unwrap()
                .and_hms_opt(23, 59, 59)
                .unwrap(),
            label: "los últimos 5 días".to_string(),
        };

        let json = serde_json::to_string(&interval).unwrap();
        assert!(json.contains("2024-03-06T00:00:00"));
        assert!(json.contains("2024-03-10T23:59:59"));

        let back: TimeInterval = serde_json::from_str(&json).unwrap();
        assert_eq!(back, interval);
    }

    #[test]
    fn test_transaction_record_deserializes_with_missing_optionals() {
        let json = r#"{
            "id": "rec-1",
            "kind": "Expense",
            "category": "Comida",
            "amount": null,
            "occurred_at": "2024-01-05",
            "description": null
        }"#;

        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, TransactionKind::Expense);
        assert_eq!(record.amount, None);
        assert_eq!(record.description, None);
    }
}
