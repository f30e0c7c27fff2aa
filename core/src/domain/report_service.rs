//! Financial aggregation and reporting for the Planifica+ tracker.
//!
//! This service turns the live record collection into the numbers the UI
//! renders: range summaries for the assistant, the statement-of-results
//! table with month-to-month carry-over, and the category breakdowns behind
//! the pie and bar charts.
//!
//! Every operation recomputes its result from the records it is handed;
//! nothing is cached and the input collection is never mutated. Results do
//! not depend on the iteration order of the collection beyond the documented
//! insertion-order guarantees (bucket item lists and category tie-breaks).

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::{debug, info};
use shared::{
    CategoryTotal, MonthBucket, MonthlyStatement, RangeSummary, TimeInterval, TransactionKind,
    TransactionRecord,
};

use crate::domain::models::ParsedRecord;
use crate::error::ReportError;

/// Multiplier over the historical average expense beyond which a range is
/// flagged as overspending (strict inequality).
const OVERSPENDING_FACTOR: f64 = 1.4;

/// Service responsible for totals, breakdowns, and monthly grouping.
#[derive(Clone)]
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// Records whose instant falls within the interval, both ends inclusive.
    ///
    /// Fails fast with `MalformedRecord` on the first unparseable timestamp
    /// instead of silently dropping the record from the window.
    pub fn filter_by_range<'a>(
        &self,
        records: &'a [TransactionRecord],
        range: &TimeInterval,
    ) -> Result<Vec<&'a TransactionRecord>, ReportError> {
        let parsed = ParsedRecord::parse_all(records)?;
        Ok(parsed
            .into_iter()
            .filter(|p| p.occurred_at >= range.start && p.occurred_at <= range.end)
            .map(|p| p.record)
            .collect())
    }

    /// Summarise activity inside a time window.
    ///
    /// Totals and the top expense category are computed over the in-range
    /// records only; the historical average expense is computed over every
    /// expense record ever supplied, so the overspending alert compares the
    /// queried period against the user's overall habits.
    pub fn summarize(
        &self,
        records: &[TransactionRecord],
        range: &TimeInterval,
    ) -> Result<RangeSummary, ReportError> {
        let parsed = ParsedRecord::parse_all(records)?;

        let in_range: Vec<&ParsedRecord> = parsed
            .iter()
            .filter(|p| p.occurred_at >= range.start && p.occurred_at <= range.end)
            .collect();

        let mut total_expense = 0.0;
        let mut total_income = 0.0;
        let mut expense_count = 0usize;
        let mut income_count = 0usize;
        let mut expense_views = Vec::new();
        for p in &in_range {
            match p.record.kind {
                TransactionKind::Expense => {
                    total_expense += p.amount;
                    expense_count += 1;
                    expense_views.push(*p);
                }
                TransactionKind::Income => {
                    total_income += p.amount;
                    income_count += 1;
                }
            }
        }
        let balance = total_income - total_expense;

        // Strict comparison keeps the first-encountered category on ties
        let mut top_category: Option<CategoryTotal> = None;
        for candidate in self.category_totals_from(expense_views.iter().copied()) {
            let beats_current = match &top_category {
                Some(current) => candidate.total > current.total,
                None => true,
            };
            if beats_current {
                top_category = Some(candidate);
            }
        }

        // Mean over ALL expense records ever supplied, never range-filtered;
        // max(1, count) keeps the empty collection at average 0
        let all_expenses: Vec<&ParsedRecord> = parsed
            .iter()
            .filter(|p| p.record.kind == TransactionKind::Expense)
            .collect();
        let historical_total: f64 = all_expenses.iter().map(|p| p.amount).sum();
        let historical_average_expense = historical_total / all_expenses.len().max(1) as f64;

        let overspending_alert = total_expense > historical_average_expense * OVERSPENDING_FACTOR;
        let no_activity = expense_count == 0 && income_count == 0;

        info!(
            "summarized {:?}: expenses {:.2}, incomes {:.2}, balance {:.2}, alert {}",
            range.label, total_expense, total_income, balance, overspending_alert
        );

        Ok(RangeSummary {
            label: range.label.clone(),
            total_expense,
            total_income,
            balance,
            top_category,
            historical_average_expense,
            overspending_alert,
            no_activity,
        })
    }

    /// Group records into calendar-month buckets in chronological order.
    ///
    /// Each bucket carries per-kind totals, the month's own net balance, and
    /// the cumulative balance carried over from every preceding month.
    pub fn group_by_month(
        &self,
        records: &[TransactionRecord],
    ) -> Result<Vec<MonthBucket>, ReportError> {
        let parsed = ParsedRecord::parse_all(records)?;

        let mut buckets: HashMap<String, MonthBucket> = HashMap::new();
        for p in &parsed {
            let key = month_key(p.occurred_at);
            let bucket = buckets.entry(key.clone()).or_insert_with(|| MonthBucket {
                key,
                expense_total: 0.0,
                income_total: 0.0,
                net_balance: 0.0,
                cumulative_balance: 0.0,
                expenses: Vec::new(),
                incomes: Vec::new(),
            });
            match p.record.kind {
                TransactionKind::Expense => {
                    bucket.expense_total += p.amount;
                    bucket.expenses.push(p.record.clone());
                }
                TransactionKind::Income => {
                    bucket.income_total += p.amount;
                    bucket.incomes.push(p.record.clone());
                }
            }
        }

        // Chronological order comes from parsing each key back to a date
        let mut ordered: Vec<MonthBucket> = buckets.into_values().collect();
        ordered.sort_by_key(|b| month_key_date(&b.key));

        // Single left-to-right pass: a deficit this month reduces the
        // cumulative position shown for every month after it
        let mut running = 0.0;
        for bucket in &mut ordered {
            bucket.net_balance = bucket.income_total - bucket.expense_total;
            running += bucket.net_balance;
            bucket.cumulative_balance = running;
        }

        debug!("grouped {} records into {} months", records.len(), ordered.len());
        Ok(ordered)
    }

    /// Build the statement of results: ordered month buckets plus the
    /// grand-totals column of the table.
    pub fn build_statement(
        &self,
        records: &[TransactionRecord],
    ) -> Result<MonthlyStatement, ReportError> {
        let months = self.group_by_month(records)?;
        let total_expense = months.iter().map(|m| m.expense_total).sum();
        let total_income = months.iter().map(|m| m.income_total).sum();
        let total_net = months.iter().map(|m| m.net_balance).sum();
        Ok(MonthlyStatement {
            months,
            total_expense,
            total_income,
            total_net,
        })
    }

    /// Per-category totals in first-encounter order.
    ///
    /// The caller passes the slice already filtered by kind (expense pie,
    /// income pie); this function only sums.
    pub fn category_totals(
        &self,
        records: &[TransactionRecord],
    ) -> Result<Vec<CategoryTotal>, ReportError> {
        let parsed = ParsedRecord::parse_all(records)?;
        Ok(self.category_totals_from(parsed.iter()))
    }

    /// Per-category totals restricted to the calendar month of `reference`.
    ///
    /// Backs the current-month bar chart. The reference instant is supplied
    /// by the caller so the result is reproducible.
    pub fn category_totals_for_month(
        &self,
        records: &[TransactionRecord],
        reference: NaiveDateTime,
    ) -> Result<Vec<CategoryTotal>, ReportError> {
        let key = month_key(reference);
        let parsed = ParsedRecord::parse_all(records)?;
        Ok(self.category_totals_from(
            parsed
                .iter()
                .filter(|p| month_key(p.occurred_at) == key),
        ))
    }

    /// Sum amounts per category, preserving the order categories are first
    /// seen in. That order doubles as the tie-break for the top category.
    fn category_totals_from<'a, 'b, I>(&self, records: I) -> Vec<CategoryTotal>
    where
        'a: 'b,
        I: Iterator<Item = &'b ParsedRecord<'a>>,
    {
        let mut totals: HashMap<String, f64> = HashMap::new();
        let mut order: Vec<String> = Vec::new();
        for p in records {
            let category = p.record.category.clone();
            match totals.get_mut(&category) {
                Some(total) => *total += p.amount,
                None => {
                    totals.insert(category.clone(), p.amount);
                    order.push(category);
                }
            }
        }
        order
            .into_iter()
            .map(|category| {
                let total = totals[&category];
                CategoryTotal { category, total }
            })
            .collect()
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}

/// Year-month bucketing key, e.g. "2024-03". Unique per calendar month and
/// usable both as a mapping key and a display key.
pub fn month_key(instant: NaiveDateTime) -> String {
    format!("{:04}-{:02}", instant.year(), instant.month())
}

/// Parse a "YYYY-MM" key back into the first day of that month for
/// chronological comparison. Keys produced by `month_key` always parse; a
/// foreign key sorts first rather than panicking.
fn month_key_date(key: &str) -> NaiveDate {
    let mut parts = key.splitn(2, '-');
    let year = parts.next().and_then(|y| y.parse().ok()).unwrap_or(0);
    let month = parts.next().and_then(|m| m.parse().ok()).unwrap_or(1);
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}
