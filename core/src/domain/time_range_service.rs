//! Natural-language time-range parsing for the Planifica+ assistant.
//!
//! Turns free-text Spanish period expressions ("hoy", "la semana pasada",
//! "ultimos 7 dias", "entre el 5 y el 20") into concrete inclusive
//! `[start, end]` intervals resolved against a caller-supplied reference
//! instant. The parser never reads the system clock, so identical inputs
//! always produce identical intervals.
//!
//! An expression that matches no rule is an expected outcome, not an error:
//! `parse` returns `None` and the caller renders a fallback hint.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use shared::TimeInterval;

static LAST_N_DAYS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ultimos (\d+) dias").unwrap());
static BETWEEN_DAYS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"entre el (\d{1,2}) y el (\d{1,2})").unwrap());

/// Service that recognises Spanish temporal expressions.
///
/// Rules are tested in a fixed priority order and the first match wins:
/// hoy, ayer, esta semana, semana pasada, este mes, mes pasado,
/// "ultimos N dias", "entre el D1 y el D2".
#[derive(Clone)]
pub struct TimeRangeService;

impl TimeRangeService {
    pub fn new() -> Self {
        Self
    }

    /// Parse a free-text period expression against a reference instant.
    ///
    /// Input is lowercased, stripped of diacritics, and trimmed before rule
    /// matching, so "MAÑANA", "mañana" and "manana" are all the same word.
    /// Returns `None` when no rule matches.
    pub fn parse(&self, text: &str, reference: NaiveDateTime) -> Option<TimeInterval> {
        let t = self.normalize(text);
        let today = reference.date();

        if t.contains("hoy") {
            return self.day_interval(today, "hoy");
        }

        if t.contains("ayer") {
            let yesterday = today.checked_sub_signed(Duration::days(1))?;
            return self.day_interval(yesterday, "ayer");
        }

        if t.contains("esta semana") {
            let monday = self.start_of_week(today);
            let sunday = monday.checked_add_signed(Duration::days(6))?;
            return self.interval(monday, sunday, "esta semana");
        }

        if t.contains("semana pasada") {
            let monday = self
                .start_of_week(today)
                .checked_sub_signed(Duration::days(7))?;
            let sunday = monday.checked_add_signed(Duration::days(6))?;
            return self.interval(monday, sunday, "la semana pasada");
        }

        if t.contains("este mes") {
            let first = today.with_day(1)?;
            return self.interval(first, self.last_day_of_month(first)?, "este mes");
        }

        if t.contains("mes pasado") {
            let first = self.first_day_of_previous_month(today)?;
            return self.interval(first, self.last_day_of_month(first)?, "el mes pasado");
        }

        if let Some(caps) = LAST_N_DAYS.captures(&t) {
            // Clamped to at least one day so start never passes end; a span
            // too large for the calendar is treated as not recognised rather
            // than panicking mid-query
            let n = caps[1].parse::<i64>().ok()?.max(1);
            let span = Duration::try_days(n - 1)?;
            let start = today.checked_sub_signed(span)?;
            return self.interval(start, today, &format!("los últimos {} días", n));
        }

        if let Some(caps) = BETWEEN_DAYS.captures(&t) {
            let d1 = caps[1].parse::<i64>().ok()?;
            let d2 = caps[2].parse::<i64>().ok()?;
            let first = today.with_day(1)?;
            // Day numbers are deliberately unvalidated: an out-of-range day
            // rolls over into the adjacent month, and D1 > D2 yields a
            // reversed interval that filters to nothing
            let start = first.checked_add_signed(Duration::days(d1 - 1))?;
            let end = first.checked_add_signed(Duration::days(d2 - 1))?;
            return self.interval(start, end, &format!("del {} al {} de este mes", d1, d2));
        }

        debug!("no temporal rule matched: {:?}", t);
        None
    }

    /// Lowercase, strip Spanish diacritics, and trim surrounding whitespace.
    fn normalize(&self, text: &str) -> String {
        text.to_lowercase()
            .chars()
            .map(|c| match c {
                'á' | 'à' | 'ä' | 'â' => 'a',
                'é' | 'è' | 'ë' | 'ê' => 'e',
                'í' | 'ì' | 'ï' | 'î' => 'i',
                'ó' | 'ò' | 'ö' | 'ô' => 'o',
                'ú' | 'ù' | 'ü' | 'û' => 'u',
                'ñ' => 'n',
                _ => c,
            })
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Monday of the week containing `day`. For a Sunday the diff back to
    /// Monday is -6 days, otherwise `1 - iso_weekday`.
    fn start_of_week(&self, day: NaiveDate) -> NaiveDate {
        let diff = 1 - day.weekday().number_from_monday() as i64;
        day + Duration::days(diff)
    }

    fn last_day_of_month(&self, first: NaiveDate) -> Option<NaiveDate> {
        let next_first = if first.month() == 12 {
            NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
        };
        next_first.checked_sub_signed(Duration::days(1))
    }

    fn first_day_of_previous_month(&self, day: NaiveDate) -> Option<NaiveDate> {
        if day.month() == 1 {
            NaiveDate::from_ymd_opt(day.year() - 1, 12, 1)
        } else {
            NaiveDate::from_ymd_opt(day.year(), day.month() - 1, 1)
        }
    }

    /// Inclusive interval from midnight of `start` to 23:59:59 of `end`.
    /// End-of-day precision is seconds, uniformly across all rules.
    fn interval(&self, start: NaiveDate, end: NaiveDate, label: &str) -> Option<TimeInterval> {
        let interval = TimeInterval {
            start: start.and_hms_opt(0, 0, 0)?,
            end: end.and_hms_opt(23, 59, 59)?,
            label: label.to_string(),
        };
        debug!(
            "period {:?} resolved to [{} .. {}]",
            interval.label, interval.start, interval.end
        );
        Some(interval)
    }

    fn day_interval(&self, day: NaiveDate, label: &str) -> Option<TimeInterval> {
        self.interval(day, day, label)
    }
}

impl Default for TimeRangeService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_hoy_spans_the_reference_day() {
        let service = TimeRangeService::new();

        let interval = service.parse("cuanto gaste hoy", at(2024, 3, 10, 15, 30)).unwrap();
        assert_eq!(interval.start, datetime(2024, 3, 10, 0, 0, 0));
        assert_eq!(interval.end, datetime(2024, 3, 10, 23, 59, 59));
        assert_eq!(interval.label, "hoy");
    }

    #[test]
    fn test_ayer_is_the_previous_day() {
        let service = TimeRangeService::new();

        let interval = service.parse("ayer", at(2024, 3, 1, 9, 0)).unwrap();
        assert_eq!(interval.start, datetime(2024, 2, 29, 0, 0, 0)); // leap year
        assert_eq!(interval.end, datetime(2024, 2, 29, 23, 59, 59));
        assert_eq!(interval.label, "ayer");
    }

    #[test]
    fn test_esta_semana_monday_through_sunday() {
        let service = TimeRangeService::new();

        // 2024-03-13 is a Wednesday; the week runs Mar 11 (Mon) to Mar 17 (Sun)
        let interval = service.parse("esta semana", at(2024, 3, 13, 12, 0)).unwrap();
        assert_eq!(interval.start, datetime(2024, 3, 11, 0, 0, 0));
        assert_eq!(interval.end, datetime(2024, 3, 17, 23, 59, 59));
    }

    #[test]
    fn test_esta_semana_from_a_sunday() {
        let service = TimeRangeService::new();

        // 2024-03-17 is a Sunday; Monday is 6 days back
        let interval = service.parse("esta semana", at(2024, 3, 17, 8, 0)).unwrap();
        assert_eq!(interval.start, datetime(2024, 3, 11, 0, 0, 0));
        assert_eq!(interval.end, datetime(2024, 3, 17, 23, 59, 59));
    }

    #[test]
    fn test_semana_pasada_is_the_seven_days_before_monday() {
        let service = TimeRangeService::new();

        let interval = service.parse("la semana pasada", at(2024, 3, 13, 12, 0)).unwrap();
        assert_eq!(interval.start, datetime(2024, 3, 4, 0, 0, 0));
        assert_eq!(interval.end, datetime(2024, 3, 10, 23, 59, 59));
        assert_eq!(interval.label, "la semana pasada");
    }

    #[test]
    fn test_este_mes_first_to_last_day() {
        let service = TimeRangeService::new();

        let interval = service.parse("este mes", at(2024, 2, 10, 12, 0)).unwrap();
        assert_eq!(interval.start, datetime(2024, 2, 1, 0, 0, 0));
        assert_eq!(interval.end, datetime(2024, 2, 29, 23, 59, 59));
        assert_eq!(interval.label, "este mes");
    }

    #[test]
    fn test_mes_pasado_crosses_the_year_boundary() {
        let service = TimeRangeService::new();

        let interval = service.parse("mes pasado", at(2024, 1, 15, 12, 0)).unwrap();
        assert_eq!(interval.start, datetime(2023, 12, 1, 0, 0, 0));
        assert_eq!(interval.end, datetime(2023, 12, 31, 23, 59, 59));
        assert_eq!(interval.label, "el mes pasado");
    }

    #[test]
    fn test_ultimos_n_dias_round_trip() {
        let service = TimeRangeService::new();

        // Property from the reporting contract: N=5 anchored at 2024-03-10
        let interval = service
            .parse("ultimos 5 dias", at(2024, 3, 10, 18, 45))
            .unwrap();
        assert_eq!(interval.start, datetime(2024, 3, 6, 0, 0, 0));
        assert_eq!(interval.end, datetime(2024, 3, 10, 23, 59, 59));
        assert_eq!(interval.label, "los últimos 5 días");
    }

    #[test]
    fn test_ultimos_dias_with_accents() {
        let service = TimeRangeService::new();

        let interval = service
            .parse("¿los últimos 3 días?", at(2024, 3, 10, 0, 0))
            .unwrap();
        assert_eq!(interval.start, datetime(2024, 3, 8, 0, 0, 0));
    }

    #[test]
    fn test_ultimos_pathological_n_does_not_panic() {
        let service = TimeRangeService::new();
        let reference = at(2024, 3, 10, 12, 0);

        // A day count beyond what the calendar can represent is an expected
        // not-recognised outcome, never a crash mid-query
        assert!(service.parse("ultimos 200000000000 dias", reference).is_none());
        // Larger than i64 entirely
        assert!(service
            .parse("ultimos 99999999999999999999 dias", reference)
            .is_none());
    }

    #[test]
    fn test_ultimos_zero_dias_clamps_to_one() {
        let service = TimeRangeService::new();

        let interval = service.parse("ultimos 0 dias", at(2024, 3, 10, 0, 0)).unwrap();
        assert_eq!(interval.start, datetime(2024, 3, 10, 0, 0, 0));
        assert_eq!(interval.end, datetime(2024, 3, 10, 23, 59, 59));
        assert!(interval.start <= interval.end);
    }

    #[test]
    fn test_entre_el_d1_y_el_d2() {
        let service = TimeRangeService::new();

        let interval = service
            .parse("entre el 5 y el 20", at(2024, 3, 10, 12, 0))
            .unwrap();
        assert_eq!(interval.start, datetime(2024, 3, 5, 0, 0, 0));
        assert_eq!(interval.end, datetime(2024, 3, 20, 23, 59, 59));
        assert_eq!(interval.label, "del 5 al 20 de este mes");
    }

    #[test]
    fn test_entre_el_overflow_rolls_into_next_month() {
        let service = TimeRangeService::new();

        // Day 31 does not exist in April; it rolls over to May 1
        let interval = service
            .parse("entre el 1 y el 31", at(2024, 4, 10, 12, 0))
            .unwrap();
        assert_eq!(interval.start, datetime(2024, 4, 1, 0, 0, 0));
        assert_eq!(interval.end, datetime(2024, 5, 1, 23, 59, 59));
    }

    #[test]
    fn test_rule_priority_hoy_wins_over_ayer() {
        let service = TimeRangeService::new();

        let interval = service.parse("hoy o ayer", at(2024, 3, 10, 12, 0)).unwrap();
        assert_eq!(interval.label, "hoy");
    }

    #[test]
    fn test_full_question_with_diacritics_matches() {
        let service = TimeRangeService::new();

        let interval = service
            .parse("¿Cuánto gasté esta semana?", at(2024, 3, 13, 12, 0))
            .unwrap();
        assert_eq!(interval.label, "esta semana");
    }

    #[test]
    fn test_unrecognized_text_returns_none() {
        let service = TimeRangeService::new();

        assert!(service.parse("banana", at(2024, 3, 10, 12, 0)).is_none());
        assert!(service.parse("", at(2024, 3, 10, 12, 0)).is_none());
        assert!(service.parse("   ", at(2024, 3, 10, 12, 0)).is_none());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let service = TimeRangeService::new();
        let reference = at(2024, 3, 10, 12, 0);

        let a = service.parse("este mes", reference);
        let b = service.parse("este mes", reference);
        assert_eq!(a, b);
    }
}
