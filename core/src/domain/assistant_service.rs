//! Assistant orchestration for natural-language period questions.
//!
//! Moves the parse-then-aggregate pipeline out of the UI layer: the chat
//! widget hands over the raw question and its reference instant, and gets
//! back either a structured summary or the not-recognized outcome it turns
//! into a fallback hint. Message wording, currency symbols, and emoji stay
//! on the presentation side.

use log::info;
use shared::{AssistantReply, TransactionRecord};

use crate::domain::commands::reports::PeriodQuery;
use crate::domain::report_service::ReportService;
use crate::domain::time_range_service::TimeRangeService;
use crate::error::ReportError;

#[derive(Clone)]
pub struct AssistantService {
    time_range_service: TimeRangeService,
    report_service: ReportService,
}

impl AssistantService {
    pub fn new() -> Self {
        Self {
            time_range_service: TimeRangeService::new(),
            report_service: ReportService::new(),
        }
    }

    /// Answer a free-text period question over the given records.
    ///
    /// Steps: recognise the period, filter and total the window, pick the
    /// top expense category, and compare spending against the historical
    /// average. An unrecognised period is a normal reply variant; only a
    /// malformed record aborts.
    pub fn answer(
        &self,
        query: &PeriodQuery,
        records: &[TransactionRecord],
    ) -> Result<AssistantReply, ReportError> {
        let range = match self.time_range_service.parse(&query.text, query.reference) {
            Some(range) => range,
            None => {
                info!("question had no recognisable period: {:?}", query.text);
                return Ok(AssistantReply::NotRecognized);
            }
        };

        let summary = self.report_service.summarize(records, &range)?;
        Ok(AssistantReply::Summary(summary))
    }
}

impl Default for AssistantService {
    fn default() -> Self {
        Self::new()
    }
}
