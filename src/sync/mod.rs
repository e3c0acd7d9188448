mod agenda;
pub mod models;
pub mod range;
mod source;

pub use agenda::AgendaClient;
pub use models::{Department, MeetingRequest, Shift};
pub use source::SourceClient;

use crate::config::Config;
use crate::error::{Error, SyncResult};
use chrono::{NaiveDate, Utc};
use range::ShiftWindow;
use serde::Serialize;
use tracing::{info, warn};

/// Per-shift result of one sync run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Meeting upserted into the agenda
    Synced,
    /// Upsert was attempted and rejected or unreachable
    Failed,
    /// Shift had unparseable timestamps and was never attempted
    Skipped,
}

/// One report line per fetched shift, in fetch order
#[derive(Debug, Clone, Serialize)]
pub struct ShiftReport {
    pub id: i64,
    pub summary: String,
    /// Status of the shift in the source system, echoed through
    pub status: String,
    pub outcome: SyncOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Structured result of a full sync run
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Date range cleared in the agenda, when the delete stage ran
    pub deleted_range: Option<(NaiveDate, NaiveDate)>,
    pub shifts: Vec<ShiftReport>,
}

/// Sequential fetch → delete-range → post pipeline.
///
/// The delete stage is a named optional step selected by configuration,
/// not a separate code path. Fetch and delete failures abort the run;
/// per-shift upsert failures are recorded and the loop continues.
pub struct SyncPipeline {
    config: Config,
    source: SourceClient,
    agenda: AgendaClient,
}

impl SyncPipeline {
    pub fn new(config: Config) -> Self {
        let source = SourceClient::new(config.source_url.clone(), config.tenant.clone());
        let agenda = AgendaClient::new(config.destination_url.clone());
        Self {
            config,
            source,
            agenda,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one synchronization cycle with the caller's bearer token
    pub async fn run(&self, token: &str) -> SyncResult<SyncReport> {
        let shifts = self.source.fetch_shifts(token).await?;
        info!("Fetched {} shifts from source API", shifts.len());

        // Parse windows up front so a bad timestamp flags one shift
        // instead of killing the run
        let windows: Vec<SyncResult<ShiftWindow>> = shifts
            .iter()
            .map(|shift| {
                range::parse_window(shift).inspect_err(|e| {
                    warn!("Skipping shift {}: {}", shift.id, e);
                })
            })
            .collect();

        let mut report = SyncReport::default();

        if self.config.delete_synced_range {
            let valid: Vec<ShiftWindow> = windows.iter().filter_map(|w| w.as_ref().ok().copied()).collect();
            let (min_date, max_date) = range::date_range(&valid, Utc::now());
            let (from_date, to_date) = (min_date.date_naive(), max_date.date_naive());

            // Posting over an uncleared range would recreate the duplicates
            // the delete exists to prevent, so a failure here is fatal
            self.agenda.delete_range(from_date, to_date).await?;
            info!(
                "Deleted all meetings in range of currently fetched ({} to {})",
                from_date, to_date
            );
            report.deleted_range = Some((from_date, to_date));
        }

        for (shift, window) in shifts.iter().zip(&windows) {
            report.shifts.push(self.post_shift(shift, window).await);
        }

        Ok(report)
    }

    async fn post_shift(&self, shift: &Shift, window: &SyncResult<ShiftWindow>) -> ShiftReport {
        let meeting = shift.to_meeting(self.config.agenda_id);
        let mut line = ShiftReport {
            id: shift.id,
            summary: meeting.summary.clone(),
            status: shift.status.clone(),
            outcome: SyncOutcome::Synced,
            error: None,
        };

        match window {
            Err(e) => {
                line.outcome = SyncOutcome::Skipped;
                line.error = Some(e.to_string());
            }
            Ok(_) => match self.agenda.put_meeting(&meeting).await {
                Ok(()) => {
                    info!("Posted shift {} to agenda {}", shift.id, self.config.agenda_id);
                }
                Err(e) => {
                    warn!("Failed to post shift {}: {}", shift.id, e);
                    line.outcome = SyncOutcome::Failed;
                    line.error = Some(e.to_string());
                }
            },
        }

        line
    }
}

impl SyncReport {
    /// Render the report as newline-delimited JSON, one line per shift
    pub fn to_ndjson(&self) -> SyncResult<String> {
        let mut body = String::new();
        for line in &self.shifts {
            let json = serde_json::to_string(line)
                .map_err(|e| Error::Serialization(e.to_string()))?;
            body.push_str(&json);
            body.push('\n');
        }
        Ok(body)
    }
}
