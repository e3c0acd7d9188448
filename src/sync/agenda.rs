use crate::error::{agenda_api_error, SyncResult};
use crate::sync::models::MeetingRequest;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Client-side timeout on meeting upserts
const UPSERT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the destination agenda API
#[derive(Debug, Clone)]
pub struct AgendaClient {
    client: Client,
    base_url: String,
}

impl AgendaClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Delete previously synced meetings between the two dates, inclusive
    pub async fn delete_range(&self, from_date: NaiveDate, to_date: NaiveDate) -> SyncResult<()> {
        let response = self
            .client
            .delete(&self.base_url)
            .query(&[
                ("from_date", from_date.format("%Y-%m-%d").to_string()),
                ("to_date", to_date.format("%Y-%m-%d").to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() > 399 {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(agenda_api_error(&format!(
                "delete returned {}: {}",
                status, body
            )));
        }

        Ok(())
    }

    /// Upsert one meeting. The meeting id mirrors the shift id, so
    /// repeating a sync updates in place instead of duplicating.
    pub async fn put_meeting(&self, meeting: &MeetingRequest) -> SyncResult<()> {
        debug!("Posting meeting [{:?}]", meeting);

        let response = self
            .client
            .put(&self.base_url)
            .timeout(UPSERT_TIMEOUT)
            .json(meeting)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(agenda_api_error(&format!(
                "upsert of meeting {} returned {}: {}",
                meeting.id, status, body
            )));
        }

        Ok(())
    }
}
