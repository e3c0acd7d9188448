use crate::error::{source_api_error, Error, SyncResult};
use crate::sync::models::Shift;
use chrono::{Months, NaiveDate, Utc};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use tracing::debug;

/// Rolling fetch window: one month back, five months ahead
pub fn fetch_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Months::new(1), today + Months::new(5))
}

/// Client for the source shift-scheduling API
#[derive(Debug, Clone)]
pub struct SourceClient {
    client: Client,
    base_url: String,
    tenant: String,
}

impl SourceClient {
    pub fn new(base_url: String, tenant: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            tenant,
        }
    }

    /// Fetch all shifts in the rolling window with the caller's bearer token.
    ///
    /// Single attempt, no retries. A status above 399 or an unparseable
    /// body is an error carrying the upstream diagnostic verbatim.
    pub async fn fetch_shifts(&self, token: &str) -> SyncResult<Vec<Shift>> {
        let (from_date, until_date) = fetch_window(Utc::now().date_naive());
        debug!(
            "Fetching shifts from {} to {}",
            from_date.format("%Y-%m-%d"),
            until_date.format("%Y-%m-%d")
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("fromDate", from_date.format("%Y-%m-%d").to_string()),
                ("untilDate", until_date.format("%Y-%m-%d").to_string()),
            ])
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header("tenant", &self.tenant)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.as_u16() > 399 {
            return Err(source_api_error(&format!(
                "source API returned {}: {}",
                status, body
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| Error::Serialization(format!("invalid shift response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_spans_minus_one_to_plus_five_months() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let (from, until) = fetch_window(today);
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
        assert_eq!(until, NaiveDate::from_ymd_opt(2024, 8, 15).unwrap());
    }

    #[test]
    fn window_clamps_to_shorter_months() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let (from, until) = fetch_window(today);
        // February has no 31st; chrono clamps to the last valid day
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(until, NaiveDate::from_ymd_opt(2024, 8, 31).unwrap());
    }
}
