use crate::error::{timestamp_error, SyncResult};
use crate::sync::models::Shift;
use chrono::{DateTime, Utc};

/// Parsed begin/end timestamps of a single shift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftWindow {
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Parse a shift's RFC-3339 timestamps into a concrete window
pub fn parse_window(shift: &Shift) -> SyncResult<ShiftWindow> {
    let begin = DateTime::parse_from_rfc3339(&shift.begin_date).map_err(|e| {
        timestamp_error(&format!(
            "shift {} has invalid begin date {:?}: {}",
            shift.id, shift.begin_date, e
        ))
    })?;
    let end = DateTime::parse_from_rfc3339(&shift.end_date).map_err(|e| {
        timestamp_error(&format!(
            "shift {} has invalid end date {:?}: {}",
            shift.id, shift.end_date, e
        ))
    })?;

    Ok(ShiftWindow {
        begin: begin.with_timezone(&Utc),
        end: end.with_timezone(&Utc),
    })
}

/// Smallest begin and largest end across the given windows.
///
/// Input order does not matter. With no windows there is nothing to
/// constrain the range, so both bounds degenerate to `now`.
pub fn date_range(windows: &[ShiftWindow], now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let Some((first, rest)) = windows.split_first() else {
        return (now, now);
    };

    let mut min = first.begin;
    let mut max = first.end;
    for window in rest {
        if window.begin < min {
            min = window.begin;
        }
        if window.end > max {
            max = window.end;
        }
    }

    (min, max)
}
