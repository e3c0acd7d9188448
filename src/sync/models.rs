use serde::{Deserialize, Serialize};

/// Department a shift belongs to, embedded in the source record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// A scheduled work period as returned by the source scheduling API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub department: Department,
    pub begin_date: String,
    pub end_date: String,
}

/// Upsert payload for the destination agenda API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRequest {
    /// Mirrors the shift id so re-syncs update in place
    pub id: i64,
    pub agenda_id: i64,
    pub summary: String,
    pub description: String,
    pub start_datetime: String,
    pub end_datetime: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Shift {
    /// Raw summary text: first non-empty of description, remark, name
    pub fn summary_source(&self) -> &str {
        [&self.description, &self.remark, &self.name]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Map this shift to its agenda representation.
    ///
    /// Timestamps are copied verbatim; no timezone conversion happens here.
    pub fn to_meeting(&self, agenda_id: i64) -> MeetingRequest {
        MeetingRequest {
            id: self.id,
            agenda_id,
            summary: title_case_dutch(self.summary_source()),
            description: self.name.clone(),
            start_datetime: self.begin_date.clone(),
            end_datetime: self.end_date.clone(),
            location: self.department.name.clone(),
            color: None,
        }
    }
}

/// Title-case each word following Dutch conventions: the `ij` digraph
/// capitalises as a unit ("ijsbaan" becomes "IJsbaan").
pub fn title_case_dutch(input: &str) -> String {
    input
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let lower = word.to_lowercase();
    if let Some(rest) = lower.strip_prefix("ij") {
        return format!("IJ{}", rest);
    }
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
