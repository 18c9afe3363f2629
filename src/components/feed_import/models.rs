use serde::{Deserialize, Deserializer, Serialize};

/// One event as published by the 25Live JSON feed
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FeedEvent {
    /// External identifier; the feed emits this as either a string or a number
    #[serde(rename = "eventID", deserialize_with = "string_or_number")]
    pub event_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Naive local datetime, e.g. "2024-05-01T10:00:00"
    pub start_date_time: Option<String>,
    pub end_date_time: Option<String>,
    /// UTC offset in hundredths of hours, e.g. "-0500"
    pub start_time_zone_offset: Option<String>,
    pub end_time_zone_offset: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "permaLinkUrl", default)]
    pub perma_link_url: String,
    #[serde(default)]
    pub event_action_url: String,
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
}

/// A label/value pair attached to a feed event
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(rename = "fieldID", default)]
    pub field_id: u64,
}

/// How a reconciliation run behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Apply the feed with progress at debug level
    #[default]
    Normal,
    /// Output the decoded feed and perform no store mutations
    DumpOnly,
    /// Apply the feed with progress at info level
    VerboseLog,
}

/// Counters describing one reconciliation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub categories_created: usize,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} created, {} updated, {} skipped, {} categories created",
            self.created, self.updated, self.skipped, self.categories_created
        )
    }
}

/// Accept the feed's eventID whether it arrives as a JSON string or number
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(i64),
    }

    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => Ok(s),
        StringOrNumber::Number(n) => Ok(n.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_accepts_number() {
        let event: FeedEvent =
            serde_json::from_str(r#"{"eventID": 4521, "title": "Open House"}"#).unwrap();
        assert_eq!(event.event_id, "4521");
    }

    #[test]
    fn test_event_id_accepts_string() {
        let event: FeedEvent =
            serde_json::from_str(r#"{"eventID": "E-99", "title": "Open House"}"#).unwrap();
        assert_eq!(event.event_id, "E-99");
    }

    #[test]
    fn test_custom_fields_keep_feed_order() {
        let event: FeedEvent = serde_json::from_str(
            r#"{
                "eventID": 1,
                "title": "t",
                "customFields": [
                    {"label": "Contact", "value": "a@example.edu", "fieldID": 100},
                    {"label": "Audience", "value": "Students", "fieldID": 28364}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(event.custom_fields.len(), 2);
        assert_eq!(event.custom_fields[0].label, "Contact");
        assert_eq!(event.custom_fields[1].field_id, 28364);
    }
}
