use live25_import::components::feed_import::FeedEvent;

/// A trimmed-down payload in the shape the 25Live publisher emits
const SAMPLE_FEED: &str = r#"[
    {
        "eventID": 4521,
        "title": "Spring Fair",
        "description": "<p>Annual spring fair on the quad.</p>",
        "startDateTime": "2024-05-01T10:00:00",
        "endDateTime": "2024-05-01T14:00:00",
        "startTimeZoneOffset": "-0500",
        "endTimeZoneOffset": "-0500",
        "location": "Main Quad",
        "permaLinkUrl": "https://25livepub.collegenet.com/event/4521",
        "eventActionUrl": "https://25livepub.collegenet.com/event/4521/register",
        "customFields": [
            {"label": "Event Contact", "value": "events@example.edu", "fieldID": 101},
            {"label": "Audience", "value": "Audience - Students,Audience - Faculty", "fieldID": 28364}
        ],
        "lastModified": "2024-04-20T08:00:00"
    },
    {
        "eventID": "E-77",
        "title": "Guest Lecture",
        "description": "",
        "startDateTime": "2024-05-02T19:00:00",
        "endDateTime": "2024-05-02T20:30:00",
        "startTimeZoneOffset": "-0400",
        "endTimeZoneOffset": "-0400",
        "location": "Science Hall 120",
        "permaLinkUrl": "https://25livepub.collegenet.com/event/E-77",
        "eventActionUrl": "",
        "customFields": []
    }
]"#;

#[test]
fn test_sample_feed_decodes() {
    let events: Vec<FeedEvent> = serde_json::from_str(SAMPLE_FEED).unwrap();
    assert_eq!(events.len(), 2);

    let fair = &events[0];
    assert_eq!(fair.event_id, "4521");
    assert_eq!(fair.title, "Spring Fair");
    assert_eq!(fair.location, "Main Quad");
    assert_eq!(fair.start_date_time.as_deref(), Some("2024-05-01T10:00:00"));
    assert_eq!(fair.start_time_zone_offset.as_deref(), Some("-0500"));
    assert_eq!(fair.custom_fields.len(), 2);
    assert_eq!(fair.custom_fields[1].field_id, 28364);

    let lecture = &events[1];
    assert_eq!(lecture.event_id, "E-77");
    assert!(lecture.custom_fields.is_empty());
    assert!(lecture.event_action_url.is_empty());
}

#[test]
fn test_unknown_keys_are_tolerated() {
    // "lastModified" above is not modeled; decoding must not fail on it
    let events: Vec<FeedEvent> = serde_json::from_str(SAMPLE_FEED).unwrap();
    assert_eq!(events[0].event_id, "4521");
}

#[test]
fn test_missing_times_decode_as_none() {
    let events: Vec<FeedEvent> =
        serde_json::from_str(r#"[{"eventID": 9, "title": "TBD"}]"#).unwrap();
    assert!(events[0].start_date_time.is_none());
    assert!(events[0].end_date_time.is_none());
}

#[test]
fn test_empty_feed_decodes() {
    let events: Vec<FeedEvent> = serde_json::from_str("[]").unwrap();
    assert!(events.is_empty());
}
