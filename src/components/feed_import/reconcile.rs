use super::models::{FeedEvent, RunMode, RunSummary};
use super::time::{EventTimes, STORE_DATETIME_FORMAT};
use crate::components::record_store::{
    RecordFields, RecordId, RecordStore, EXTERNAL_ID_KEY,
};
use crate::error::{feed_error, ImportResult};
use tracing::{debug, info, warn};

/// Field key holding the event's location text
pub const LOCATION_KEY: &str = "_p_event_location_text";
/// Field keys holding the normalized timestamps
pub const START_DATE_KEY: &str = "_EventStartDate";
pub const END_DATE_KEY: &str = "_EventEndDate";
pub const START_DATE_UTC_KEY: &str = "_EventStartDateUTC";
pub const END_DATE_UTC_KEY: &str = "_EventEndDateUTC";
/// Field keys holding the feed URLs
pub const PERMALINK_KEY: &str = "Permalink";
pub const ACTION_URL_KEY: &str = "Event Action URL";

/// Taxonomy that imported categories live in
pub const EVENT_TAXONOMY: &str = "tribe_events_cat";
/// The custom field whose value is a comma-delimited category list
pub const CATEGORY_FIELD_ID: u64 = 28364;
/// Prefix stripped from each category name
pub const CATEGORY_PREFIX: &str = "Audience - ";

enum Outcome {
    Created,
    Updated,
}

/// Reconcile a decoded feed into the record store.
///
/// Events are processed strictly in feed order, one at a time. An event that
/// fails (bad datetime, store error) is skipped with a warning and the run
/// continues; the feed itself has already been fetched and decoded by the
/// caller, so there is no whole-run failure path here besides `DumpOnly`
/// serialization.
pub async fn reconcile<S: RecordStore + ?Sized>(
    store: &S,
    events: &[FeedEvent],
    mode: RunMode,
) -> ImportResult<RunSummary> {
    if mode == RunMode::DumpOnly {
        // Inspection aid for mapping new feed fields; performs no mutations
        println!("{}", serde_json::to_string_pretty(events)?);
        return Ok(RunSummary::default());
    }

    let mut summary = RunSummary::default();

    for event in events {
        match reconcile_event(store, event, mode).await {
            Ok((Outcome::Created, categories)) => {
                summary.created += 1;
                summary.categories_created += categories;
            }
            Ok((Outcome::Updated, categories)) => {
                summary.updated += 1;
                summary.categories_created += categories;
            }
            Err(e) => {
                warn!(
                    external_id = %event.event_id,
                    title = %event.title,
                    "Skipping event: {}",
                    e
                );
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}

/// Reconcile a single feed event, returning its outcome and the number of
/// categories created along the way
async fn reconcile_event<S: RecordStore + ?Sized>(
    store: &S,
    event: &FeedEvent,
    mode: RunMode,
) -> ImportResult<(Outcome, usize)> {
    if event.event_id.is_empty() {
        return Err(feed_error("Event has no external identifier"));
    }

    // Normalize times before touching the store, so a malformed event is
    // skipped without partial writes
    let times = EventTimes::from_feed(
        event.start_date_time.as_deref(),
        event.start_time_zone_offset.as_deref(),
        event.end_date_time.as_deref(),
        event.end_time_zone_offset.as_deref(),
    )?;

    let fields = RecordFields::for_event(&event.title, &event.description);

    let (record_id, outcome) = match store.find_by_external_id(&event.event_id).await? {
        None => {
            let id = store.create_record(&fields).await?;
            // Persist the external-identifier association right away so a
            // failure later in this event cannot orphan the record
            store.set_field(id, EXTERNAL_ID_KEY, &event.event_id).await?;
            progress(mode, format_args!("Add event: \"{}\"", event.title));
            (id, Outcome::Created)
        }
        Some(id) => {
            store.update_record(id, &fields).await?;
            progress(mode, format_args!("Update event: \"{}\"", event.title));
            (id, Outcome::Updated)
        }
    };

    store.set_field(record_id, LOCATION_KEY, &event.location).await?;
    store
        .set_field(
            record_id,
            START_DATE_KEY,
            &times.start_local.format(STORE_DATETIME_FORMAT).to_string(),
        )
        .await?;
    store
        .set_field(
            record_id,
            END_DATE_KEY,
            &times.end_local.format(STORE_DATETIME_FORMAT).to_string(),
        )
        .await?;
    store
        .set_field(
            record_id,
            START_DATE_UTC_KEY,
            &times.start_utc.format(STORE_DATETIME_FORMAT).to_string(),
        )
        .await?;
    store
        .set_field(
            record_id,
            END_DATE_UTC_KEY,
            &times.end_utc.format(STORE_DATETIME_FORMAT).to_string(),
        )
        .await?;
    store
        .set_field(record_id, PERMALINK_KEY, &event.perma_link_url)
        .await?;
    store
        .set_field(record_id, ACTION_URL_KEY, &event.event_action_url)
        .await?;

    let categories = apply_custom_fields(store, record_id, event, mode).await?;

    Ok((outcome, categories))
}

/// Walk the custom fields in feed order: the designated category field
/// becomes term associations, everything else becomes a flat field keyed by
/// a slug of its label (last write wins on collisions)
async fn apply_custom_fields<S: RecordStore + ?Sized>(
    store: &S,
    record_id: RecordId,
    event: &FeedEvent,
    mode: RunMode,
) -> ImportResult<usize> {
    let mut categories_created = 0;

    for field in &event.custom_fields {
        if field.field_id == CATEGORY_FIELD_ID {
            for name in category_names(&field.value) {
                let (term_id, created) =
                    store.resolve_or_create_term(&name, EVENT_TAXONOMY).await?;
                if created {
                    categories_created += 1;
                    progress(mode, format_args!(" - Create event category: {}", name));
                }
                store.associate_term(record_id, term_id, EVENT_TAXONOMY).await?;
                progress(mode, format_args!(" - Add event to category: {}", name));
            }
        } else {
            let key = slugify_label(&field.label);
            if !key.is_empty() {
                store.set_field(record_id, &key, &field.value).await?;
            }
        }
    }

    Ok(categories_created)
}

/// Split a delimited category value into cleaned names.
///
/// The prefix is stripped before the final trim so that a prefix-only token
/// (for example a trailing empty name in the list) reduces to empty and is
/// dropped instead of surviving as a bogus category.
pub fn category_names(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim_start)
        .map(|token| token.strip_prefix(CATEGORY_PREFIX).unwrap_or(token).trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Turn a custom-field label into a flat field key, e.g.
/// "Event Contact Email" -> "event-contact-email"
pub fn slugify_label(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_dash = false;
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    slug
}

fn progress(mode: RunMode, message: std::fmt::Arguments<'_>) {
    match mode {
        RunMode::VerboseLog => info!("{}", message),
        _ => debug!("{}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names_strips_prefix() {
        assert_eq!(
            category_names("Audience - Students,Audience - Faculty"),
            vec!["Students".to_string(), "Faculty".to_string()]
        );
    }

    #[test]
    fn test_category_names_without_prefix() {
        assert_eq!(
            category_names("Lectures, Workshops"),
            vec!["Lectures".to_string(), "Workshops".to_string()]
        );
    }

    #[test]
    fn test_category_names_drops_empty_tokens() {
        assert_eq!(category_names("Audience - ,,"), Vec::<String>::new());
    }

    #[test]
    fn test_category_names_drops_prefix_only_token_among_valid_names() {
        assert_eq!(
            category_names("Audience - Students,Audience - "),
            vec!["Students".to_string()]
        );
    }

    #[test]
    fn test_slugify_label() {
        assert_eq!(slugify_label("Event Contact Email"), "event-contact-email");
        assert_eq!(slugify_label("  Cost?  "), "cost");
        assert_eq!(slugify_label("Audience"), "audience");
        assert_eq!(slugify_label("!!!"), "");
    }
}
