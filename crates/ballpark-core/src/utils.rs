//! Display helpers shared by every management screen
//!
//! All functions are pure. Formatters fail closed: an input they cannot interpret
//! yields an empty string (dates) or the caller's placeholder (text), never a panic.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use std::cmp::Reverse;

/// Extensions rendered inline as images
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Path prefix the backend puts in front of stored uploads
pub const UPLOADS_PREFIX: &str = "/uploads/";

/// Parsed timestamp, either zoned or naive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Timestamp {
    Zoned(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl Timestamp {
    fn local(self) -> NaiveDateTime {
        match self {
            Self::Zoned(dt) => dt.naive_local(),
            Self::Naive(dt) => dt,
        }
    }
}

fn parse_timestamp(input: &str) -> Option<Timestamp> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(Timestamp::Zoned(dt));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(Timestamp::Naive)
}

/// Parse a backend timestamp into a sortable wall-clock value
#[must_use]
pub fn parse_date(input: &str) -> Option<NaiveDateTime> {
    parse_timestamp(input).map(Timestamp::local)
}

/// Format a timestamp as `YYYY-MM-DD`, or `""` when it cannot be parsed
#[must_use]
pub fn format_date(input: &str) -> String {
    parse_date(input).map_or_else(String::new, |dt| dt.format("%Y-%m-%d").to_string())
}

/// Format a timestamp as `YYYY-MM-DD HH:MM`, or `""` when it cannot be parsed
#[must_use]
pub fn format_date_time(input: &str) -> String {
    parse_date(input).map_or_else(String::new, |dt| dt.format("%Y-%m-%d %H:%M").to_string())
}

/// Same as [`format_date`] for optional fields
#[must_use]
pub fn format_optional_date(input: Option<&str>) -> String {
    input.map(format_date).unwrap_or_default()
}

/// Keep the first `max_chars` characters, appending `...` when text was cut
///
/// Missing or empty text becomes `placeholder`.
#[must_use]
pub fn truncate(text: Option<&str>, max_chars: usize, placeholder: &str) -> String {
    match text {
        None | Some("") => placeholder.to_string(),
        Some(text) if text.chars().count() > max_chars => {
            let mut cut: String = text.chars().take(max_chars).collect();
            cut.push_str("...");
            cut
        }
        Some(text) => text.to_string(),
    }
}

/// Substitute `placeholder` for missing or blank text
#[must_use]
pub fn or_placeholder(text: Option<&str>, placeholder: &str) -> String {
    text.filter(|t| !t.trim().is_empty())
        .unwrap_or(placeholder)
        .to_string()
}

/// Label for the `userGender` code
#[must_use]
pub const fn gender_label(code: Option<i64>) -> &'static str {
    match code {
        Some(1) => "Male",
        Some(2) => "Female",
        _ => "Unspecified",
    }
}

/// Label for a `"Y"`/`"N"` consent flag
#[must_use]
pub fn consent_label(flag: Option<&str>) -> &'static str {
    if flag.is_some_and(|f| f.trim().eq_ignore_ascii_case("y")) {
        "Agreed"
    } else {
        "Not agreed"
    }
}

/// Label for a user's suspension state
#[must_use]
pub const fn suspension_label(suspended: bool) -> &'static str {
    if suspended { "Suspended" } else { "Active" }
}

/// How an attachment should be presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentKind {
    /// Render inline; carries the lower-cased extension
    Image(String),
    /// Offer as a download
    File,
}

/// Extension after the last `.` of the final path segment
#[must_use]
pub fn file_extension(path: &str) -> Option<String> {
    last_segment(path)
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Classify an attachment path by its extension, case-insensitively
#[must_use]
pub fn classify_attachment(path: &str) -> AttachmentKind {
    match file_extension(path) {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => AttachmentKind::Image(ext),
        _ => AttachmentKind::File,
    }
}

/// Final `/`-separated segment of a path
#[must_use]
pub fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Human file name for a stored upload
///
/// Drops the `/uploads/` prefix and any directories, then the upload token before
/// the first `_`. Falls back to the whole segment when nothing follows the token.
#[must_use]
pub fn display_file_name(path: &str) -> String {
    let without_prefix = path.replacen(UPLOADS_PREFIX, "", 1);
    let segment = last_segment(&without_prefix);

    match segment.split_once('_') {
        Some((_, rest)) if !rest.is_empty() => rest.to_string(),
        _ => segment.to_string(),
    }
}

/// Stable newest-first sort; records without a parseable date go last
pub fn sort_newest_first<T, F>(records: &mut [T], date_of: F)
where
    F: Fn(&T) -> Option<&str>,
{
    records.sort_by_cached_key(|record| {
        let parsed = date_of(record).and_then(parse_date);
        (parsed.is_none(), Reverse(parsed))
    });
}
