use chrono::{DateTime, Datelike, Month, NaiveDate, NaiveDateTime, Timelike, Weekday};

use super::columns as col;
use crate::data::filter::complete_indices;
use crate::data::model::{ColumnType, RecordTable, Value};

/// Result of the feature-engineering stage.
#[derive(Debug, Clone)]
pub struct FeatureOutcome {
    pub table: RecordTable,
    /// Rows dropped for lacking interactions or followers after coercion.
    pub rows_dropped: usize,
    /// Non-empty creation dates that could not be parsed.
    pub unparsed_dates: usize,
}

/// Derive the analytical columns from a selected table.
///
/// Steps, in order:
/// 1. coerce interactions and followers to numbers (failures become `Null`)
/// 2. drop rows missing either
/// 3. `Engagement Ratio`, `Null` on a zero or missing denominator
/// 4. parse `Post Created Date` and split it into hour, weekday and month
/// 5. `Post Length` from `Message`
/// 6. `Presence of Media` from `Type`
pub fn engineer_features(table: RecordTable, date_formats: &[String]) -> FeatureOutcome {
    let mut table = table;

    for name in [col::TOTAL_INTERACTIONS, col::FOLLOWERS] {
        let coerced: Vec<Value> = table.column(name).map(to_numeric).collect();
        let ty = ColumnType::infer(&coerced);
        table.push_column(name, ty, coerced);
    }

    let before = table.height();
    let kept = complete_indices(&table, &[col::TOTAL_INTERACTIONS, col::FOLLOWERS]);
    let mut table = table.take_rows(&kept);
    let rows_dropped = before - table.height();
    if rows_dropped > 0 {
        log::warn!("Dropped {rows_dropped} rows without numeric interactions or followers");
    }

    let ratios = ratio_column(&table);
    table.push_column(col::ENGAGEMENT_RATIO, ColumnType::Float, ratios);

    let mut unparsed_dates = 0usize;
    let stamps: Vec<Option<NaiveDateTime>> = table
        .column(col::CREATED)
        .map(|v| {
            let parsed = parse_timestamp(v, date_formats);
            if parsed.is_none() && !v.is_null() {
                unparsed_dates += 1;
            }
            parsed
        })
        .collect();
    if unparsed_dates > 0 {
        log::warn!(
            "{unparsed_dates} creation dates could not be parsed and are treated as missing"
        );
    }

    table.push_column(
        col::CREATED,
        ColumnType::DateTime,
        stamps.iter().map(|t| t.map_or(Value::Null, Value::DateTime)).collect(),
    );
    table.push_column(
        col::POST_HOUR,
        ColumnType::Integer,
        stamps
            .iter()
            .map(|t| t.map_or(Value::Null, |t| Value::Integer(i64::from(t.hour()))))
            .collect(),
    );
    table.push_column(
        col::POST_DAY,
        ColumnType::Text,
        stamps
            .iter()
            .map(|t| t.map_or(Value::Null, |t| Value::Text(weekday_name(t.weekday()).to_owned())))
            .collect(),
    );
    table.push_column(
        col::POST_MONTH,
        ColumnType::Text,
        stamps
            .iter()
            .map(|t| {
                t.and_then(|t| month_name(t.month()))
                    .map_or(Value::Null, |m| Value::Text(m.to_owned()))
            })
            .collect(),
    );

    let lengths = table.column(col::MESSAGE).map(post_length).collect();
    table.push_column(col::POST_LENGTH, ColumnType::Integer, lengths);

    let media = table.column(col::TYPE).map(presence_of_media).collect();
    table.push_column(col::PRESENCE_OF_MEDIA, ColumnType::Integer, media);

    log::debug!("Engineered features for {} rows", table.height());

    FeatureOutcome {
        table,
        rows_dropped,
        unparsed_dates,
    }
}

/// Append `Interaction Rate`, the same ratio as `Engagement Ratio` under the
/// name the insights and the output file use.
pub fn add_interaction_rate(table: &mut RecordTable) {
    let rates = ratio_column(table);
    table.push_column(col::INTERACTION_RATE, ColumnType::Float, rates);
}

fn ratio_column(table: &RecordTable) -> Vec<Value> {
    table
        .column(col::TOTAL_INTERACTIONS)
        .zip(table.column(col::FOLLOWERS))
        .map(|(num, den)| ratio(num, den))
        .collect()
}

// ---------------------------------------------------------------------------
// Per-cell derivations
// ---------------------------------------------------------------------------

/// Numeric coercion that never fails: anything that is not a finite number
/// becomes `Null`.
pub fn to_numeric(value: &Value) -> Value {
    match value {
        Value::Integer(_) => value.clone(),
        Value::Float(v) => Value::from_f64(*v),
        Value::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .map(Value::Integer)
                .or_else(|_| s.parse::<f64>().map(Value::from_f64))
                .unwrap_or(Value::Null)
        }
        Value::Null | Value::DateTime(_) => Value::Null,
    }
}

/// `numerator / denominator`, or `Null` when either is missing or the
/// denominator is zero.
pub fn ratio(numerator: &Value, denominator: &Value) -> Value {
    match (numerator.as_f64(), denominator.as_f64()) {
        (Some(n), Some(d)) if d != 0.0 => Value::from_f64(n / d),
        _ => Value::Null,
    }
}

/// Parse a creation date. Returns `None` instead of failing.
///
/// Tried in order: RFC 3339, `YYYY-MM-DD HH:MM:SS ±HHMM`, then each of
/// `formats` as a timestamp or a bare date, first with the text as given and
/// then with a trailing zone abbreviation such as `EDT` removed. Offsets are
/// dropped and the wall-clock time kept.
pub fn parse_timestamp(value: &Value, formats: &[String]) -> Option<NaiveDateTime> {
    let text = match value {
        Value::DateTime(t) => return Some(*t),
        Value::Text(s) => s.trim(),
        _ => return None,
    };

    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Some(t.naive_local());
    }
    if let Ok(t) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S %z") {
        return Some(t.naive_local());
    }

    parse_naive(text, formats).or_else(|| {
        let (rest, zone) = text.rsplit_once(' ')?;
        let is_abbreviation =
            (1..=5).contains(&zone.len()) && zone.chars().all(|c| c.is_ascii_alphabetic());
        if is_abbreviation {
            parse_naive(rest.trim_end(), formats)
        } else {
            None
        }
    })
}

fn parse_naive(text: &str, formats: &[String]) -> Option<NaiveDateTime> {
    formats.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(text, fmt).ok().or_else(|| {
            NaiveDate::parse_from_str(text, fmt)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
    })
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// English month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    let month = u8::try_from(month).ok()?;
    Month::try_from(month).ok().map(|m| m.name())
}

/// Character count of the message; `Null` when there is no message.
pub fn post_length(message: &Value) -> Value {
    match message {
        Value::Null => Value::Null,
        Value::Text(s) => Value::Integer(s.chars().count() as i64),
        other => Value::Integer(other.to_field().chars().count() as i64),
    }
}

/// 1 for `Photo` and `Video` (exact, case-sensitive), 0 for every other type,
/// missing included.
pub fn presence_of_media(post_type: &Value) -> Value {
    let is_media = matches!(post_type.as_text(), Some("Photo" | "Video"));
    Value::Integer(i64::from(is_media))
}
