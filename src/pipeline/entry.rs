use serde::{Deserialize, Serialize};

/// Time spent in a single category (a language, a project or an editor) during the reporting
/// window. Field names follow the stats API so entries can be deserialized directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEntry {
    pub name: String,
    pub total_seconds: f64,
    pub percent: f64,
    pub digital: String,
    pub decimal: String,
    pub text: String,
    pub hours: u32,
    pub minutes: u32,
}

impl UsageEntry {
    /// Builds an entry whose display strings are derived from `hours` and `minutes`.
    pub fn new(
        name: impl Into<String>,
        total_seconds: f64,
        percent: f64,
        hours: u32,
        minutes: u32,
    ) -> Self {
        let (hours, minutes) = carry_minutes(hours, minutes);
        Self {
            name: name.into(),
            total_seconds,
            percent,
            digital: format_digital(hours, minutes),
            decimal: format_decimal(hours, minutes),
            text: format_text(hours, minutes),
            hours,
            minutes,
        }
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }
}

/// Combines two entries into one. Durations and shares are added, the minute overflow is carried
/// into hours and the display strings are rebuilt. The name of `a` is kept.
pub fn combine(a: UsageEntry, b: &UsageEntry) -> UsageEntry {
    UsageEntry::new(
        a.name,
        a.total_seconds + b.total_seconds,
        a.percent + b.percent,
        a.hours + b.hours,
        a.minutes + b.minutes,
    )
}

fn carry_minutes(hours: u32, minutes: u32) -> (u32, u32) {
    if minutes >= 60 {
        (hours + minutes / 60, minutes % 60)
    } else {
        (hours, minutes)
    }
}

fn format_digital(hours: u32, minutes: u32) -> String {
    format!("{hours}:{minutes}")
}

// Minutes are scaled by 1/0.6 to read as hundredths of an hour.
fn format_decimal(hours: u32, minutes: u32) -> String {
    format!("{hours}.{}", (minutes as f64 / 0.6).round() as u32)
}

fn format_text(hours: u32, minutes: u32) -> String {
    if hours == 0 {
        format!("{minutes} mins")
    } else {
        format!("{hours} hrs {minutes} mins")
    }
}
