use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{JenkinsStateError, Result};

/// Build dates as found in Jenkins build ids, e.g. `2013-09-01_12-00-00`.
pub const WORKSPACE_DATE_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Entry dates in the Jenkins RSS/Atom feeds, e.g. `2013-09-01T12:00:00Z`.
pub const RSS_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Date formats used to read each upstream source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DateFormats {
    #[serde(default = "default_workspace_format")]
    pub workspace_format: String,

    #[serde(default = "default_rss_format")]
    pub rss_format: String,
}

impl Default for DateFormats {
    fn default() -> Self {
        Self {
            workspace_format: default_workspace_format(),
            rss_format: default_rss_format(),
        }
    }
}

fn default_workspace_format() -> String {
    WORKSPACE_DATE_FORMAT.to_string()
}

fn default_rss_format() -> String {
    RSS_DATE_FORMAT.to_string()
}

impl DateFormats {
    /// Rejects format strings chrono cannot interpret.
    ///
    /// # Errors
    ///
    /// Returns [`JenkinsStateError::Config`] naming the first invalid format.
    pub fn validate(&self) -> Result<()> {
        for (name, format) in [
            ("workspace-format", &self.workspace_format),
            ("rss-format", &self.rss_format),
        ] {
            if format.is_empty() || StrftimeItems::new(format).any(|item| item == Item::Error) {
                return Err(JenkinsStateError::Config(format!(
                    "{name} is not a valid date format: '{format}'"
                )));
            }
        }
        Ok(())
    }
}

/// Best-effort parse of a zone-less date, read as UTC.
///
/// Returns `None` instead of failing; the caller decides the fallback.
pub fn parse_date(text: &str, format: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    match NaiveDateTime::parse_from_str(text, format) {
        Ok(naive) => Some(naive.and_utc()),
        Err(e) => {
            debug!("Could not parse date '{text}' with format '{format}': {e}");
            None
        }
    }
}

/// Converts epoch milliseconds, using the current time when out of range.
pub fn from_epoch_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_else(|| {
        warn!("Timestamp {millis}ms is out of range, using current time");
        Utc::now()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_workspace_date() {
        let date = parse_date("2013-09-01_12-00-00", WORKSPACE_DATE_FORMAT).unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2013, 9, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rss_date() {
        let date = parse_date("2013-09-01T12:00:00Z", RSS_DATE_FORMAT).unwrap();
        assert_eq!(date.timestamp_millis(), 1_378_036_800_000);
    }

    #[test]
    fn test_parse_date_is_best_effort() {
        assert!(parse_date("", WORKSPACE_DATE_FORMAT).is_none());
        assert!(parse_date("yesterday", WORKSPACE_DATE_FORMAT).is_none());
        assert!(parse_date("2013-09-01T12:00:00Z", WORKSPACE_DATE_FORMAT).is_none());
    }

    #[test]
    fn test_from_epoch_millis() {
        assert_eq!(from_epoch_millis(0), DateTime::UNIX_EPOCH);
        assert_eq!(from_epoch_millis(1_378_036_800_000).timestamp(), 1_378_036_800);
    }

    #[test]
    fn test_from_epoch_millis_out_of_range_uses_now() {
        let before = Utc::now();
        let date = from_epoch_millis(i64::MAX);
        assert!(date >= before);
    }

    #[test]
    fn test_validate_formats() {
        assert!(DateFormats::default().validate().is_ok());

        let formats = DateFormats {
            workspace_format: "%Y-%Q".to_string(),
            ..DateFormats::default()
        };
        let err = formats.validate().unwrap_err();
        assert!(err.to_string().contains("workspace-format"));
    }
}
