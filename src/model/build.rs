use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::dates::{self, DateFormats};
use super::status::{BuildStatus, StateIcon};
use crate::error::{JenkinsStateError, Result};

/// One observed build of a Jenkins job.
///
/// Built from either the workspace API or the RSS feed. "No build observed"
/// is expressed as `Option<BuildRecord>`; [`BuildRecord::default`] remains for
/// callers that need a concrete placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildRecord {
    url: Option<String>,
    number: u32,
    build_date: Option<DateTime<Utc>>,
    timestamp: DateTime<Utc>,
    duration: Option<u64>,
    building: bool,
    message: Option<String>,
    status: BuildStatus,
}

/// Writes the read-side view: `buildDate` is always present, with
/// `hasBuildDate` telling whether the source supplied it.
impl Serialize for BuildRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BuildRecord", 9)?;
        state.serialize_field("url", &self.url)?;
        state.serialize_field("number", &self.number)?;
        state.serialize_field("buildDate", &self.build_date())?;
        state.serialize_field("hasBuildDate", &self.has_build_date())?;
        state.serialize_field("timestamp", &self.timestamp)?;
        state.serialize_field("duration", &self.duration)?;
        state.serialize_field("building", &self.building)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("status", &self.status)?;
        state.end()
    }
}

impl Default for BuildRecord {
    fn default() -> Self {
        Self {
            url: None,
            number: 0,
            build_date: None,
            timestamp: Utc::now(),
            duration: None,
            building: false,
            message: None,
            status: BuildStatus::Null,
        }
    }
}

impl BuildRecord {
    /// Builds a record from workspace API fields.
    ///
    /// # Errors
    ///
    /// Returns [`JenkinsStateError::InvalidBuildNumber`] if `number` is not a
    /// non-negative decimal integer. Bad dates and statuses never fail.
    pub fn from_workspace(
        url: &str,
        number: &str,
        status: &str,
        building: bool,
        build_date: &str,
        timestamp_millis: i64,
        duration_millis: u64,
    ) -> Result<Self> {
        Self::from_workspace_with(
            &DateFormats::default(),
            url,
            number,
            status,
            building,
            build_date,
            timestamp_millis,
            duration_millis,
        )
    }

    /// Same as [`BuildRecord::from_workspace`] with configured date formats.
    #[allow(clippy::too_many_arguments)]
    pub fn from_workspace_with(
        formats: &DateFormats,
        url: &str,
        number: &str,
        status: &str,
        building: bool,
        build_date: &str,
        timestamp_millis: i64,
        duration_millis: u64,
    ) -> Result<Self> {
        Ok(Self {
            url: Some(url.to_string()),
            number: parse_build_number(number)?,
            build_date: dates::parse_date(build_date, &formats.workspace_format),
            timestamp: dates::from_epoch_millis(timestamp_millis),
            duration: Some(duration_millis),
            building,
            message: None,
            status: BuildStatus::parse(status),
        })
    }

    /// Builds a record from an RSS feed entry.
    ///
    /// The feed carries no timing data: the timestamp is the epoch and the
    /// duration is zero.
    ///
    /// # Errors
    ///
    /// Returns [`JenkinsStateError::InvalidBuildNumber`] if `number` is not a
    /// non-negative decimal integer.
    pub fn from_rss(
        url: &str,
        number: &str,
        status: &str,
        building: bool,
        build_date: &str,
        message: &str,
    ) -> Result<Self> {
        Self::from_rss_with(
            &DateFormats::default(),
            url,
            number,
            status,
            building,
            build_date,
            message,
        )
    }

    /// Same as [`BuildRecord::from_rss`] with configured date formats.
    pub fn from_rss_with(
        formats: &DateFormats,
        url: &str,
        number: &str,
        status: &str,
        building: bool,
        build_date: &str,
        message: &str,
    ) -> Result<Self> {
        Ok(Self {
            url: Some(url.to_string()),
            number: parse_build_number(number)?,
            build_date: dates::parse_date(build_date, &formats.rss_format),
            timestamp: dates::from_epoch_millis(0),
            duration: Some(0),
            building,
            message: Some(message.to_string()),
            status: BuildStatus::parse(status),
        })
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn status(&self) -> BuildStatus {
        self.status
    }

    /// Date the build ran, falling back to the timestamp when the source
    /// date was missing or unparseable.
    pub fn build_date(&self) -> DateTime<Utc> {
        self.build_date.unwrap_or(self.timestamp)
    }

    /// Whether the source supplied a usable build date.
    pub fn has_build_date(&self) -> bool {
        self.build_date.is_some()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Elapsed time in milliseconds, if known.
    pub fn duration(&self) -> Option<u64> {
        self.duration
    }

    pub fn is_building(&self) -> bool {
        self.building
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = Some(url.into());
    }

    pub fn set_number(&mut self, number: u32) {
        self.number = number;
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = BuildStatus::parse(status);
    }

    pub fn set_build_date(&mut self, build_date: Option<DateTime<Utc>>) {
        self.build_date = build_date;
    }

    pub fn set_timestamp(&mut self, timestamp_millis: i64) {
        self.timestamp = dates::from_epoch_millis(timestamp_millis);
    }

    pub fn set_duration(&mut self, duration: Option<u64>) {
        self.duration = duration;
    }

    pub fn set_building(&mut self, building: bool) {
        self.building = building;
    }

    /// Icon for this record's status.
    pub fn state_icon(&self) -> StateIcon {
        self.status.icon()
    }

    /// Whether this build is newer than `other`. Both must belong to the same job.
    pub fn is_after(&self, other: &BuildRecord) -> bool {
        self.number > other.number
    }
}

/// Plain ASCII digits only; `u32::from_str` would also take a leading `+`.
fn parse_build_number(number: &str) -> Result<u32> {
    let invalid = || JenkinsStateError::InvalidBuildNumber {
        value: number.to_string(),
    };

    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    number.parse::<u32>().map_err(|_| invalid())
}

/// Icon for an optional record; `None` gets the NULL status icon.
pub fn state_icon_of(record: Option<&BuildRecord>) -> StateIcon {
    record.map_or(BuildStatus::Null.icon(), BuildRecord::state_icon)
}

/// Newest record of a job. The earliest one wins between equal numbers.
pub fn latest<'a, I>(records: I) -> Option<&'a BuildRecord>
where
    I: IntoIterator<Item = &'a BuildRecord>,
{
    records.into_iter().fold(None, |newest, record| match newest {
        Some(current) if !record.is_after(current) => Some(current),
        _ => Some(record),
    })
}

/// Replaces `current` with `incoming` only when `incoming` is newer.
pub fn supersede(current: Option<BuildRecord>, incoming: BuildRecord) -> Option<BuildRecord> {
    match current {
        Some(current) if !incoming.is_after(&current) => Some(current),
        _ => Some(incoming),
    }
}
