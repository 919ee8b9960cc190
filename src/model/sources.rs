use serde::{Deserialize, Serialize};

use super::build::BuildRecord;
use super::dates::DateFormats;
use crate::error::Result;

/// Build number as it arrives on the wire: Jenkins JSON sends an integer,
/// scraped feeds send text. Both go through the same decimal parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Int(i64),
    Text(String),
}

impl RawNumber {
    fn to_text(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// A build as returned by the workspace API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceBuild {
    pub url: String,
    pub number: RawNumber,
    /// Jenkins `result`; `null` while the build runs
    #[serde(default, alias = "result")]
    pub status: Option<String>,
    #[serde(default)]
    pub building: bool,
    /// Jenkins build id, e.g. `2013-09-01_12-00-00`
    #[serde(default, alias = "id")]
    pub build_date: Option<String>,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub duration: u64,
}

impl WorkspaceBuild {
    pub fn into_record(self, formats: &DateFormats) -> Result<BuildRecord> {
        BuildRecord::from_workspace_with(
            formats,
            &self.url,
            &self.number.to_text(),
            self.status.as_deref().unwrap_or_default(),
            self.building,
            self.build_date.as_deref().unwrap_or_default(),
            self.timestamp,
            self.duration,
        )
    }
}

/// A build entry from a job's RSS feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RssEntry {
    #[serde(alias = "link")]
    pub url: String,
    pub number: RawNumber,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub building: bool,
    #[serde(default, alias = "published")]
    pub build_date: Option<String>,
    #[serde(default, alias = "title")]
    pub message: String,
}

impl RssEntry {
    pub fn into_record(self, formats: &DateFormats) -> Result<BuildRecord> {
        BuildRecord::from_rss_with(
            formats,
            &self.url,
            &self.number.to_text(),
            self.status.as_deref().unwrap_or_default(),
            self.building,
            self.build_date.as_deref().unwrap_or_default(),
            &self.message,
        )
    }
}

/// Parses a JSON array of workspace builds into records.
///
/// # Errors
///
/// Fails on malformed JSON or on the first invalid build number.
pub fn parse_workspace_json(json: &str, formats: &DateFormats) -> Result<Vec<BuildRecord>> {
    let builds: Vec<WorkspaceBuild> = serde_json::from_str(json)?;
    builds
        .into_iter()
        .map(|build| build.into_record(formats))
        .collect()
}

/// Parses a JSON array of RSS entries into records.
///
/// # Errors
///
/// Fails on malformed JSON or on the first invalid build number.
pub fn parse_rss_json(json: &str, formats: &DateFormats) -> Result<Vec<BuildRecord>> {
    let entries: Vec<RssEntry> = serde_json::from_str(json)?;
    entries
        .into_iter()
        .map(|entry| entry.into_record(formats))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JenkinsStateError;
    use crate::model::BuildStatus;

    #[test]
    fn test_parse_workspace_json_from_jenkins_api() {
        let json = r#"[
            {
                "url": "http://jenkins/job/app/42/",
                "number": 42,
                "result": "SUCCESS",
                "building": false,
                "id": "2013-09-01_12-00-00",
                "timestamp": 1378036800000,
                "duration": 5000
            },
            {
                "url": "http://jenkins/job/app/43/",
                "number": "43",
                "result": null,
                "building": true,
                "timestamp": 1378040400000
            }
        ]"#;

        let records = parse_workspace_json(json, &DateFormats::default()).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].number(), 42);
        assert_eq!(records[0].status(), BuildStatus::Success);
        assert_eq!(records[0].duration(), Some(5000));
        assert!(records[0].has_build_date());

        assert_eq!(records[1].status(), BuildStatus::Null);
        assert!(records[1].is_building());
        assert!(!records[1].has_build_date());
        assert_eq!(records[1].build_date().timestamp_millis(), 1_378_040_400_000);
        assert!(records[1].is_after(&records[0]));
    }

    #[test]
    fn test_parse_rss_json() {
        let json = r#"[
            {
                "link": "http://jenkins/job/app/12/",
                "number": "12",
                "status": "FAILURE",
                "published": "2013-09-01T12:00:00Z",
                "title": "app #12 (broken since this build)"
            }
        ]"#;

        let records = parse_rss_json(json, &DateFormats::default()).unwrap();
        assert_eq!(records[0].url(), Some("http://jenkins/job/app/12/"));
        assert_eq!(records[0].status(), BuildStatus::Failure);
        assert_eq!(records[0].message(), Some("app #12 (broken since this build)"));
        assert_eq!(records[0].duration(), Some(0));
    }

    #[test]
    fn test_invalid_number_propagates() {
        let json = r#"[{"url": "u", "number": "lastBuild", "status": "SUCCESS"}]"#;
        let err = parse_rss_json(json, &DateFormats::default()).unwrap_err();
        assert!(matches!(err, JenkinsStateError::InvalidBuildNumber { .. }));
        assert!(err.to_string().contains("lastBuild"));
    }

    #[test]
    fn test_negative_integer_number_is_rejected() {
        let json = r#"[{"url": "u", "number": -3}]"#;
        let err = parse_workspace_json(json, &DateFormats::default()).unwrap_err();
        assert!(matches!(err, JenkinsStateError::InvalidBuildNumber { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_workspace_json("{not json", &DateFormats::default()).unwrap_err();
        assert!(matches!(err, JenkinsStateError::Json(_)));
    }
}
