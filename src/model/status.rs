use std::fmt;

use log::debug;
use serde::Serialize;

/// Outcome of a Jenkins build as shown by the plugin.
///
/// Declaration order matters: [`StateIcon::for_job_color`] tests the color
/// predicates in this order and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildStatus {
    Success,
    Stable,
    Failure,
    Unstable,
    Aborted,
    #[default]
    Null,
    Folder,
}

impl BuildStatus {
    pub const ALL: [BuildStatus; 7] = [
        BuildStatus::Success,
        BuildStatus::Stable,
        BuildStatus::Failure,
        BuildStatus::Unstable,
        BuildStatus::Aborted,
        BuildStatus::Null,
        BuildStatus::Folder,
    ];

    /// Maps upstream status text to a status. Never fails.
    ///
    /// Accepts Jenkins result names in any case (`SUCCESS`, `unstable`, ...)
    /// and job colors (`blue`, `red_anime`, ...). Anything else, including
    /// `null`, `NOT_BUILT` and the empty string, is [`BuildStatus::Null`].
    pub fn parse(status: &str) -> Self {
        let status = status.trim();
        let parsed = match status.to_ascii_uppercase().as_str() {
            "SUCCESS" => Some(Self::Success),
            "STABLE" => Some(Self::Stable),
            "FAILURE" => Some(Self::Failure),
            "UNSTABLE" => Some(Self::Unstable),
            "ABORTED" => Some(Self::Aborted),
            "FOLDER" => Some(Self::Folder),
            "NULL" | "" => Some(Self::Null),
            _ => None,
        };

        parsed
            .or_else(|| Self::from_job_color(status))
            .unwrap_or_else(|| {
                debug!("Unsupported build status '{status}', using NULL");
                Self::Null
            })
    }

    /// First status, in declaration order, whose color predicate accepts `job_color`.
    pub fn from_job_color(job_color: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.matches_job_color(job_color))
    }

    /// Whether a Jenkins job color string represents this status.
    pub fn matches_job_color(self, job_color: &str) -> bool {
        let Some(color) = JobColor::parse(job_color) else {
            return false;
        };

        match self {
            Self::Success | Self::Stable => color.base == BaseColor::Blue,
            Self::Failure => color.base == BaseColor::Red,
            Self::Unstable => color.base == BaseColor::Yellow,
            Self::Aborted => color.base == BaseColor::Aborted,
            Self::Null => matches!(
                color.base,
                BaseColor::Grey | BaseColor::Disabled | BaseColor::NotBuilt
            ),
            Self::Folder => false,
        }
    }

    pub fn icon(self) -> StateIcon {
        match self {
            Self::Success | Self::Stable => StateIcon::Blue,
            Self::Failure => StateIcon::Red,
            Self::Unstable => StateIcon::Yellow,
            Self::Aborted | Self::Null => StateIcon::Grey,
            Self::Folder => StateIcon::Folder,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Stable => "STABLE",
            Self::Failure => "FAILURE",
            Self::Unstable => "UNSTABLE",
            Self::Aborted => "ABORTED",
            Self::Null => "NULL",
            Self::Folder => "FOLDER",
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseColor {
    Blue,
    Red,
    Yellow,
    Grey,
    Aborted,
    Disabled,
    NotBuilt,
}

/// A Jenkins job color such as `blue` or `red_anime`.
///
/// The `_anime` suffix marks a job whose next build is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobColor {
    base: BaseColor,
    animated: bool,
}

impl JobColor {
    pub fn parse(text: &str) -> Option<Self> {
        let lower = text.trim().to_ascii_lowercase();
        let (name, animated) = match lower.strip_suffix("_anime") {
            Some(name) => (name, true),
            None => (lower.as_str(), false),
        };

        let base = match name {
            "blue" => BaseColor::Blue,
            "red" => BaseColor::Red,
            "yellow" => BaseColor::Yellow,
            "grey" => BaseColor::Grey,
            "aborted" => BaseColor::Aborted,
            "disabled" => BaseColor::Disabled,
            "notbuilt" => BaseColor::NotBuilt,
            _ => return None,
        };

        Some(Self { base, animated })
    }

    pub fn base(&self) -> BaseColor {
        self.base
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }
}

/// Display identifier a renderer maps to an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StateIcon {
    Blue,
    Red,
    Yellow,
    Grey,
    Folder,
}

impl StateIcon {
    /// Icon for a raw job color. Total over every input.
    ///
    /// `None` is the folder case: Jenkins reports no color for folders.
    /// Colors that match no status get the NULL icon.
    pub fn for_job_color(job_color: Option<&str>) -> Self {
        let Some(job_color) = job_color else {
            return BuildStatus::Folder.icon();
        };

        BuildStatus::from_job_color(job_color)
            .unwrap_or(BuildStatus::Null)
            .icon()
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Blue => "job-blue",
            Self::Red => "job-red",
            Self::Yellow => "job-yellow",
            Self::Grey => "job-grey",
            Self::Folder => "folder",
        }
    }
}

impl fmt::Display for StateIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
