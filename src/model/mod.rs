mod build;
pub mod dates;
mod sources;
mod status;

pub use build::{latest, state_icon_of, supersede, BuildRecord};
pub use dates::DateFormats;
pub use sources::{parse_rss_json, parse_workspace_json, RawNumber, RssEntry, WorkspaceBuild};
pub use status::{BaseColor, BuildStatus, JobColor, StateIcon};
