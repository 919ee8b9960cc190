//! Normalized Jenkins build state.
//!
//! Turns build data from the Jenkins workspace API or a job's RSS feed into
//! [`BuildRecord`] values with a closed [`BuildStatus`] and a display
//! [`StateIcon`].

pub mod config;
pub mod error;
pub mod model;

pub use error::{JenkinsStateError, Result};
pub use model::{BuildRecord, BuildStatus, StateIcon};
