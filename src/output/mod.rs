mod styling;
mod tables;

use anyhow::Result;
use jenkins_state::config::OutputFormat;
use jenkins_state::{BuildRecord, StateIcon};

use styling::{dim, icon, magenta_bold};

/// Prints the banner to stderr.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        magenta_bold("jenkins-state"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("Jenkins build state normalizer")
    );
}

/// Renders records in the requested format.
pub fn render_records(
    records: &[BuildRecord],
    format: OutputFormat,
    pretty: bool,
) -> Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Json => Ok(serde_json::to_string(records)?),
        OutputFormat::Table => Ok(tables::records_table(records).to_string()),
    }
}

/// Renders a single record, or an explicit "no build" result.
pub fn render_latest(
    record: Option<&BuildRecord>,
    format: OutputFormat,
    pretty: bool,
) -> Result<String> {
    match (format, record) {
        (OutputFormat::Json, _) if pretty => Ok(serde_json::to_string_pretty(&record)?),
        (OutputFormat::Json, _) => Ok(serde_json::to_string(&record)?),
        (OutputFormat::Table, Some(record)) => {
            Ok(tables::records_table(std::slice::from_ref(record)).to_string())
        }
        (OutputFormat::Table, None) => Ok(format!(
            "No build observed ({})",
            icon(jenkins_state::model::state_icon_of(None))
        )),
    }
}

pub fn render_icon(state_icon: StateIcon, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::json!({ "icon": state_icon.id() }).to_string(),
        OutputFormat::Table => icon(state_icon).to_string(),
    }
}
