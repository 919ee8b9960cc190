use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::io::Read;
use std::path::{Path, PathBuf};

use jenkins_state::config::{Config, OutputFormat};
use jenkins_state::model::{self, BuildRecord, DateFormats};
use jenkins_state::StateIcon;

use crate::output;

#[derive(Parser)]
#[command(name = "jenkins-state")]
#[command(author, version, about = "Jenkins build state normalizer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true, env = "JENKINS_STATE_CONFIG")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Source {
    Workspace,
    Rss,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a JSON array of raw builds
    Parse {
        #[arg(short, long, value_enum)]
        source: Source,

        /// Read from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Print the newest build of a JSON array of raw builds
    Latest {
        #[arg(short, long, value_enum)]
        source: Source,

        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Print the icon for a job color; no color means a folder
    Icon { color: Option<String> },
}

impl Cli {
    fn read_records(
        source: Source,
        input: Option<&Path>,
        formats: &DateFormats,
    ) -> Result<Vec<BuildRecord>> {
        let json = match input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input: {}", path.display()))?,
            None => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read stdin")?;
                buffer
            }
        };

        let records = match source {
            Source::Workspace => model::parse_workspace_json(&json, formats),
            Source::Rss => model::parse_rss_json(&json, formats),
        }
        .context("Failed to parse builds")?;

        info!("Parsed {} builds from {:?} source", records.len(), source);
        Ok(records)
    }

    fn emit(&self, rendered: &str) -> Result<()> {
        if let Some(output_path) = &self.output {
            std::fs::write(output_path, rendered)?;
            info!("Output written to: {}", output_path.display());
        } else {
            println!("{rendered}");
        }
        Ok(())
    }

    pub fn execute(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let format = self.format.unwrap_or(config.output.format);
        let pretty = self.pretty || config.output.pretty;

        let rendered = match &self.command {
            Commands::Parse { source, input } => {
                let records = Self::read_records(*source, input.as_deref(), &config.dates)?;
                output::render_records(&records, format, pretty)?
            }
            Commands::Latest { source, input } => {
                let records = Self::read_records(*source, input.as_deref(), &config.dates)?;
                output::render_latest(model::latest(&records), format, pretty)?
            }
            Commands::Icon { color } => {
                output::render_icon(StateIcon::for_job_color(color.as_deref()), format)
            }
        };

        self.emit(&rendered)
    }
}
