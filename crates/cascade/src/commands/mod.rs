mod plan;

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::error::Result;

pub(crate) use plan::ReleaseArg;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Propose releases for the given components and their dependents
    Plan(PlanArgs),
}

#[derive(Args)]
pub(crate) struct PlanArgs {
    /// Release configuration file, relative to the repository root
    #[arg(long, default_value = cascade_config::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Component to release, as PATH=BUMP or PATH=BUMP:SUMMARY
    #[arg(long = "release", short = 'r', value_name = "PATH=BUMP[:SUMMARY]", value_parser = plan::parse_release, required = true)]
    pub releases: Vec<ReleaseArg>,

    /// Ref to read manifests at (default: the configured target branch)
    #[arg(long = "ref")]
    pub git_ref: Option<String>,

    /// Release date written into changelogs (default: today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,

    /// Read files from the working tree instead of git
    #[arg(long)]
    pub working_tree: bool,

    /// Apply the planned updates to the working tree
    #[arg(long)]
    pub write: bool,
}

impl Commands {
    pub(crate) fn execute(self, root: &Path) -> Result<()> {
        match self {
            Self::Plan(args) => plan::run(args, root),
        }
    }
}
