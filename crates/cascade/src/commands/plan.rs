use std::path::Path;

use chrono::{Local, NaiveDate};
use clap::ValueEnum;

use cascade_config::ReleaseConfig;
use cascade_core::{BumpType, ChangeNote};
use cascade_operations::operations::{ApplyOperation, ApplyOutput, PlanInput, PlanOperation, PlanOutput};
use cascade_operations::providers::{FileSystemRepository, Git2Repository};

use super::PlanArgs;
use crate::error::{CliError, Result};

const DEFAULT_SUMMARY: &str = "Manual release";

/// One `--release` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReleaseArg {
    pub path: String,
    pub note: ChangeNote,
}

/// Parses `PATH=BUMP` or `PATH=BUMP:SUMMARY`.
pub(crate) fn parse_release(value: &str) -> std::result::Result<ReleaseArg, String> {
    let invalid = |reason: &str| {
        CliError::InvalidRelease {
            spec: value.to_string(),
            reason: reason.to_string(),
        }
        .to_string()
    };

    let (path, rest) = value
        .split_once('=')
        .ok_or_else(|| invalid("expected PATH=BUMP[:SUMMARY]"))?;
    if path.trim().is_empty() {
        return Err(invalid("component path is empty"));
    }

    let (bump, summary) = match rest.split_once(':') {
        Some((bump, summary)) => (bump, summary.trim()),
        None => (rest, ""),
    };
    let bump = <BumpType as ValueEnum>::from_str(bump.trim(), true)
        .map_err(|_| invalid("bump must be one of major, minor, patch"))?;
    let summary = if summary.is_empty() { DEFAULT_SUMMARY } else { summary };

    Ok(ReleaseArg {
        path: path.trim().to_string(),
        note: ChangeNote::new(bump, summary),
    })
}

fn parse_date(value: Option<&str>) -> Result<NaiveDate> {
    match value {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|source| CliError::InvalidDate {
            value: text.to_string(),
            source,
        }),
        None => Ok(Local::now().date_naive()),
    }
}

pub(crate) fn run(args: PlanArgs, root: &Path) -> Result<()> {
    let config_path = root.join(&args.config);
    if !config_path.is_file() {
        return Err(CliError::MissingConfig(config_path));
    }
    let config = ReleaseConfig::load(&config_path)?;

    let git_ref = args
        .git_ref
        .clone()
        .unwrap_or_else(|| config.target_branch().to_string());
    let input = PlanInput {
        notes: args
            .releases
            .into_iter()
            .map(|release| (release.path, release.note))
            .collect(),
        git_ref: git_ref.clone(),
        release_date: parse_date(args.date.as_deref())?,
    };

    let output = if args.working_tree {
        PlanOperation::new(config, FileSystemRepository::new(root)).execute(input)?
    } else {
        PlanOperation::new(config, Git2Repository::new(root)).execute(input)?
    };

    print_plan(&output);

    if args.write {
        if !args.working_tree {
            warn_if_not_on(root, &git_ref);
        }
        let repo = FileSystemRepository::new(root);
        let applied = ApplyOperation::new(&repo, &repo).execute(&output.updates(), &git_ref)?;
        print_applied(&applied);
    }

    Ok(())
}

/// Updates are computed from `git_ref` but written to the working tree.
fn warn_if_not_on(root: &Path, git_ref: &str) {
    match cascade_git::current_branch(root) {
        Ok(branch) if branch != git_ref => {
            tracing::warn!(%branch, git_ref, "working tree is not on the planned ref");
        }
        Ok(_) => {}
        Err(err) => tracing::debug!(error = %err, "could not determine current branch"),
    }
}

fn print_plan(output: &PlanOutput) {
    if output.candidates.is_empty() {
        println!("Nothing to release.");
        return;
    }

    for candidate in &output.candidates {
        println!("{}", candidate.pull_request.title);
        println!();
        print!("{}", candidate.pull_request.body.render());
        println!();
        println!("Updates:");
        for update in &candidate.pull_request.updates {
            println!("  {} ({})", update.path, update.updater.kind());
        }
        println!();
    }
}

fn print_applied(applied: &ApplyOutput) {
    println!("Wrote {} file(s):", applied.written.len());
    for path in &applied.written {
        println!("  {path}");
    }
    if !applied.skipped.is_empty() {
        println!("Skipped missing files:");
        for path in &applied.skipped {
            println!("  {path}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_path_and_bump() {
        let release = parse_release("node1=patch").expect("valid release");

        assert_eq!(release.path, "node1");
        assert_eq!(release.note.bump, BumpType::Patch);
        assert_eq!(release.note.summary, DEFAULT_SUMMARY);
    }

    #[test]
    fn parses_summary_with_colons() {
        let release = parse_release("crates/a=Minor:add API: streaming").expect("valid release");

        assert_eq!(release.path, "crates/a");
        assert_eq!(release.note.bump, BumpType::Minor);
        assert_eq!(release.note.summary, "add API: streaming");
    }

    #[test]
    fn rejects_missing_bump() {
        let err = parse_release("node1").expect_err("no bump");
        assert!(err.contains("PATH=BUMP"));
    }

    #[test]
    fn rejects_unknown_bump() {
        let err = parse_release("node1=huge").expect_err("unknown bump");
        assert!(err.contains("major, minor, patch"));
    }

    #[test]
    fn rejects_empty_path() {
        assert!(parse_release("=patch").is_err());
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_date(Some("2024-05-01")).expect("valid date"),
            NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date")
        );
        assert!(matches!(
            parse_date(Some("05/01/2024")),
            Err(CliError::InvalidDate { .. })
        ));
    }
}
