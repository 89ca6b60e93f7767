use std::process::Command;

use chrono::Utc;

const TAG_PREFIX: &str = "cascade-v";

/// Exposes `CASCADE_VERSION`: the package version on a tagged release commit,
/// otherwise the version with commit and build date as build metadata.
fn main() {
    for watched in ["../../.git/HEAD", "../../.git/refs/tags"] {
        println!("cargo:rerun-if-changed={watched}");
    }

    let version = env!("CARGO_PKG_VERSION");
    let release_tag = format!("{TAG_PREFIX}{version}");

    let display = match git(&["describe", "--tags", "--exact-match", "HEAD"]) {
        Some(tag) if tag == release_tag => version.to_owned(),
        _ => {
            let commit = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_owned());
            format!("{version}+{commit}.{}", Utc::now().format("%Y%m%d"))
        }
    };

    println!("cargo:rustc-env=CASCADE_VERSION={display}");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_owned())
}
