use cascade_config::ReleaseConfig;
use cascade_core::{BumpType, ChangeNote, Version};
use cascade_operations::operations::{ApplyOperation, PlanInput, PlanOperation, PlanOutput};
use cascade_operations::providers::InMemoryRepository;
use chrono::NaiveDate;

const LEDGER: &str = r#"{
  "node1": "3.3.3",
  "node2": "2.2.2",
  "node3": "1.1.1",
  "node4": "4.4.4"
}
"#;

const CONFIG: &str = r#"{
  "packages": {
    "node1": { "release-type": "node" },
    "node2": { "release-type": "node" },
    "node3": { "release-type": "node" },
    "node4": { "release-type": "node" },
    "node5": { "release-type": "node" }
  }
}"#;

fn package_json(name: &str, version: &str, dependencies: &[(&str, &str)]) -> String {
    let mut content = format!("{{\n  \"name\": \"{name}\",\n  \"version\": \"{version}\"");
    if !dependencies.is_empty() {
        let entries: Vec<String> = dependencies
            .iter()
            .map(|(dep, spec)| format!("    \"{dep}\": \"{spec}\""))
            .collect();
        content.push_str(",\n  \"dependencies\": {\n");
        content.push_str(&entries.join(",\n"));
        content.push_str("\n  }");
    }
    content.push_str("\n}\n");
    content
}

/// node1 <- node2 <- node3 and node4 <- node5.
fn workspace() -> InMemoryRepository {
    InMemoryRepository::new()
        .with_file(".release-manifest.json", LEDGER)
        .with_file("node1/package.json", package_json("@here/pkgA", "3.3.3", &[]))
        .with_file(
            "node2/package.json",
            package_json("@here/pkgB", "2.2.2", &[("@here/pkgA", "^3.3.3")]),
        )
        .with_file(
            "node3/package.json",
            package_json("@here/pkgC", "1.1.1", &[("@here/pkgB", "^2.2.2")]),
        )
        .with_file("node4/package.json", package_json("@here/pkgD", "4.4.4", &[]))
        .with_file(
            "node5/package.json",
            package_json("@here/pkgE", "1.0.0", &[("@here/pkgD", "4.4.4")]),
        )
}

fn fix(paths: &[&str]) -> PlanInput {
    PlanInput {
        notes: paths
            .iter()
            .map(|path| (path.to_string(), ChangeNote::new(BumpType::Patch, "fix a bug")))
            .collect(),
        git_ref: "main".to_string(),
        release_date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
    }
}

fn plan(config: &str, repo: &InMemoryRepository, paths: &[&str]) -> PlanOutput {
    let config = ReleaseConfig::from_json_str(config).expect("valid config");
    PlanOperation::new(config, repo)
        .execute(fix(paths))
        .expect("plan succeeds")
}

fn apply(output: &PlanOutput, repo: &InMemoryRepository) {
    ApplyOperation::new(repo, repo)
        .execute(&output.updates(), "main")
        .expect("apply succeeds");
}

fn update_paths(output: &PlanOutput) -> Vec<String> {
    output.updates().into_iter().map(|u| u.path).collect()
}

fn file(repo: &InMemoryRepository, path: &str) -> String {
    repo.file(path).unwrap_or_else(|| panic!("{path} should exist"))
}

fn ledger_version(output: &PlanOutput, path: &str) -> Option<Version> {
    output.ledger.manifest().get(path).cloned()
}

#[test]
fn release_cascades_through_dependents() {
    let repo = workspace();

    let output = plan(CONFIG, &repo, &["node1"]);

    assert_eq!(output.candidates.len(), 1);
    assert_eq!(output.candidates[0].path, ".");
    assert_eq!(output.candidates[0].pull_request.title, "chore: release main");
    assert_eq!(ledger_version(&output, "node1"), Some(Version::new(3, 3, 4)));
    assert_eq!(ledger_version(&output, "node2"), Some(Version::new(2, 2, 3)));
    assert_eq!(ledger_version(&output, "node3"), Some(Version::new(1, 1, 2)));
    assert_eq!(ledger_version(&output, "node4"), Some(Version::new(4, 4, 4)));
    assert_eq!(ledger_version(&output, "node5"), None);

    let paths = update_paths(&output);
    assert!(!paths.iter().any(|p| p.starts_with("node4/")));
    assert!(!paths.iter().any(|p| p.starts_with("node5/")));

    apply(&output, &repo);

    let node2 = file(&repo, "node2/package.json");
    assert!(node2.contains("\"version\": \"2.2.3\""));
    assert!(node2.contains("\"@here/pkgA\": \"^3.3.4\""));
    let node3 = file(&repo, "node3/package.json");
    assert!(node3.contains("\"version\": \"1.1.2\""));
    assert!(node3.contains("\"@here/pkgB\": \"^2.2.3\""));
    assert_eq!(
        file(&repo, ".release-manifest.json"),
        "{\n  \"node1\": \"3.3.4\",\n  \"node2\": \"2.2.3\",\n  \"node3\": \"1.1.2\",\n  \"node4\": \"4.4.4\"\n}\n"
    );
}

#[test]
fn cascaded_components_get_dependency_notes() {
    let repo = workspace();

    let output = plan(CONFIG, &repo, &["node1"]);
    apply(&output, &repo);

    let changelog = file(&repo, "node2/CHANGELOG.md");
    assert!(changelog.starts_with("# Changelog\n"));
    assert!(changelog.contains(
        "## [2.2.3] - 2024-05-01\n\n\
         * The following workspace dependencies were updated\n\
         \x20 * dependencies\n\
         \x20   * @here/pkgA bumped from 3.3.3 to 3.3.4\n"
    ));
    assert!(file(&repo, "node3/CHANGELOG.md").contains("@here/pkgB bumped from 2.2.2 to 2.2.3"));
}

#[test]
fn unrecorded_dependents_bump_from_their_manifest_version() {
    let repo = workspace();

    let output = plan(CONFIG, &repo, &["node1", "node4"]);

    assert_eq!(ledger_version(&output, "node4"), Some(Version::new(4, 4, 5)));
    assert_eq!(ledger_version(&output, "node5"), Some(Version::new(1, 0, 1)));

    apply(&output, &repo);
    let node5 = file(&repo, "node5/package.json");
    assert!(node5.contains("\"version\": \"1.0.1\""));
    assert!(node5.contains("\"@here/pkgD\": \"4.4.5\""));
}

#[test]
fn cascade_only_flows_towards_dependents() {
    let repo = workspace();

    let output = plan(CONFIG, &repo, &["node2"]);

    assert_eq!(ledger_version(&output, "node1"), Some(Version::new(3, 3, 3)));
    assert_eq!(ledger_version(&output, "node2"), Some(Version::new(2, 2, 3)));
    assert_eq!(ledger_version(&output, "node3"), Some(Version::new(1, 1, 2)));
    let paths = update_paths(&output);
    assert!(!paths.iter().any(|p| p.starts_with("node1/")));
    assert!(!paths.iter().any(|p| p.starts_with("node4/")));
}

#[test]
fn released_components_also_note_released_dependencies() {
    let repo = workspace();

    let output = plan(CONFIG, &repo, &["node1", "node2"]);
    apply(&output, &repo);

    let changelog = file(&repo, "node2/CHANGELOG.md");
    assert!(changelog.contains("### Changed\n\n- fix a bug"));
    assert!(changelog.contains("@here/pkgA bumped from 3.3.3 to 3.3.4"));
    assert!(!file(&repo, "node1/CHANGELOG.md").contains("workspace dependencies"));
}

#[test]
fn configured_component_labels_its_body_section() {
    let config = r#"{
  "packages": {
    "node1": { "release-type": "node" },
    "node2": { "release-type": "node", "component": "pkgB" },
    "node3": { "release-type": "node" }
  }
}"#;
    let repo = workspace();

    let output = plan(config, &repo, &["node1"]);

    let body = output.candidates[0].pull_request.body.render();
    assert!(body.starts_with(":package: Release proposal\n---\n"));
    assert!(body.contains("<details><summary>pkgB: 2.2.3</summary>"));
    assert!(!body.contains("<summary>node3"));
    assert!(body.contains("## [1.1.2] - 2024-05-01"));
}

#[test]
fn extra_files_are_included_for_cascaded_components() {
    let config = r#"{
  "packages": {
    "node1": { "release-type": "node" },
    "node2": { "release-type": "node", "extra-files": ["my-file"] }
  }
}"#;
    let repo = workspace();

    let output = plan(config, &repo, &["node1"]);

    let update = output.candidates[0]
        .pull_request
        .update("node2/my-file")
        .expect("extra file update");
    assert_eq!(update.updater.kind(), "generic");
}

#[test]
fn peer_dependencies_follow_the_toggle() {
    let repo = workspace().with_file(
        "plugin1/package.json",
        "{\n  \"name\": \"@here/plugin1\",\n  \"version\": \"4.4.4\",\n  \"peerDependencies\": {\n    \"@here/pkgA\": \"^3.3.3\"\n  }\n}\n",
    );
    let config = |peer: bool| {
        format!(
            r#"{{
  "update-peer-dependencies": {peer},
  "packages": {{
    "node1": {{ "release-type": "node" }},
    "plugin1": {{ "release-type": "node" }}
  }}
}}"#
        )
    };

    let without = plan(&config(false), &repo, &["node1"]);
    assert!(!update_paths(&without).iter().any(|p| p.starts_with("plugin1/")));

    let with = plan(&config(true), &repo, &["node1"]);
    assert_eq!(ledger_version(&with, "plugin1"), Some(Version::new(4, 4, 5)));
    apply(&with, &repo);
    let plugin = file(&repo, "plugin1/package.json");
    assert!(plugin.contains("\"@here/pkgA\": \"^3.3.4\""));
    assert!(plugin.contains("\"version\": \"4.4.5\""));
}

#[test]
fn identical_input_gives_identical_output() {
    let first = plan(CONFIG, &workspace(), &["node1", "node4"]);
    let second = plan(CONFIG, &workspace(), &["node1", "node4"]);

    assert_eq!(first, second);
    assert_eq!(
        first.candidates[0].pull_request.body.render(),
        second.candidates[0].pull_request.body.render()
    );
}

#[test]
fn unreadable_manifests_leave_the_component_out() {
    let missing = InMemoryRepository::new()
        .with_file(".release-manifest.json", LEDGER)
        .with_file("node1/package.json", package_json("@here/pkgA", "3.3.3", &[]))
        .with_file(
            "node2/package.json",
            package_json("@here/pkgB", "2.2.2", &[("@here/pkgA", "^3.3.3")]),
        );
    let malformed = workspace().with_file("node3/package.json", "{ not json");

    for repo in [missing, malformed] {
        let output = plan(CONFIG, &repo, &["node1"]);

        assert_eq!(ledger_version(&output, "node2"), Some(Version::new(2, 2, 3)));
        assert_eq!(ledger_version(&output, "node3"), Some(Version::new(1, 1, 1)));
        assert!(!update_paths(&output).iter().any(|p| p.starts_with("node3/")));
    }
}

#[test]
fn dependency_cycles_release_each_component_once() {
    let repo = InMemoryRepository::new()
        .with_file(
            "a/package.json",
            package_json("cycle-a", "1.0.0", &[("cycle-b", "^2.0.0")]),
        )
        .with_file(
            "b/package.json",
            package_json("cycle-b", "2.0.0", &[("cycle-a", "^1.0.0")]),
        );
    let config = r#"{
  "packages": {
    "a": { "release-type": "node", "initial-version": "1.1.0" },
    "b": { "release-type": "node" }
  }
}"#;

    let output = plan(config, &repo, &["a"]);

    assert_eq!(ledger_version(&output, "a"), Some(Version::new(1, 1, 0)));
    assert_eq!(ledger_version(&output, "b"), Some(Version::new(2, 0, 1)));
    let releases = &output.candidates[0].pull_request.body.releases;
    assert_eq!(releases.len(), 2);
}

#[test]
fn other_release_kinds_pass_through() {
    let config = r#"{
  "packages": {
    "node1": { "release-type": "node" },
    "node2": { "release-type": "node" },
    "tools": { "release-type": "simple", "component": "tools" }
  }
}"#;
    let repo = workspace();

    let output = plan(config, &repo, &["tools", "node1"]);

    let paths: Vec<&str> = output.candidates.iter().map(|c| c.path.as_str()).collect();
    assert_eq!(paths, ["tools", "."]);
    assert_eq!(output.candidates[0].pull_request.title, "chore: release tools 1.0.0");
    assert!(output.candidates[0].pull_request.update("tools/version.txt").is_some());
    assert_eq!(ledger_version(&output, "tools"), Some(Version::new(1, 0, 0)));
}
