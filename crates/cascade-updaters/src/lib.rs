//! Pure content transformations that move version strings inside project files.
//!
//! Every updater is total: content it cannot interpret, or content lacking the
//! field it targets, comes back unchanged.

mod cargo_toml;
mod changelog;
mod generic;
mod json;
mod module_bazel;
mod package_json;
mod release_manifest;
mod specifier;
mod update;

pub use cargo_toml::CargoToml;
pub use changelog::Changelog;
pub use generic::{Generic, VERSION_MARKER};
pub use json::{JsonDocument, detect_indent, json_stringify, parse_document};
pub use module_bazel::ModuleBazel;
pub use package_json::PackageJson;
pub use release_manifest::ReleaseManifestUpdater;
pub use specifier::rewrite_specifier;
pub use update::{Update, UpdateContent, Updater};
