//! Cascading releases through the internal dependencies of a workspace.
//!
//! Manifests of every configured component are fetched and turned into an
//! immutable dependency graph. Releases then propagate from the released
//! components to all of their dependents, and the managed candidates are
//! merged into one release together with the updated ledger.

mod format;
mod graph;
mod notes;
mod plugin;

pub use format::{CargoWorkspace, NodeWorkspace, PackageManifest, WorkspaceDependency, WorkspaceFormat};
pub use graph::{DependencyGraph, Touched, WorkspacePackage};
pub use notes::{DependencyBump, dependency_notes};
pub use plugin::{WorkspaceOutput, WorkspacePlugin, WorkspacePluginOptions};
