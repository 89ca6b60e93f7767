use cascade_core::Version;

const PROTOCOL_PREFIX: &str = "workspace:";
const RANGE_OPERATORS: [&str; 8] = [">=", "<=", "^", "~", "=", ">", "<", "v"];

/// Rewrites a dependency version specifier to point at `new_version`.
///
/// The range style of the existing specifier (`^`, `~`, `=`, comparison
/// operators, a `workspace:` protocol) is kept and only the version itself is
/// substituted. Returns `None` for specifiers that do not name a concrete
/// version, such as `*`, `workspace:*`, paths or URLs.
#[must_use]
pub fn rewrite_specifier(specifier: &str, new_version: &Version) -> Option<String> {
    let trimmed = specifier.trim();
    let (protocol, rest) = match trimmed.strip_prefix(PROTOCOL_PREFIX) {
        Some(rest) => (PROTOCOL_PREFIX, rest),
        None => ("", trimmed),
    };

    let operator = RANGE_OPERATORS
        .iter()
        .find(|op| rest.starts_with(*op))
        .copied()
        .unwrap_or("");
    let bare = rest[operator.len()..].trim_start();

    Version::parse_strict(bare).ok()?;

    Some(format!("{protocol}{operator}{new_version}"))
}
