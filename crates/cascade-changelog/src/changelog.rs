use crate::section::PREAMBLE;

/// Inserts a fully formatted release entry into an existing changelog.
///
/// The entry lands above the newest release section, or below the document
/// preamble when no release has been recorded yet. Existing content is kept
/// byte for byte; an empty document gets the default header first.
#[must_use]
pub fn insert_release(content: &str, entry: &str) -> String {
    let entry = entry.trim_end();

    if content.trim().is_empty() {
        let mut new_content = PREAMBLE.to_string();
        new_content.push('\n');
        new_content.push_str(entry);
        new_content.push('\n');
        return new_content;
    }

    let insertion_point = find_insertion_point(content);

    let mut new_content = String::with_capacity(content.len() + entry.len() + 4);

    new_content.push_str(&content[..insertion_point]);
    if insertion_point > 0 && !new_content.ends_with("\n\n") {
        if new_content.ends_with('\n') {
            new_content.push('\n');
        } else {
            new_content.push_str("\n\n");
        }
    }
    new_content.push_str(entry);
    new_content.push('\n');

    if insertion_point < content.len() {
        new_content.push('\n');
        new_content.push_str(&content[insertion_point..]);
    }

    new_content
}

fn find_insertion_point(content: &str) -> usize {
    if content.starts_with("## ") {
        return 0;
    }

    if let Some(first_release_pos) = content.find("\n## ") {
        return first_release_pos + 1;
    }

    if content.starts_with("# ") || content.contains("\n# ") {
        return content.len();
    }

    0
}
