use std::borrow::Cow;

const VERSION_DIRECTIVE: &str = "#version";

/// Remove the `#version` line from a shader source.
///
/// Everything from the first `#version` up to and including the following
/// newline is dropped. Sources without a directive are returned untouched.
#[must_use]
pub fn strip_version_directive(source: &str) -> Cow<'_, str> {
    let Some(begin) = source.find(VERSION_DIRECTIVE) else {
        return Cow::Borrowed(source);
    };
    let end = source[begin..]
        .find('\n')
        .map_or(source.len(), |offset| begin + offset + 1);

    let mut stripped = String::with_capacity(source.len() - (end - begin));
    stripped.push_str(&source[..begin]);
    stripped.push_str(&source[end..]);
    Cow::Owned(stripped)
}

/// Combine a stage's attached source with an additional fragment.
///
/// Only the first fragment may carry `#version` (it must be the first
/// directive for core profile compiles), so the addition loses its own. The
/// two parts are separated by a blank line.
#[must_use]
pub fn merge_stage_sources(existing: &str, addition: &str) -> String {
    let addition = strip_version_directive(addition);
    let mut merged = String::with_capacity(existing.len() + addition.len() + 2);
    merged.push_str(existing);
    merged.push_str("\n\n");
    merged.push_str(&addition);
    merged
}
