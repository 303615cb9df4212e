//! Bounded literal find/replace over file content.

use crate::replacer::ReplaceError;

/// Replaces up to `limit` occurrences of `find` in `content`, left to right.
///
/// A `limit` of zero or less replaces every occurrence. Matching is literal;
/// an empty `find` matches at every character boundary.
///
/// # Errors
///
/// Returns [`ReplaceError::NoContentChange`] when the result is identical to
/// `content`, e.g. because `find` does not occur or equals `replace`.
pub fn replace_content(
    content: &str,
    find: &str,
    replace: &str,
    limit: i64,
) -> Result<String, ReplaceError> {
    let new_content = match usize::try_from(limit) {
        Ok(count) if count > 0 => content.replacen(find, replace, count),
        _ => content.replace(find, replace),
    };

    if new_content == content {
        return Err(ReplaceError::NoContentChange);
    }

    Ok(new_content)
}
