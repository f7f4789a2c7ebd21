// Compound tag splitting.

/// Characters separating tokens of a compound tag.
pub const TAG_SEPARATORS: [char; 2] = ['+', '|'];

/// Split a compound tag such as `subst:sg:nom+subst:sg:acc` into its tokens.
///
/// Empty tokens produced by leading, trailing or doubled separators are
/// skipped.
pub fn split_tags(tag: &str) -> impl Iterator<Item = &str> {
    tag.split(TAG_SEPARATORS).filter(|t| !t.is_empty())
}
