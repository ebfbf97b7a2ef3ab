//! Literal byte substitution.

use std::borrow::Cow;

/// Replaces every non-overlapping occurrence of `token` in `content` with
/// `replacement`, scanning left to right.
///
/// Works on raw bytes, so content does not need to be valid UTF-8. Returns
/// the (possibly borrowed) result and the number of replacements. An empty
/// token replaces nothing.
///
/// # Examples
///
/// ```
/// use gocanon_core::rewrite::replace_literal;
///
/// let (out, count) = replace_literal(b"module go-canonical", b"go-canonical", b"widget");
/// assert_eq!(&*out, b"module widget");
/// assert_eq!(count, 1);
/// ```
#[must_use]
pub fn replace_literal<'a>(
    content: &'a [u8],
    token: &[u8],
    replacement: &[u8],
) -> (Cow<'a, [u8]>, usize) {
    if token.is_empty() || content.len() < token.len() {
        return (Cow::Borrowed(content), 0);
    }

    let mut output: Option<Vec<u8>> = None;
    let mut count = 0;
    let mut copied_up_to = 0;
    let mut pos = 0;

    while pos + token.len() <= content.len() {
        if content[pos..].starts_with(token) {
            let out = output.get_or_insert_with(|| Vec::with_capacity(content.len()));
            out.extend_from_slice(&content[copied_up_to..pos]);
            out.extend_from_slice(replacement);
            count += 1;
            pos += token.len();
            copied_up_to = pos;
        } else {
            pos += 1;
        }
    }

    match output {
        Some(mut out) => {
            out.extend_from_slice(&content[copied_up_to..]);
            (Cow::Owned(out), count)
        }
        None => (Cow::Borrowed(content), 0),
    }
}
