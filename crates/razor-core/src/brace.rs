//! Closing-brace location for text whose opening brace was already consumed.
//!
//! Depth starts at 1 and is tracked with a plain counter while scanning, so
//! arbitrarily deep nesting costs no stack. Sibling blocks at the same depth
//! each open and close their own pair and never reach depth 0 early.

/// Private-use character every placeholder token is built from
pub const PLACEHOLDER_SIGIL: char = '\u{E000}';

/// Byte offset of the `}` that balances an opening brace just before `text`.
///
/// Returns `None` when the text runs out first.
pub fn find_matching_close(text: &str) -> Option<usize> {
    let mut depth = 1usize;
    // `{` and `}` are ASCII, so they never occur inside a multi-byte char
    for (index, byte) in text.bytes().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Replace the single `}` at `index` with `placeholder`
pub fn close_with(text: &mut String, index: usize, placeholder: &str) {
    debug_assert_eq!(text.as_bytes().get(index), Some(&b'}'));
    text.replace_range(index..index + 1, placeholder);
}
