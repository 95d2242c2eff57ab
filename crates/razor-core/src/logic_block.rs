//! Inline logic blocks (`@{ ... }`)
//!
//! [`protect`] swaps each block's opener and its true closing brace for
//! placeholder tokens so later passes see one less brace pair per block.
//! Braces inside the block are left alone. [`restore`] undoes the swap.

use crate::{
    brace::find_matching_close,
    errors::{BlockKind, RewriteError},
};

/// Opener of an inline logic block
pub const LOGIC_OPENER: &str = "@{";

pub(crate) const LOGIC_OPEN_MARK: &str = "\u{E000}logic-open\u{E000}";
pub(crate) const LOGIC_CLOSE_MARK: &str = "\u{E000}logic-close\u{E000}";

/// Replace every top-level `@{ ... }` delimiter pair with placeholders
pub fn protect(text: &str) -> Result<String, RewriteError> {
    if !text.contains(LOGIC_OPENER) {
        return Ok(text.to_string());
    }

    let mut output = String::with_capacity(text.len() + 32);
    let mut rest = text;

    while let Some(start) = rest.find(LOGIC_OPENER) {
        let body = &rest[start + LOGIC_OPENER.len()..];
        let close = find_matching_close(body)
            .ok_or_else(|| RewriteError::malformed(BlockKind::Logic, &rest[start..]))?;

        output.push_str(&rest[..start]);
        output.push_str(LOGIC_OPEN_MARK);
        output.push_str(&body[..close]);
        output.push_str(LOGIC_CLOSE_MARK);
        rest = &body[close + 1..];
    }

    output.push_str(rest);
    Ok(output)
}

/// Put back the delimiters replaced by [`protect`]
pub fn restore(text: &str) -> String {
    text.replace(LOGIC_OPEN_MARK, LOGIC_OPENER)
        .replace(LOGIC_CLOSE_MARK, "}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_logic_block_is_unchanged() {
        let text = "<p>{ not a block }</p>";
        assert_eq!(protect(text).unwrap(), text);
    }

    #[test]
    fn test_siblings_protected_independently() {
        let protected = protect("@{ A { x } } @{ B { y } }").unwrap();
        assert_eq!(
            protected,
            format!(
                "{LOGIC_OPEN_MARK} A {{ x }} {LOGIC_CLOSE_MARK} {LOGIC_OPEN_MARK} B {{ y }} {LOGIC_CLOSE_MARK}"
            )
        );

        // the first block's close sits before the second block starts
        let first_close = protected.find(LOGIC_CLOSE_MARK).unwrap();
        let second_open = protected.rfind(LOGIC_OPEN_MARK).unwrap();
        assert!(first_close < second_open);
    }

    #[test]
    fn test_nested_braces_keep_one_terminator() {
        let protected = protect("@{ if(a){ if(b){ c } } }").unwrap();
        assert_eq!(protected.matches(LOGIC_CLOSE_MARK).count(), 1);
        assert!(protected.ends_with(LOGIC_CLOSE_MARK));
        assert_eq!(protected.matches('}').count(), 2);
    }

    #[test]
    fn test_restore_reverses_protect() {
        let text = "a @{ var x = { y: 1 }; } b @{ if (x) { z(); } } c";
        assert_eq!(restore(&protect(text).unwrap()), text);
    }

    #[test]
    fn test_unclosed_block_is_malformed() {
        let err = protect("ok @{ var x = 1;").unwrap_err();
        assert_eq!(
            err,
            RewriteError::MalformedBlock {
                kind: BlockKind::Logic,
                excerpt: "@{ var x = 1;".to_string(),
            }
        );
    }

    #[test]
    fn test_text_after_last_block_is_kept() {
        let protected = protect("@{ a } tail } more").unwrap();
        assert!(protected.ends_with(" tail } more"));
    }
}
