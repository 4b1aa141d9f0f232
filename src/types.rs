//! Core types used throughout the project.

use std::fmt;

/// Handle to a node in a [`Document`](crate::dom::Document).
///
/// Handles stay valid after the node is removed; removed nodes are simply no
/// longer reachable from the document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Checks whether `code` is a well-formed language code.
///
/// Accepts a 2 or 3 letter primary subtag followed by any number of
/// alphanumeric subtags (2 to 8 characters), separated by `-` or `_`.
/// Whether the language is actually modeled is a separate question.
///
/// # Examples
/// ```
/// use site_i18n::types::is_valid_language_code;
///
/// assert!(is_valid_language_code("en"));
/// assert!(is_valid_language_code("pt-BR"));
/// assert!(is_valid_language_code("zh_Hant_TW"));
/// assert!(!is_valid_language_code(""));
/// assert!(!is_valid_language_code("english"));
/// ```
#[must_use]
pub fn is_valid_language_code(code: &str) -> bool {
    let mut subtags = code.split(['-', '_']);

    let Some(primary) = subtags.next() else {
        return false;
    };
    if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    subtags.all(|subtag| {
        (2..=8).contains(&subtag.len()) && subtag.chars().all(|c| c.is_ascii_alphanumeric())
    })
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::two_letters("en", true)]
    #[case::three_letters("kok", true)]
    #[case::region_hyphen("fr-CA", true)]
    #[case::region_underscore("en_us", true)]
    #[case::script_and_region("sr-Cyrl-BA", true)]
    #[case::unmodeled_but_well_formed("xx", true)]
    #[case::empty("", false)]
    #[case::single_letter("e", false)]
    #[case::word("english", false)]
    #[case::trailing_separator("en-", false)]
    #[case::digit_primary("e1", false)]
    #[case::whitespace(" en", false)]
    fn test_is_valid_language_code(#[case] code: &str, #[case] expected: bool) {
        assert_that!(is_valid_language_code(code), eq(expected));
    }

    #[googletest::test]
    fn test_node_id_display() {
        expect_that!(NodeId(7).to_string(), eq("#7"));
    }
}
