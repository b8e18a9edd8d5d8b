//! Tokenizer for record text and queries
//!
//! Lowercases the input, then keeps maximal runs of word characters
//! (ASCII letters, digits, `_`) and `#`. Everything else separates tokens.
//! Because tokens are ASCII, every byte offset inside a token is a char
//! boundary, which the fragment iterator relies on.

use rustc_hash::FxHashSet;
use sift_core::MIN_FRAGMENT_LEN;

#[inline]
fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '#'
}

/// Tokenize text into lowercase word/hash runs
///
/// Order is preserved and duplicates are kept.
///
/// # Example
///
/// ```
/// use sift_search::tokenizer::tokenize;
///
/// let tokens = tokenize("Login ERROR: #42, user_id!");
/// assert_eq!(tokens, vec!["login", "error", "#42", "user_id"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_token_char(c))
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Tokenize and deduplicate, keeping first-seen order
///
/// # Example
///
/// ```
/// use sift_search::tokenizer::tokenize_unique;
///
/// let tokens = tokenize_unique("seed Seed SEED error");
/// assert_eq!(tokens, vec!["seed", "error"]);
/// ```
pub fn tokenize_unique(text: &str) -> Vec<String> {
    let mut seen = FxHashSet::default();
    tokenize(text)
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Every contiguous substring of `token` with length `MIN_FRAGMENT_LEN..=len`
///
/// Yields shorter fragments first. A token shorter than the minimum yields
/// nothing. `token` must come from [`tokenize`].
pub fn fragments(token: &str) -> impl Iterator<Item = &str> + '_ {
    let len = token.len();
    (MIN_FRAGMENT_LEN..=len).flat_map(move |width| {
        (0..=len - width).map(move |start| &token[start..start + width])
    })
}

/// Number of fragments [`fragments`] yields for a token of `len` bytes
pub fn fragment_count(len: usize) -> usize {
    if len < MIN_FRAGMENT_LEN {
        return 0;
    }
    let widths = len - MIN_FRAGMENT_LEN + 1;
    // sum of (len - w + 1) for w in MIN..=len
    widths * (widths + 1) / 2
}
