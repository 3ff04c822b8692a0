//! Helpers for cleaning up lists of strings
//!
//! All functions are pure: they consume or borrow their input and return a
//! new `Vec`. Nothing here fails on valid input.
//!
//! # Example
//!
//! ```
//! use utilkit::list_utils::{remove_empty_char_in_lst, remove_empty_str};
//!
//! let raw = vec!["  alpha ", "", "   ", "beta"];
//! let kept = remove_empty_str(raw);
//! assert_eq!(kept, vec!["  alpha ", "beta"]);
//! assert_eq!(remove_empty_char_in_lst(&kept), vec!["alpha", "beta"]);
//! ```

use std::collections::HashSet;
use std::hash::Hash;

/// Keeps only the elements whose trimmed form is non-empty.
///
/// Elements are returned untouched (not trimmed) and in their original order.
pub fn remove_empty_str<I, S>(lst: I) -> Vec<S>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lst.into_iter()
        .filter(|e| !e.as_ref().trim().is_empty())
        .collect()
}

/// Removes duplicate elements.
///
/// The result holds every distinct input value exactly once. Its order is
/// unspecified.
pub fn remove_duplicate_in_list<T, I>(lst: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash,
{
    lst.into_iter()
        .collect::<HashSet<T>>()
        .into_iter()
        .collect()
}

/// Strips leading and trailing whitespace from every element.
///
/// Length and order are preserved; elements that are all whitespace become `""`.
pub fn remove_empty_char_in_lst<I, S>(lst: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lst.into_iter().map(|e| e.as_ref().trim().to_string()).collect()
}

/// Returns true for Hiragana, Katakana and CJK Unified Ideographs.
pub fn is_chinese_or_japanese_char(c: char) -> bool {
    matches!(
        c,
        '\u{3040}'..='\u{309F}' // Hiragana
            | '\u{30A0}'..='\u{30FF}' // Katakana
            | '\u{4E00}'..='\u{9FFF}' // CJK Unified Ideographs
    )
}

/// Collects the Chinese and Japanese characters found in `text`.
///
/// Despite the name, this returns the *matched* characters in input order and
/// leaves `text` alone. Existing callers rely on the matched-list behavior.
///
/// ```
/// use utilkit::list_utils::remove_chinese_and_japanese_chars;
///
/// assert_eq!(remove_chinese_and_japanese_chars("abcあ漢123"), vec!['あ', '漢']);
/// ```
pub fn remove_chinese_and_japanese_chars(text: &str) -> Vec<char> {
    text.chars().filter(|&c| is_chinese_or_japanese_char(c)).collect()
}
