//! Title sanitization.

use std::borrow::Cow;

/// Removes every character that encodes to more than one UTF-8 byte.
///
/// Returns the input borrowed when it is already single-byte, so the
/// common ASCII case does not allocate.
pub fn filter_multibyte_chars(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(char::is_ascii).collect())
    }
}
