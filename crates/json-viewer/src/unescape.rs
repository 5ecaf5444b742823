//! Textual `\uXXXX` unescaping, applied to a document before parsing.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

fn escape_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // A surrogate pair first, so it is not split into two lone halves.
        Regex::new(
            r"\\u([dD][89abAB][0-9a-fA-F]{2})\\u([dD][c-fC-F][0-9a-fA-F]{2})|\\u([0-9a-fA-F]{4})",
        )
        .expect("unicode escape pattern is valid")
    })
}

/// Replace every `\uXXXX` sequence in `text` with the character it denotes.
///
/// The replacement is purely textual: it does not know about JSON string
/// boundaries, so `\u0022` turns into a bare `"`. Lone surrogate escapes
/// have no `char` and are left untouched.
pub fn unescape_unicode(text: &str) -> Cow<'_, str> {
    escape_regex().replace_all(text, |caps: &Captures| {
        let decoded = match (caps.get(1), caps.get(2), caps.get(3)) {
            (Some(high), Some(low), _) => {
                let high = hex_unit(high.as_str());
                let low = hex_unit(low.as_str());
                char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
            }
            (_, _, Some(unit)) => char::from_u32(hex_unit(unit.as_str())),
            _ => None,
        };
        match decoded {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    })
}

/// The pattern only captures four hex digits, so parsing cannot fail.
fn hex_unit(hex: &str) -> u32 {
    u32::from_str_radix(hex, 16).unwrap_or(0xFFFD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_basic_escapes() {
        assert_eq!(unescape_unicode(r#"{"a":"caf\u00e9"}"#), r#"{"a":"café"}"#);
        assert_eq!(unescape_unicode(r"\u00E9\u00e9"), "éé");
    }

    #[test]
    fn combines_surrogate_pairs() {
        assert_eq!(unescape_unicode(r"\uD83D\uDE00"), "\u{1F600}");
        assert_eq!(unescape_unicode(r"\ud83d\ude00!"), "\u{1F600}!");
    }

    #[test]
    fn leaves_lone_surrogates_and_short_escapes() {
        assert_eq!(unescape_unicode(r"\ud83d!"), r"\ud83d!");
        assert_eq!(unescape_unicode(r"\ude00"), r"\ude00");
        assert_eq!(unescape_unicode(r"\u12"), r"\u12");
    }

    #[test]
    fn untouched_text_is_borrowed() {
        assert!(matches!(unescape_unicode("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn unescapes_quotes_textually() {
        assert_eq!(unescape_unicode(r#""\u0022""#), r#"""""#);
    }
}
