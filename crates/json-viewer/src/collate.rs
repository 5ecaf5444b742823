//! Locale-aware string ordering for object keys.
//!
//! A compact take on root-locale collation: strings are first compared by
//! base characters (whitespace, then punctuation and symbols, then digits,
//! then letters, with letters case- and accent-insensitive), then by
//! accents, then by case with lowercase first. Code point order breaks any
//! remaining tie so the result is a total order.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Symbol,
    Digit,
    Letter,
}

#[derive(Debug, Clone, Copy)]
struct Element {
    class: CharClass,
    base: char,
    accented: bool,
    upper: bool,
}

impl Element {
    fn primary(&self) -> (CharClass, char) {
        (self.class, self.base)
    }
}

/// Compare two strings the way a user expects keys to be alphabetized.
///
/// ```
/// use std::cmp::Ordering;
/// use json_viewer::locale_cmp;
///
/// assert_eq!(locale_cmp("a", "B"), Ordering::Less);
/// assert_eq!(locale_cmp("a", "A"), Ordering::Less);
/// assert_eq!(locale_cmp("é", "f"), Ordering::Less);
/// assert_eq!(locale_cmp("_id", "id"), Ordering::Less);
/// ```
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let ea = elements(a);
    let eb = elements(b);

    ea.iter()
        .map(Element::primary)
        .cmp(eb.iter().map(Element::primary))
        .then_with(|| ea.iter().map(|e| e.accented).cmp(eb.iter().map(|e| e.accented)))
        .then_with(|| ea.iter().map(|e| e.upper).cmp(eb.iter().map(|e| e.upper)))
        .then_with(|| a.cmp(b))
}

fn elements(s: &str) -> Vec<Element> {
    let mut out = Vec::with_capacity(s.len());

    for c in s.chars() {
        let upper = c.is_uppercase();
        let lower = c.to_lowercase().next().unwrap_or(c);

        if let Some(folded) = fold_latin(lower) {
            for base in folded.chars() {
                out.push(Element { class: CharClass::Letter, base, accented: true, upper });
            }
            continue;
        }

        let class = if c.is_whitespace() {
            CharClass::Whitespace
        } else if c.is_numeric() {
            CharClass::Digit
        } else if c.is_alphabetic() {
            CharClass::Letter
        } else {
            CharClass::Symbol
        };
        out.push(Element { class, base: lower, accented: false, upper });
    }

    out
}

/// Base letters for accented lowercase Latin-1 and Latin Extended-A letters.
fn fold_latin(c: char) -> Option<&'static str> {
    let base = match c {
        'à'..='å' => "a",
        'æ' => "ae",
        'ç' => "c",
        'è'..='ë' => "e",
        'ì'..='ï' => "i",
        'ð' => "d",
        'ñ' => "n",
        'ò'..='ö' | 'ø' => "o",
        'ù'..='ü' => "u",
        'ý' | 'ÿ' => "y",
        'þ' => "th",
        'ß' => "ss",
        '\u{100}'..='\u{105}' => "a",
        '\u{106}'..='\u{10d}' => "c",
        '\u{10e}'..='\u{111}' => "d",
        '\u{112}'..='\u{11b}' => "e",
        '\u{11c}'..='\u{123}' => "g",
        '\u{124}'..='\u{127}' => "h",
        '\u{128}'..='\u{131}' => "i",
        '\u{132}'..='\u{133}' => "ij",
        '\u{134}'..='\u{135}' => "j",
        '\u{136}'..='\u{138}' => "k",
        '\u{139}'..='\u{142}' => "l",
        '\u{143}'..='\u{14b}' => "n",
        '\u{14c}'..='\u{151}' => "o",
        '\u{152}'..='\u{153}' => "oe",
        '\u{154}'..='\u{159}' => "r",
        '\u{15a}'..='\u{161}' | '\u{17f}' => "s",
        '\u{162}'..='\u{167}' => "t",
        '\u{168}'..='\u{173}' => "u",
        '\u{174}'..='\u{175}' => "w",
        '\u{176}'..='\u{178}' => "y",
        '\u{179}'..='\u{17e}' => "z",
        _ => return None,
    };
    Some(base)
}
