//! `Json5Decoder`: recursive descent JSON5 decoder producing `serde_json::Value`.
//!
//! Numbers follow JavaScript semantics: everything is read as an `f64`,
//! integral values within the safe-integer range come back as integers and
//! the non-finite values (`NaN`, `Infinity`) come back as `null`.

use serde_json::{Map, Number, Value};

use crate::error::{ErrorKind, Json5Error};

/// Largest integer an `f64` represents exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Arrays and objects nested deeper than this are rejected.
pub const MAX_DEPTH: usize = 512;

pub struct Json5Decoder<'a> {
    src: &'a str,
    x: usize,
    depth: usize,
}

impl<'a> Json5Decoder<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, x: 0, depth: 0 }
    }

    /// Decode the whole input as a single JSON5 value.
    pub fn decode(mut self) -> Result<Value, Json5Error> {
        let value = self.read_any()?;
        self.skip_insignificant()?;
        match self.peek() {
            None => Ok(value),
            Some(_) => Err(self.invalid_char()),
        }
    }

    fn read_any(&mut self) -> Result<Value, Json5Error> {
        self.skip_insignificant()?;
        match self.peek() {
            None => Err(self.error(ErrorKind::UnexpectedEnd)),
            Some('{') => self.read_obj(),
            Some('[') => self.read_arr(),
            Some(quote @ ('"' | '\'')) => Ok(Value::String(self.read_str(quote)?)),
            Some('n') => {
                self.read_keyword("null")?;
                Ok(Value::Null)
            }
            Some('t') => {
                self.read_keyword("true")?;
                Ok(Value::Bool(true))
            }
            Some('f') => {
                self.read_keyword("false")?;
                Ok(Value::Bool(false))
            }
            Some('+' | '-' | '.' | '0'..='9' | 'I' | 'N') => self.read_num(),
            Some(_) => Err(self.invalid_char()),
        }
    }

    fn read_obj(&mut self) -> Result<Value, Json5Error> {
        self.enter()?;
        self.advance(); // '{'
        let mut map = Map::new();

        loop {
            self.skip_insignificant()?;
            if self.peek() == Some('}') {
                self.advance();
                break;
            }

            let key = self.read_key()?;
            self.skip_insignificant()?;
            self.expect(':')?;
            let value = self.read_any()?;
            map.insert(key, value);

            self.skip_insignificant()?;
            match self.peek() {
                Some(',') => self.advance(),
                Some('}') => {
                    self.advance();
                    break;
                }
                _ => return Err(self.invalid_char()),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(map))
    }

    fn read_arr(&mut self) -> Result<Value, Json5Error> {
        self.enter()?;
        self.advance(); // '['
        let mut arr = Vec::new();

        loop {
            self.skip_insignificant()?;
            if self.peek() == Some(']') {
                self.advance();
                break;
            }

            arr.push(self.read_any()?);

            self.skip_insignificant()?;
            match self.peek() {
                Some(',') => self.advance(),
                Some(']') => {
                    self.advance();
                    break;
                }
                _ => return Err(self.invalid_char()),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(arr))
    }

    fn enter(&mut self) -> Result<(), Json5Error> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error(ErrorKind::TooDeep(MAX_DEPTH)));
        }
        Ok(())
    }

    /// Object key: a quoted string or an ECMAScript identifier name.
    fn read_key(&mut self) -> Result<String, Json5Error> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => self.read_str(quote),
            Some(_) => self.read_identifier(),
            None => Err(self.error(ErrorKind::UnexpectedEnd)),
        }
    }

    fn read_identifier(&mut self) -> Result<String, Json5Error> {
        let mut name = String::new();

        loop {
            let at = self.x;
            let c = match self.peek() {
                Some('\\') => {
                    self.advance();
                    if self.peek() != Some('u') {
                        return Err(self.invalid_char());
                    }
                    self.advance();
                    let code = self.read_hex(4)?;
                    match char::from_u32(code) {
                        Some(c) if is_identifier_char(c, name.is_empty()) => c,
                        _ => {
                            return Err(Json5Error::at(
                                self.src,
                                at,
                                ErrorKind::InvalidIdentifierChar('\\'),
                            ))
                        }
                    }
                }
                Some(c) if is_identifier_char(c, name.is_empty()) => {
                    self.advance();
                    c
                }
                _ if name.is_empty() => return Err(self.invalid_char()),
                _ => break,
            };
            name.push(c);
        }

        Ok(name)
    }

    fn read_str(&mut self, quote: char) -> Result<String, Json5Error> {
        self.advance(); // opening quote
        let mut out = String::new();

        loop {
            match self.peek() {
                None => return Err(self.error(ErrorKind::UnexpectedEnd)),
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(out);
                }
                Some('\\') => {
                    self.advance();
                    self.read_escape(&mut out)?;
                }
                Some('\n' | '\r') => return Err(self.invalid_char()),
                Some(c) => {
                    out.push(c);
                    self.advance();
                }
            }
        }
    }

    fn read_escape(&mut self, out: &mut String) -> Result<(), Json5Error> {
        let c = self.peek().ok_or_else(|| self.error(ErrorKind::UnexpectedEnd))?;
        match c {
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{b}'),
            '0' => {
                self.advance();
                if matches!(self.peek(), Some('0'..='9')) {
                    return Err(self.invalid_char());
                }
                out.push('\0');
                return Ok(());
            }
            '1'..='9' => return Err(self.invalid_char()),
            'x' => {
                self.advance();
                let code = self.read_hex(2)?;
                out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
                return Ok(());
            }
            'u' => {
                self.advance();
                let unit = self.read_hex(4)?;
                let c = self.read_surrogate_pair(unit)?;
                out.push(c);
                return Ok(());
            }
            // Line continuation.
            '\r' => {
                self.advance();
                if self.peek() == Some('\n') {
                    self.advance();
                }
                return Ok(());
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
        self.advance();
        Ok(())
    }

    /// Combine a high surrogate with a following `\uDCxx` escape. Unpaired
    /// surrogates decode to U+FFFD.
    fn read_surrogate_pair(&mut self, unit: u32) -> Result<char, Json5Error> {
        if !(0xD800..0xDC00).contains(&unit) {
            return Ok(char::from_u32(unit).unwrap_or('\u{fffd}'));
        }

        if self.src[self.x..].starts_with("\\u") {
            let save = self.x;
            self.x += 2;
            let low = self.read_hex(4)?;
            if (0xDC00..0xE000).contains(&low) {
                let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                return Ok(char::from_u32(code).unwrap_or('\u{fffd}'));
            }
            self.x = save;
        }

        Ok('\u{fffd}')
    }

    fn read_hex(&mut self, digits: usize) -> Result<u32, Json5Error> {
        let mut code = 0;
        for _ in 0..digits {
            let digit = match self.peek() {
                Some(c) => c.to_digit(16).ok_or_else(|| self.invalid_char())?,
                None => return Err(self.error(ErrorKind::UnexpectedEnd)),
            };
            code = code * 16 + digit;
            self.advance();
        }
        Ok(code)
    }

    fn read_num(&mut self) -> Result<Value, Json5Error> {
        let negative = match self.peek() {
            Some('-') => {
                self.advance();
                true
            }
            Some('+') => {
                self.advance();
                false
            }
            _ => false,
        };

        let magnitude = match self.peek() {
            Some('I') => {
                self.read_keyword("Infinity")?;
                f64::INFINITY
            }
            Some('N') => {
                self.read_keyword("NaN")?;
                f64::NAN
            }
            Some('0') if matches!(self.peek_at(1), Some('x' | 'X')) => {
                self.advance_by(2);
                self.read_hex_num()?
            }
            Some('0'..='9' | '.') => self.read_decimal()?,
            _ => return Err(self.invalid_char()),
        };

        Ok(js_number(if negative { -magnitude } else { magnitude }))
    }

    fn read_hex_num(&mut self) -> Result<f64, Json5Error> {
        let mut value = 0.0;
        let mut any = false;
        while let Some(digit) = self.peek().and_then(|c| c.to_digit(16)) {
            value = value * 16.0 + f64::from(digit);
            any = true;
            self.advance();
        }
        if !any {
            return Err(self.invalid_char());
        }
        Ok(value)
    }

    fn read_decimal(&mut self) -> Result<f64, Json5Error> {
        let mut text = String::new();

        if self.peek() == Some('0') && matches!(self.peek_at(1), Some('0'..='9')) {
            self.advance();
            return Err(self.invalid_char());
        }

        let int_digits = self.take_digits(&mut text);
        if int_digits == 0 {
            text.push('0');
        }

        if self.peek() == Some('.') {
            self.advance();
            let mut frac = String::new();
            let frac_digits = self.take_digits(&mut frac);
            if int_digits == 0 && frac_digits == 0 {
                return Err(self.invalid_char());
            }
            if frac_digits > 0 {
                text.push('.');
                text.push_str(&frac);
            }
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            self.advance();
            text.push('e');
            if let Some(sign @ ('+' | '-')) = self.peek() {
                text.push(sign);
                self.advance();
            }
            if self.take_digits(&mut text) == 0 {
                return Err(self.invalid_char());
            }
        }

        text.parse::<f64>()
            .map_err(|_| self.error(ErrorKind::InvalidChar('.')))
    }

    fn take_digits(&mut self, out: &mut String) -> usize {
        let mut n = 0;
        while let Some(c @ '0'..='9') = self.peek() {
            out.push(c);
            self.advance();
            n += 1;
        }
        n
    }

    fn read_keyword(&mut self, word: &str) -> Result<(), Json5Error> {
        for expected in word.chars() {
            if self.peek() != Some(expected) {
                return Err(self.invalid_char());
            }
            self.advance();
        }
        Ok(())
    }

    /// Skip whitespace, `// line` and `/* block */` comments.
    fn skip_insignificant(&mut self) -> Result<(), Json5Error> {
        loop {
            match self.peek() {
                Some(c) if is_whitespace(c) => self.advance(),
                Some('/') => match self.peek_at(1) {
                    Some('/') => {
                        while let Some(c) = self.peek() {
                            if matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}') {
                                break;
                            }
                            self.advance();
                        }
                    }
                    Some('*') => {
                        self.advance_by(2);
                        match self.src[self.x..].find("*/") {
                            Some(end) => self.x += end + 2,
                            None => {
                                self.x = self.src.len();
                                return Err(self.error(ErrorKind::UnexpectedEnd));
                            }
                        }
                    }
                    _ => return Err(self.invalid_char()),
                },
                _ => return Ok(()),
            }
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), Json5Error> {
        if self.peek() == Some(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.invalid_char())
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.x..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.src[self.x..].chars().nth(n)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.x += c.len_utf8();
        }
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn invalid_char(&self) -> Json5Error {
        match self.peek() {
            Some(c) => self.error(ErrorKind::InvalidChar(c)),
            None => self.error(ErrorKind::UnexpectedEnd),
        }
    }

    fn error(&self, kind: ErrorKind) -> Json5Error {
        Json5Error::at(self.src, self.x, kind)
    }
}

/// ECMAScript WhiteSpace and LineTerminator: TAB, VT, FF, SP, NBSP, BOM,
/// the `Zs` space separators, LF, CR, LS and PS. Unlike `char::is_whitespace`
/// this excludes U+0085.
fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{b}' | '\u{c}' | ' ' | '\u{a0}' | '\u{feff}'
            | '\u{1680}' | '\u{2000}'..='\u{200a}' | '\u{202f}' | '\u{205f}' | '\u{3000}'
            | '\n' | '\r' | '\u{2028}' | '\u{2029}'
    )
}

fn is_identifier_char(c: char, first: bool) -> bool {
    if c == '$' || c == '_' || c.is_alphabetic() {
        return true;
    }
    !first && (c.is_alphanumeric() || c == '\u{200c}' || c == '\u{200d}')
}

/// Map an `f64` to the value `JSON.stringify` would print for it.
fn js_number(f: f64) -> Value {
    if !f.is_finite() {
        return Value::Null;
    }
    if f.trunc() == f && f.abs() <= MAX_SAFE_INTEGER {
        // Also folds -0 into 0.
        return Value::from(f as i64);
    }
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}
