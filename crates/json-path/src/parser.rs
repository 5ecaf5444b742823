//! JSONPath parser.

use crate::types::*;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("Empty path expression")]
    Empty,
    #[error("Expected root identifier '$' at start")]
    ExpectedRoot,
    #[error("Unexpected character '{ch}' at offset {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("Unexpected end of input")]
    UnexpectedEnd,
    #[error("Invalid escape sequence at offset {0}")]
    InvalidEscape(usize),
    #[error("Invalid number at offset {0}")]
    InvalidNumber(usize),
    #[error("Unclosed string")]
    UnclosedString,
    #[error("Empty bracket selector at offset {0}")]
    EmptyBracket(usize),
    #[error("Filter expression nested deeper than {0} levels")]
    TooDeep(usize),
}

/// Deepest nesting of `!`, `(...)` and `?(...)` a filter may use.
pub const MAX_FILTER_DEPTH: usize = 128;

/// Helper struct returned by `peek_comparison_operator`.
struct ComparisonToken {
    operator: ComparisonOperator,
    len: usize,
}

/// JSONPath parser.
pub struct JsonPathParser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> JsonPathParser<'a> {
    /// Parse a JSONPath expression. Surrounding whitespace is ignored.
    pub fn parse(input: &'a str) -> Result<JSONPath, ParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseError::Empty);
        }
        let mut parser = Self { input, pos: 0, depth: 0 };
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<JSONPath, ParseError> {
        if self.peek() != Some('$') {
            return Err(ParseError::ExpectedRoot);
        }
        self.advance();

        let segments = self.parse_segments()?;
        if !self.is_at_end() {
            return Err(self.unexpected());
        }
        Ok(JSONPath::new(segments))
    }

    /// Parse `.name`, `..name` and `[...]` segments until something else shows up.
    fn parse_segments(&mut self) -> Result<Vec<PathSegment>, ParseError> {
        let mut segments = Vec::new();

        loop {
            match self.peek() {
                Some('.') => {
                    self.advance();
                    if self.peek() == Some('.') {
                        self.advance();
                        let selectors = self.parse_recursive_selectors()?;
                        segments.push(PathSegment::new(selectors, true));
                    } else if self.peek() == Some('*') {
                        self.advance();
                        segments.push(PathSegment::child(Selector::Wildcard));
                    } else {
                        let name = self.parse_member_name()?;
                        segments.push(PathSegment::child(Selector::Name(name)));
                    }
                }
                Some('[') => {
                    let selectors = self.parse_bracket_selectors()?;
                    segments.push(PathSegment::new(selectors, false));
                }
                _ => break,
            }
        }

        Ok(segments)
    }

    fn parse_recursive_selectors(&mut self) -> Result<Vec<Selector>, ParseError> {
        match self.peek() {
            Some('*') => {
                self.advance();
                Ok(vec![Selector::Wildcard])
            }
            Some('[') => self.parse_bracket_selectors(),
            _ => Ok(vec![Selector::Name(self.parse_member_name()?)]),
        }
    }

    fn parse_bracket_selectors(&mut self) -> Result<Vec<Selector>, ParseError> {
        let open = self.pos;
        self.expect('[')?;
        self.skip_whitespace();
        if self.peek() == Some(']') {
            return Err(ParseError::EmptyBracket(open));
        }

        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            selectors.push(self.parse_bracket_selector()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.advance(),
                Some(']') => {
                    self.advance();
                    break;
                }
                _ => return Err(self.unexpected()),
            }
        }

        Ok(selectors)
    }

    fn parse_bracket_selector(&mut self) -> Result<Selector, ParseError> {
        match self.peek() {
            Some('\'') | Some('"') => Ok(Selector::Name(self.parse_string()?)),
            Some('*') => {
                self.advance();
                Ok(Selector::Wildcard)
            }
            Some(':') | Some('-') | Some('0'..='9') => self.parse_index_or_slice(),
            Some('?') => {
                self.advance();
                self.skip_whitespace();
                self.expect('(')?;
                let expr = self.parse_filter_expression()?;
                self.skip_whitespace();
                self.expect(')')?;
                Ok(Selector::Filter(expr))
            }
            Some('(') => self.parse_script(),
            _ => Err(self.unexpected()),
        }
    }

    /// `(@.length)`, `(@.length - n)` or `(@.length + n)`.
    fn parse_script(&mut self) -> Result<Selector, ParseError> {
        self.expect('(')?;
        self.skip_whitespace();
        self.expect('@')?;
        for expected in ".length".chars() {
            self.expect(expected)?;
        }
        self.skip_whitespace();

        let offset = match self.peek() {
            Some(sign @ ('+' | '-')) => {
                self.advance();
                self.skip_whitespace();
                if !matches!(self.peek(), Some('0'..='9')) {
                    return Err(ParseError::InvalidNumber(self.pos));
                }
                let n = self.parse_integer()?;
                if sign == '-' {
                    -n
                } else {
                    n
                }
            }
            _ => 0,
        };

        self.skip_whitespace();
        self.expect(')')?;
        Ok(Selector::Script(ScriptExpression { offset }))
    }

    fn parse_index_or_slice(&mut self) -> Result<Selector, ParseError> {
        let start = self.parse_optional_integer()?;
        self.skip_whitespace();

        if self.peek() != Some(':') {
            return match start {
                Some(index) => Ok(Selector::Index(index)),
                None => Err(self.unexpected()),
            };
        }

        self.advance();
        let end = self.parse_optional_integer()?;
        self.skip_whitespace();

        let step = if self.peek() == Some(':') {
            self.advance();
            self.parse_optional_integer()?
        } else {
            None
        };

        Ok(Selector::Slice { start, end, step })
    }

    fn parse_optional_integer(&mut self) -> Result<Option<isize>, ParseError> {
        self.skip_whitespace();
        if matches!(self.peek(), Some('0'..='9') | Some('-')) {
            Ok(Some(self.parse_integer()?))
        } else {
            Ok(None)
        }
    }

    fn parse_integer(&mut self) -> Result<isize, ParseError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance();
        }
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }

        self.input[start..self.pos]
            .parse::<isize>()
            .map_err(|_| ParseError::InvalidNumber(start))
    }

    fn parse_member_name(&mut self) -> Result<String, ParseError> {
        let start = self.pos;

        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '$' || c == '-' {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return Err(self.unexpected());
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        let quote = match self.peek() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(self.unexpected()),
        };
        self.advance();

        let mut result = String::new();

        loop {
            match self.peek() {
                None => return Err(ParseError::UnclosedString),
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    let escape_at = self.pos;
                    self.advance();
                    let escaped = match self.peek() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('b') => '\u{8}',
                        Some('f') => '\u{c}',
                        Some(c @ ('\\' | '\'' | '"' | '/')) => c,
                        Some('u') => {
                            self.advance();
                            let hex = self
                                .input
                                .get(self.pos..self.pos + 4)
                                .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
                                .ok_or(ParseError::InvalidEscape(escape_at))?;
                            let code = u32::from_str_radix(hex, 16)
                                .map_err(|_| ParseError::InvalidEscape(escape_at))?;
                            self.pos += 4;
                            result.push(char::from_u32(code).unwrap_or('\u{fffd}'));
                            continue;
                        }
                        None => return Err(ParseError::UnclosedString),
                        _ => return Err(ParseError::InvalidEscape(escape_at)),
                    };
                    result.push(escaped);
                    self.advance();
                }
                Some(c) => {
                    result.push(c);
                    self.advance();
                }
            }
        }

        Ok(result)
    }

    fn parse_filter_expression(&mut self) -> Result<FilterExpression, ParseError> {
        self.nested(Self::parse_logical_or_expression)
    }

    /// Run `parse` one nesting level deeper, failing past [`MAX_FILTER_DEPTH`].
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_FILTER_DEPTH {
            return Err(ParseError::TooDeep(MAX_FILTER_DEPTH));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_logical_or_expression(&mut self) -> Result<FilterExpression, ParseError> {
        let mut left = self.parse_logical_and_expression()?;
        self.skip_whitespace();

        while self.peek_str("||") {
            self.advance_by(2);
            let right = self.parse_logical_and_expression()?;
            left = FilterExpression::Logical {
                operator: LogicalOperator::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
            self.skip_whitespace();
        }

        Ok(left)
    }

    fn parse_logical_and_expression(&mut self) -> Result<FilterExpression, ParseError> {
        let mut left = self.parse_unary_expression()?;
        self.skip_whitespace();

        while self.peek_str("&&") {
            self.advance_by(2);
            let right = self.parse_unary_expression()?;
            left = FilterExpression::Logical {
                operator: LogicalOperator::And,
                left: Box::new(left),
                right: Box::new(right),
            };
            self.skip_whitespace();
        }

        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> Result<FilterExpression, ParseError> {
        self.skip_whitespace();

        if self.peek() == Some('!') && !self.peek_str("!=") {
            self.advance();
            let expr = self.nested(Self::parse_unary_expression)?;
            return Ok(FilterExpression::Negation(Box::new(expr)));
        }

        if self.peek() == Some('(') {
            self.advance();
            let expr = self.parse_filter_expression()?;
            self.skip_whitespace();
            self.expect(')')?;
            return Ok(FilterExpression::Paren(Box::new(expr)));
        }

        self.parse_comparison_expression()
    }

    fn parse_comparison_expression(&mut self) -> Result<FilterExpression, ParseError> {
        let left = self.parse_value_expression()?;
        self.skip_whitespace();

        match self.peek_comparison_operator() {
            Some(op) => {
                self.advance_by(op.len);
                let right = self.parse_value_expression()?;
                Ok(FilterExpression::Comparison { operator: op.operator, left, right })
            }
            None => Ok(FilterExpression::Truthy(left)),
        }
    }

    fn parse_value_expression(&mut self) -> Result<ValueExpression, ParseError> {
        self.skip_whitespace();

        let origin = match self.peek() {
            Some('@') => Some(PathOrigin::Current),
            Some('$') => Some(PathOrigin::Root),
            _ => None,
        };
        if let Some(origin) = origin {
            self.advance();
            let segments = self.parse_segments()?;
            return Ok(ValueExpression::Path { origin, path: JSONPath::new(segments) });
        }

        let literal = match self.peek() {
            Some('\'') | Some('"') => Value::String(self.parse_string()?),
            Some('0'..='9') | Some('-') => self.parse_number_literal()?,
            _ if self.peek_str("true") => {
                self.advance_by(4);
                Value::Bool(true)
            }
            _ if self.peek_str("false") => {
                self.advance_by(5);
                Value::Bool(false)
            }
            _ if self.peek_str("null") => {
                self.advance_by(4);
                Value::Null
            }
            _ => return Err(self.unexpected()),
        };
        Ok(ValueExpression::Literal(literal))
    }

    fn parse_number_literal(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;

        if self.peek() == Some('-') {
            self.advance();
        }
        if !matches!(self.peek(), Some('0'..='9')) {
            return Err(ParseError::InvalidNumber(start));
        }
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }

        let mut is_float = false;
        if self.peek() == Some('.') {
            is_float = true;
            self.advance();
            if !matches!(self.peek(), Some('0'..='9')) {
                return Err(ParseError::InvalidNumber(start));
            }
            while matches!(self.peek(), Some('0'..='9')) {
                self.advance();
            }
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            is_float = true;
            self.advance();
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.advance();
            }
            if !matches!(self.peek(), Some('0'..='9')) {
                return Err(ParseError::InvalidNumber(start));
            }
            while matches!(self.peek(), Some('0'..='9')) {
                self.advance();
            }
        }

        let num_str = &self.input[start..self.pos];
        if !is_float {
            if let Ok(i) = num_str.parse::<i64>() {
                return Ok(Value::from(i));
            }
        }
        let f = num_str
            .parse::<f64>()
            .map_err(|_| ParseError::InvalidNumber(start))?;
        Ok(serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null))
    }

    /// Peek at the next comparison operator without consuming input.
    fn peek_comparison_operator(&self) -> Option<ComparisonToken> {
        const OPERATORS: [(&str, ComparisonOperator); 8] = [
            ("===", ComparisonOperator::Equal),
            ("!==", ComparisonOperator::NotEqual),
            ("==", ComparisonOperator::Equal),
            ("!=", ComparisonOperator::NotEqual),
            ("<=", ComparisonOperator::LessEqual),
            (">=", ComparisonOperator::GreaterEqual),
            ("<", ComparisonOperator::Less),
            (">", ComparisonOperator::Greater),
        ];
        OPERATORS
            .iter()
            .find(|(token, _)| self.peek_str(token))
            .map(|(token, operator)| ComparisonToken { operator: *operator, len: token.len() })
    }

    fn unexpected(&self) -> ParseError {
        match self.peek() {
            Some(ch) => ParseError::UnexpectedChar { ch, pos: self.pos },
            None => ParseError::UnexpectedEnd,
        }
    }

    fn peek_str(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        if self.peek() == Some(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }
}
