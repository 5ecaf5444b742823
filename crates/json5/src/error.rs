use thiserror::Error;

/// What went wrong while decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("invalid end of input")]
    UnexpectedEnd,
    #[error("invalid character {0:?}")]
    InvalidChar(char),
    #[error("invalid identifier character {0:?}")]
    InvalidIdentifierChar(char),
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
}

/// A JSON5 syntax error with a 1-based line and column (counted in
/// characters).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("JSON5: {kind} at {line}:{column}")]
pub struct Json5Error {
    pub kind: ErrorKind,
    pub line: usize,
    pub column: usize,
}

impl Json5Error {
    /// Build an error for `kind` at byte `offset` of `src`.
    pub(crate) fn at(src: &str, offset: usize, kind: ErrorKind) -> Self {
        let mut line = 1;
        let mut column = 1;
        for c in src[..offset.min(src.len())].chars() {
            match c {
                '\n' | '\u{2028}' | '\u{2029}' => {
                    line += 1;
                    column = 1;
                }
                _ => column += 1,
            }
        }
        Self { kind, line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_counts_lines_and_chars() {
        let err = Json5Error::at("{\n  é!", 6, ErrorKind::InvalidChar('!'));
        assert_eq!((err.line, err.column), (2, 4));
        assert_eq!(err.to_string(), "JSON5: invalid character '!' at 2:4");
    }

    #[test]
    fn end_of_input_message() {
        let err = Json5Error::at("{", 1, ErrorKind::UnexpectedEnd);
        assert_eq!(err.to_string(), "JSON5: invalid end of input at 1:2");
    }
}
