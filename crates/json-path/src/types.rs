//! JSONPath AST types.

use serde_json::Value;

/// Selector types for JSONPath.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Member access: `.name`, `['key']`, `.0`
    Name(String),
    /// Array element access: `[0]`, `[-1]`
    Index(isize),
    /// Array slicing: `[start:end:step]`
    Slice { start: Option<isize>, end: Option<isize>, step: Option<isize> },
    /// All children: `.*`, `[*]`
    Wildcard,
    /// Conditional selection of children: `[?(@.price < 10)]`
    Filter(FilterExpression),
    /// Computed index: `[(@.length - 1)]`
    Script(ScriptExpression),
}

/// Path segment containing one or more selectors.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub selectors: Vec<Selector>,
    /// Whether this is a recursive descent segment (`..`).
    pub recursive: bool,
}

impl PathSegment {
    pub fn new(selectors: Vec<Selector>, recursive: bool) -> Self {
        Self { selectors, recursive }
    }

    pub fn child(selector: Selector) -> Self {
        Self::new(vec![selector], false)
    }
}

/// Complete JSONPath expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JSONPath {
    pub segments: Vec<PathSegment>,
}

impl JSONPath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

/// `@.length` plus a constant, the only script form the dialect supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptExpression {
    pub offset: isize,
}

/// Filter expression types.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpression {
    /// Comparison expression: `@.price < 10`
    Comparison {
        operator: ComparisonOperator,
        left: ValueExpression,
        right: ValueExpression,
    },
    /// Logical expression: `@.a && @.b`
    Logical {
        operator: LogicalOperator,
        left: Box<FilterExpression>,
        right: Box<FilterExpression>,
    },
    /// Truthiness test of a single operand: `@.isbn`
    Truthy(ValueExpression),
    /// Parenthesized expression: `(@.a || @.b)`
    Paren(Box<FilterExpression>),
    /// Negation: `!@.flag`
    Negation(Box<FilterExpression>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Equal,        // == ===
    NotEqual,     // != !==
    Less,         // <
    LessEqual,    // <=
    Greater,      // >
    GreaterEqual, // >=
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And, // &&
    Or,  // ||
}

/// Operands inside a filter.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueExpression {
    /// Literal value: `"string"`, `42`, `true`, `null`
    Literal(Value),
    /// Path relative to the current node (`@`, `@.name`) or the root (`$.name`).
    Path { origin: PathOrigin, path: JSONPath },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOrigin {
    Current,
    Root,
}
