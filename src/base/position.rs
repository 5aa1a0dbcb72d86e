/// Position tracking for parse-tree elements
///
/// Stores the source location (line/column) of tokens and productions so that
/// built entities, properties and validation failures can point back at the
/// text they came from.
use smol_str::SmolStr;

/// A position in source code (1-indexed line, 0-indexed column, as emitted by
/// the grammar's token stream)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Where a model element was declared: start position plus the text of the
/// production that declared it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
    pub token_text: SmolStr,
}

impl SourceLocation {
    pub fn new(position: Position, token_text: impl Into<SmolStr>) -> Self {
        Self {
            line: position.line,
            column: position.column,
            token_text: token_text.into(),
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// True for the default location of an element that was never stamped.
    pub fn is_unset(&self) -> bool {
        self.line == 0 && self.column == 0 && self.token_text.is_empty()
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} '{}'", self.line, self.column, self.token_text)
    }
}
