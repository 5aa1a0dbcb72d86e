//! Parse tree consumed by the builders.
//!
//! A [`ParseNode`] is one grammar production with its ordered children, each
//! either a nested node or a [`Token`]. Parser recovery shows up in two ways:
//! a node whose `exception` flag is set, and a token whose text is an error
//! sentinel (text starting with `<`, e.g. `<missing ID>`) or which is flagged
//! as an error node. The validating accessors fold all of these into "absent".

use smol_str::SmolStr;

use super::production::{Production, TokenKind};
use crate::base::{Position, SourceLocation};

/// True for the text a recovering parser puts in place of a missing token.
pub fn is_error_text(text: &str) -> bool {
    text.starts_with('<')
}

/// A terminal of the parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: SmolStr,
    pub position: Position,
    /// Set for error nodes inserted by parser recovery.
    pub error: bool,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<SmolStr>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
            error: false,
        }
    }

    /// An error node produced by parser recovery.
    pub fn error(kind: TokenKind, text: impl Into<SmolStr>, position: Position) -> Self {
        Self {
            error: true,
            ..Self::new(kind, text, position)
        }
    }

    /// A token that is present, not an error node, and carries real text.
    pub fn is_valid(&self) -> bool {
        !self.error && !is_error_text(&self.text)
    }
}

/// A child of a [`ParseNode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseElement {
    Node(ParseNode),
    Token(Token),
}

/// One grammar production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNode {
    pub production: Production,
    pub position: Position,
    /// Set when the parser could not match this production cleanly.
    pub exception: bool,
    pub children: Vec<ParseElement>,
}

impl ParseNode {
    pub fn new(production: Production, position: Position) -> Self {
        Self {
            production,
            position,
            exception: false,
            children: Vec::new(),
        }
    }

    pub fn with_exception(mut self) -> Self {
        self.exception = true;
        self
    }

    pub fn push_node(&mut self, node: ParseNode) {
        self.children.push(ParseElement::Node(node));
    }

    pub fn push_token(&mut self, token: Token) {
        self.children.push(ParseElement::Token(token));
    }

    /// Child nodes in order.
    pub fn nodes(&self) -> impl Iterator<Item = &ParseNode> {
        self.children.iter().filter_map(|element| match element {
            ParseElement::Node(node) => Some(node),
            ParseElement::Token(_) => None,
        })
    }

    /// First child node of the given production.
    pub fn child(&self, production: Production) -> Option<&ParseNode> {
        self.nodes().find(|node| node.production == production)
    }

    /// All child nodes of the given production, in order.
    pub fn children(&self, production: Production) -> impl Iterator<Item = &ParseNode> {
        self.nodes().filter(move |node| node.production == production)
    }

    /// First direct token of the given kind.
    pub fn token(&self, kind: TokenKind) -> Option<&Token> {
        self.tokens(kind).next()
    }

    /// All direct tokens of the given kind, in order.
    pub fn tokens(&self, kind: TokenKind) -> impl Iterator<Item = &Token> {
        self.children.iter().filter_map(move |element| match element {
            ParseElement::Token(token) if token.kind == kind => Some(token),
            _ => None,
        })
    }

    pub fn has_token(&self, kind: TokenKind) -> bool {
        self.token(kind).is_some()
    }

    /// Concatenated text of every token under this node, without separators.
    pub fn text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for element in &self.children {
            match element {
                ParseElement::Node(node) => node.collect_text(out),
                ParseElement::Token(token) => out.push_str(&token.text),
            }
        }
    }

    /// First token under this node, depth first.
    pub fn first_token(&self) -> Option<&Token> {
        self.children.iter().find_map(|element| match element {
            ParseElement::Node(node) => node.first_token(),
            ParseElement::Token(token) => Some(token),
        })
    }

    /// Start position and the text of the starting token.
    pub fn source_location(&self) -> SourceLocation {
        let text = self.first_token().map(|token| token.text.clone()).unwrap_or_default();
        SourceLocation::new(self.position, text)
    }

    /// Child of the given production, absent when missing or excepted.
    pub fn valid_child(&self, production: Production) -> Option<&ParseNode> {
        self.child(production).filter(|node| !node.exception)
    }

    /// Text of the first token of the given kind, absent when this node is
    /// excepted or the token is missing, an error node, or error text.
    pub fn valid_text(&self, kind: TokenKind) -> Option<&str> {
        if self.exception {
            return None;
        }
        self.token(kind)
            .filter(|token| token.is_valid())
            .map(|token| token.text.as_str())
    }

    /// Full text of this node, absent when excepted or error text.
    pub fn valid_node_text(&self) -> Option<String> {
        if self.exception {
            return None;
        }
        let text = self.text();
        if text.is_empty() || is_error_text(&text) {
            None
        } else {
            Some(text)
        }
    }
}
