//! Field extraction shared by the builders.
//!
//! Every reader returns `None` (or an empty string) for malformed input, so
//! callers skip the field instead of failing.

use smol_str::SmolStr;

use crate::syntax::{ParseNode, Production, TokenKind};

/// `ID` text of `node`.
pub(crate) fn id_text(node: &ParseNode) -> Option<SmolStr> {
    node.valid_text(TokenKind::Id).map(SmolStr::new)
}

/// `ID` text of the named child of `node`.
pub(crate) fn child_id_text(node: &ParseNode, production: Production) -> Option<SmolStr> {
    node.valid_child(production).and_then(id_text)
}

/// Unquoted `TEXT` of a documentation-like production, empty when absent.
pub(crate) fn documentation(node: &ParseNode) -> SmolStr {
    node.valid_text(TokenKind::Text)
        .map(unquote)
        .map(SmolStr::new)
        .unwrap_or_default()
}

/// Deprecation reasons are documentation-shaped.
pub(crate) fn deprecation_reason(node: &ParseNode) -> SmolStr {
    documentation(node)
}

/// `[1234]` → `1234`
pub(crate) fn metaed_id(node: &ParseNode) -> Option<SmolStr> {
    node.valid_text(TokenKind::MetaEdId)
        .map(|text| SmolStr::from(text.replace(['[', ']'], "")))
}

/// `UNSIGNED_INT` text of `node`.
pub(crate) fn unsigned_int(node: &ParseNode) -> Option<SmolStr> {
    node.valid_text(TokenKind::UnsignedInt).map(SmolStr::new)
}

/// Full text of the named child, for signed and decimal literals.
pub(crate) fn child_literal(node: &ParseNode, production: Production) -> Option<SmolStr> {
    if node.exception {
        return None;
    }
    node.valid_child(production)
        .and_then(ParseNode::valid_node_text)
        .map(SmolStr::from)
}

/// Dotted path of a `propertyPath`; empty when any segment is malformed.
pub(crate) fn property_path(node: &ParseNode) -> Vec<SmolStr> {
    let mut path = Vec::new();
    for token in node.tokens(TokenKind::Id) {
        if !token.is_valid() {
            return Vec::new();
        }
        path.push(token.text.clone());
    }
    path
}

fn unquote(text: &str) -> &str {
    let text = text.strip_prefix('"').unwrap_or(text);
    text.strip_suffix('"').unwrap_or(text)
}
