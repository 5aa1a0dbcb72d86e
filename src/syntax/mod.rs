//! Parse-tree input of the builders.
//!
//! The MetaEd grammar and lexer are external. This module fixes the shape of
//! the tree they hand over:
//!
//! - [`Production`] / [`TokenKind`] - names of grammar rules and tokens
//! - [`ParseNode`] / [`Token`] - the tree itself, with recovery markers
//! - [`MetaEdListener`] / [`walk`] - depth-first enter/exit traversal
//! - [`TreeBuilder`] - fluent construction of trees without a parser

mod listener;
mod production;
mod tree;
mod tree_builder;

pub use listener::{MetaEdListener, walk};
pub use production::{Production, TokenKind};
pub use tree::{ParseElement, ParseNode, Token, is_error_text};
pub use tree_builder::TreeBuilder;
