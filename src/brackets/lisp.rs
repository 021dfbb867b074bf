//! Tree-sitter backed Lisp syntax
//!
//! Parses the buffer with the Racket grammar, which covers the bracket
//! structure of Clojure and Scheme sources well enough for pairing. The
//! parse tree serves both as the [`Tokenizer`] and the [`SyntaxTree`].
//! Edits are fed to the cached tree so reparses are incremental.

use std::ops::Range;

use ropey::Rope;
use tree_sitter::{InputEdit, Node, Parser, Point, Tree};

use super::edit::EditDescriptor;
use super::token::{BracketSet, BracketToken, SyntaxTree, TokenKind, Tokenizer};

/// A language backend the engine can query after every reparse
pub trait LanguageSyntax: Tokenizer + SyntaxTree {
    /// Record an edit before the next [`LanguageSyntax::refresh`]
    fn edit(&mut self, edit: &InputEdit);

    /// Bring the syntax up to date with `source`
    fn refresh(&mut self, source: &Rope);
}

/// Convert a byte offset to a tree-sitter Point (row, column in bytes)
pub fn byte_to_point(rope: &Rope, byte_offset: usize) -> Point {
    let byte_offset = byte_offset.min(rope.len_bytes());
    let row = rope.byte_to_line(byte_offset);
    let column = byte_offset - rope.line_to_byte(row);
    Point { row, column }
}

/// Build the tree-sitter edit for a change applied to `old` producing `new`
pub fn input_edit(old: &Rope, new: &Rope, edit: &EditDescriptor) -> InputEdit {
    InputEdit {
        start_byte: edit.offset,
        old_end_byte: edit.old_end(),
        new_end_byte: edit.new_end(),
        start_position: byte_to_point(old, edit.offset),
        old_end_position: byte_to_point(old, edit.old_end()),
        new_end_position: byte_to_point(new, edit.new_end()),
    }
}

/// Classify an anonymous leaf node by its literal text
///
/// Reader-macro openers such as `#(` are reported at the bracket itself.
fn classify_leaf(kind: &str, brackets: BracketSet) -> Option<(TokenKind, usize)> {
    let last = kind.chars().last()?;
    let prefix = &kind[..kind.len() - last.len_utf8()];
    if prefix.len() > 2 || prefix.contains('\\') {
        return None;
    }
    let mut buf = [0u8; 4];
    match brackets.classify(last.encode_utf8(&mut buf)) {
        TokenKind::Other => None,
        kind => Some((kind, prefix.len())),
    }
}

/// Parsed Lisp buffer
pub struct LispSyntax {
    parser: Parser,
    tree: Option<Tree>,
    brackets: BracketSet,
    /// Edits were recorded since the last parse
    stale: bool,
}

impl LispSyntax {
    /// Create a parser for the Racket grammar
    pub fn new(brackets: BracketSet) -> Result<Self, String> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_racket::LANGUAGE.into())
            .map_err(|e| format!("Failed to load Lisp grammar: {}", e))?;
        Ok(Self {
            parser,
            tree: None,
            brackets,
            stale: true,
        })
    }

    /// The current tree, if a parse has run
    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    /// Parse `source`, reusing the previous tree when one exists
    pub fn parse(&mut self, source: &str) {
        let tree = match self.parser.parse(source, self.tree.as_ref()) {
            Some(tree) => Some(tree),
            None => {
                tracing::warn!("Incremental Lisp parse failed, falling back to full parse");
                self.parser.parse(source, None)
            }
        };
        if tree.is_none() {
            tracing::error!("Lisp parse failed");
        }
        self.tree = tree;
        self.stale = false;
    }

    fn collect_tokens(&self, node: Node<'_>, range: &Range<usize>, out: &mut Vec<BracketToken>) {
        if node.end_byte() <= range.start || node.start_byte() >= range.end {
            return;
        }
        if node.is_missing() || node.start_byte() == node.end_byte() {
            return;
        }

        if node.child_count() == 0 {
            let token = if node.is_named() {
                None
            } else {
                classify_leaf(node.kind(), self.brackets).map(|(kind, skip)| {
                    let start = node.start_byte() + skip;
                    BracketToken::new(kind, start, start + 1)
                })
            };
            out.push(
                token.unwrap_or_else(|| BracketToken::other(node.start_byte(), node.end_byte())),
            );
            return;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.collect_tokens(child, range, out);
        }
    }

    /// Kind of the first bracket under `node`, skipping strings and comments
    fn first_bracket(&self, node: Node<'_>) -> Option<TokenKind> {
        if node.is_missing() || node.start_byte() == node.end_byte() {
            return None;
        }
        if node.child_count() == 0 {
            if node.is_named() {
                return None;
            }
            return classify_leaf(node.kind(), self.brackets).map(|(kind, _)| kind);
        }
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .find_map(|child| self.first_bracket(child));
        found
    }
}

impl std::fmt::Debug for LispSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LispSyntax")
            .field("brackets", &self.brackets)
            .field("parsed", &self.tree.is_some())
            .field("stale", &self.stale)
            .finish()
    }
}

impl Tokenizer for LispSyntax {
    fn tokens(&self, range: Range<usize>) -> Vec<BracketToken> {
        let mut out = Vec::new();
        if let Some(tree) = &self.tree {
            self.collect_tokens(tree.root_node(), &range, &mut out);
        }
        out
    }
}

impl SyntaxTree for LispSyntax {
    fn top_level_forms(&self) -> Vec<Range<usize>> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };
        let root = tree.root_node();
        let mut cursor = root.walk();
        root.children(&mut cursor)
            .filter(|n| !n.is_missing() && n.start_byte() < n.end_byte())
            .filter(|n| self.first_bracket(*n) == Some(TokenKind::Open))
            .map(|n| n.start_byte()..n.end_byte())
            .collect()
    }
}

impl LanguageSyntax for LispSyntax {
    fn edit(&mut self, edit: &InputEdit) {
        if let Some(tree) = self.tree.as_mut() {
            tree.edit(edit);
        }
        self.stale = true;
    }

    fn refresh(&mut self, source: &Rope) {
        if self.stale {
            self.parse(&source.to_string());
        }
    }
}
