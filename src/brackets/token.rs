//! Bracket tokens and the collaborator traits that produce them
//!
//! The engine never lexes or parses on its own. It asks a [`Tokenizer`] for
//! the tokens of a range and a [`SyntaxTree`] for top-level form boundaries.

use std::ops::Range;

/// Lexical class of a token, as far as bracket matching cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// An opening bracket: `(`, and `[` / `{` when enabled
    Open,
    /// A closing bracket: `)`, and `]` / `}` when enabled
    Close,
    /// Anything else (symbols, literals, comments, whitespace)
    Other,
}

/// Read-only view of one lexical token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketToken {
    pub kind: TokenKind,
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl BracketToken {
    pub const fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    pub const fn open(start: usize) -> Self {
        Self::new(TokenKind::Open, start, start + 1)
    }

    pub const fn close(start: usize) -> Self {
        Self::new(TokenKind::Close, start, start + 1)
    }

    pub const fn other(start: usize, end: usize) -> Self {
        Self::new(TokenKind::Other, start, end)
    }

    /// Whether the token lies entirely inside `range`
    pub fn within(&self, range: &Range<usize>) -> bool {
        self.start >= range.start && self.end <= range.end
    }
}

/// Which bracket characters count as open/close tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BracketSet {
    /// Round parentheses only
    #[default]
    Parens,
    /// Parentheses, square brackets and curly braces
    All,
}

impl BracketSet {
    /// Classify a token's source text
    pub fn classify(self, text: &str) -> TokenKind {
        match (self, text) {
            (_, "(") => TokenKind::Open,
            (_, ")") => TokenKind::Close,
            (BracketSet::All, "[" | "{") => TokenKind::Open,
            (BracketSet::All, "]" | "}") => TokenKind::Close,
            _ => TokenKind::Other,
        }
    }
}

impl std::str::FromStr for BracketSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parens" => Ok(BracketSet::Parens),
            "all" => Ok(BracketSet::All),
            other => Err(format!(
                "Unknown bracket set '{}' (expected 'parens' or 'all')",
                other
            )),
        }
    }
}

/// Produces the ordered token stream for a byte range
pub trait Tokenizer {
    /// Tokens intersecting `range`, in document order
    fn tokens(&self, range: Range<usize>) -> Vec<BracketToken>;
}

/// Answers structural questions about the current buffer
pub trait SyntaxTree {
    /// Top-level forms in document order, sorted and disjoint
    ///
    /// Only spans opened by a bracket count; stray atoms and unmatched closes
    /// between forms are left out.
    fn top_level_forms(&self) -> Vec<Range<usize>>;

    /// Byte range of the top-level form containing `offset`, if any
    fn enclosing_top_level_form(&self, offset: usize) -> Option<Range<usize>> {
        enclosing_form(self.top_level_forms().into_iter(), offset)
    }
}

impl Tokenizer for [BracketToken] {
    fn tokens(&self, range: Range<usize>) -> Vec<BracketToken> {
        self.iter()
            .filter(|t| t.end > range.start && t.start < range.end)
            .copied()
            .collect()
    }
}

impl Tokenizer for Vec<BracketToken> {
    fn tokens(&self, range: Range<usize>) -> Vec<BracketToken> {
        self.as_slice().tokens(range)
    }
}

/// A syntax tree made of a flat list of top-level forms
///
/// Useful where no parser is available; forms must be sorted and disjoint.
#[derive(Debug, Clone, Default)]
pub struct FlatForms(pub Vec<Range<usize>>);

impl SyntaxTree for FlatForms {
    fn top_level_forms(&self) -> Vec<Range<usize>> {
        self.0.clone()
    }
}

/// Pick the form containing `offset`
///
/// A form `[start, end)` contains `offset` when `start <= offset < end`. When
/// nothing strictly contains it, a form ending exactly at `offset` is used so
/// typing right after a closing bracket still rescans that form.
pub(crate) fn enclosing_form(
    forms: impl Iterator<Item = Range<usize>>,
    offset: usize,
) -> Option<Range<usize>> {
    let mut touching = None;
    for form in forms {
        if form.start > offset {
            break;
        }
        if offset < form.end {
            return Some(form);
        }
        if form.end == offset {
            touching = Some(form);
        }
    }
    touching
}
