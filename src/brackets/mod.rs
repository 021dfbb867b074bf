//! Bracket analysis
//!
//! Everything needed to turn a buffer region into colored bracket positions:
//! - Token and syntax-tree collaborator traits
//! - Dirty range resolution after an edit
//! - Stack-based bracket matching
//! - Lisp syntax backends (tree-sitter, with a plain scanner fallback)
//!
//! ## Pass
//!
//! ```text
//! EditDescriptor → resolve_dirty_range (top-level form) → DirtyRange
//!                → Tokenizer::tokens(range) → match_brackets → [BracketPair]
//! ```

mod dirty_range;
mod edit;
mod lisp;
mod matcher;
mod scan;
mod token;

pub use dirty_range::{resolve_dirty_range, DirtyRange};
pub use edit::EditDescriptor;
pub use lisp::{byte_to_point, input_edit, LanguageSyntax, LispSyntax};
pub use matcher::{match_brackets, BracketPair};
pub use scan::ScanSyntax;
pub use token::{BracketSet, BracketToken, FlatForms, SyntaxTree, TokenKind, Tokenizer};
