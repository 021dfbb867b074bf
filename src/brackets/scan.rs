//! Character scanner for buffers the tree-sitter grammar cannot load
//!
//! Understands just enough Lisp lexing to keep brackets inside strings,
//! character literals and line comments out of the token stream.

use std::ops::Range;

use ropey::Rope;
use tree_sitter::InputEdit;

use super::lisp::LanguageSyntax;
use super::token::{enclosing_form, BracketSet, BracketToken, SyntaxTree, TokenKind, Tokenizer};

#[derive(Debug, Clone, Default)]
pub struct ScanSyntax {
    brackets: BracketSet,
    tokens: Vec<BracketToken>,
    forms: Vec<Range<usize>>,
    stale: bool,
}

impl ScanSyntax {
    pub fn new(brackets: BracketSet) -> Self {
        Self {
            brackets,
            stale: true,
            ..Self::default()
        }
    }

    /// Rescan `text` from scratch
    pub fn scan(&mut self, text: &str) {
        self.tokens.clear();
        self.forms.clear();

        let bytes = text.as_bytes();
        let mut depth = 0usize;
        let mut form_start = 0usize;
        let mut i = 0usize;

        while i < bytes.len() {
            match bytes[i] {
                b';' => {
                    let end = line_end(bytes, i);
                    self.tokens.push(BracketToken::other(i, end));
                    i = end;
                    continue;
                }
                b'"' => {
                    let end = string_end(bytes, i);
                    self.tokens.push(BracketToken::other(i, end));
                    i = end;
                    continue;
                }
                b'\\' => {
                    // Character literal: skip the escaped char
                    let end = (i + 2).min(bytes.len());
                    self.tokens.push(BracketToken::other(i, end));
                    i = end;
                    continue;
                }
                b => {
                    let ch = [b];
                    let text = std::str::from_utf8(&ch).unwrap_or("");
                    match self.brackets.classify(text) {
                        TokenKind::Open => {
                            if depth == 0 {
                                form_start = i;
                            }
                            depth += 1;
                            self.tokens.push(BracketToken::open(i));
                        }
                        TokenKind::Close => {
                            self.tokens.push(BracketToken::close(i));
                            if depth > 0 {
                                depth -= 1;
                                if depth == 0 {
                                    self.forms.push(form_start..i + 1);
                                }
                            }
                        }
                        TokenKind::Other => {}
                    }
                }
            }
            i += 1;
        }

        if depth > 0 {
            self.forms.push(form_start..bytes.len());
        }
        self.stale = false;
    }
}

fn line_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| from + p)
}

fn string_end(bytes: &[u8], from: usize) -> usize {
    let mut i = from + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

impl Tokenizer for ScanSyntax {
    fn tokens(&self, range: Range<usize>) -> Vec<BracketToken> {
        self.tokens.tokens(range)
    }
}

impl SyntaxTree for ScanSyntax {
    fn top_level_forms(&self) -> Vec<Range<usize>> {
        self.forms.clone()
    }

    fn enclosing_top_level_form(&self, offset: usize) -> Option<Range<usize>> {
        enclosing_form(self.forms.iter().cloned(), offset)
    }
}

impl LanguageSyntax for ScanSyntax {
    fn edit(&mut self, _edit: &InputEdit) {
        self.stale = true;
    }

    fn refresh(&mut self, source: &Rope) {
        if self.stale {
            self.scan(&source.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanned(text: &str) -> ScanSyntax {
        let mut syntax = ScanSyntax::new(BracketSet::Parens);
        syntax.scan(text);
        syntax
    }

    #[test]
    fn test_skips_strings_comments_and_chars() {
        let text = "(f \"(\" \\) ; )\n)";
        let syntax = scanned(text);
        let brackets: Vec<_> = syntax
            .tokens(0..text.len())
            .into_iter()
            .filter(|t| t.kind != TokenKind::Other)
            .collect();
        assert_eq!(
            brackets,
            vec![BracketToken::open(0), BracketToken::close(14)]
        );
    }

    #[test]
    fn test_forms_and_unterminated_tail() {
        let syntax = scanned("(a) x (b (c)) (d");
        assert_eq!(syntax.enclosing_top_level_form(1), Some(0..3));
        assert_eq!(syntax.enclosing_top_level_form(4), None);
        assert_eq!(syntax.enclosing_top_level_form(10), Some(6..13));
        assert_eq!(syntax.enclosing_top_level_form(15), Some(14..16));
    }
}
