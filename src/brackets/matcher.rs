//! Stack-based bracket pairing bounded to a byte range

use std::ops::Range;

use super::token::{BracketToken, TokenKind};

/// One bracket to highlight: where it is and how deeply it is nested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketPair {
    /// Byte offset of the bracket character
    pub offset: usize,
    /// Number of enclosing open brackets at this position
    pub level: usize,
}

impl BracketPair {
    pub const fn new(offset: usize, level: usize) -> Self {
        Self { offset, level }
    }
}

/// Pair brackets in `tokens` that lie strictly within `range`
///
/// Opens emit the current depth and push it. Closes pop and emit the popped
/// level; a close with nothing to pop is skipped so the depth never goes
/// negative. Opens left on the stack at the end keep their level.
///
/// The stack holds nesting levels, not colors. Colors are derived when the
/// pairs are applied.
pub fn match_brackets(tokens: &[BracketToken], range: Range<usize>) -> Vec<BracketPair> {
    let mut stack: Vec<usize> = Vec::new();
    let mut pairs = Vec::new();

    for token in tokens.iter().filter(|t| t.within(&range)) {
        match token.kind {
            TokenKind::Open => {
                let depth = stack.len();
                pairs.push(BracketPair::new(token.start, depth));
                stack.push(depth);
            }
            TokenKind::Close => match stack.pop() {
                Some(level) => pairs.push(BracketPair::new(token.start, level)),
                None => {
                    tracing::trace!("Skipping unmatched close bracket at {}", token.start);
                }
            },
            TokenKind::Other => {}
        }
    }

    if !stack.is_empty() {
        tracing::trace!(
            "{} unterminated open bracket(s) in {}..{}",
            stack.len(),
            range.start,
            range.end
        );
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens_for(text: &str) -> Vec<BracketToken> {
        text.char_indices()
            .filter_map(|(i, ch)| match ch {
                '(' => Some(BracketToken::open(i)),
                ')' => Some(BracketToken::close(i)),
                ' ' => None,
                _ => Some(BracketToken::other(i, i + 1)),
            })
            .collect()
    }

    fn levels(pairs: &[BracketPair]) -> Vec<usize> {
        pairs.iter().map(|p| p.level).collect()
    }

    #[test]
    fn test_nested_levels() {
        let text = "(a (b) (c (d)))";
        let pairs = match_brackets(&tokens_for(text), 0..text.len());
        assert_eq!(levels(&pairs), vec![0, 1, 1, 1, 2, 2, 1, 0]);
        assert_eq!(pairs[0].offset, 0);
        assert_eq!(pairs[7].offset, 14);
    }

    #[test]
    fn test_unmatched_close_is_skipped() {
        let text = ") ( )";
        let pairs = match_brackets(&tokens_for(text), 0..text.len());
        assert_eq!(pairs, vec![BracketPair::new(2, 0), BracketPair::new(4, 0)]);
    }

    #[test]
    fn test_unterminated_open_keeps_level() {
        let text = "((a)";
        let pairs = match_brackets(&tokens_for(text), 0..text.len());
        assert_eq!(levels(&pairs), vec![0, 1, 1]);
    }

    #[test]
    fn test_tokens_outside_range_are_ignored() {
        let text = "(a) (b (c))";
        let pairs = match_brackets(&tokens_for(text), 4..text.len());
        assert_eq!(
            pairs,
            vec![
                BracketPair::new(4, 0),
                BracketPair::new(7, 1),
                BracketPair::new(9, 1),
                BracketPair::new(10, 0),
            ]
        );
    }

    #[test]
    fn test_token_straddling_range_end_is_excluded() {
        let tokens = vec![
            BracketToken::open(0),
            BracketToken::other(1, 6),
            BracketToken::close(6),
        ];
        let pairs = match_brackets(&tokens, 0..4);
        assert_eq!(pairs, vec![BracketPair::new(0, 0)]);
    }

    #[test]
    fn test_deterministic() {
        let text = "(()))(()(";
        let tokens = tokens_for(text);
        let first = match_brackets(&tokens, 0..text.len());
        let second = match_brackets(&tokens, 0..text.len());
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_range() {
        let text = "(a)";
        assert!(match_brackets(&tokens_for(text), 1..1).is_empty());
    }
}
