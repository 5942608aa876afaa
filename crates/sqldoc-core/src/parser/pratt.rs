//! Pratt expression parser for operator precedence.
//!
//! From loosest to tightest: `OR`, `AND`, prefix `NOT`, comparisons and
//! predicates, `|`, `&`, shifts, additive, multiplicative, unary, `::`.

use crate::ast::{BinaryOp, UnaryOp};
use crate::lexer::{Keyword, TokenKind};

/// Binding power of the prefix `-`, `+` and `~` operators.
pub const UNARY_BP: u8 = 19;

/// Binding power of prefix `NOT`.
pub const NOT_BP: u8 = 5;

/// Returns the prefix binding power for a unary operator token.
///
/// Returns `None` if the token is not a prefix operator.
#[must_use]
pub const fn prefix_binding_power(kind: &TokenKind) -> Option<u8> {
    match kind {
        TokenKind::Minus | TokenKind::Plus | TokenKind::BitNot => Some(UNARY_BP),
        TokenKind::Keyword(Keyword::Not) => Some(NOT_BP),
        _ => None,
    }
}

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: left_bp < right_bp
///
/// Returns `None` if the token is not an infix operator.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),

        TokenKind::Keyword(Keyword::And) => Some((3, 4)),

        // Comparisons and predicates; `NOT` here starts NOT IN/BETWEEN/LIKE
        TokenKind::Eq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq
        | TokenKind::Keyword(
            Keyword::Is | Keyword::In | Keyword::Between | Keyword::Like | Keyword::Not,
        ) => Some((7, 8)),

        TokenKind::BitOr => Some((9, 10)),

        TokenKind::BitAnd => Some((11, 12)),

        TokenKind::LeftShift | TokenKind::RightShift => Some((13, 14)),

        // String concat has the same precedence as addition
        TokenKind::Plus | TokenKind::Minus | TokenKind::Concat => Some((15, 16)),

        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((17, 18)),

        // Postfix `::type`
        TokenKind::DoubleColon => Some((21, 22)),

        _ => None,
    }
}

/// Converts a token to a binary operator.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Mod),
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        TokenKind::Keyword(Keyword::And) => Some(BinaryOp::And),
        TokenKind::Keyword(Keyword::Or) => Some(BinaryOp::Or),
        TokenKind::Concat => Some(BinaryOp::Concat),
        TokenKind::BitAnd => Some(BinaryOp::BitAnd),
        TokenKind::BitOr => Some(BinaryOp::BitOr),
        TokenKind::LeftShift => Some(BinaryOp::LeftShift),
        TokenKind::RightShift => Some(BinaryOp::RightShift),
        _ => None,
    }
}

/// Converts a token to a unary operator.
#[must_use]
pub const fn token_to_unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Plus => Some(UnaryOp::Plus),
        TokenKind::Keyword(Keyword::Not) => Some(UnaryOp::Not),
        TokenKind::BitNot => Some(UnaryOp::BitNot),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        // Multiplication should bind tighter than addition
        let add_bp = infix_binding_power(&TokenKind::Plus).unwrap();
        let mul_bp = infix_binding_power(&TokenKind::Star).unwrap();
        assert!(mul_bp.0 > add_bp.0);

        // AND should bind tighter than OR
        let and_bp = infix_binding_power(&TokenKind::Keyword(Keyword::And)).unwrap();
        let or_bp = infix_binding_power(&TokenKind::Keyword(Keyword::Or)).unwrap();
        assert!(and_bp.0 > or_bp.0);

        // Prefix NOT sits between AND and the comparisons
        let eq_bp = infix_binding_power(&TokenKind::Eq).unwrap();
        assert!(NOT_BP > and_bp.1);
        assert!(NOT_BP < eq_bp.0);

        // Unary minus binds tighter than every binary operator
        assert!(UNARY_BP > mul_bp.1);
    }

    #[test]
    fn test_left_associativity() {
        for kind in [TokenKind::Plus, TokenKind::Star, TokenKind::Eq, TokenKind::BitOr] {
            let (left, right) = infix_binding_power(&kind).unwrap();
            assert!(left < right, "{kind}");
        }
    }

    #[test]
    fn test_token_to_binary_op() {
        assert_eq!(token_to_binary_op(&TokenKind::Plus), Some(BinaryOp::Add));
        assert_eq!(token_to_binary_op(&TokenKind::Concat), Some(BinaryOp::Concat));
        assert_eq!(token_to_binary_op(&TokenKind::NotEq), Some(BinaryOp::NotEq));
        assert_eq!(token_to_binary_op(&TokenKind::LeftParen), None);
        assert_eq!(token_to_binary_op(&TokenKind::Keyword(Keyword::Like)), None);
    }

    #[test]
    fn test_token_to_unary_op() {
        assert_eq!(token_to_unary_op(&TokenKind::Minus), Some(UnaryOp::Neg));
        assert_eq!(token_to_unary_op(&TokenKind::Plus), Some(UnaryOp::Plus));
        assert_eq!(
            token_to_unary_op(&TokenKind::Keyword(Keyword::Not)),
            Some(UnaryOp::Not)
        );
        assert_eq!(token_to_unary_op(&TokenKind::Star), None);
    }
}
