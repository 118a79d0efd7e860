use crate::frontend::ast::{Expression, ExpressionKind, Type};
use crate::meta::{GetType, TypeMeta};

/// builds a string that is equal for two subtrees iff they compute the same value
/// and are emitted the same way, returns None for expressions that cannot be reused
///
/// operands are never reordered, so `1 + 2` and `2 + 1` get different keys
pub fn canonical_key(expr: &Expression<TypeMeta>) -> Option<String> {
    match &expr.item {
        // char literals are emitted differently than plain integers
        ExpressionKind::LitInt { val } => match expr.get_type() {
            Type::Char => Some(format!("C:{}", val)),
            _ => Some(format!("I:{}", val)),
        },
        ExpressionKind::LitChar { val } => Some(format!("C:{}", *val as u32)),
        ExpressionKind::LitFloat { val } => Some(format!("F:{:?}", val)),
        ExpressionKind::LitBool { val } => Some(format!("B:{}", val)),
        // length makes the key of a string with separators inside unambiguous
        ExpressionKind::LitStr { val } => Some(format!("S:{}:{}", val.len(), val)),
        ExpressionKind::Unary { op, arg } => {
            let arg_key = canonical_key(arg)?;
            Some(format!("U:{:?}({})", op, arg_key))
        }
        ExpressionKind::Binary { left, op, right } => {
            let left_key = canonical_key(left)?;
            let right_key = canonical_key(right)?;
            Some(format!("BIN:{:?}({}|{})", op, left_key, right_key))
        }
        ExpressionKind::Identifier { .. }
        | ExpressionKind::Call { .. }
        | ExpressionKind::ArrayLit { .. }
        | ExpressionKind::Subscript { .. } => None,
    }
}
