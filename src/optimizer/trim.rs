use crate::frontend::ast::{Statement, StatementKind};
use crate::meta::TypeMeta;

/// remove all statements following the first return in the sequence,
/// returns the number of removed statements
pub fn eliminate_unreachable(stmts: &mut Vec<Box<Statement<TypeMeta>>>) -> usize {
    let first_return = stmts.iter().position(|stmt| match stmt.item {
        StatementKind::Return { .. } => true,
        _ => false,
    });
    match first_return {
        Some(i) => {
            let removed = stmts.len() - i - 1;
            stmts.truncate(i + 1);
            removed
        }
        None => 0,
    }
}
