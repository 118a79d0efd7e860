use std::mem;

use log::{debug, warn};

use crate::frontend::ast::{Expression, ExpressionKind, Statement, StatementKind, Type};
use crate::meta::TypeMeta;
use crate::optimizer::OptimizerContext;
use crate::optimizer::registry::Entry;

/// temporary declaration waiting for insertion into the block
struct PendingDecl {
    position: usize,
    stmt: Statement<TypeMeta>,
}

/// true if the statement observes the value of its expression:
/// everything except declarations that are never used and dropped by code generation
fn is_live_owner(stmt: &Statement<TypeMeta>) -> bool {
    match &stmt.item {
        StatementKind::Decl { is_used: false, init, .. } => {
            init.as_ref().map_or(false, |e| e.item.has_side_effects())
        }
        _ => true,
    }
}

/// replace every occurrence of the entry with a reference to a new temporary,
/// returns declaration of the temporary initialized with the first occurrence
fn extract_entry(
    stmts: &mut [Box<Statement<TypeMeta>>], entry: &Entry, ctx: &mut OptimizerContext,
) -> Option<Statement<TypeMeta>> {
    let first = match entry.occurrences.first() {
        Some(slot) => slot,
        None => {
            warn!("skipping entry {} without occurrences", entry.key);
            return None;
        }
    };
    if first.resolve_mut(stmts).is_none() {
        warn!("skipping entry {}, its first slot cannot be resolved", entry.key);
        return None;
    }

    let is_used = entry.occurrences.iter()
        .any(|slot| stmts.get(slot.stmt_index).map_or(true, |stmt| is_live_owner(stmt)));

    let ident = ctx.new_temp_name();
    let reference = Expression::new(
        ExpressionKind::Identifier { ident: ident.clone() },
        TypeMeta { t: entry.t.clone() },
    );

    let mut init = None;
    for slot in entry.occurrences.iter() {
        match slot.resolve_mut(stmts) {
            Some(expr) => {
                let replaced = mem::replace(expr, reference.clone());
                if init.is_none() {
                    init = Some(replaced);
                }
            }
            None => warn!("slot {:?} of {} cannot be resolved", slot, entry.key),
        }
    }

    debug!("introduced {} for {} ({} occurrences)", ident, entry.key, entry.occurrences.len());
    let kind = StatementKind::Decl {
        t: entry.t.clone(),
        ident,
        init: init.map(Box::new),
        is_array: false,
        size: None,
        is_used,
    };
    Some(Statement::new(kind, TypeMeta { t: Type::Void }))
}

/// replace reusable expressions of a single block with temporaries,
/// each temporary is declared right before the first statement using it,
/// returns the number of introduced temporaries
pub fn apply_cse(
    stmts: &mut Vec<Box<Statement<TypeMeta>>>, reusable: Vec<Entry>, ctx: &mut OptimizerContext,
) -> usize {
    // all slots are resolved before the sequence changes its shape
    let pending: Vec<PendingDecl> = reusable.iter()
        .filter_map(|entry| {
            extract_entry(stmts, entry, ctx)
                .map(|stmt| PendingDecl { position: entry.first_index, stmt })
        })
        .collect();

    let introduced = pending.len();
    for (inserted, decl) in pending.into_iter().enumerate() {
        stmts.insert(decl.position + inserted, Box::new(decl.stmt));
    }
    introduced
}

#[cfg(test)]
mod tests {
    use crate::frontend::ast::BinaryOperator;
    use crate::optimizer::collector::collect_candidates;

    use super::*;

    fn int(val: i64) -> Box<Expression<TypeMeta>> {
        Box::new(Expression::new(ExpressionKind::LitInt { val }, TypeMeta { t: Type::Int }))
    }

    fn bin(left: Box<Expression<TypeMeta>>, op: BinaryOperator, right: Box<Expression<TypeMeta>>) -> Box<Expression<TypeMeta>> {
        Box::new(Expression::new(ExpressionKind::Binary { left, op, right }, TypeMeta { t: Type::Int }))
    }

    fn var(ident: &str) -> Box<Expression<TypeMeta>> {
        Box::new(Expression::new(ExpressionKind::Identifier { ident: String::from(ident) }, TypeMeta { t: Type::Int }))
    }

    fn stmt(kind: StatementKind<TypeMeta>) -> Box<Statement<TypeMeta>> {
        Box::new(Statement::new(kind, TypeMeta { t: Type::Void }))
    }

    fn assign(ident: &str, expr: Box<Expression<TypeMeta>>) -> Box<Statement<TypeMeta>> {
        stmt(StatementKind::Ass { ident: String::from(ident), expr })
    }

    fn decl(ident: &str, init: Box<Expression<TypeMeta>>, is_used: bool) -> Box<Statement<TypeMeta>> {
        stmt(StatementKind::Decl {
            t: Type::Int, ident: String::from(ident), init: Some(init), is_array: false, size: None, is_used,
        })
    }

    fn run(stmts: &mut Vec<Box<Statement<TypeMeta>>>, ctx: &mut OptimizerContext) -> usize {
        let reusable = collect_candidates(stmts).into_reusable();
        apply_cse(stmts, reusable, ctx)
    }

    fn decl_of(stmt: &Statement<TypeMeta>) -> (&String, &Expression<TypeMeta>, bool) {
        match &stmt.item {
            StatementKind::Decl { ident, init: Some(init), is_used, .. } => (ident, init, *is_used),
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn repeated_constant_is_hoisted() {
        let mut ctx = OptimizerContext::new();
        let mut stmts = vec![
            assign("x", bin(int(2), BinaryOperator::Plus, int(3))),
            assign("y", bin(int(2), BinaryOperator::Plus, int(3))),
        ];
        assert_eq!(run(&mut stmts, &mut ctx), 1);
        assert_eq!(stmts.len(), 3);

        let (ident, init, is_used) = decl_of(&stmts[0]);
        assert_eq!(ident, "__c2lua_cse_0");
        assert_eq!(*init, *bin(int(2), BinaryOperator::Plus, int(3)));
        assert!(is_used);
        assert_eq!(*stmts[1], *assign("x", var("__c2lua_cse_0")));
        assert_eq!(*stmts[2], *assign("y", var("__c2lua_cse_0")));
    }

    #[test]
    fn single_occurrence_is_left_alone() {
        let mut ctx = OptimizerContext::new();
        let mut stmts = vec![assign("a", bin(int(1), BinaryOperator::Plus, int(1)))];
        let before = stmts.clone();
        assert_eq!(run(&mut stmts, &mut ctx), 0);
        assert_eq!(stmts, before);
    }

    #[test]
    fn declarations_follow_first_occurrences() {
        let mut ctx = OptimizerContext::new();
        let mut stmts = vec![
            assign("a", var("z")),
            assign("b", bin(int(4), BinaryOperator::Times, int(4))),
            assign("c", bin(int(1), BinaryOperator::Minus, int(1))),
            assign("d", bin(int(1), BinaryOperator::Minus, int(1))),
            assign("e", bin(int(4), BinaryOperator::Times, int(4))),
        ];
        assert_eq!(run(&mut stmts, &mut ctx), 2);
        let order: Vec<String> = stmts.iter()
            .map(|s| match &s.item {
                StatementKind::Decl { ident, .. } => ident.clone(),
                StatementKind::Ass { ident, .. } => ident.clone(),
                other => panic!("unexpected statement {:?}", other),
            })
            .collect();
        assert_eq!(order, vec!["a", "__c2lua_cse_0", "b", "__c2lua_cse_1", "c", "d", "e"]);
        assert_eq!(*decl_of(&stmts[1]).1, *bin(int(4), BinaryOperator::Times, int(4)));
        assert_eq!(*decl_of(&stmts[3]).1, *bin(int(1), BinaryOperator::Minus, int(1)));
    }

    #[test]
    fn nested_reusable_values_are_declared_inner_first() {
        let mut ctx = OptimizerContext::new();
        let product = || bin(bin(int(1), BinaryOperator::Plus, int(2)), BinaryOperator::Times, int(3));
        let mut stmts = vec![assign("x", product()), assign("y", product())];
        assert_eq!(run(&mut stmts, &mut ctx), 2);

        let (inner, inner_init, _) = decl_of(&stmts[0]);
        assert_eq!(inner, "__c2lua_cse_0");
        assert_eq!(*inner_init, *bin(int(1), BinaryOperator::Plus, int(2)));
        let (outer, outer_init, _) = decl_of(&stmts[1]);
        assert_eq!(outer, "__c2lua_cse_1");
        assert_eq!(*outer_init, *bin(var("__c2lua_cse_0"), BinaryOperator::Times, int(3)));
        assert_eq!(*stmts[2], *assign("x", var("__c2lua_cse_1")));
        assert_eq!(*stmts[3], *assign("y", var("__c2lua_cse_1")));
    }

    #[test]
    fn temporary_used_only_by_unused_declarations_is_not_live() {
        let mut ctx = OptimizerContext::new();
        let mut stmts = vec![
            decl("a", bin(int(6), BinaryOperator::Divide, int(2)), false),
            decl("b", bin(int(6), BinaryOperator::Divide, int(2)), false),
        ];
        run(&mut stmts, &mut ctx);
        assert!(!decl_of(&stmts[0]).2);

        let mut stmts = vec![
            decl("a", bin(int(6), BinaryOperator::Divide, int(2)), false),
            decl("b", bin(int(6), BinaryOperator::Divide, int(2)), true),
        ];
        run(&mut stmts, &mut ctx);
        assert!(decl_of(&stmts[0]).2);
    }

    #[test]
    fn unused_declaration_with_call_keeps_temporary_live() {
        let mut ctx = OptimizerContext::new();
        let call = |arg| Box::new(Expression::new(
            ExpressionKind::Call { ident: String::from("f"), args: vec![arg] },
            TypeMeta { t: Type::Int },
        ));
        let mut stmts = vec![
            decl("a", call(bin(int(1), BinaryOperator::Plus, int(2))), false),
            decl("b", call(bin(int(1), BinaryOperator::Plus, int(2))), false),
        ];
        run(&mut stmts, &mut ctx);
        assert!(decl_of(&stmts[0]).2);
    }

    #[test]
    fn counter_is_shared_between_blocks() {
        let mut ctx = OptimizerContext::new();
        let mut first = vec![assign("x", bin(int(1), BinaryOperator::Plus, int(1))), assign("y", bin(int(1), BinaryOperator::Plus, int(1)))];
        let mut second = first.clone();
        run(&mut first, &mut ctx);
        run(&mut second, &mut ctx);
        assert_eq!(decl_of(&first[0]).0, "__c2lua_cse_0");
        assert_eq!(decl_of(&second[0]).0, "__c2lua_cse_1");
    }
}
