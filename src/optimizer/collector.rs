use crate::frontend::ast::{Expression, ExpressionKind, Statement, StatementKind, Type};
use crate::meta::{GetType, TypeMeta};
use crate::optimizer::key::canonical_key;
use crate::optimizer::registry::Registry;

/// single step from an expression to one of its children
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SlotStep {
    Left,
    Right,
    Operand,
    Arg(usize),
    Element(usize),
    Array,
    Index,
}

/// location of an expression inside a statement sequence:
/// index of the owning statement and path from its scanned expression
#[derive(Debug, PartialEq, Clone)]
pub struct Slot {
    pub stmt_index: usize,
    pub path: Vec<SlotStep>,
}

impl Slot {
    /// find the expression in the sequence the slot was collected from,
    /// None if the sequence changed shape since then
    pub fn resolve_mut<'s>(
        &self, stmts: &'s mut [Box<Statement<TypeMeta>>],
    ) -> Option<&'s mut Expression<TypeMeta>> {
        let stmt = stmts.get_mut(self.stmt_index)?;
        let mut expr = entry_point_mut(stmt)?;
        for step in self.path.iter() {
            expr = child_mut(expr, *step)?;
        }
        Some(expr)
    }
}

/// expression scanned for reusable subexpressions,
/// loop headers and nested blocks are never scanned
pub fn entry_point(stmt: &Statement<TypeMeta>) -> Option<&Expression<TypeMeta>> {
    match &stmt.item {
        StatementKind::Decl { init: Some(init), is_array: false, .. } => Some(&**init),
        StatementKind::Ass { expr, .. } => Some(&**expr),
        // index of the slot is left untouched
        StatementKind::ArrAss { expr, .. } => Some(&**expr),
        StatementKind::Expr { expr } => Some(&**expr),
        StatementKind::Return { expr: Some(expr) } => Some(&**expr),
        _ => None,
    }
}

pub fn entry_point_mut(stmt: &mut Statement<TypeMeta>) -> Option<&mut Expression<TypeMeta>> {
    match &mut stmt.item {
        StatementKind::Decl { init: Some(init), is_array: false, .. } => Some(&mut **init),
        StatementKind::Ass { expr, .. } => Some(&mut **expr),
        StatementKind::ArrAss { expr, .. } => Some(&mut **expr),
        StatementKind::Expr { expr } => Some(&mut **expr),
        StatementKind::Return { expr: Some(expr) } => Some(&mut **expr),
        _ => None,
    }
}

fn child_mut(expr: &mut Expression<TypeMeta>, step: SlotStep) -> Option<&mut Expression<TypeMeta>> {
    match (&mut expr.item, step) {
        (ExpressionKind::Binary { left, .. }, SlotStep::Left) => Some(&mut **left),
        (ExpressionKind::Binary { right, .. }, SlotStep::Right) => Some(&mut **right),
        (ExpressionKind::Unary { arg, .. }, SlotStep::Operand) => Some(&mut **arg),
        (ExpressionKind::Call { args, .. }, SlotStep::Arg(i)) => args.get_mut(i).map(|a| a.as_mut()),
        (ExpressionKind::ArrayLit { elements }, SlotStep::Element(i)) => elements.get_mut(i).map(|e| e.as_mut()),
        (ExpressionKind::Subscript { arr, .. }, SlotStep::Array) => Some(&mut **arr),
        (ExpressionKind::Subscript { idx, .. }, SlotStep::Index) => Some(&mut **idx),
        _ => None,
    }
}

/// true if every leaf is a literal and every inner node is an operator
pub fn is_constant(expr: &Expression<TypeMeta>) -> bool {
    match &expr.item {
        ExpressionKind::LitInt { .. }
        | ExpressionKind::LitChar { .. }
        | ExpressionKind::LitFloat { .. }
        | ExpressionKind::LitBool { .. }
        | ExpressionKind::LitStr { .. } => true,
        ExpressionKind::Unary { arg, .. } => is_constant(arg),
        ExpressionKind::Binary { left, right, .. } => is_constant(left) && is_constant(right),
        _ => false,
    }
}

/// operator nodes with a resolved type and constant operands can be replaced with a temporary
pub fn is_candidate(expr: &Expression<TypeMeta>) -> bool {
    let is_operator = match &expr.item {
        ExpressionKind::Unary { .. } | ExpressionKind::Binary { .. } => true,
        _ => false,
    };
    is_operator && expr.get_type() != Type::Unknown && is_constant(expr)
}

/// scan statements of a single block (without nested blocks) and register all candidates,
/// children are registered before their parents
pub fn collect_candidates(stmts: &[Box<Statement<TypeMeta>>]) -> Registry {
    let mut registry = Registry::new();
    for (stmt_index, stmt) in stmts.iter().enumerate() {
        if let Some(expr) = entry_point(stmt) {
            let mut path = Vec::new();
            collect_expression(expr, stmt_index, &mut path, &mut registry);
        }
    }
    registry
}

fn collect_expression(
    expr: &Expression<TypeMeta>, stmt_index: usize, path: &mut Vec<SlotStep>, registry: &mut Registry,
) {
    let mut visit = |child: &Expression<TypeMeta>, step: SlotStep, registry: &mut Registry| {
        path.push(step);
        collect_expression(child, stmt_index, path, registry);
        path.pop();
    };
    match &expr.item {
        ExpressionKind::Binary { left, right, .. } => {
            visit(&**left, SlotStep::Left, registry);
            visit(&**right, SlotStep::Right, registry);
        }
        ExpressionKind::Unary { arg, .. } => visit(&**arg, SlotStep::Operand, registry),
        ExpressionKind::Call { args, .. } => {
            for (i, arg) in args.iter().enumerate() {
                visit(&**arg, SlotStep::Arg(i), registry);
            }
        }
        ExpressionKind::ArrayLit { elements } => {
            for (i, element) in elements.iter().enumerate() {
                visit(&**element, SlotStep::Element(i), registry);
            }
        }
        ExpressionKind::Subscript { arr, idx } => {
            visit(&**arr, SlotStep::Array, registry);
            visit(&**idx, SlotStep::Index, registry);
        }
        _ => {}
    }

    if is_candidate(expr) {
        if let Some(key) = canonical_key(expr) {
            let slot = Slot { stmt_index, path: path.clone() };
            registry.register(key, expr.get_type(), slot);
        }
    }
}
