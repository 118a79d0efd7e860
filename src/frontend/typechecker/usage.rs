use std::collections::HashSet;

use crate::frontend::ast::*;
use crate::meta::TypeMeta;
use crate::util::visitor::AstVisitor;

/// collects names of all variables referenced (read or assigned) in a function
#[derive(Debug, Default)]
pub struct UsageCollector {
    referenced: HashSet<String>,
}

impl UsageCollector {
    pub fn is_referenced(&self, ident: &str) -> bool {
        self.referenced.contains(ident)
    }

    fn visit_block(&mut self, block: &Block<TypeMeta>) {
        for stmt in block.item.stmts.iter() {
            self.visit_statement(stmt);
        }
    }
}

impl AstVisitor<TypeMeta, ()> for UsageCollector {
    fn visit_expression(&mut self, expr: &Expression<TypeMeta>) {
        match &expr.item {
            ExpressionKind::Identifier { ident } => {
                self.referenced.insert(ident.clone());
            }
            ExpressionKind::Unary { arg, .. } => self.visit_expression(arg),
            ExpressionKind::Binary { left, right, .. } => {
                self.visit_expression(left);
                self.visit_expression(right);
            }
            ExpressionKind::Call { args, .. } => {
                for arg in args.iter() {
                    self.visit_expression(arg);
                }
            }
            ExpressionKind::ArrayLit { elements } => {
                for element in elements.iter() {
                    self.visit_expression(element);
                }
            }
            ExpressionKind::Subscript { arr, idx } => {
                self.visit_expression(arr);
                self.visit_expression(idx);
            }
            _ => {}
        }
    }

    fn visit_statement(&mut self, stmt: &Statement<TypeMeta>) {
        match &stmt.item {
            StatementKind::Block { block } => self.visit_block(block),
            StatementKind::Decl { init, .. } => {
                // the declaration itself is not a reference
                if let Some(expr) = init {
                    self.visit_expression(expr);
                }
            }
            StatementKind::Ass { ident, expr } => {
                self.referenced.insert(ident.clone());
                self.visit_expression(expr);
            }
            StatementKind::ArrAss { ident, idx, expr } => {
                self.referenced.insert(ident.clone());
                self.visit_expression(idx);
                self.visit_expression(expr);
            }
            StatementKind::Expr { expr } => self.visit_expression(expr),
            StatementKind::Return { expr } => {
                if let Some(expr) = expr {
                    self.visit_expression(expr);
                }
            }
            StatementKind::While { expr, stmt } => {
                self.visit_expression(expr);
                self.visit_statement(stmt);
            }
            StatementKind::For { init, cond, post, stmt } => {
                if let Some(init) = init {
                    self.visit_statement(init);
                }
                if let Some(cond) = cond {
                    self.visit_expression(cond);
                }
                if let Some(post) = post {
                    self.visit_statement(post);
                }
                self.visit_statement(stmt);
            }
        }
    }

    fn visit_function(&mut self, function: &Function<TypeMeta>) {
        self.visit_block(&function.item.block);
    }
}

/// sets `is_used` of every declaration in the program,
/// names are compared per function without resolving shadowing
pub fn mark_used_declarations(program: &mut Program<TypeMeta>) {
    for function in program.functions.iter_mut() {
        let mut collector = UsageCollector::default();
        collector.visit_function(function);
        mark_block(&mut function.item.block, &collector);
    }
}

fn mark_block(block: &mut Block<TypeMeta>, usage: &UsageCollector) {
    for stmt in block.item.stmts.iter_mut() {
        mark_statement(stmt, usage);
    }
}

fn mark_statement(stmt: &mut Statement<TypeMeta>, usage: &UsageCollector) {
    match &mut stmt.item {
        StatementKind::Block { block } => mark_block(block, usage),
        StatementKind::Decl { ident, is_used, .. } => {
            *is_used = usage.is_referenced(ident);
        }
        StatementKind::While { stmt, .. } => mark_statement(stmt, usage),
        StatementKind::For { init, post, stmt, .. } => {
            if let Some(init) = init {
                mark_statement(init, usage);
            }
            if let Some(post) = post {
                mark_statement(post, usage);
            }
            mark_statement(stmt, usage);
        }
        _ => {}
    }
}
