use log::{debug, info};

use crate::frontend::ast::{Block, Function, Program, Statement, StatementKind};
use crate::meta::TypeMeta;
use crate::util::names::reserved;

use self::collector::collect_candidates;
use self::rewriter::apply_cse;
use self::trim::eliminate_unreachable;

mod collector;
mod key;
mod registry;
mod rewriter;
mod trim;

/// state shared by optimization of the whole program
#[derive(Debug, Default)]
pub struct OptimizerContext {
    /// never reset, so names of temporaries are unique in the entire program
    next_temp: usize,
    /// statistics, for logging
    introduced: usize,
    trimmed: usize,
}

impl OptimizerContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_temp_name(&mut self) -> String {
        let name = reserved(&format!("cse_{}", self.next_temp));
        self.next_temp += 1;
        name
    }

    /// number of temporaries introduced so far
    pub fn introduced(&self) -> usize {
        self.introduced
    }

    /// number of unreachable statements removed so far
    pub fn trimmed(&self) -> usize {
        self.trimmed
    }
}

/// optimize all functions in declaration order
pub fn optimize_program(program: &mut Program<TypeMeta>, ctx: &mut OptimizerContext) {
    for function in program.functions.iter_mut() {
        optimize_function(function, ctx);
    }
    info!(
        "optimizer introduced {} temporaries and removed {} unreachable statements",
        ctx.introduced, ctx.trimmed
    );
}

pub fn optimize_function(function: &mut Function<TypeMeta>, ctx: &mut OptimizerContext) {
    debug!("optimizing function {}", function.item.ident);
    optimize_block(&mut function.item.block, ctx);
}

/// optimize a block as an independent scope:
/// reuse repeated constants, then optimize nested scopes, then remove unreachable statements
pub fn optimize_block(block: &mut Block<TypeMeta>, ctx: &mut OptimizerContext) {
    let stmts = &mut block.item.stmts;

    let reusable = collect_candidates(stmts).into_reusable();
    let introduced = apply_cse(stmts, reusable, ctx);
    ctx.introduced += introduced;

    for stmt in stmts.iter_mut() {
        optimize_nested(stmt, ctx);
    }

    let removed = eliminate_unreachable(stmts);
    if removed > 0 {
        debug!("removed {} statements after return", removed);
    }
    ctx.trimmed += removed;
}

/// optimize scopes owned by the statement, loop conditions are never touched
/// and statements that are not blocks get no scope of their own
fn optimize_nested(stmt: &mut Statement<TypeMeta>, ctx: &mut OptimizerContext) {
    match &mut stmt.item {
        StatementKind::Block { block } => optimize_block(block, ctx),
        StatementKind::While { stmt, .. } => optimize_nested(stmt, ctx),
        StatementKind::For { init, post, stmt, .. } => {
            if let Some(init) = init {
                optimize_nested(init, ctx);
            }
            optimize_nested(stmt, ctx);
            if let Some(post) = post {
                optimize_nested(post, ctx);
            }
        }
        _ => {}
    }
}
