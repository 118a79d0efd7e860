use std::collections::HashSet;

use itertools::Itertools;

use crate::backend::context::GlobalContext;
use crate::backend::ir::Chunk;
use crate::backend::names::{mangle, mangle_variable};
use crate::frontend::ast::{Block, Expression, ExpressionKind, Function, Program, Statement, StatementKind, Type};
use crate::meta::TypeMeta;
use crate::util::names::reserved;

/// zero value of a scalar type, used for declarations without initializer
fn zero_value(t: &Type) -> &'static str {
    match t {
        Type::Float => "0.0",
        Type::Bool => "false",
        Type::Str => "\"\"",
        Type::Array { .. } => "{}",
        _ => "0",
    }
}

/// declarations that code generation can drop without changing the program
fn is_removable_decl(stmt: &Statement<TypeMeta>) -> bool {
    match &stmt.item {
        StatementKind::Decl { is_used: false, init, .. } => {
            !init.as_ref().map_or(false, |e| e.item.has_side_effects())
        }
        _ => false,
    }
}

#[derive(Debug, Default)]
pub struct Emitter {
    pub(in crate::backend) context: GlobalContext,
    /// names of user functions, all of them are lua globals
    functions: HashSet<String>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub(in crate::backend) fn variable_name(&self, ident: &str) -> String {
        mangle_variable(ident, &self.functions)
    }

    pub fn into_chunks(self) -> Vec<Chunk> {
        self.context.into_chunks()
    }

    pub fn compile_program(&mut self, program: &Program<TypeMeta>) {
        self.functions = program.functions.iter()
            .map(|f| f.item.ident.clone())
            .collect();
        for function in program.functions.iter() {
            self.compile_function(function);
        }
        // entry point
        match program.get_function("main").map(|f| &f.item.ret) {
            Some(Type::Int) => self.context.push(format!("os.exit({}())", mangle("main"))),
            Some(_) => self.context.push(format!("{}()", mangle("main"))),
            None => {}
        }
    }

    pub fn compile_function(&mut self, function: &Function<TypeMeta>) {
        let args = function.item.args.iter()
            .map(|arg| self.variable_name(&arg.item.ident))
            .join(", ");
        self.context.push(format!("function {}({})", mangle(&function.item.ident), args));
        self.compile_nested_statements(&function.item.block.item.stmts);
        self.context.push(String::from("end"));
    }

    /// statements of a lua block (function body, loop body, `do ... end`) one level deeper
    fn compile_nested_statements(&mut self, stmts: &[Box<Statement<TypeMeta>>]) {
        self.context.increase_depth();
        let emitted: Vec<&Statement<TypeMeta>> = stmts.iter()
            .map(|stmt| stmt.as_ref())
            .filter(|stmt| !is_removable_decl(stmt))
            .collect();
        let count = emitted.len();
        for (i, stmt) in emitted.into_iter().enumerate() {
            self.compile_statement(stmt, i + 1 == count);
        }
        self.context.decrease_depth();
    }

    fn compile_block(&mut self, block: &Block<TypeMeta>) {
        self.context.push(String::from("do"));
        self.compile_nested_statements(&block.item.stmts);
        self.context.push(String::from("end"));
    }

    /// loop body is emitted as the contents of the loop block
    fn compile_body(&mut self, stmt: &Statement<TypeMeta>) {
        match &stmt.item {
            StatementKind::Block { block } => self.compile_nested_statements(&block.item.stmts),
            _ => self.compile_nested_statements(&[Box::new(stmt.clone())]),
        }
    }

    /// lua only allows `return` as the last statement of a block
    pub fn compile_statement(&mut self, stmt: &Statement<TypeMeta>, is_last: bool) {
        match &stmt.item {
            StatementKind::Block { block } => self.compile_block(block),
            StatementKind::Decl { t, ident, init, is_array, size, .. } => {
                self.compile_decl(t, ident, init.as_deref(), *is_array, *size)
            }
            StatementKind::Ass { ident, expr } => {
                let value = self.compile_expression(expr);
                let name = self.variable_name(ident);
                self.context.push(format!("{} = {}", name, value));
            }
            StatementKind::ArrAss { ident, idx, expr } => {
                let idx = self.compile_index(idx);
                let value = self.compile_expression(expr);
                let name = self.variable_name(ident);
                self.context.push(format!("{}[{}] = {}", name, idx, value));
            }
            StatementKind::Expr { expr } => {
                let value = self.compile_expression(expr);
                match &expr.item {
                    ExpressionKind::Call { .. } => self.context.push(value),
                    // lua does not allow bare expressions as statements
                    _ => self.context.push(format!("local _ = {}", value)),
                }
            }
            StatementKind::Return { expr } => {
                let ret = match expr {
                    Some(e) => format!("return {}", self.compile_expression(e)),
                    None => String::from("return"),
                };
                if is_last {
                    self.context.push(ret);
                } else {
                    self.context.push(format!("do {} end", ret));
                }
            }
            StatementKind::While { expr, stmt } => {
                let cond = self.compile_condition(expr);
                self.context.push(format!("while {} do", cond));
                self.compile_body(stmt);
                self.context.push(String::from("end"));
            }
            StatementKind::For { init, cond, post, stmt } => {
                self.compile_for(init.as_deref(), cond.as_deref(), post.as_deref(), stmt);
            }
        }
    }

    fn compile_decl(
        &mut self, t: &Type, ident: &String, init: Option<&Expression<TypeMeta>>, is_array: bool, size: Option<usize>,
    ) {
        let name = self.variable_name(ident);
        if !is_array {
            let value = match init {
                Some(e) => self.compile_expression(e),
                None => String::from(zero_value(t)),
            };
            self.context.push(format!("local {} = {}", name, value));
            return;
        }

        match init {
            Some(e) => {
                let value = match &e.item {
                    ExpressionKind::ArrayLit { elements } => {
                        let mut values: Vec<String> = elements.iter()
                            .map(|e| self.compile_expression(e))
                            .collect();
                        // remaining items of a sized array are zero
                        if let Some(size) = size {
                            while values.len() < size {
                                values.push(String::from(zero_value(t)));
                            }
                        }
                        format!("{{{}}}", values.join(", "))
                    }
                    _ => self.compile_expression(e),
                };
                self.context.push(format!("local {} = {}", name, value));
            }
            None => {
                self.context.push(format!("local {} = {{}}", name));
                if let Some(size) = size.filter(|s| *s > 0) {
                    let i = reserved("i");
                    self.context.push(format!(
                        "for {} = 1, {} do {}[{}] = {} end", i, size, name, i, zero_value(t)
                    ));
                }
            }
        }
    }

    /// `for` has no direct lua counterpart with the same semantics, it becomes a while loop
    fn compile_for(
        &mut self,
        init: Option<&Statement<TypeMeta>>,
        cond: Option<&Expression<TypeMeta>>,
        post: Option<&Statement<TypeMeta>>,
        stmt: &Statement<TypeMeta>,
    ) {
        self.context.push(String::from("do"));
        self.context.increase_depth();
        if let Some(init) = init {
            if !is_removable_decl(init) {
                self.compile_statement(init, false);
            }
        }
        let cond = match cond {
            Some(e) => self.compile_condition(e),
            None => String::from("true"),
        };
        self.context.push(format!("while {} do", cond));
        self.context.increase_depth();
        // body gets its own block, so that its locals and returns do not interfere with `post`
        self.context.push(String::from("do"));
        self.compile_body(stmt);
        self.context.push(String::from("end"));
        if let Some(post) = post {
            self.compile_statement(post, false);
        }
        self.context.decrease_depth();
        self.context.push(String::from("end"));
        self.context.decrease_depth();
        self.context.push(String::from("end"));
    }
}
