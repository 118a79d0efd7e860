use std::fmt::Debug;

use crate::frontend::ast::{Block, Expression, Function, Program, Statement};


pub trait AstMapper<FromMeta, ToMeta, ErrT> {
    fn map_block(&mut self, block: &Block<FromMeta>) -> Result<Block<ToMeta>, Vec<ErrT>>;
    fn map_expression(&mut self, expr: &Expression<FromMeta>) -> Result<Expression<ToMeta>, Vec<ErrT>>;
    fn map_statement(&mut self, stmt: &Statement<FromMeta>) -> Result<Statement<ToMeta>, Vec<ErrT>>;
    fn map_function(&mut self, function: &Function<FromMeta>) -> Result<Function<ToMeta>, Vec<ErrT>>;

    /// main ast mapper function, default implementation
    /// maps functions in declaration order and collects errors from all of them
    fn map_program(
        &mut self, program: &Program<FromMeta>
    ) -> Result<Program<ToMeta>, Vec<ErrT>> where ToMeta: Debug + Clone, ErrT: Debug {
        let mut functions = Vec::with_capacity(program.functions.len());
        let mut errors = Vec::new();
        for func in program.functions.iter() {
            match self.map_function(func) {
                Ok(mapped) => functions.push(mapped),
                Err(mut err_vec) => errors.append(&mut err_vec),
            }
        }
        if errors.is_empty() {
            Ok(Program { functions })
        } else {
            Err(errors)
        }
    }
}
