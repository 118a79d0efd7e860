use itertools::Itertools;
use log::info;

use crate::frontend::ast::Program;
use crate::meta::TypeMeta;

use self::emitter::Emitter;

mod context;
mod display;
mod emitter;
mod expression;
mod ir;
mod names;

/// compiles the given program, assuming it meets all the necessary criteria (is checked by frontend)
/// into a string containing equivalent lua source code
pub fn compile(program: &Program<TypeMeta>) -> String {
    info!("emitting lua code for {} functions", program.functions.len());
    let mut emitter = Emitter::new();
    emitter.compile_program(program);
    let mut code = emitter.into_chunks().iter()
        .map(|chunk| chunk.to_string())
        .join("\n");
    code.push('\n');
    code
}
