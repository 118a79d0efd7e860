use std::fs;
use std::ops::Add;
use std::sync::Arc;

use codemap::{CodeMap, File, Pos};
use log::info;

use crate::meta::{LocationMeta, MetaMapper, TypeMeta};

use self::error::{FrontendError, FrontendErrorKind};
pub use self::parser::ast;
use self::parser::parse_program;
use self::preprocessor::clean_comments;
use self::typechecker::check_types;

mod parser;
mod preprocessor;
mod typechecker;

pub mod error;


pub type CheckedProgram = ast::Program<TypeMeta>;
pub type Error = FrontendError<String>;

/// load file from path and process it as a source code
pub fn process_file(path: String) -> Result<CheckedProgram, Vec<Error>> {
    let source_code = match fs::read_to_string(path.clone()) {
        Ok(source_code) => source_code,
        Err(e) => {
            let err = FrontendError::new(
                FrontendErrorKind::SystemError { message: format!("Failed to read file {}: {}", path, e) },
                path.clone(),
            );
            return Err(vec![err]);
        }
    };
    process_code(path, source_code)
}

/// process source code of the file given by name
pub fn process_code(file_name: String, source_code: String) -> Result<CheckedProgram, Vec<Error>> {
    // setup codemap for mapping byte offset to (file, line, column)
    let mut codemap = CodeMap::new();
    let codemap_file = codemap.add_file(
        file_name.clone(),
        source_code.clone(),
    );
    // comments are blanked out, so offsets in the clean code are offsets in the source file
    let clean_code = clean_comments(source_code);

    info!("parsing {}", file_name);
    let result = parse_program(clean_code)
        .and_then(|p| {
            info!("checking types of {} functions", p.functions.len());
            check_types(p)
        });

    // process results, mapping errors to their locations in the source code
    match result {
        Ok(program) => Ok(program),
        Err(errors) => {
            let located_errors: Vec<_> = errors.iter()
                .map(|e| locate_error(&e, &codemap_file, &codemap))
                .collect();
            Err(located_errors)
        }
    }
}

/// necessary for mapping source file location
impl MetaMapper<LocationMeta, Pos> for Arc<File> {
    fn map_meta(&self, from: &LocationMeta) -> Pos {
        self.span.low().add(from.offset as u64)
    }
}

/// necessary for mapping source file location
impl MetaMapper<Pos, String> for CodeMap {
    fn map_meta(&self, from: &Pos) -> String {
        self.look_up_pos(from.clone()).to_string()
    }
}

/// translate location from LocationMeta (byte offset in file)
/// to a readable location in the source code file, using provided MetaMappers
fn locate_error(
    e: &FrontendError<LocationMeta>, file: &Arc<File>, code_map: &CodeMap,
) -> FrontendError<String> {
    e.map_meta(file)
        .map_meta(code_map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_located_by_line_and_column() {
        let source = String::from("int main() {\n    // x is missing\n    return x;\n}\n");
        let errors = process_code(String::from("prog.c"), source).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].get_meta(), "prog.c:3:12");
        assert_eq!(
            errors[0].item,
            FrontendErrorKind::EnvError { message: String::from("Undeclared variable x") }
        );
    }

    #[test]
    fn comments_do_not_shift_locations() {
        let source = String::from("/* header\n comment */ int main() { return \"s\"; }");
        let errors = process_code(String::from("a.c"), source).unwrap_err();
        assert_eq!(errors[0].get_meta(), "a.c:2:33");
    }

    #[test]
    fn missing_file_is_a_system_error() {
        let errors = process_file(String::from("does/not/exist.c")).unwrap_err();
        match &errors[0].item {
            FrontendErrorKind::SystemError { .. } => {}
            other => panic!("unexpected error {:?}", other),
        }
    }
}
