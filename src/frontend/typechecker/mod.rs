use crate::frontend::ast::Program;
use crate::meta::{LocationMeta, TypeMeta};
use crate::util::mapper::AstMapper;

use self::mapper::TypeCheckResult;
use self::typechecker::TypeChecker;
use self::usage::mark_used_declarations;
use self::util::{check_main, get_builtins};

mod util;
mod mapper;
mod typechecker;
mod usage;


/// main typechecker function: checks types of the entire program,
/// converts char literals to integers typed as char
/// and marks declarations of variables that are never referenced
pub fn check_types(program: Program<LocationMeta>) -> TypeCheckResult<Program<TypeMeta>> {
    let builtins = get_builtins();
    let mut typechecker = TypeChecker::new(&builtins);
    typechecker.declare_functions(&program)?;
    check_main(&program)?;

    let mut checked = typechecker.map_program(&program)?;
    mark_used_declarations(&mut checked);
    Ok(checked)
}

#[cfg(test)]
mod tests {
    use crate::frontend::ast::*;
    use crate::frontend::error::FrontendErrorKind;
    use crate::frontend::parser::parse_program;
    use crate::meta::GetType;

    use super::*;

    fn check(source: &str) -> TypeCheckResult<Program<TypeMeta>> {
        let parsed = parse_program(String::from(source)).unwrap();
        check_types(parsed)
    }

    fn first_error(source: &str) -> FrontendErrorKind {
        check(source).unwrap_err().remove(0).item
    }

    fn main_stmts(program: &Program<TypeMeta>) -> &Vec<Box<Statement<TypeMeta>>> {
        &program.get_function("main").unwrap().item.block.item.stmts
    }

    #[test]
    fn char_literal_becomes_integer_typed_as_char() {
        let program = check("int main() { char c = 'a'; return c; }").unwrap();
        match &main_stmts(&program)[0].item {
            StatementKind::Decl { init: Some(init), .. } => {
                assert_eq!(init.item, ExpressionKind::LitInt { val: 97 });
                assert_eq!(init.get_type(), Type::Char);
            }
            other => panic!("unexpected statement {:?}", other),
        }
    }

    #[test]
    fn binary_expressions_are_typed() {
        let program = check("int main() { float f = 1 + 2.5; bool b = 1 < 2; return 0; }").unwrap();
        let types: Vec<Type> = main_stmts(&program).iter()
            .filter_map(|s| match &s.item {
                StatementKind::Decl { init: Some(init), .. } => Some(init.get_type()),
                _ => None,
            })
            .collect();
        assert_eq!(types, vec![Type::Float, Type::Bool]);
    }

    #[test]
    fn functions_can_be_called_before_definition() {
        assert!(check("int main() { return f(1); } int f(int x) { return x; }").is_ok());
    }

    #[test]
    fn undeclared_variable_is_reported() {
        let err = first_error("int main() { return y; }");
        assert_eq!(err, FrontendErrorKind::EnvError { message: String::from("Undeclared variable y") });
    }

    #[test]
    fn variables_do_not_leak_out_of_blocks() {
        assert!(check("int main() { { int x = 1; } return x; }").is_err());
        assert!(check("int main() { for (int i = 0; i < 3; i++) {} return i; }").is_err());
    }

    #[test]
    fn shadowing_in_nested_scope_is_allowed() {
        assert!(check("int main() { int x = 1; { int x = 2; print_int(x); } return x; }").is_ok());
        assert!(check("int main() { int x = 1; int x = 2; return x; }").is_err());
    }

    #[test]
    fn assignment_type_mismatch_is_reported() {
        let err = first_error("int main() { int x = \"a\"; return 0; }");
        assert_eq!(err, FrontendErrorKind::TypeError { expected: Type::Int, actual: Type::Str });
    }

    #[test]
    fn return_type_must_match() {
        let err = first_error("void f() { return 1; } int main() { return 0; }");
        assert_eq!(err, FrontendErrorKind::TypeError { expected: Type::Void, actual: Type::Int });
        assert!(check("int main() { return; }").is_err());
    }

    #[test]
    fn call_arity_is_checked() {
        assert!(check("int f(int a) { return a; } int main() { return f(); }").is_err());
        assert!(check("int main() { printf(\"%d %d\", 1, 2); return 0; }").is_ok());
        assert!(check("int main() { printf(); return 0; }").is_err());
    }

    #[test]
    fn array_initializer_elements_are_checked() {
        assert!(check("int main() { int a[3] = {1, 2, 3}; return a[0]; }").is_ok());
        assert!(check("int main() { int a[2] = {1, \"x\"}; return a[0]; }").is_err());
        assert!(check("int main() { int a = 1; return a[0]; }").is_err());
    }

    #[test]
    fn builtins_and_reserved_names_cannot_be_redefined() {
        assert!(check("void puts(string s) { } int main() { return 0; }").is_err());
        assert!(check("int main() { int __c2lua_x = 1; return __c2lua_x; }").is_err());
    }

    #[test]
    fn main_signature_is_checked() {
        assert!(check("int main(int argc) { return 0; }").is_err());
        assert!(check("string main() { return \"\"; }").is_err());
        assert!(check("void main() { }").is_ok());
    }

    #[test]
    fn all_errors_are_collected() {
        let errors = check("int main() { int x = y; int z = w; return 0; }").unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn unused_declarations_are_marked() {
        let program = check("int main() { int a = 1; int b = 2; int c; c = b; return 0; }").unwrap();
        let usage: Vec<(String, bool)> = main_stmts(&program).iter()
            .filter_map(|s| match &s.item {
                StatementKind::Decl { ident, is_used, .. } => Some((ident.clone(), *is_used)),
                _ => None,
            })
            .collect();
        assert_eq!(usage, vec![
            (String::from("a"), false),
            (String::from("b"), true),
            (String::from("c"), true),
        ]);
    }
}
