extern crate c2lua;
extern crate include_dir;
extern crate rstest;

use std::{env, fs, io};
use std::process::{Command, Output};

use include_dir::{include_dir, Dir};
use rstest::rstest;

use c2lua::backend::compile;
use c2lua::config::parse_env;
use c2lua::frontend::process_code;
use c2lua::optimizer::{optimize_program, OptimizerContext};

static TEST_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/tests/good");

#[derive(Debug, Clone)]
struct TestCase {
    input_file_name: String,
    input_content: String,
    expected_lua: String,
    expected_output: String,
}

impl TestCase {
    fn load(name: &str, lua_suffix: &str) -> Self {
        let read = |file_name: &str| {
            let file = TEST_DIR.get_file(file_name)
                .unwrap_or_else(|| panic!("missing test file {}", file_name));
            String::from(file.contents_utf8().unwrap())
        };
        let input_file_name = format!("{}.c", name);
        Self {
            input_content: read(&input_file_name),
            expected_lua: read(&format!("{}{}", name, lua_suffix)),
            expected_output: read(&format!("{}.output", name)),
            input_file_name,
        }
    }

    fn transpile(&self, optimize: bool) -> String {
        match process_code(self.input_file_name.clone(), self.input_content.clone()) {
            Ok(mut program) => {
                if optimize {
                    optimize_program(&mut program, &mut OptimizerContext::new());
                }
                compile(&program)
            }
            Err(errors) => {
                for error in errors {
                    eprintln!("{}", error);
                }
                panic!("unexpected frontend errors")
            }
        }
    }
}

/// run the code with lua interpreter, None if the interpreter is not installed
fn run_lua(code: &str, name: &str) -> Option<Output> {
    let lua_interpreter = parse_env("LUA_INTERPRETER", "lua");
    let mut lua_file = env::temp_dir();
    lua_file.push(format!("c2lua_{}.lua", name));
    fs::write(&lua_file, code).unwrap();

    match Command::new(&lua_interpreter).arg(&lua_file).output() {
        Ok(output) => Some(output),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            eprintln!("{} not found, skipping execution", lua_interpreter);
            None
        }
        Err(e) => panic!("{} failed to execute: {:?}", lua_interpreter, e),
    }
}

#[rstest]
#[case("cse_basic")]
#[case("unreachable")]
#[case("chars")]
#[case("loops")]
#[case("arrays_strings")]
#[case("scopes")]
#[case("early_return")]
#[case("shadowed_function")]
fn optimized_program_matches_expected_lua(#[case] name: &str) {
    let test_case = TestCase::load(name, ".lua");
    let compiled_code = test_case.transpile(true);

    eprintln!(" --- BEGIN LUA DUMP --- ");
    eprint!("{}", compiled_code);
    eprintln!(" --- END LUA DUMP --- ");
    assert_eq!(compiled_code, test_case.expected_lua);

    if let Some(out) = run_lua(&compiled_code, name) {
        assert!(out.status.success(), "lua exited with error code: {:?}", out.status);
        let real_output = String::from_utf8(out.stdout).unwrap();
        assert_eq!(real_output.trim(), test_case.expected_output.trim());
    }
}

#[rstest]
#[case("early_return")]
fn unoptimized_program_keeps_unreachable_code(#[case] name: &str) {
    let test_case = TestCase::load(name, ".unoptimized.lua");
    let compiled_code = test_case.transpile(false);
    assert_eq!(compiled_code, test_case.expected_lua);

    if let Some(out) = run_lua(&compiled_code, &format!("{}_unoptimized", name)) {
        let real_output = String::from_utf8(out.stdout).unwrap();
        assert_eq!(real_output.trim(), test_case.expected_output.trim());
    }
}
