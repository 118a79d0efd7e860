extern crate lalrpop;

/// generates the parser from src/frontend/parser/c2lua.lalrpop into OUT_DIR
fn main() {
    lalrpop::process_root().unwrap();
}
