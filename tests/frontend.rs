extern crate c2lua;
extern crate include_dir;

use include_dir::{include_dir, Dir};

use c2lua::frontend::process_code;

static GOOD_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/tests/good");
static BAD_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/tests/bad");

/// (file name, source code) of all C files in the directory
fn source_files(dir: &Dir) -> Vec<(String, String)> {
    dir.files()
        .filter(|file| file.path().extension().map_or(false, |ext| ext == "c"))
        .map(|file| {
            let file_name = String::from(file.path().to_str().unwrap());
            let source_code = String::from(file.contents_utf8().unwrap());
            (file_name, source_code)
        })
        .collect()
}

#[test]
fn good_examples_processed() {
    let mut failed_cases: Vec<String> = vec![];
    let files = source_files(&GOOD_DIR);
    assert!(!files.is_empty());
    for (file_name, source_code) in files {
        match process_code(file_name.clone(), source_code) {
            Ok(_) => {
                // make sure to run cargo test with --nocapture flag
                println!("Passed {}", file_name);
            }
            Err(e) => {
                println!("Failed {:?}", e);
                failed_cases.push(file_name);
            }
        }
    }
    assert_eq!(failed_cases.len(), 0usize, "{:?}", failed_cases);
}

#[test]
fn bad_examples_failed() {
    let mut failed_cases: Vec<String> = vec![];
    let files = source_files(&BAD_DIR);
    assert!(!files.is_empty());
    for (file_name, source_code) in files {
        match process_code(file_name.clone(), source_code) {
            Ok(_) => {
                failed_cases.push(file_name);
            }
            Err(errors) => {
                for error in errors.iter() {
                    println!("Passed {}", error);
                }
            }
        }
    }
    assert_eq!(
        failed_cases.len(),
        0usize,
        "Following files were incorrectly accepted: {:?}",
        failed_cases
    );
}

#[test]
fn errors_point_to_source_lines() {
    let file = BAD_DIR.get_file("undeclared_variable.c").unwrap();
    let errors = process_code(
        String::from("undeclared_variable.c"),
        String::from(file.contents_utf8().unwrap()),
    ).unwrap_err();
    assert_eq!(errors[0].to_string(), "undeclared_variable.c:2:12 EnvironmentError: Undeclared variable x");
}
