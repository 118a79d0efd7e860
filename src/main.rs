use std::fs;
use std::io::{self, Read};
use std::process::exit;

use log::info;

use c2lua::backend::compile;
use c2lua::config::{Config, USAGE};
use c2lua::frontend::{process_code, process_file, CheckedProgram, Error};
use c2lua::optimizer::{optimize_program, OptimizerContext};

/// get configuration or exit with usage message
fn parse_config() -> Config {
    match Config::from_env() {
        Ok(config) if config.help => {
            println!("{}", USAGE);
            exit(0)
        }
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            exit(1)
        }
    }
}

/// run frontend on the input file, or standard input if there is none
fn load_program(config: &Config) -> Result<CheckedProgram, Vec<Error>> {
    match &config.input {
        Some(path) => process_file(path.to_string_lossy().into_owned()),
        None => {
            let mut source_code = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut source_code) {
                eprintln!("Failed to read standard input: {}", e);
                exit(1);
            }
            process_code(String::from("<stdin>"), source_code)
        }
    }
}

/// write lua code to the output file (or standard output) or exit with error
fn write_output(config: &Config, code: &str) {
    match &config.output {
        Some(path) => {
            if let Err(e) = fs::write(path, code) {
                eprintln!("Failed to write output to file {}: {}", path.display(), e);
                exit(1);
            }
        }
        None => print!("{}", code),
    }
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("C2LUA_LOG", "warn")
    ).init();
    let config = parse_config();

    let mut program = match load_program(&config) {
        Ok(program) => program,
        Err(err_vec) => {
            for err in err_vec.iter() {
                eprintln!("{}", err);
            }
            exit(1);
        }
    };

    if config.optimize {
        let mut ctx = OptimizerContext::new();
        optimize_program(&mut program, &mut ctx);
    } else {
        info!("optimizer disabled");
    }

    let code = compile(&program);
    write_output(&config, &code);
}
