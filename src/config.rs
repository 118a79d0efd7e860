use std::convert::Infallible;
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use pico_args::Arguments;
use thiserror::Error;

pub const USAGE: &str = "\
Usage: c2lua [OPTIONS] [INPUT]

Translates a C-like program (INPUT, or standard input) to Lua.

Options:
  -o, --output FILE   write the Lua code to FILE instead of standard output
  --no-optimize       skip the optimizer
  -h, --help          print this help message

Environment:
  C2LUA_OPTIMIZE      set to 0, false or off to skip the optimizer
  C2LUA_LOG           log filter (default: warn)";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    InvalidArgument(#[from] pico_args::Error),
    #[error("unexpected arguments: {}", .0.join(" "))]
    UnexpectedArguments(Vec<String>),
}

#[derive(Debug, PartialEq, Clone)]
pub struct Config {
    /// source file, standard input if not given
    pub input: Option<PathBuf>,
    /// destination of the lua code, standard output if not given
    pub output: Option<PathBuf>,
    pub optimize: bool,
    pub help: bool,
}

/// get key from environment variable, or default if it's not defined
pub fn parse_env(key: &str, default: &str) -> String {
    match env::var_os(key) {
        Some(value) => value.into_string().unwrap_or_else(|_| String::from(default)),
        None => String::from(default),
    }
}

fn to_path(value: &OsStr) -> Result<PathBuf, Infallible> {
    Ok(PathBuf::from(value))
}

/// interpret value of C2LUA_OPTIMIZE
pub fn is_enabled(value: &str) -> bool {
    match value.trim().to_lowercase().as_str() {
        "0" | "false" | "off" => false,
        _ => true,
    }
}

impl Config {
    /// read configuration of the current process
    pub fn from_env() -> Result<Self, ConfigError> {
        let optimize = is_enabled(&parse_env("C2LUA_OPTIMIZE", "1"));
        Self::from_args(Arguments::from_env(), optimize)
    }

    /// command line options override the default taken from the environment
    pub fn from_args(mut args: Arguments, optimize_default: bool) -> Result<Self, ConfigError> {
        let help = args.contains(["-h", "--help"]);
        let optimize = optimize_default && !args.contains("--no-optimize");
        let output = args.opt_value_from_os_str(["-o", "--output"], to_path)?;
        let input = args.opt_free_from_os_str(to_path)?;

        let remaining: Vec<OsString> = args.finish();
        if !remaining.is_empty() {
            let remaining = remaining.iter()
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect();
            return Err(ConfigError::UnexpectedArguments(remaining));
        }
        Ok(Self { input, output, optimize, help })
    }
}
