pub mod backend;
pub mod config;
pub mod frontend;
pub mod meta;
pub mod optimizer;
mod util;
