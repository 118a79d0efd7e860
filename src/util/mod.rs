pub mod env;
pub mod mapper;
pub mod names;
pub mod visitor;
