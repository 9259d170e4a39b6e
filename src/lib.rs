pub mod arguments;
pub mod commands;
pub mod errors;
pub mod forecast;
pub mod types;
