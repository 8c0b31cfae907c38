pub mod lexer;
pub mod parser;
pub mod environment;
pub mod eval;
pub mod bridge;
pub mod loader;
pub mod utils;
