pub mod repl;
pub mod search;
