//! Interactive quote wizard

pub mod command;
pub mod repl;
