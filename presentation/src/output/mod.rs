//! Console output for the `ask` and `config` commands

pub mod console;

pub use console::ConsoleFormatter;
