//! CLI module graph.

pub mod check;
pub mod command;
pub mod mappings;
pub mod output;
pub mod paths;
pub mod run;
pub mod table;
