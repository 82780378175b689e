//! CLI module graph.

pub mod command;
pub mod fill;
pub mod generate;
pub mod order_file;
pub mod output;
pub mod prompt;
pub mod quote;
pub mod request;
pub mod run;
pub mod submit;
pub mod summary;
pub mod tokens;
pub mod verify;
pub mod wallet;
