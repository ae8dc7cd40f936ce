//! 应用层 - 命令

mod speech_commands;

pub mod handlers;

pub use speech_commands::*;
