pub mod commands;

pub use commands::{CliArgs, KindArg};
