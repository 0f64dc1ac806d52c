use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;
use crate::module::ParserMode;
use crate::output::OutputType;

#[derive(Parser, Debug)]
#[command(name = "pydocs-parser", version, about = "Python documentation and PEP index parser")]
pub struct Cli {
    /// Parser mode
    #[arg(value_enum)]
    pub mode: ParserMode,

    /// Clear the HTTP response cache before running
    #[arg(short = 'c', long)]
    pub clear_cache: bool,

    /// Additional output target
    #[arg(short = 'o', long, value_enum)]
    pub output: Option<OutputType>,

    /// Configuration file (defaults apply when it does not exist)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}
