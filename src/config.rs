use std::path::PathBuf;

use clap::{ArgEnum, Parser, Subcommand};
use image_patch::UnrecognizedKind;

use crate::command::OpSpec;

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct CliConfig {
    /// How operation kinds the client does not know are written back
    #[clap(long, arg_enum, default_value = "preserve", global = true)]
    pub(crate) unrecognized: UnrecognizedMode,
    /// Pretty-print emitted patches
    #[clap(long, global = true)]
    pub(crate) pretty: bool,
    #[clap(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ArgEnum)]
pub enum UnrecognizedMode {
    Preserve,
    Placeholder,
}

impl From<UnrecognizedMode> for UnrecognizedKind {
    fn from(mode: UnrecognizedMode) -> Self {
        match mode {
            UnrecognizedMode::Preserve => UnrecognizedKind::Preserve,
            UnrecognizedMode::Placeholder => UnrecognizedKind::Placeholder,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a patch document and report on its operations
    Check {
        /// Patch file, stdin when omitted
        file: Option<PathBuf>,
    },
    /// Parse a patch document and print it in canonical form
    Normalize {
        /// Patch file, stdin when omitted
        file: Option<PathBuf>,
    },
    /// Assemble a patch from `add:/path=<json>`, `replace:/path=<json>` and `remove:/path`
    ///
    /// For add and replace the path ends at the first `=`, so those paths cannot
    /// contain `=`; the value may. A remove path is taken whole.
    Build {
        #[clap(required = true)]
        ops: Vec<OpSpec>,
    },
}

impl CliConfig {
    pub fn parse() -> Self {
        Parser::parse()
    }
}
