use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::library::asset::{AssetKind, Direction, SortKey};

#[derive(Parser, Debug)]
#[command(
    name = "assetdesk",
    version,
    about = "Terminal asset manager for course media libraries"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Library directory (defaults to the platform data directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub library: Option<PathBuf>,

    /// Increase verbosity (-v for verbose, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode: suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive asset panel
    Ui,

    /// List assets in the library
    List(ListArgs),

    /// Register files as course assets
    Import(ImportArgs),

    /// Delete an asset
    Delete(IdArgs),

    /// Toggle an asset's lock flag
    Lock(IdArgs),

    /// Print the effective configuration as TOML
    Config,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Column to sort by
    #[arg(long, value_enum, default_value_t = SortKey::DateAdded)]
    pub sort: SortKey,

    /// Sort direction
    #[arg(long, value_enum, default_value_t = Direction::Desc)]
    pub direction: Direction,

    /// Only show assets of this type (can be repeated)
    #[arg(long = "type", value_enum, action = clap::ArgAction::Append)]
    pub types: Vec<AssetKind>,
}

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Files to import
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct IdArgs {
    /// Asset id as shown by `assetdesk list`
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
