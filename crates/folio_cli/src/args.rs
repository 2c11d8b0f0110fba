//! Command-line surface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use folio_core::{MoveDirection, SectionKind};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Render and edit an academic portfolio")]
pub struct Cli {
    /// Config file; defaults to ./folio.toml when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Cache database path (overrides config).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Static data file path or URL (overrides config).
    #[arg(long, global = true)]
    pub source: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the public page once.
    Render(RenderArgs),
    /// Render, then re-render whenever a saved document changes.
    Watch(WatchArgs),
    /// Password-gated editor operations.
    Admin(AdminArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Output HTML path (overrides config).
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Poll interval in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub interval_ms: u64,
}

#[derive(Args, Debug)]
pub struct AdminArgs {
    /// Editor password; prompted on stdin when omitted.
    #[arg(long)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub action: AdminAction,
}

#[derive(Subcommand, Debug)]
pub enum AdminAction {
    /// Print overview counts and the records of one or all sections.
    List {
        section: Option<SectionKind>,
    },
    /// Append a record and save.
    Add {
        section: SectionKind,
        /// Field value as `key=value`; repeatable.
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Edit fields of one record and save.
    Set {
        section: SectionKind,
        index: usize,
        #[arg(long = "field", value_parser = parse_field, required = true)]
        fields: Vec<(String, String)>,
    },
    /// Edit profile fields (`name`, `interests`, `links.cv`, ...) and save.
    Profile {
        #[arg(long = "field", value_parser = parse_field, required = true)]
        fields: Vec<(String, String)>,
    },
    /// Swap a record with its neighbour and save.
    Move {
        section: SectionKind,
        index: usize,
        #[arg(value_enum)]
        direction: Direction,
    },
    /// Delete a record after confirmation and save.
    Delete {
        section: SectionKind,
        index: usize,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Write the current document as pretty JSON.
    Export {
        path: PathBuf,
    },
    /// Replace the document with a JSON file and save.
    Import {
        path: PathBuf,
    },
    /// Reload the static data file over all edits after confirmation.
    Reset {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Save and render the public page.
    Preview {
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl From<Direction> for MoveDirection {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Up => MoveDirection::Up,
            Direction::Down => MoveDirection::Down,
        }
    }
}

/// Parses `key=value`; the value may itself contain `=`.
pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty field name in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}
