//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};

/// Treemap trees: weighted hierarchies of files or categorized papers laid out as nested rectangles
#[derive(Parser, Debug)]
#[command(name = "tmtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .tmtree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    /// Colour seed (overrides config)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Screen width (overrides config)
    #[arg(long, global = true)]
    pub width: Option<i32>,

    /// Screen height (overrides config)
    #[arg(long, global = true)]
    pub height: Option<i32>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tree with weights
    Tree {
        /// Directory or paper dataset (default: cwd resp. configured papers file)
        #[arg(value_hint = ValueHint::AnyPath)]
        source: Option<PathBuf>,
        #[command(flatten)]
        kind: KindArgs,
    },

    /// Print every display rectangle with colour and path
    Rects {
        /// Directory or paper dataset (default: cwd resp. configured papers file)
        #[arg(value_hint = ValueHint::AnyPath)]
        source: Option<PathBuf>,
        #[command(flatten)]
        kind: KindArgs,
    },

    /// Print the unit under a screen point
    Locate {
        /// Directory or paper dataset
        #[arg(value_hint = ValueHint::AnyPath)]
        source: PathBuf,
        /// Horizontal screen coordinate
        x: i32,
        /// Vertical screen coordinate
        y: i32,
        #[command(flatten)]
        kind: KindArgs,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Which builder reads the source.
#[derive(Args, Debug, Clone, Copy)]
pub struct KindArgs {
    /// Source kind
    #[arg(short, long, value_enum, default_value_t = SourceKind::Fs)]
    pub kind: SourceKind,

    /// Do not group papers by publication year
    #[arg(long)]
    pub no_year: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Directory tree, weighted by file size
    Fs,
    /// Paper dataset (CSV), weighted by citations
    Papers,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
