//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Uniform front end for tar, gzip, zip and rar archive tools
#[derive(Parser, Debug)]
#[command(name = "rsarchive")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (merged over the global config)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Working directory for the archive command
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub cwd: Option<PathBuf>,

    /// Render the command line through a template engine first (e.g. jinja)
    #[arg(short, long, global = true)]
    pub template: Option<String>,

    /// Print the command line instead of running it
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pack/unpack tar files: tar -<options> <tarfile> <sources>
    #[command(visible_alias = "pack")]
    Tar {
        /// tar flags without leading dash, e.g. cjvf
        #[arg(allow_hyphen_values = true)]
        options: String,
        /// Archive path
        #[arg(value_hint = ValueHint::FilePath)]
        tarfile: String,
        /// Sources, comma-delimited or as separate arguments
        #[arg(required = true, num_args = 1..)]
        sources: Vec<String>,
    },

    /// Compress a file with gzip
    #[command(visible_alias = "create-gzip")]
    Gzip {
        #[arg(value_hint = ValueHint::FilePath)]
        sourcefile: String,
    },

    /// Decompress a gzip file
    #[command(visible_alias = "unpack-gzip")]
    Gunzip {
        #[arg(value_hint = ValueHint::FilePath)]
        gzipfile: String,
    },

    /// Create a zip file
    #[command(visible_alias = "pack-zip")]
    Zip {
        #[arg(value_hint = ValueHint::FilePath)]
        zipfile: String,
        /// Sources, comma-delimited or as separate arguments
        #[arg(required = true, num_args = 1..)]
        sources: Vec<String>,
    },

    /// Unpack a zip file into a directory
    #[command(visible_alias = "unpack-zip")]
    Unzip {
        #[arg(value_hint = ValueHint::FilePath)]
        zipfile: String,
        #[arg(value_hint = ValueHint::DirPath)]
        dest: String,
        /// Entries to skip, comma-delimited or repeated
        #[arg(short = 'x', long)]
        excludes: Vec<String>,
    },

    /// Create a rar file
    #[command(visible_alias = "pack-rar")]
    Rar {
        #[arg(value_hint = ValueHint::FilePath)]
        rarfile: String,
        /// Sources, comma-delimited or as separate arguments
        #[arg(required = true, num_args = 1..)]
        sources: Vec<String>,
    },

    /// Unpack a rar file into a directory (unrar, falls back to rar)
    #[command(visible_alias = "unpack-rar")]
    Unrar {
        #[arg(value_hint = ValueHint::FilePath)]
        rarfile: String,
        #[arg(value_hint = ValueHint::DirPath)]
        dest: String,
        /// Entries to skip, comma-delimited or repeated
        #[arg(short = 'x', long)]
        excludes: Vec<String>,
    },

    /// List operations and the binaries backing them
    List,

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

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}
