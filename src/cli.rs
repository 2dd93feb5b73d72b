use clap::{Parser, Subcommand};
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  pathtree dir .                          print the tree of the current directory
  pathtree dir ~/src/app -I vendor,tmp    add exclusion patterns
  pathtree github rust-lang/cargo -s toml search a remote repository
  find . -type f | pathtree list          build a tree from a path list
  pathtree -i dir .                       browse interactively";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "pathtree",
    version,
    about = "Turn flat path listings into filtered, searchable directory trees",
    after_help = EXAMPLES
)]
pub struct Args {
    #[command(subcommand)]
    pub source: SourceCommand,

    /// Extra exclusion patterns, comma-separated (repeatable)
    #[arg(short = 'I', long = "ignore", action = clap::ArgAction::Append, global = true)]
    pub ignore: Vec<String>,

    /// Start without the built-in exclusion patterns
    #[arg(long = "no-defaults", global = true)]
    pub no_defaults: bool,

    /// Match exclusion patterns as globs (e.g. *.log) instead of exact names
    #[arg(long = "glob", global = true)]
    pub glob: bool,

    /// Only print nodes matching this text, plus their ancestors
    #[arg(short = 's', long = "search", global = true)]
    pub search: Option<String>,

    /// Write the output to a file instead of stdout
    #[arg(short = 'o', long = "output", global = true, conflicts_with = "interactive")]
    pub output: Option<PathBuf>,

    /// Omit the Files/Folders/File Types header
    #[arg(long = "no-stats", global = true, conflicts_with = "interactive")]
    pub no_stats: bool,

    /// Browse the tree interactively (--search seeds the viewer's query)
    #[arg(short = 'i', long = "interactive", global = true)]
    pub interactive: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Config file (default: $PATHTREE_CONFIG, ./.pathtree.toml, user config dir)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SourceCommand {
    /// Collect every file below a local directory
    Dir {
        /// Directory to read (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Follow symbolic links
        #[arg(short = 'f', long = "follow-symlinks")]
        follow_symlinks: bool,
    },
    /// Read paths, one per line, from a file or stdin (a trailing / marks a directory)
    List {
        /// Path list file (default: stdin)
        file: Option<PathBuf>,

        /// Display name of the root
        #[arg(long = "root", default_value = ".", conflicts_with = "full_paths")]
        root: String,

        /// The first segment of every path is the root's name
        #[arg(long = "full-paths")]
        full_paths: bool,
    },
    /// Fetch the file listing of a GitHub repository
    Github {
        /// owner/repo, or a repository URL
        repo: String,

        /// Branch to list
        #[arg(short = 'b', long = "branch")]
        branch: Option<String>,
    },
}

impl Args {
    /// Enforce invariants after parsing.
    pub fn validated(mut self) -> Self {
        // Respect NO_COLOR env var
        if std::env::var_os("NO_COLOR").is_some() {
            self.no_color = true;
        }
        if self.quiet {
            self.verbose = 0;
        }
        self
    }

    /// Verbosity for the logger; `None` when quiet.
    pub fn verbosity(&self) -> Option<u8> {
        if self.quiet {
            None
        } else {
            Some(self.verbose)
        }
    }
}
