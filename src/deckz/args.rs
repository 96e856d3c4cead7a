use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

/// "0.1.0" for releases, "0.1.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "deckz", bin_name = "deckz", version = get_version())]
#[command(about = "Outline, generate and edit slide decks from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Operate on global decks
    #[arg(short, long, global = true)]
    pub global: bool,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Deck to operate on: display index or title
    #[arg(short, long, global = true, default_value = "1")]
    pub deck: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the store
    Init,

    /// Create a new, empty deck
    #[command(alias = "n")]
    Create {
        title: String,

        /// Theme name (see `deckz theme --list`)
        #[arg(short, long)]
        theme: Option<String>,
    },

    /// List decks, most recently updated first
    #[command(alias = "ls")]
    List,

    /// Delete the selected deck
    #[command(alias = "rm")]
    Delete,

    /// Edit the outline cards of the selected deck
    #[command(alias = "o")]
    Outline {
        #[command(subcommand)]
        action: Option<OutlineCommand>,
    },

    /// Edit the slide list of the selected deck
    #[command(alias = "s")]
    Slides {
        #[command(subcommand)]
        action: Option<SlidesCommand>,
    },

    /// Replace the slides with generated layouts (`{"layouts": [...]}`)
    Ingest {
        /// File holding the generator output, `-` for stdin
        file: PathBuf,
    },

    /// Edit the content tree of a slide
    #[command(alias = "c")]
    Content {
        #[command(subcommand)]
        action: ContentCommand,
    },

    /// Render a slide as an instruction tree
    Show {
        /// Slide position (defaults to the current slide)
        slide: Option<usize>,

        /// Editing mode: include drop-zone markers
        #[arg(short, long)]
        edit: bool,
    },

    /// Show, list or set the theme of the selected deck
    Theme {
        /// Theme to apply
        name: Option<String>,

        /// List available themes
        #[arg(short, long)]
        list: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (default_theme, append_zone, repair_titles)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum OutlineCommand {
    /// List outline cards
    #[command(alias = "ls")]
    List,

    /// Add a card (at the end unless --after is given; --after 0 puts it first)
    Add {
        title: Option<String>,

        #[arg(short, long)]
        after: Option<usize>,
    },

    /// Rename the card at a position
    Rename { position: usize, title: String },

    /// Remove the card at a position
    #[command(alias = "rm")]
    Remove { position: usize },

    /// Move a card to a new position
    #[command(alias = "mv")]
    Move { from: usize, to: usize },

    /// Import generated outline titles (`{"outlines": [...]}`)
    Import {
        /// File holding the generator output, `-` for stdin
        file: PathBuf,

        /// Replace the existing cards instead of appending
        #[arg(long)]
        replace: bool,
    },

    /// Remove every card
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum SlidesCommand {
    /// List slides
    #[command(alias = "ls")]
    List,

    /// Move a slide to a new position
    #[command(alias = "mv")]
    Move { from: usize, to: usize },

    /// Remove the slide at a position
    #[command(alias = "rm")]
    Remove { position: usize },

    /// Make the slide at a position the current one
    Select { position: usize },

    /// Insert a slide layout read from a file
    Insert {
        /// File holding one slide JSON object, `-` for stdin
        file: PathBuf,

        /// Position of the new slide (defaults to after the current slide)
        #[arg(short, long)]
        at: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContentCommand {
    /// Replace the payload of a node
    Set {
        slide: usize,
        node: String,

        /// Text, list items or table rows (`a,b`)
        #[arg(required = true, num_args = 1..)]
        values: Vec<String>,

        /// Treat the single value as a JSON payload
        #[arg(long)]
        json: bool,
    },

    /// Insert a new block into a container node
    Insert {
        slide: usize,
        container: String,

        /// Block type, e.g. text, heading2, bulletedList, table
        #[arg(short = 't', long = "type")]
        kind: String,

        /// Position within the container (0-based gap, defaults to the end)
        #[arg(short, long)]
        index: Option<usize>,

        /// Initial text of the block
        #[arg(long)]
        text: Option<String>,
    },

    /// Remove a node
    #[command(alias = "rm")]
    Remove { slide: usize, node: String },
}
