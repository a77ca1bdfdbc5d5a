use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "assetschema")]
#[command(about = "Inspect asset categories, their attributes and the forms they produce", long_about = None)]
#[command(version, long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Catalog to seed from (overrides the seed-file config key)
    #[arg(short, long, global = true)]
    pub seed: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Get or set configuration
    Config {
        /// Configuration key (max-depth, seed-file)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    #[command(flatten)]
    Query(QueryCommand),
}

/// Commands that read the seeded catalog.
#[derive(Subcommand, Debug)]
pub enum QueryCommand {
    /// Print the category tree
    #[command(alias = "t")]
    Tree,

    /// Print the root-to-leaf path of a category
    Path {
        /// Category id
        id: String,
    },

    /// List a category's own attributes
    #[command(alias = "attrs")]
    Attributes {
        /// Category id
        id: String,
    },

    /// List the attributes a category inherits from its ancestors
    Inherited {
        /// Category id
        id: String,
    },

    /// Show the form layout for a category
    #[command(alias = "f")]
    Form {
        /// Category id (omit for the globals-only layout)
        id: Option<String>,

        /// Include the category picker field
        #[arg(long)]
        include_category: bool,

        /// Print the layout as JSON
        #[arg(long)]
        json: bool,
    },

    /// List global attributes
    #[command(alias = "g")]
    Globals {
        /// Only this section (e.g. asset-info, your-attributes)
        #[arg(long)]
        section: Option<String>,
    },

    /// Check the catalog for structural problems
    Doctor,
}
