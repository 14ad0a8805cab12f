//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use depman_fs::DEFAULT_MAX_SIZE;
use depman_manifest::{LoadOptions, SourceFormat};

/// depman - Inspect and validate dependency manifests
#[derive(Parser, Debug)]
#[command(name = "depman")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Refuse manifests larger than this many bytes
    #[arg(long, global = true, value_name = "BYTES", default_value_t = DEFAULT_MAX_SIZE)]
    pub max_size: u64,

    /// Read the manifest as this format instead of detecting it
    #[arg(long, global = true, value_name = "FORMAT")]
    pub format: Option<SourceFormat>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn load_options(&self) -> LoadOptions {
        let options = LoadOptions::default().with_max_size(self.max_size);
        match self.format {
            Some(format) => options.with_format(format),
            None => options,
        }
    }
}

/// Where to find the manifest.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ManifestArg {
    /// Manifest file, or a directory containing one
    #[arg(env = "DEPMAN_MANIFEST", default_value = ".")]
    pub path: PathBuf,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Load and validate a manifest
    ///
    /// Exits non-zero on the first violation found.
    Check {
        #[command(flatten)]
        manifest: ManifestArg,

        /// Also report non-semver versions and unqualified channels
        #[arg(long)]
        strict: bool,
    },

    /// List dependency declarations in declaration order
    List {
        #[command(flatten)]
        manifest: ManifestArg,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show build options
    ///
    /// Examples:
    ///   depman options                  # Every option
    ///   depman options --target gtest   # Options for one dependency
    ///   depman options --target '&'     # Options for the package itself
    Options {
        #[command(flatten)]
        manifest: ManifestArg,

        /// Only show options for this target
        #[arg(short, long)]
        target: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the manifest in another source format
    Render {
        #[command(flatten)]
        manifest: ManifestArg,

        /// Output format (literal, sections, toml, json, yaml)
        #[arg(long, value_name = "FORMAT")]
        to: SourceFormat,
    },

    /// Print the sha256 checksum of the manifest file
    Checksum {
        #[command(flatten)]
        manifest: ManifestArg,
    },
}
