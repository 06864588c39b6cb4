//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio static site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared arguments for Build and Routes commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// Include posts marked as drafts
    #[arg(short, long)]
    pub drafts: bool,

    /// Minify the html content
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// enable rss feed generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub rss: Option<bool>,

    /// Override base URL for the site.
    ///
    /// Useful for CI deployments where the production URL differs from the one in folio.toml.
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Init a template site
    Init {
        /// the name(path) of site directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Generate every page into the output directory
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Print the routes a build would generate, without writing anything
    Routes {
        #[command(flatten)]
        build_args: BuildArgs,
    },
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }

    /// Build arguments of the current command, if it takes any.
    pub fn build_args(&self) -> Option<&BuildArgs> {
        match &self.command {
            Commands::Build { build_args } | Commands::Routes { build_args } => Some(build_args),
            Commands::Init { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from(["folio", "build", "--clean", "--minify", "false"]).unwrap();
        let args = cli.build_args().unwrap();
        assert!(args.clean);
        assert_eq!(args.minify, Some(false));
        assert_eq!(args.rss, None);
        assert_eq!(cli.config, PathBuf::from("folio.toml"));
    }

    #[test]
    fn test_parse_flag_without_value() {
        let cli = Cli::try_parse_from(["folio", "build", "--rss"]).unwrap();
        assert_eq!(cli.build_args().unwrap().rss, Some(true));
    }

    #[test]
    fn test_parse_routes_with_root() {
        let cli = Cli::try_parse_from(["folio", "-r", "site", "routes", "--drafts"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert!(cli.build_args().unwrap().drafts);
        assert!(!cli.is_init());
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from(["folio", "init", "blog"]).unwrap();
        assert!(cli.is_init());
        assert!(cli.build_args().is_none());
        assert!(matches!(cli.command, Commands::Init { name: Some(ref n) } if n == &PathBuf::from("blog")));
    }

    #[test]
    fn test_base_url_override() {
        let cli = Cli::try_parse_from(["folio", "build", "--base-url", "https://example.com"]).unwrap();
        assert_eq!(
            cli.build_args().unwrap().base_url.as_deref(),
            Some("https://example.com")
        );
    }
}
