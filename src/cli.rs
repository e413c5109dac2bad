use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imgforest")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(
    about = "Generate large random directory trees full of near-duplicate images",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a random tree and fill it with image variants up to the target size
    Generate(GenerateArgs),

    /// Show what a config would produce without touching the filesystem
    Plan(PlanArgs),

    /// Measure the on-disk size of an existing tree
    Measure {
        /// Root of the tree to measure
        path: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Generate
// ============================================================================

#[derive(Parser)]
pub struct GenerateArgs {
    /// Config file (defaults to imgforest.{toml,json,yml} or config.yml in the current directory)
    #[arg(short, long, env = "IMGFOREST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Word list used for directory names, one word per line
    #[arg(short, long, default_value = "words.txt")]
    pub words: PathBuf,

    /// Seed for a reproducible tree, fill order and file names
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Print the final summary as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Plan
// ============================================================================

#[derive(Parser)]
pub struct PlanArgs {
    /// Config file (defaults to imgforest.{toml,json,yml} or config.yml in the current directory)
    #[arg(short, long, env = "IMGFOREST_CONFIG")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::parse_from([
            "imgforest", "-vv", "generate", "--config", "run.toml", "--seed", "7", "--json",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.config, Some(PathBuf::from("run.toml")));
                assert_eq!(args.words, PathBuf::from("words.txt"));
                assert_eq!(args.seed, Some(7));
                assert!(args.json);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_parse_measure() {
        let cli = Cli::parse_from(["imgforest", "measure", "/tmp/forest", "-q"]);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Command::Measure { path } if path == PathBuf::from("/tmp/forest")));
    }
}
