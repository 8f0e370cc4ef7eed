//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate.

use clap::Parser;

/// Command-line arguments for `create-ekko-app`.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use ekko_cli::cli_args::Args;
///
/// let args = Args::parse_from(["create-ekko-app", "my-app", "--yes"]);
/// assert_eq!(args.project_name.as_deref(), Some("my-app"));
/// assert!(args.yes);
/// ```
#[derive(Parser, Debug, Default)] // requires `derive` feature
#[command(name = "create-ekko-app", version, about)]
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Name of the project directory.
    ///
    /// If not provided, the wizard asks for it.
    #[arg(num_args(1))]
    pub project_name: Option<String>,

    /// Path to the wizard config file YAML.
    ///
    /// If not provided, defaults to `~/.ekko/config.yml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Skip every prompt and accept the defaults from the config file.
    #[arg(long, short = 'y', action)]
    pub yes: bool,

    /// Draw prompts without colors or text styling.
    #[arg(long, action)]
    pub no_color: bool,
}
