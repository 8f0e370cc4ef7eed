//! Ekko CLI Library
//!
//! This crate provides the `create-ekko-app` command-line wizard. It asks a
//! short series of questions about a new web project (framework, auth,
//! database, tooling) using the prompt engine from `ekko-core`, and prints
//! the resulting selections.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`config`]: YAML config with the default answer for every question
//! - [`selections`]: The option sets and the summary of what was picked
//! - [`wizard`]: The question sequence itself
//!
//! # Examples
//!
//! ```bash
//! # Ask everything interactively
//! create-ekko-app
//!
//! # Provide the project name up front
//! create-ekko-app storefront
//!
//! # Accept the configured defaults without prompting
//! create-ekko-app storefront --yes
//!
//! # Use a different config file, without colors
//! create-ekko-app -c ./ekko.yml --no-color
//! ```

pub mod cli_args;
pub mod config;
pub mod error;
pub mod selections;
pub mod wizard;
