use clap::Parser;
use ekko_cli::cli_args::Args;
use ekko_cli::config::load_config;
use ekko_cli::error::Result;
use ekko_cli::wizard::{run_wizard, Outcome};
use ekko_core::prompt::PromptEngine;
use ekko_core::terminal::StdTerminal;
use ekko_core::theme::Theme;
use log::info;
use std::process::ExitCode;

const CANCELLED_NOTICE: &str = "Setup was cancelled or ran in a non-interactive shell. Exiting.";

fn execute() -> Result<Outcome> {
    let args = Args::parse();
    let config = load_config(&args.config_path)?;

    let theme = Theme::detect(config.ui.color && !args.no_color);
    let mut engine = PromptEngine::new(StdTerminal::new(), theme);

    run_wizard(&mut engine, &config, &args)
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(Outcome::Completed(selections)) => {
            info!("Wizard completed for `{}`", selections.project_name);
            println!("✅ Done! Selections for {} are ready.", selections.project_name);
            ExitCode::SUCCESS
        }
        Ok(Outcome::Cancelled) => {
            println!("\n❌ {CANCELLED_NOTICE}\n");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
