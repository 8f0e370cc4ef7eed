//! The create-ekko-app question sequence.

use ekko_core::prompt::{Checkbox, Confirm, Input, PromptEngine, Select};
use ekko_core::terminal::Terminal;
use log::{debug, info, warn};

use crate::cli_args::Args;
use crate::config::{EkkoConfig, DEFAULT_PROJECT_NAME};
use crate::error::Result;
use crate::selections::{sanitize_project_name, Selectable, Selections, ShadcnColor, Tool};

/// How the wizard ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed(Selections),
    /// Interrupted, out of input, not run interactively, or the summary was declined.
    Cancelled,
}

/// Runs the wizard, turning any cancellation into [`Outcome::Cancelled`].
///
/// # Errors
///
/// Returns an error for anything that is not a cancellation, such as input
/// that cannot be decoded or a failing terminal.
pub fn run_wizard<T: Terminal>(
    engine: &mut PromptEngine<T>,
    config: &EkkoConfig,
    args: &Args,
) -> Result<Outcome> {
    let project_name = args
        .project_name
        .as_deref()
        .map(sanitize_project_name)
        .filter(|name| {
            if name.is_empty() {
                warn!("Project name argument is empty once sanitized, asking instead");
            }
            !name.is_empty()
        });

    if args.yes {
        let selections = from_defaults(config, project_name);
        info!("Using defaults without prompting");
        write_summary(engine, &selections)?;
        return Ok(Outcome::Completed(selections));
    }

    if !engine.terminal().is_interactive() {
        info!("Input is not a terminal, nothing can be asked");
        return Ok(Outcome::Cancelled);
    }

    match ask(engine, config, project_name) {
        Ok(Some(selections)) => Ok(Outcome::Completed(selections)),
        Ok(None) => {
            debug!("Selections were not confirmed");
            Ok(Outcome::Cancelled)
        }
        Err(e) if e.is_cancellation() => {
            debug!("Wizard cancelled: {e}");
            Ok(Outcome::Cancelled)
        }
        Err(e) => Err(e),
    }
}

/// The selections `--yes` runs with.
///
/// A configured project name that sanitizes to nothing is replaced by
/// [`DEFAULT_PROJECT_NAME`].
pub fn from_defaults(config: &EkkoConfig, project_name: Option<String>) -> Selections {
    let defaults = &config.defaults;
    let project_name = project_name.unwrap_or_else(|| {
        let name = sanitize_project_name(&defaults.project_name);
        if name.is_empty() {
            warn!(
                "Configured project name `{}` is empty once sanitized, using `{DEFAULT_PROJECT_NAME}`",
                defaults.project_name
            );
            DEFAULT_PROJECT_NAME.to_string()
        } else {
            name
        }
    });
    let tooling = sorted_tooling(&defaults.tooling);
    let shadcn_color = tooling
        .contains(&Tool::Shadcn)
        .then_some(defaults.shadcn_color);

    Selections {
        project_name,
        framework: defaults.framework,
        auth: defaults.auth,
        database: defaults.database,
        tooling,
        shadcn_color,
    }
}

/// Asks every question; `None` when the summary is declined.
fn ask<T: Terminal>(
    engine: &mut PromptEngine<T>,
    config: &EkkoConfig,
    project_name: Option<String>,
) -> Result<Option<Selections>> {
    let defaults = &config.defaults;
    let max_rows = config.ui.max_rows;

    let project_name = match project_name {
        Some(name) => name,
        None => {
            let answer = engine.prompt(
                Input::new("What is your project called?")
                    .default(defaults.project_name.clone())
                    .validate(|value| {
                        if sanitize_project_name(value).is_empty() {
                            Err("Please enter a project name.".to_string())
                        } else {
                            Ok(())
                        }
                    }),
            )?;
            sanitize_project_name(&answer)
        }
    };

    let framework = select_one(engine, "Choose your framework", defaults.framework, max_rows)?;
    let auth = select_one(engine, "Choose your auth package", defaults.auth, max_rows)?;
    let database = select_one(engine, "Choose your database", defaults.database, max_rows)?;

    let checked = engine.prompt(
        Checkbox::new("Choose your tooling", Tool::grouped_choices())
            .defaults(defaults.tooling.iter().map(|tool| tool.value()))
            .max_rows(max_rows),
    )?;
    let tooling: Vec<Tool> = checked
        .iter()
        .filter_map(|value| Tool::from_value(value))
        .collect();

    let shadcn_color = if tooling.contains(&Tool::Shadcn) {
        Some(select_one::<_, ShadcnColor>(
            engine,
            "What base color would you like for shadcn?",
            defaults.shadcn_color,
            max_rows,
        )?)
    } else {
        None
    };

    let selections = Selections {
        project_name,
        framework,
        auth,
        database,
        tooling,
        shadcn_color,
    };

    write_summary(engine, &selections)?;
    let proceed = engine.prompt(Confirm::new("Proceed with these selections?").default(true))?;

    Ok(proceed.then_some(selections))
}

fn select_one<T: Terminal, S: Selectable>(
    engine: &mut PromptEngine<T>,
    message: &str,
    default: S,
    max_rows: usize,
) -> Result<S> {
    let value = engine.prompt(
        Select::new(message, S::choices())
            .default(default.value())
            .max_rows(max_rows),
    )?;

    Ok(S::from_value(&value).unwrap_or(default))
}

fn sorted_tooling(tooling: &[Tool]) -> Vec<Tool> {
    Tool::ALL
        .iter()
        .copied()
        .filter(|tool| tooling.contains(tool))
        .collect()
}

fn write_summary<T: Terminal>(engine: &mut PromptEngine<T>, selections: &Selections) -> Result<()> {
    let summary = selections.format_summary(engine.theme());
    let terminal = engine.terminal_mut();
    terminal.write_str(&format!("\n{summary}\n"))?;
    terminal.flush()?;
    Ok(())
}
