#[cfg(test)]
mod tests {
    use clap::Parser;
    use ekko_cli::cli_args::Args;
    use ekko_cli::config::{load_config, EkkoConfig};
    use ekko_cli::selections::{Auth, Database, Framework, ShadcnColor, Tool};
    use ekko_cli::wizard::{run_wizard, Outcome};
    use ekko_core::prompt::PromptEngine;
    use ekko_core::terminal::ScriptedTerminal;
    use ekko_core::theme::Theme;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DOWN: &str = "\x1b[B";

    fn run(
        terminal: ScriptedTerminal,
        config: &EkkoConfig,
        argv: &[&str],
    ) -> (ekko_cli::error::Result<Outcome>, ScriptedTerminal) {
        let args = Args::parse_from(std::iter::once("create-ekko-app").chain(argv.iter().copied()));
        let mut engine = PromptEngine::new(terminal, Theme::plain());
        let outcome = run_wizard(&mut engine, config, &args);
        (outcome, engine.into_terminal())
    }

    fn completed(outcome: ekko_cli::error::Result<Outcome>) -> ekko_cli::selections::Selections {
        match outcome.unwrap() {
            Outcome::Completed(selections) => selections,
            Outcome::Cancelled => panic!("Expected the wizard to complete"),
        }
    }

    #[test]
    fn test_full_interactive_run() {
        let terminal = ScriptedTerminal::new(80).with_keystrokes([
            "\r",               // project name: default
            "\r",               // framework: Next.js
            "\x1b[B\r",         // auth: Clerk
            "\x1b[B\x1b[B\r",   // database: Drizzle
            DOWN, DOWN, DOWN,   // tooling: TanStack header -> shadcn
            " ", "\r",
            "\x1b[B\r",         // shadcn color: Gray
            "\r",               // proceed: default yes
        ]);
        let (outcome, terminal) = run(terminal, &EkkoConfig::default(), &[]);

        let selections = completed(outcome);
        assert_eq!(selections.project_name, "my-app");
        assert_eq!(selections.framework, Framework::Next);
        assert_eq!(selections.auth, Auth::Clerk);
        assert_eq!(selections.database, Database::Drizzle);
        assert_eq!(selections.tooling, vec![Tool::Shadcn]);
        assert_eq!(selections.shadcn_color, Some(ShadcnColor::Gray));

        let output = terminal.output();
        assert!(output.contains("✔ What is your project called? › my-app"));
        assert!(output.contains("✔ Choose your auth package › Clerk"));
        assert!(output.contains("✔ Choose your tooling › shadcn"));
        assert!(output.contains("  ● shadcn (gray)"));
        assert!(output.contains("✔ Proceed with these selections? › yes"));
        assert_eq!(terminal.remaining_chunks(), 0);
        assert!(!terminal.is_raw());
    }

    #[test]
    fn test_project_name_argument_skips_name_prompt() {
        let terminal = ScriptedTerminal::new(80).with_keystrokes(["\r", "\r", "\r", "\r", "y\r"]);
        let (outcome, terminal) = run(terminal, &EkkoConfig::default(), &["My Store"]);

        let selections = completed(outcome);
        assert_eq!(selections.project_name, "my-store");
        assert!(selections.tooling.is_empty());
        assert_eq!(selections.shadcn_color, None);

        let output = terminal.output();
        assert!(!output.contains("What is your project called?"));
        assert!(!output.contains("base color"));
    }

    #[test]
    fn test_blank_project_name_is_rejected() {
        let terminal = ScriptedTerminal::new(80)
            .with_keystrokes(["   ", "\r", "demo", "\r", "\r", "\r", "\r", "\r", "\r"]);
        let (outcome, terminal) = run(terminal, &EkkoConfig::default(), &[]);

        assert_eq!(completed(outcome).project_name, "demo");
        assert!(terminal.output().contains("✖ Please enter a project name."));
    }

    #[test]
    fn test_config_defaults_are_preselected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "defaults:\n  project_name: shop\n  framework: tanstack-start\n  tooling: [react-email, resend]\n"
        )
        .unwrap();
        let config = load_config(&Some(file.path().to_str().unwrap().to_string())).unwrap();

        let terminal = ScriptedTerminal::new(80).with_keystrokes(["\r", "\r", "\r", "\r", "\r", "\r"]);
        let (outcome, _) = run(terminal, &config, &[]);

        let selections = completed(outcome);
        assert_eq!(selections.project_name, "shop");
        assert_eq!(selections.framework, Framework::TanstackStart);
        assert_eq!(selections.tooling, vec![Tool::ReactEmail, Tool::Resend]);
    }

    #[test]
    fn test_declining_summary_cancels() {
        let terminal =
            ScriptedTerminal::new(80).with_keystrokes(["\r", "\r", "\r", "\r", "\r", "n\r"]);
        let (outcome, terminal) = run(terminal, &EkkoConfig::default(), &[]);

        assert_eq!(outcome.unwrap(), Outcome::Cancelled);
        assert!(terminal.output().contains("📋 Summary of selections:"));
    }

    #[test]
    fn test_interrupt_cancels_without_further_prompts() {
        let terminal = ScriptedTerminal::new(80).with_keystrokes(["\r", "\x03", "\r", "\r"]);
        let (outcome, terminal) = run(terminal, &EkkoConfig::default(), &[]);

        assert_eq!(outcome.unwrap(), Outcome::Cancelled);
        assert_eq!(terminal.remaining_chunks(), 2);
        assert!(!terminal.output().contains("Choose your auth package"));
        assert!(!terminal.is_raw());
    }

    #[test]
    fn test_end_of_input_cancels() {
        let terminal = ScriptedTerminal::new(80).with_keystrokes(["\r", "\r"]);
        let (outcome, _) = run(terminal, &EkkoConfig::default(), &[]);
        assert_eq!(outcome.unwrap(), Outcome::Cancelled);
    }

    #[test]
    fn test_non_interactive_without_yes_cancels() {
        let terminal = ScriptedTerminal::new(80).non_interactive().with_input("my-app\r");
        let (outcome, terminal) = run(terminal, &EkkoConfig::default(), &[]);

        assert_eq!(outcome.unwrap(), Outcome::Cancelled);
        assert_eq!(terminal.output(), "");
        assert_eq!(terminal.remaining_chunks(), 1);
    }

    #[test]
    fn test_yes_uses_defaults_without_prompting() {
        let terminal = ScriptedTerminal::new(80).non_interactive();
        let (outcome, terminal) = run(terminal, &EkkoConfig::default(), &["storefront", "--yes"]);

        let selections = completed(outcome);
        assert_eq!(selections.project_name, "storefront");
        assert_eq!(selections.framework, Framework::Next);
        assert_eq!(selections.auth, Auth::None);

        let output = terminal.output();
        assert!(output.contains("  ● storefront"));
        assert!(!output.contains('?'));
        assert_eq!(terminal.raw_mode_changes(), 0);
    }

    #[test]
    fn test_decode_error_is_not_a_cancellation() {
        let terminal = ScriptedTerminal::new(80).with_keystrokes(["\x1b[99x"]);
        let (outcome, terminal) = run(terminal, &EkkoConfig::default(), &[]);

        let error = outcome.unwrap_err();
        assert!(!error.is_cancellation());
        assert!(error.to_string().contains("escape sequence"));
        assert!(!terminal.is_raw());
    }
}
