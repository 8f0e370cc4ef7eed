//! Integration tests for ekko-core
//!
//! These tests drive complete prompts through the engine with scripted
//! terminal input, the same way a user at a terminal would.

use ekko_core::{
    error::Error,
    prompt::{Checkbox, Choice, Confirm, Input, PromptEngine, Select},
    terminal::ScriptedTerminal,
    theme::Theme,
};

fn engine(keystrokes: &[&str]) -> PromptEngine<ScriptedTerminal> {
    let terminal = ScriptedTerminal::new(80).with_keystrokes(keystrokes.iter().copied());
    PromptEngine::new(terminal, Theme::plain())
}

/// Typing a name one key at a time and submitting it
#[test]
fn test_text_prompt_answer() {
    let mut engine = engine(&["m", "y", "-", "a", "p", "p", "\r"]);
    let answer = engine.prompt(Input::new("What is your project called?")).unwrap();
    assert_eq!(answer, "my-app");
}

/// A fast typist or a paste delivers several keys in one read
#[test]
fn test_keys_in_one_chunk() {
    let mut engine = engine(&["my-app\r"]);
    let answer = engine.prompt(Input::new("Name?")).unwrap();
    assert_eq!(answer, "my-app");
}

/// Cursor moves in between typing do not disturb the text
#[test]
fn test_editing_with_arrow_keys() {
    let mut engine = engine(&["helo", "\x1b[D", "l", "\x1b[C", "\x1b[3~", "!", "\r"]);
    let answer = engine.prompt(Input::new("Greeting?")).unwrap();
    assert_eq!(answer, "hello!");
}

#[test]
fn test_validation_error_is_shown_then_cleared() {
    let mut engine = engine(&["\r", "x", "\r"]);
    let answer = engine
        .prompt(Input::new("Name?").validate(|value| {
            if value.trim().is_empty() {
                Err("Please enter a project name.".to_string())
            } else {
                Ok(())
            }
        }))
        .unwrap();
    assert_eq!(answer, "x");

    let output = engine.terminal().output();
    let error_at = output.find("✖ Please enter a project name.").unwrap();
    // the frame after the next key no longer carries the message
    let after_error = &output[error_at..];
    assert!(after_error.contains("? Name? x"));
    assert_eq!(after_error.matches("✖").count(), 1);
}

#[test]
fn test_checkbox_skips_disabled_option() {
    let mut engine = engine(&["\x1b[B", " ", "\r"]);
    let answer = engine
        .prompt(Checkbox::new(
            "Pick",
            vec!["A".into(), Choice::new("B", "B").disabled(), "C".into()],
        ))
        .unwrap();
    assert_eq!(answer, vec!["C"]);
}

#[test]
fn test_checkbox_toggle_all_twice_checks_nothing() {
    let mut engine = engine(&["a", "a", "\r"]);
    let answer = engine
        .prompt(Checkbox::new("Pick", vec!["A".into(), "B".into()]))
        .unwrap();
    assert!(answer.is_empty());
}

#[test]
fn test_checkbox_minimum_enforced_before_resolving() {
    let mut engine = engine(&["\r", " ", "\r"]);
    let answer = engine
        .prompt(Checkbox::new("Pick", vec!["A".into(), "B".into()]).min_options(1))
        .unwrap();
    assert_eq!(answer, vec!["A"]);
    assert!(engine
        .terminal()
        .output()
        .contains("✖ The minimum number of options is 1."));
}

#[test]
fn test_select_with_search() {
    let mut engine = engine(&["dri", "\r"]);
    let answer = engine
        .prompt(
            Select::new(
                "Choose your database",
                vec![
                    Choice::new("none", "None"),
                    Choice::new("convex", "Convex"),
                    Choice::new("drizzle", "Drizzle"),
                ],
            )
            .searchable(true),
        )
        .unwrap();
    assert_eq!(answer, "drizzle");
}

#[test]
fn test_several_prompts_in_sequence() {
    let mut engine = engine(&["demo\r", "\x1b[B\r", "n\r"]);

    let name = engine.prompt(Input::new("Name?")).unwrap();
    let framework = engine
        .prompt(Select::new(
            "Framework?",
            vec![
                Choice::new("next", "Next.js"),
                Choice::new("tanstack-start", "TanStack Start"),
            ],
        ))
        .unwrap();
    let proceed = engine.prompt(Confirm::new("Proceed?").default(true)).unwrap();

    assert_eq!(name, "demo");
    assert_eq!(framework, "tanstack-start");
    assert!(!proceed);

    let output = engine.terminal().output();
    assert!(output.contains("✔ Name? › demo\r\n"));
    assert!(output.contains("✔ Framework? › TanStack Start\r\n"));
    assert!(output.contains("✔ Proceed? › no\r\n"));
}

#[test]
fn test_end_of_input_cancels() {
    let mut engine = engine(&["my-a"]);
    let error = engine.prompt(Input::new("Name?")).unwrap_err();
    assert!(matches!(error, Error::Cancelled));
    assert!(error.is_cancellation());
}

#[test]
fn test_interrupt_cancels_and_restores_terminal() {
    let mut engine = engine(&["\x1b[B", "\x03"]);
    let error = engine
        .prompt(Select::new("Pick", vec!["A".into(), "B".into()]))
        .unwrap_err();
    assert!(matches!(error, Error::Interrupted));

    let terminal = engine.into_terminal();
    assert!(!terminal.is_raw());
    assert_eq!(terminal.raw_mode_changes(), 2);
    // erased and left on a fresh line with the cursor visible
    assert!(terminal.output().ends_with("\x1b[?25h\r\n"));
}

#[test]
fn test_unknown_escape_sequence_is_fatal() {
    let mut engine = engine(&["\x1b[200~"]);
    let error = engine.prompt(Input::new("Name?")).unwrap_err();
    assert!(matches!(error, Error::UnrecognizedSequence(_)));
    assert!(!error.is_cancellation());
    assert!(!engine.terminal().is_raw());
}
