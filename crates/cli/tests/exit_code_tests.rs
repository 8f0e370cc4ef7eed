#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::process::{Command, Output, Stdio};
    use tempfile::NamedTempFile;

    const CANCELLED_NOTICE: &str = "Setup was cancelled or ran in a non-interactive shell. Exiting.";

    /// Runs the binary with piped (non-terminal) stdin and the given config file.
    fn run_binary(config: &str, extra_args: &[&str]) -> Output {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{config}").unwrap();

        Command::new(env!("CARGO_BIN_EXE_create-ekko-app"))
            .arg("-c")
            .arg(file.path())
            .args(extra_args)
            .stdin(Stdio::piped())
            .output()
            .unwrap()
    }

    #[test]
    fn test_non_interactive_run_exits_successfully_with_notice() {
        let output = run_binary("", &[]);

        assert_eq!(output.status.code(), Some(0));
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains(CANCELLED_NOTICE));
    }

    #[test]
    fn test_missing_config_file_exits_with_failure() {
        let output = Command::new(env!("CARGO_BIN_EXE_create-ekko-app"))
            .args(["-c", "/nonexistent/ekko-config.yml"])
            .stdin(Stdio::piped())
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("/nonexistent/ekko-config.yml"));
        assert!(!String::from_utf8_lossy(&output.stdout).contains(CANCELLED_NOTICE));
    }

    #[test]
    fn test_yes_with_blank_configured_name_uses_default_name() {
        let output = run_binary("defaults:\n  project_name: \"   \"\n", &["--yes", "--no-color"]);

        assert_eq!(output.status.code(), Some(0));
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Selections for my-app are ready."));
    }
}
