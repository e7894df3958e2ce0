// ABOUTME: The `edit` subcommand: opens the config file in the user's editor
// ABOUTME: Creates the config directory first so a brand-new file can be saved

use crate::platform::CommandRunner;
use anyhow::{Context, Result};
use std::fs::DirBuilder;
use std::path::Path;

const DEFAULT_EDITOR: &str = "vi";

pub fn run(config_path: &Path, runner: &dyn CommandRunner) -> Result<()> {
    ensure_config_dir(config_path)?;

    let (program, args) = editor_command(std::env::var("EDITOR").ok().as_deref(), config_path)?;
    tracing::debug!("Opening {} with {}", config_path.display(), program);
    runner.run(&program, &args)?;
    Ok(())
}

fn ensure_config_dir(config_path: &Path) -> Result<()> {
    let Some(parent) = config_path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.exists() {
        return Ok(());
    }

    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder
        .create(parent)
        .with_context(|| format!("Failed to create config directory: {}", parent.display()))
}

/// `$EDITOR` is split with shell quoting rules, so it may carry flags or a quoted path.
fn editor_command(editor: Option<&str>, config_path: &Path) -> Result<(String, Vec<String>)> {
    let editor = editor.unwrap_or_default();
    let mut args = shell_words::split(editor)
        .with_context(|| format!("Failed to parse $EDITOR: {editor}"))?;
    let program = if args.is_empty() {
        DEFAULT_EDITOR.to_string()
    } else {
        args.remove(0)
    };
    args.push(config_path.to_string_lossy().into_owned());
    Ok((program, args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WandError;
    use crate::platform::MockCommandRunner;
    use tempfile::TempDir;

    #[test]
    fn test_editor_defaults_to_vi() {
        let path = Path::new("/home/me/.wand/config.json");
        assert_eq!(
            editor_command(None, path).unwrap(),
            ("vi".to_string(), vec!["/home/me/.wand/config.json".to_string()])
        );
        assert_eq!(editor_command(Some("  "), path).unwrap().0, "vi");
    }

    #[test]
    fn test_editor_with_flags() {
        let path = Path::new("/tmp/config.json");
        let (program, args) = editor_command(Some("code --wait"), path).unwrap();

        assert_eq!(program, "code");
        assert_eq!(args, vec!["--wait", "/tmp/config.json"]);
    }

    #[test]
    fn test_editor_with_quoted_path() {
        let path = Path::new("/tmp/config.json");
        let (program, args) =
            editor_command(Some("\"/opt/My Editor/bin/edit\" --wait"), path).unwrap();

        assert_eq!(program, "/opt/My Editor/bin/edit");
        assert_eq!(args, vec!["--wait", "/tmp/config.json"]);
    }

    #[test]
    fn test_unbalanced_editor_quote_is_an_error() {
        let path = Path::new("/tmp/config.json");
        let err = editor_command(Some("\"/opt/edit"), path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse $EDITOR"));
    }

    #[test]
    fn test_creates_missing_config_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(".wand").join("config.json");

        ensure_config_dir(&config_path).unwrap();
        assert!(config_path.parent().unwrap().is_dir());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(config_path.parent().unwrap())
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o077, 0);
        }
    }

    #[test]
    fn test_editor_failure_is_returned() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|_, args| args.last().is_some_and(|a| a.ends_with("config.json")))
            .times(1)
            .returning(|program, _| Err(WandError::child(program, "not found")));

        assert!(run(&config_path, &runner).is_err());
    }
}
