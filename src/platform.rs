// ABOUTME: Operating system seams for running programs, probing processes, and waiting
// ABOUTME: Traits keep the launch flow testable; Platform supplies per-OS defaults

use crate::error::WandError;
use std::io;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

/// Runs external programs on behalf of the launcher.
#[cfg_attr(test, automock)]
pub trait CommandRunner {
    /// Runs to completion, sharing this process's stdin, stdout and stderr.
    fn run(&self, program: &str, args: &[String]) -> Result<(), WandError>;

    /// Starts a program in the background without waiting for it.
    fn spawn_detached(&self, program: &str, args: &[String]) -> io::Result<()>;
}

/// Answers whether a process matching a name is currently alive.
#[cfg_attr(test, automock)]
pub trait ProcessProbe {
    fn is_running(&self, process_name: &str) -> bool;

    /// `ps` lines mentioning any of the names, for debug output.
    fn matching_processes(&self, process_names: &[String]) -> Vec<String>;
}

#[cfg_attr(test, automock)]
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<(), WandError> {
        tracing::debug!("Running {} {:?}", program, args);

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| WandError::child(program, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(WandError::child(program, status))
        }
    }

    fn spawn_detached(&self, program: &str, args: &[String]) -> io::Result<()> {
        tracing::debug!("Spawning {} {:?} in the background", program, args);

        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
    }
}

pub struct PgrepProbe;

impl ProcessProbe for PgrepProbe {
    fn is_running(&self, process_name: &str) -> bool {
        if which::which("pgrep").is_err() {
            tracing::debug!("pgrep not found, assuming '{}' is not running", process_name);
            return false;
        }

        Command::new("pgrep")
            .args(["-f", process_name])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn matching_processes(&self, process_names: &[String]) -> Vec<String> {
        let output = match Command::new("ps").arg("aux").output() {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!("Failed to list processes: {}", e);
                return Vec::new();
            }
        };

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|line| process_names.iter().any(|name| line.contains(name.as_str())))
            .map(str::to_string)
            .collect()
    }
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// A desktop application that has to be running before an RDP profile can be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperApp {
    pub process_name: String,
    pub bundle_path: String,
}

impl HelperApp {
    pub fn new(process_name: &str, bundle_path: &str) -> Self {
        Self {
            process_name: process_name.to_string(),
            bundle_path: bundle_path.to_string(),
        }
    }

    /// Launch in the background without stealing focus.
    pub fn launch_command(&self) -> (String, Vec<String>) {
        (
            "open".to_string(),
            vec!["-gj".to_string(), self.bundle_path.clone()],
        )
    }
}

/// Per-OS defaults for opening files and preparing RDP clients.
pub struct Platform;

impl Platform {
    /// Program that opens a file with its associated application.
    #[cfg(target_os = "macos")]
    pub fn opener() -> &'static str {
        "open"
    }

    #[cfg(not(target_os = "macos"))]
    pub fn opener() -> &'static str {
        "xdg-open"
    }

    #[cfg(target_os = "macos")]
    pub fn rdp_helpers() -> Vec<HelperApp> {
        vec![
            HelperApp::new(
                "Microsoft Remote Desktop",
                "/Applications/Microsoft Remote Desktop.app",
            ),
            HelperApp::new("Windows App", "/Applications/Windows App.app"),
        ]
    }

    #[cfg(not(target_os = "macos"))]
    pub fn rdp_helpers() -> Vec<HelperApp> {
        Vec::new()
    }
}
