// ABOUTME: The connect flow: load the config, resolve a machine, and launch the connection
// ABOUTME: Every outcome ends as one user-facing notice; nothing is propagated past this point

use crate::config::{Config, Protocol};
use crate::error::WandError;
use crate::launcher::Launcher;
use crate::selector::{self, Resolution};
use crate::style;
use crate::ui::Picker;
use std::path::Path;

/// Final message for a run that did not connect cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub label: String,
    pub detail: Option<String>,
}

impl Notice {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: None,
        }
    }

    fn with_detail(label: impl Into<String>, detail: impl ToString) -> Self {
        Self {
            label: label.into(),
            detail: Some(detail.to_string()),
        }
    }

    pub fn print(&self) {
        match &self.detail {
            Some(detail) => style::print_with_detail(&self.label, detail),
            None => style::print(&self.label),
        }
    }
}

pub struct ConnectRequest<'r> {
    pub group: Option<&'r str>,
    pub machine: Option<&'r str>,
}

pub fn connect(
    config_path: &Path,
    request: &ConnectRequest<'_>,
    picker: &mut dyn Picker,
    launcher: &Launcher<'_>,
) {
    if let Err(notice) = attempt(config_path, request, picker, launcher) {
        notice.print();
    }
}

fn attempt(
    config_path: &Path,
    request: &ConnectRequest<'_>,
    picker: &mut dyn Picker,
    launcher: &Launcher<'_>,
) -> Result<(), Notice> {
    let config = Config::load_from_file(config_path).map_err(|e| notice_for(e, None))?;
    tracing::debug!(
        "Loaded {} group(s) from {}",
        config.groups.len(),
        config_path.display()
    );

    let resolution = selector::resolve(&config, request.group, request.machine, picker)
        .map_err(|e| notice_for(e, None))?;

    let (group, machine) = match resolution {
        Resolution::Resolved { group, machine } => (group, machine),
        Resolution::Cancelled(stage) => return Err(Notice::new(format!("No {stage} selected."))),
        Resolution::NoGroups => return Err(Notice::new("No groups found in config.")),
        Resolution::NoMachines => return Err(Notice::new("No machines found in group.")),
    };

    launcher
        .connect(machine, &group.machines)
        .map_err(|e| notice_for(e, Some(machine.protocol())))
}

fn notice_for(err: WandError, protocol: Option<Protocol>) -> Notice {
    match err {
        WandError::ConfigNotFound(_) => {
            Notice::new("Config file not found. Use 'wand edit' to create it.")
        }
        WandError::ConfigParse { message, .. } => {
            Notice::with_detail("Failed to parse config file:", message)
        }
        WandError::GroupNotFound(name) => Notice::with_detail("Group not found:", name),
        WandError::MachineNotFound(name) => {
            Notice::with_detail("Machine not found in group:", name)
        }
        WandError::InvalidSelection(entry) => Notice::with_detail("Invalid selection:", entry),
        WandError::TempFile(e) => Notice::with_detail("Failed to create temp RDP file:", e),
        WandError::Terminal(e) => Notice::with_detail("Error running selector:", e),
        err @ WandError::ChildProcess { .. } => match protocol {
            Some(Protocol::Rdp) => Notice::with_detail("RDP connection failed:", err),
            _ => Notice::with_detail("SSH connection failed:", err),
        },
    }
}
