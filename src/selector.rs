// ABOUTME: Resolves which group and machine to connect to from arguments or prompts
// ABOUTME: Arguments are validated by name; missing ones are asked for through a Picker

use crate::config::{Config, Group, Machine};
use crate::error::WandError;
use crate::ui::Picker;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Group,
    Machine,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Group => write!(f, "group"),
            Stage::Machine => write!(f, "machine"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Resolution<'a> {
    Resolved {
        group: &'a Group,
        machine: &'a Machine,
    },
    Cancelled(Stage),
    NoGroups,
    NoMachines,
}

pub fn resolve<'a>(
    config: &'a Config,
    group_arg: Option<&str>,
    machine_arg: Option<&str>,
    picker: &mut dyn Picker,
) -> Result<Resolution<'a>, WandError> {
    if config.is_empty() {
        return Ok(Resolution::NoGroups);
    }

    let group = match group_arg {
        Some(name) => config
            .group(name)
            .ok_or_else(|| WandError::GroupNotFound(name.to_string()))?,
        None => match prompt(picker, "Select a group", &config.group_names())? {
            Some(name) => config
                .group(&name)
                .ok_or(WandError::GroupNotFound(name))?,
            None => return Ok(Resolution::Cancelled(Stage::Group)),
        },
    };
    tracing::debug!("Resolved group '{}'", group.name);

    if group.machines.is_empty() {
        return Ok(Resolution::NoMachines);
    }

    let machine = match machine_arg {
        Some(name) => group
            .machine(name)
            .ok_or_else(|| WandError::MachineNotFound(name.to_string()))?,
        None => match prompt(picker, "Select a machine", &group.machine_names())? {
            Some(name) => group
                .machine(&name)
                .ok_or(WandError::MachineNotFound(name))?,
            None => return Ok(Resolution::Cancelled(Stage::Machine)),
        },
    };
    tracing::debug!("Resolved machine '{}'", machine.name);

    Ok(Resolution::Resolved { group, machine })
}

/// Picks a label; the caller looks the record up by name so duplicate names resolve to the first.
fn prompt(
    picker: &mut dyn Picker,
    title: &str,
    labels: &[String],
) -> Result<Option<String>, WandError> {
    match picker.pick(title, labels)? {
        Some(index) => labels
            .get(index)
            .cloned()
            .map(Some)
            .ok_or_else(|| WandError::InvalidSelection((index + 1).to_string())),
        None => Ok(None),
    }
}
