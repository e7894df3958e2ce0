// ABOUTME: Opens an RDP session by writing a temporary profile and handing it to the opener
// ABOUTME: The profile file is removed once the opener returns, whether it succeeded or not

use crate::config::Machine;
use crate::error::WandError;
use crate::platform::CommandRunner;
use crate::rdp::{HelperReadiness, profile};
use crate::style;

pub struct RdpLauncher<'a> {
    runner: &'a dyn CommandRunner,
    readiness: HelperReadiness<'a>,
    opener: String,
}

impl<'a> RdpLauncher<'a> {
    pub fn new(runner: &'a dyn CommandRunner, readiness: HelperReadiness<'a>, opener: &str) -> Self {
        Self {
            runner,
            readiness,
            opener: opener.to_string(),
        }
    }

    pub fn launch(&self, machine: &Machine) -> Result<(), WandError> {
        let profile = profile::write_temp(machine)?;
        tracing::debug!("Wrote RDP profile to {}", profile.display());

        self.readiness.ensure_running();

        style::print("Opening RDP connection...");
        let path = profile.to_string_lossy().into_owned();
        self.runner.run(&self.opener, &[path])?;
        tracing::debug!("RDP file opened successfully.");

        Ok(())
    }
}
