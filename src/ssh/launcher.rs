// ABOUTME: Launches an interactive ssh session for a resolved machine
// ABOUTME: The child shares the terminal and runs until the session ends

use crate::config::Machine;
use crate::error::WandError;
use crate::platform::CommandRunner;
use crate::ssh::command::build_args;
use crate::style;

pub struct SshLauncher<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> SshLauncher<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    pub fn launch(&self, machine: &Machine, siblings: &[Machine]) -> Result<(), WandError> {
        style::print_with_detail("Selected machine:", &machine.name);

        let args = build_args(machine, siblings);
        tracing::debug!("ssh arguments for '{}': {:?}", machine.name, args);

        style::print("Connecting via SSH...");
        self.runner.run("ssh", &args)
    }
}
