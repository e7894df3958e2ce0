// ABOUTME: Dispatches a resolved machine to the SSH or RDP connection path
// ABOUTME: Holds the process seams and platform defaults shared by both paths

use crate::config::{Machine, Protocol};
use crate::error::WandError;
use crate::platform::{CommandRunner, HelperApp, Platform, ProcessProbe, Sleeper};
use crate::rdp::{HelperReadiness, RdpLauncher};
use crate::ssh::SshLauncher;

pub struct Launcher<'a> {
    runner: &'a dyn CommandRunner,
    probe: &'a dyn ProcessProbe,
    sleeper: &'a dyn Sleeper,
    helpers: Vec<HelperApp>,
    opener: String,
}

impl<'a> Launcher<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        probe: &'a dyn ProcessProbe,
        sleeper: &'a dyn Sleeper,
    ) -> Self {
        Self {
            runner,
            probe,
            sleeper,
            helpers: Platform::rdp_helpers(),
            opener: Platform::opener().to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_helpers(mut self, helpers: Vec<HelperApp>) -> Self {
        self.helpers = helpers;
        self
    }

    #[cfg(test)]
    pub fn with_opener(mut self, opener: &str) -> Self {
        self.opener = opener.to_string();
        self
    }

    /// Runs exactly one external connection command for `machine`.
    pub fn connect(&self, machine: &Machine, siblings: &[Machine]) -> Result<(), WandError> {
        match machine.protocol() {
            Protocol::Ssh => SshLauncher::new(self.runner).launch(machine, siblings),
            Protocol::Rdp => {
                let readiness = HelperReadiness::new(
                    self.helpers.clone(),
                    self.probe,
                    self.runner,
                    self.sleeper,
                );
                RdpLauncher::new(self.runner, readiness, &self.opener).launch(machine)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MockCommandRunner, MockProcessProbe, MockSleeper};

    #[test]
    fn test_ssh_machine_runs_ssh() {
        let mut machine = Machine::new("web");
        machine.host = Some("web.internal".to_string());

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|program, _| program == "ssh")
            .times(1)
            .returning(|_, _| Ok(()));
        let probe = MockProcessProbe::new();
        let sleeper = MockSleeper::new();

        let launcher = Launcher::new(&runner, &probe, &sleeper);
        launcher.connect(&machine, &[]).unwrap();
    }

    #[test]
    fn test_rdp_machine_runs_opener() {
        let mut machine = Machine::new("desk");
        machine.host = Some("desk.local".to_string());
        machine.connection = Some("rdp".to_string());

        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|program, args| program == "my-opener" && args[0].ends_with(".rdp"))
            .times(1)
            .returning(|_, _| Ok(()));
        let mut probe = MockProcessProbe::new();
        probe.expect_is_running().never();
        let sleeper = MockSleeper::new();

        let launcher = Launcher::new(&runner, &probe, &sleeper)
            .with_helpers(Vec::new())
            .with_opener("my-opener");
        launcher.connect(&machine, &[]).unwrap();
    }
}
