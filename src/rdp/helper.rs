// ABOUTME: Best-effort wait for a desktop RDP client to be running before opening a profile
// ABOUTME: Launches known clients in the background and polls under a bounded retry policy

use crate::platform::{CommandRunner, HelperApp, ProcessProbe, Sleeper};
use std::time::Duration;

/// Fixed-interval polling with an upper bound on attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(750),
            max_attempts: 20,
        }
    }
}

impl RetryPolicy {
    /// Sleeps one interval before every check. Returns whether `ready` ever held.
    pub fn poll<F>(&self, sleeper: &dyn Sleeper, mut ready: F) -> bool
    where
        F: FnMut(u32) -> bool,
    {
        for attempt in 1..=self.max_attempts {
            sleeper.sleep(self.interval);
            if ready(attempt) {
                return true;
            }
        }
        false
    }
}

pub const SETTLE_DELAY: Duration = Duration::from_secs(2);

pub struct HelperReadiness<'a> {
    apps: Vec<HelperApp>,
    probe: &'a dyn ProcessProbe,
    runner: &'a dyn CommandRunner,
    sleeper: &'a dyn Sleeper,
    policy: RetryPolicy,
    settle: Duration,
}

impl<'a> HelperReadiness<'a> {
    pub fn new(
        apps: Vec<HelperApp>,
        probe: &'a dyn ProcessProbe,
        runner: &'a dyn CommandRunner,
        sleeper: &'a dyn Sleeper,
    ) -> Self {
        Self {
            apps,
            probe,
            runner,
            sleeper,
            policy: RetryPolicy::default(),
            settle: SETTLE_DELAY,
        }
    }

    #[cfg(test)]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Never fails: whatever happens, the caller goes on to open the profile.
    pub fn ensure_running(&self) -> bool {
        if self.apps.is_empty() {
            tracing::debug!("No RDP helper applications known for this platform");
            return false;
        }

        tracing::debug!("Checking if {} is running...", self.app_names());
        let mut running = match self.running_app() {
            Some(app) => {
                tracing::debug!("{} is already running.", app.process_name);
                true
            }
            None => false,
        };

        if !running {
            tracing::debug!("None of {} is running.", self.app_names());
            if tracing::enabled!(tracing::Level::DEBUG) {
                let names: Vec<String> =
                    self.apps.iter().map(|a| a.process_name.clone()).collect();
                for line in self.probe.matching_processes(&names) {
                    tracing::debug!("  {}", line);
                }
            }

            self.launch_all();

            running = self.policy.poll(self.sleeper, |attempt| {
                tracing::debug!(
                    "Checking if {} is running (attempt {})...",
                    self.app_names(),
                    attempt
                );
                match self.running_app() {
                    Some(app) => {
                        tracing::debug!("{} is now running.", app.process_name);
                        true
                    }
                    None => false,
                }
            });

            if !running {
                tracing::debug!("No RDP helper started after waiting, continuing anyway.");
            }
        }

        if running {
            tracing::debug!("Waiting {:?} for the RDP helper to finish starting...", self.settle);
            self.sleeper.sleep(self.settle);
        }

        running
    }

    fn running_app(&self) -> Option<&HelperApp> {
        self.apps
            .iter()
            .find(|app| self.probe.is_running(&app.process_name))
    }

    fn launch_all(&self) {
        for app in &self.apps {
            let (program, args) = app.launch_command();
            tracing::debug!("Launching {} in the background...", app.process_name);
            if let Err(e) = self.runner.spawn_detached(&program, &args) {
                tracing::debug!("Failed to launch {}: {}", app.process_name, e);
            }
        }
    }

    fn app_names(&self) -> String {
        self.apps
            .iter()
            .map(|a| a.process_name.as_str())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}
