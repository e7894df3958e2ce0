mod app;
mod cli;
mod config;
mod edit;
mod error;
mod fuzzy;
mod launcher;
mod platform;
mod rdp;
mod selector;
mod ssh;
mod style;
mod ui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Request};
use config::Config;
use launcher::Launcher;
use platform::{PgrepProbe, SystemRunner, ThreadSleeper};
use tracing::Level;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config_path = Config::default_config_path()?;
    let runner = SystemRunner;

    match cli.request() {
        Request::Edit => {
            if let Err(e) = edit::run(&config_path, &runner) {
                style::print_with_detail("Failed to open editor:", format!("{e:#}"));
            }
        }
        Request::Connect { group, machine } => {
            let probe = PgrepProbe;
            let sleeper = ThreadSleeper;
            let launcher = Launcher::new(&runner, &probe, &sleeper);
            let mut picker = ui::picker_for(cli.numbered);

            app::connect(
                &config_path,
                &app::ConnectRequest { group, machine },
                picker.as_mut(),
                &launcher,
            );
        }
    }

    Ok(())
}

fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
