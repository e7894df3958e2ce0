use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "wand")]
#[command(about = "Pick a machine from your groups and connect over SSH or RDP")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<CliCmd>,

    /// Group to connect to. Prompted for when omitted.
    pub group: Option<String>,

    /// Machine within the group. Prompted for when omitted.
    pub machine: Option<String>,

    /// Show debug output, including RDP client detection
    #[arg(long, global = true)]
    pub debug: bool,

    /// Use a numbered prompt instead of the interactive list
    #[arg(long, global = true)]
    pub numbered: bool,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum CliCmd {
    /// Edit the config file in JSON
    Edit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Request<'a> {
    Edit,
    Connect {
        group: Option<&'a str>,
        machine: Option<&'a str>,
    },
}

impl Cli {
    pub fn request(&self) -> Request<'_> {
        match (&self.cmd, self.group.as_deref()) {
            (Some(CliCmd::Edit), None) => Request::Edit,
            // `wand lab edit` names a machine called "edit", not the subcommand.
            (Some(CliCmd::Edit), Some(group)) => Request::Connect {
                group: Some(group),
                machine: Some("edit"),
            },
            (None, group) => Request::Connect {
                group,
                machine: self.machine.as_deref(),
            },
        }
    }
}
