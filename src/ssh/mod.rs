// ABOUTME: SSH connection support: argument construction and session launching
// ABOUTME: Jump hosts are looked up among the machines of the selected group

pub mod command;
pub mod launcher;

pub use launcher::SshLauncher;
