// ABOUTME: RDP connection support built on a generated connection profile file
// ABOUTME: The profile is handed to the desktop client through the platform opener

pub mod helper;
pub mod launcher;
pub mod profile;

pub use helper::HelperReadiness;
pub use launcher::RdpLauncher;
