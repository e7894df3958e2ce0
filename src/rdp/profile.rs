// ABOUTME: Connection profile text consumed by desktop RDP clients
// ABOUTME: Written to a temporary .rdp file that is deleted when dropped

use crate::config::Machine;
use crate::error::WandError;
use std::io::Write;
use tempfile::TempPath;

pub fn render(machine: &Machine) -> String {
    format!(
        "full address:s:{}\nusername:s:{}\n",
        machine.host.as_deref().unwrap_or_default(),
        machine.user.as_deref().unwrap_or_default()
    )
}

/// The returned path removes the file when it goes out of scope.
pub fn write_temp(machine: &Machine) -> Result<TempPath, WandError> {
    let mut file = tempfile::Builder::new()
        .prefix("wand-")
        .suffix(".rdp")
        .tempfile()
        .map_err(WandError::TempFile)?;

    file.write_all(render(machine).as_bytes())
        .and_then(|()| file.flush())
        .map_err(WandError::TempFile)?;

    Ok(file.into_temp_path())
}
