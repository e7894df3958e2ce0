// ABOUTME: Builds the ssh argument list for a machine, including jump host and identity flags
// ABOUTME: Pure function over the configuration so argument order can be checked in tests

use crate::config::{Machine, expand_path};

/// Argument order: `-J <first jump>`, jump identities, own identity, destination.
///
/// Only the first resolvable jump host is routed through, yet every resolved jump host
/// contributes its identity file.
pub fn build_args(machine: &Machine, siblings: &[Machine]) -> Vec<String> {
    let mut args = Vec::new();

    if machine.uses_jump_host && !machine.jump_host.is_empty() {
        let jumps: Vec<&Machine> = machine
            .jump_host
            .iter()
            .filter_map(|name| {
                let found = siblings.iter().find(|m| &m.name == name);
                if found.is_none() {
                    tracing::debug!("Jump host '{}' is not in this group, skipping", name);
                }
                found
            })
            .collect();

        if let Some(destination) = jumps.iter().find_map(|jump| jump.destination()) {
            args.push("-J".to_string());
            args.push(destination);
        }

        for identity in jumps.iter().filter_map(|jump| jump.identity()) {
            args.push("-i".to_string());
            args.push(expand_path(identity));
        }
    }

    if let Some(identity) = machine.identity() {
        args.push("-i".to_string());
        args.push(expand_path(identity));
    }

    if let Some(destination) = machine.destination() {
        args.push(destination);
    }

    args
}
