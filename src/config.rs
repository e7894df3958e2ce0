// ABOUTME: Configuration schema and loading for groups of machines stored as JSON
// ABOUTME: Validates the document once at load time and resolves user-supplied paths

use crate::error::WandError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Ssh,
    Rdp,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Machine {
    pub name: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub connection: Option<String>,
    #[serde(default, rename = "identityFile")]
    pub identity_file: Vec<String>,
    #[serde(default, rename = "uses_jumpHost")]
    pub uses_jump_host: bool,
    #[serde(default, rename = "jumpHost")]
    pub jump_host: Vec<String>,
}

impl Machine {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            user: None,
            host: None,
            connection: None,
            identity_file: Vec::new(),
            uses_jump_host: false,
            jump_host: Vec::new(),
        }
    }

    pub fn protocol(&self) -> Protocol {
        match self.connection.as_deref() {
            Some("rdp") => Protocol::Rdp,
            _ => Protocol::Ssh,
        }
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref().filter(|u| !u.is_empty())
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref().filter(|h| !h.is_empty())
    }

    /// `user@host`, bare `host`, or nothing when no host is configured.
    pub fn destination(&self) -> Option<String> {
        match (self.user(), self.host()) {
            (Some(user), Some(host)) => Some(format!("{user}@{host}")),
            (None, Some(host)) => Some(host.to_string()),
            _ => None,
        }
    }

    /// Only the first configured identity file counts, and only when it is non-empty.
    pub fn identity(&self) -> Option<&str> {
        self.identity_file
            .first()
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub name: String,
    pub machines: Vec<Machine>,
}

impl Group {
    pub fn machine(&self, name: &str) -> Option<&Machine> {
        self.machines.iter().find(|m| m.name == name)
    }

    pub fn machine_names(&self) -> Vec<String> {
        self.machines.iter().map(|m| m.name.clone()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// One entry per distinct name; repeated entries are merged in document order.
    pub groups: Vec<Group>,
    names: Vec<String>,
}

type RawDocument = Vec<BTreeMap<String, Vec<Machine>>>;

impl Config {
    pub fn load_from_str(content: &str) -> serde_json::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let raw: RawDocument = serde_json::from_str(content)?;
        let mut config = Config::default();
        for (name, machines) in raw.into_iter().flatten() {
            config.names.push(name.clone());
            match config.groups.iter_mut().find(|g| g.name == name) {
                Some(group) => group.machines.extend(machines),
                None => config.groups.push(Group { name, machines }),
            }
        }

        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, WandError> {
        let content = fs::read_to_string(path).map_err(|e| {
            tracing::debug!("Failed to read {}: {}", path.display(), e);
            WandError::ConfigNotFound(path.to_path_buf())
        })?;

        Self::load_from_str(&content).map_err(|e| WandError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn default_config_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Failed to determine home directory"))?;
        Ok(home.join(".wand").join("config.json"))
    }

    /// Group names in document order, duplicates included.
    pub fn group_names(&self) -> Vec<String> {
        self.names.clone()
    }

    /// Carries the machines of every entry with this name.
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Expands environment variables and a leading `~/` in a user-supplied path.
pub fn expand_path(path: &str) -> String {
    let expanded = expand_env_with(path, |name| std::env::var(name).ok());
    expand_tilde(&expanded)
}

fn expand_tilde(path: &str) -> String {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest).to_string_lossy().into_owned(),
        _ => path.to_string(),
    }
}

/// Replaces `$NAME` and `${NAME}`; unset variables expand to nothing.
fn expand_env_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(braced) = after.strip_prefix('{') {
            if let Some(end) = braced.find('}') {
                out.push_str(&lookup(&braced[..end]).unwrap_or_default());
                rest = &braced[end + 1..];
                continue;
            }
        } else {
            let len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            if len > 0 {
                out.push_str(&lookup(&after[..len]).unwrap_or_default());
                rest = &after[len..];
                continue;
            }
        }

        out.push('$');
        rest = after;
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[
  {
    "lab": [
      { "name": "bastion", "user": "ops", "host": "10.0.0.1", "identityFile": ["~/.ssh/bastion"] },
      {
        "name": "db",
        "user": "postgres",
        "host": "10.0.1.5",
        "uses_jumpHost": true,
        "jumpHost": ["bastion"]
      }
    ]
  },
  { "office": [ { "name": "desk", "host": "desk.local", "user": "me", "connection": "rdp" } ] }
]
"#;

    #[test]
    fn test_parse_groups_in_document_order() {
        let config = Config::load_from_str(SAMPLE).unwrap();

        assert_eq!(config.group_names(), vec!["lab", "office"]);
        let lab = config.group("lab").unwrap();
        assert_eq!(lab.machine_names(), vec!["bastion", "db"]);

        let db = lab.machine("db").unwrap();
        assert!(db.uses_jump_host);
        assert_eq!(db.jump_host, vec!["bastion"]);
        assert_eq!(db.protocol(), Protocol::Ssh);

        let desk = config.group("office").unwrap().machine("desk").unwrap();
        assert_eq!(desk.protocol(), Protocol::Rdp);
    }

    #[test]
    fn test_repeated_group_names_merge_machines() {
        let config = Config::load_from_str(
            r#"[{"g": [{"name": "a"}]}, {"h": []}, {"g": [{"name": "b"}, {"name": "a", "host": "x"}]}]"#,
        )
        .unwrap();

        assert_eq!(config.group_names(), vec!["g", "h", "g"]);
        assert_eq!(config.groups.len(), 2);

        let g = config.group("g").unwrap();
        assert_eq!(g.machine_names(), vec!["a", "b", "a"]);
        assert_eq!(g.machine("b").unwrap().name, "b");
        assert_eq!(g.machine("a").unwrap().host(), None);
    }

    #[test]
    fn test_missing_name_is_a_parse_error() {
        let result = Config::load_from_str(r#"[{"g": [{"host": "h"}]}]"#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("missing field `name`"), "{message}");
    }

    #[test]
    fn test_wrong_field_type_reports_location() {
        let result = Config::load_from_str(r#"[{"g": [{"name": "a", "uses_jumpHost": "yes"}]}]"#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("invalid type"), "{message}");
        assert!(message.contains("line 1"), "{message}");
    }

    #[test]
    fn test_blank_document_has_no_groups() {
        assert!(Config::load_from_str("  \n").unwrap().is_empty());
        assert!(Config::load_from_str("[]").unwrap().is_empty());
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        match Config::load_from_file(&path) {
            Err(WandError::ConfigNotFound(p)) => assert_eq!(p, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_load_from_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{\"g\": ").unwrap();

        assert!(matches!(
            Config::load_from_file(file.path()),
            Err(WandError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.groups.len(), 2);
    }

    #[test]
    fn test_destination() {
        let mut machine = Machine::new("x");
        assert_eq!(machine.destination(), None);

        machine.user = Some("u".to_string());
        assert_eq!(machine.destination(), None);

        machine.host = Some("h".to_string());
        assert_eq!(machine.destination().as_deref(), Some("u@h"));

        machine.user = Some(String::new());
        assert_eq!(machine.destination().as_deref(), Some("h"));
    }

    #[test]
    fn test_identity_uses_first_entry_only() {
        let mut machine = Machine::new("x");
        assert_eq!(machine.identity(), None);

        machine.identity_file = vec!["".to_string(), "~/.ssh/second".to_string()];
        assert_eq!(machine.identity(), None);

        machine.identity_file = vec!["~/.ssh/first".to_string(), "~/.ssh/second".to_string()];
        assert_eq!(machine.identity(), Some("~/.ssh/first"));
    }

    #[test]
    fn test_unknown_connection_defaults_to_ssh() {
        let mut machine = Machine::new("x");
        machine.connection = Some("vnc".to_string());
        assert_eq!(machine.protocol(), Protocol::Ssh);
    }

    #[test]
    fn test_expand_env() {
        let lookup = |name: &str| match name {
            "KEYS" => Some("/keys".to_string()),
            "USER_1" => Some("alice".to_string()),
            _ => None,
        };

        assert_eq!(expand_env_with("$KEYS/id", lookup), "/keys/id");
        assert_eq!(expand_env_with("${KEYS}/${USER_1}", lookup), "/keys/alice");
        assert_eq!(expand_env_with("/x/$MISSING/id", lookup), "/x//id");
        assert_eq!(expand_env_with("cost$", lookup), "cost$");
        assert_eq!(expand_env_with("a$-b", lookup), "a$-b");
        assert_eq!(expand_env_with("${UNCLOSED", lookup), "${UNCLOSED");
    }

    #[test]
    fn test_expand_tilde() {
        let home = dirs::home_dir().unwrap();
        let home_str = home.to_string_lossy();

        assert_eq!(expand_tilde("~/test"), format!("{}/test", home_str));
        assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
        assert_eq!(expand_tilde("relative/path"), "relative/path");
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path().unwrap();
        assert!(path.ends_with(".wand/config.json"));
    }
}
