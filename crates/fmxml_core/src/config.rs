//! Client configuration.

use crate::command::CommandMap;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Gateway account credentials.
///
/// The password is zeroized on drop and redacted from `Debug` output.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    /// Account name.
    pub user: String,
    /// Account password.
    pub pass: String,
}

impl Credentials {
    /// Creates credentials from an account name and password.
    pub fn new(user: impl Into<String>, pass: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            pass: pass.into(),
        }
    }

    /// Returns true if no account name is set.
    pub fn is_anonymous(&self) -> bool {
        self.user.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .finish()
    }
}

/// Base configuration shared by every call a client makes.
///
/// Built once and handed to the client, which only ever reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Gateway endpoint URL.
    pub server: String,
    /// Default credentials.
    #[serde(default)]
    pub auth: Credentials,
    /// Default command parameters (database, layout, ...).
    #[serde(default)]
    pub command: CommandMap,
}

impl ClientConfig {
    /// Creates a configuration for the given gateway endpoint.
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            auth: Credentials::default(),
            command: CommandMap::new(),
        }
    }

    /// Sets the default credentials.
    pub fn with_auth(mut self, user: impl Into<String>, pass: impl Into<String>) -> Self {
        self.auth = Credentials::new(user, pass);
        self
    }

    /// Sets a default command parameter.
    pub fn with_command(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.command.insert(key.into(), value.into());
        self
    }

    /// Sets the default database (`-db`).
    pub fn with_database(self, db: impl Into<String>) -> Self {
        self.with_command("-db", db.into())
    }

    /// Sets the default layout (`-lay`).
    pub fn with_layout(self, layout: impl Into<String>) -> Self {
        self.with_command("-lay", layout.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = ClientConfig::new("https://gateway.example.com")
            .with_auth("admin", "secret")
            .with_database("Test")
            .with_layout("people")
            .with_command("-max", 50);

        assert_eq!(config.server, "https://gateway.example.com");
        assert_eq!(config.auth.user, "admin");
        assert_eq!(config.command.get("-db"), Some(&Value::from("Test")));
        assert_eq!(config.command.get("-lay"), Some(&Value::from("people")));
        assert_eq!(config.command.get("-max"), Some(&Value::Integer(50)));
    }

    #[test]
    fn password_is_redacted() {
        let creds = Credentials::new("admin", "hunter2");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn config_loads_from_json() {
        let config: ClientConfig = serde_json::from_str(
            r#"{
                "server": "https://gateway.example.com",
                "auth": {"user": "admin", "pass": "admin"},
                "command": {"-db": "Test", "-lay": "people"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.auth, Credentials::new("admin", "admin"));
        assert_eq!(config.command.len(), 2);
    }

    #[test]
    fn auth_and_command_default_when_missing() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"server": "https://gateway.example.com"}"#).unwrap();
        assert!(config.auth.is_anonymous());
        assert!(config.command.is_empty());
    }
}
