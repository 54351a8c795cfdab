//! Per-call request descriptors.

use crate::command::{CommandMap, Directive};
use crate::config::{ClientConfig, Credentials};
use crate::value::Record;

/// A fully merged request, ready for the transport.
///
/// Built fresh for every call from a copy of the [`ClientConfig`]; nothing in
/// it is shared with the configuration or with other calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// Gateway endpoint URL.
    pub server: String,
    /// Credentials for this call.
    pub auth: Credentials,
    /// Command parameters, payload fields included.
    pub command: CommandMap,
}

impl RequestDescriptor {
    /// Builds a request from the base configuration.
    ///
    /// The configuration is copied first. Fields set on `patch` then replace
    /// the copy's top-level entries wholesale. Finally `payload` and then
    /// `command` are merged into the command map, later keys winning.
    pub fn build(
        config: &ClientConfig,
        payload: &Record,
        command: CommandMap,
        patch: Option<&RequestOverride>,
    ) -> Self {
        let mut request = Self {
            server: config.server.clone(),
            auth: config.auth.clone(),
            command: config.command.clone(),
        };

        if let Some(patch) = patch {
            patch.apply(&mut request);
        }

        request
            .command
            .extend(payload.iter().map(|(k, v)| (k.clone(), v.clone())));
        request.command.extend(command);
        request
    }

    /// Returns the directive flagged on this request.
    pub fn directive(&self) -> Option<Directive> {
        Directive::of(&self.command)
    }
}

/// A per-call patch over the descriptor's top-level entries.
///
/// Each field that is set replaces the configuration's value for one call
/// only. `command` replaces the whole default command map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOverride {
    /// Replacement endpoint URL.
    pub server: Option<String>,
    /// Replacement credentials.
    pub auth: Option<Credentials>,
    /// Replacement default command map.
    pub command: Option<CommandMap>,
}

impl RequestOverride {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a patch that only swaps credentials.
    pub fn credentials(user: impl Into<String>, pass: impl Into<String>) -> Self {
        Self::new().with_auth(user, pass)
    }

    /// Sets the replacement endpoint URL.
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    /// Sets the replacement credentials.
    pub fn with_auth(mut self, user: impl Into<String>, pass: impl Into<String>) -> Self {
        self.auth = Some(Credentials::new(user, pass));
        self
    }

    /// Sets the replacement default command map.
    pub fn with_command(mut self, command: CommandMap) -> Self {
        self.command = Some(command);
        self
    }

    fn apply(&self, request: &mut RequestDescriptor) {
        if let Some(server) = &self.server {
            request.server.clone_from(server);
        }
        if let Some(auth) = &self.auth {
            request.auth = auth.clone();
        }
        if let Some(command) = &self.command {
            request.command.clone_from(command);
        }
    }
}
