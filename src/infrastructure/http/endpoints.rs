use std::fmt;

use reqwest::Url;
use thiserror::Error;

/// Endpoint resolution errors. These are caller errors, never retried.
#[derive(Error, Debug)]
pub enum EndpointError {
    #[error("service host cannot be empty")]
    EmptyHost,

    #[error("roles {a} and {b} share port {port}")]
    DuplicatePort {
        a: ServiceRole,
        b: ServiceRole,
        port: u16,
    },

    #[error("path {0:?} must start with '/'")]
    RelativePath(String),

    #[error("malformed endpoint URL {url}: {reason}")]
    MalformedUrl { url: String, reason: String },
}

/// Logical service role in the CQRS deployment.
///
/// Each role is bound to a fixed port and a path prefix; the table below is
/// the single source of truth for both and is validated at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceRole {
    AccountsCommand,
    AccountsQuery,
    TransactionsCommand,
    CustomersCommand,
    CustomersQuery,
}

impl ServiceRole {
    pub const ALL: [Self; 5] = [
        Self::AccountsCommand,
        Self::AccountsQuery,
        Self::TransactionsCommand,
        Self::CustomersCommand,
        Self::CustomersQuery,
    ];

    /// Fixed port in the reference deployment.
    pub const fn port(self) -> u16 {
        match self {
            Self::AccountsCommand => 8080,
            Self::AccountsQuery => 8081,
            Self::TransactionsCommand => 8082,
            Self::CustomersCommand => 8083,
            Self::CustomersQuery => 8084,
        }
    }

    /// Path prefix the role serves its resources under.
    pub const fn path_prefix(self) -> &'static str {
        match self {
            Self::AccountsCommand | Self::AccountsQuery => "/accounts",
            Self::TransactionsCommand => "/transfers",
            Self::CustomersCommand | Self::CustomersQuery => "/customers",
        }
    }

    /// Position in [`Self::ALL`], used to index per-resolver port tables.
    pub const fn index(self) -> usize {
        match self {
            Self::AccountsCommand => 0,
            Self::AccountsQuery => 1,
            Self::TransactionsCommand => 2,
            Self::CustomersCommand => 3,
            Self::CustomersQuery => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccountsCommand => "accounts-command",
            Self::AccountsQuery => "accounts-query",
            Self::TransactionsCommand => "transactions-command",
            Self::CustomersCommand => "customers-command",
            Self::CustomersQuery => "customers-query",
        }
    }
}

impl fmt::Display for ServiceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that the role→port table assigns a distinct port to every role.
pub fn validate_port_table() -> Result<(), EndpointError> {
    for (i, a) in ServiceRole::ALL.iter().enumerate() {
        for b in &ServiceRole::ALL[i + 1..] {
            if a.port() == b.port() {
                return Err(EndpointError::DuplicatePort {
                    a: *a,
                    b: *b,
                    port: a.port(),
                });
            }
        }
    }
    Ok(())
}

/// Maps a service role plus a relative path to a fully-qualified URL.
///
/// The host is read once from configuration at construction and never
/// mutated afterwards. Ports come from the static role table; the
/// configuration surface never exposes them. Tests (and gateway-style
/// deployments) may override individual ports at construction.
#[derive(Debug, Clone)]
pub struct EndpointResolver {
    host: String,
    ports: [u16; ServiceRole::ALL.len()],
}

impl EndpointResolver {
    pub fn new(host: impl Into<String>) -> Result<Self, EndpointError> {
        validate_port_table()?;
        Self::with_port_overrides(host, &[])
    }

    /// Build a resolver with some roles bound to non-reference ports.
    /// Overridden ports may collide (one host may front several roles).
    pub fn with_port_overrides(
        host: impl Into<String>,
        overrides: &[(ServiceRole, u16)],
    ) -> Result<Self, EndpointError> {
        let host = host.into();
        if host.is_empty() {
            return Err(EndpointError::EmptyHost);
        }
        let mut ports = [0u16; ServiceRole::ALL.len()];
        for (i, role) in ServiceRole::ALL.iter().enumerate() {
            ports[i] = role.port();
        }
        for (role, port) in overrides {
            ports[role.index()] = *port;
        }
        Ok(Self { host, ports })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self, role: ServiceRole) -> u16 {
        self.ports[role.index()]
    }

    /// Build `http://{host}:{port}{path}` for the given role.
    pub fn resolve(&self, role: ServiceRole, path: &str) -> Result<Url, EndpointError> {
        if !path.starts_with('/') {
            return Err(EndpointError::RelativePath(path.to_string()));
        }
        let url = format!("http://{}:{}{}", self.host, self.port(role), path);
        Url::parse(&url).map_err(|err| EndpointError::MalformedUrl {
            url,
            reason: err.to_string(),
        })
    }
}
