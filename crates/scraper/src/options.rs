// ABOUTME: Configuration options for the listing scraper and the ClientBuilder.
// ABOUTME: The user agent can be taken from the USER_AGENT environment variable.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::Client;

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Environment variable consulted by [`Options::from_env`].
pub const USER_AGENT_ENV: &str = "USER_AGENT";

/// Configuration options for the scraper client.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub http_client: Option<reqwest::Client>,
    pub headers: HashMap<String, String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http_client: None,
            headers: HashMap::new(),
        }
    }
}

impl Options {
    /// Defaults, with the user agent read from `USER_AGENT` when set and non-empty.
    pub fn from_env() -> Self {
        let user_agent = std::env::var(USER_AGENT_ENV)
            .ok()
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        Self {
            user_agent,
            ..Self::default()
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Start from an existing set of options.
    pub fn from_options(opts: Options) -> Self {
        Self { opts }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Use a custom HTTP client. Timeout and user agent are then up to that client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Result<Client, crate::ScrapeError> {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let opts = Options::default();
        assert_eq!(opts.user_agent, "Mozilla/5.0");
        assert_eq!(opts.timeout, Duration::from_secs(30));
        assert!(opts.headers.is_empty());
    }

    #[test]
    fn test_from_env_uses_user_agent_variable() {
        temp_env::with_var(USER_AGENT_ENV, Some("car-analyzer-test/1.0"), || {
            assert_eq!(Options::from_env().user_agent, "car-analyzer-test/1.0");
        });
    }

    #[test]
    fn test_from_env_falls_back_when_unset_or_blank() {
        temp_env::with_var_unset(USER_AGENT_ENV, || {
            assert_eq!(Options::from_env().user_agent, DEFAULT_USER_AGENT);
        });
        temp_env::with_var(USER_AGENT_ENV, Some("  "), || {
            assert_eq!(Options::from_env().user_agent, DEFAULT_USER_AGENT);
        });
    }

    #[test]
    fn test_builder_from_env_options_allows_override() {
        temp_env::with_var(USER_AGENT_ENV, Some("env-agent"), || {
            let builder = ClientBuilder::from_options(Options::from_env());
            assert_eq!(builder.opts.user_agent, "env-agent");
            let builder = builder.user_agent("flag-agent");
            assert_eq!(builder.opts.user_agent, "flag-agent");
        });
    }

    #[test]
    fn test_builder_sets_fields() {
        let builder = ClientBuilder::new()
            .timeout(Duration::from_secs(5))
            .user_agent("agent/2")
            .header("Accept-Language", "de-DE");
        assert_eq!(builder.opts.timeout, Duration::from_secs(5));
        assert_eq!(builder.opts.user_agent, "agent/2");
        assert_eq!(
            builder.opts.headers.get("Accept-Language").map(String::as_str),
            Some("de-DE")
        );
    }
}
