use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;
pub const API_KEY_ENV: &str = "TOKENKIT_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// When set, write endpoints require `Authorization: Bearer <key>`.
    pub api_key: Option<String>,
    /// Origins accepted in addition to localhost.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            api_key: None,
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults plus the API key from `TOKENKIT_API_KEY`; a blank value means no key.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV).ok();
        Self::default().with_api_key(api_key)
    }

    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_allowed_origin(mut self, origin: impl Into<String>) -> Self {
        self.allowed_origins.push(origin.into());
        self
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_api_key_disables_auth() {
        assert_eq!(ServerConfig::new().with_api_key(Some("  ".into())).api_key, None);
        assert_eq!(ServerConfig::new().with_api_key(Some("k".into())).api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_addr() {
        assert_eq!(ServerConfig::new().with_port(8080).addr().to_string(), "127.0.0.1:8080");
    }
}
