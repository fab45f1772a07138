use std::env;
use std::net::SocketAddr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_values(env::var("HOST").ok(), env::var("PORT").ok())
    }

    pub fn from_values(host: Option<String>, port: Option<String>) -> Result<Self, ConfigError> {
        let host = host.unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match port {
            Some(port) => port.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: e.to_string(),
            })?,
            None => 8080,
        };
        Ok(ServerConfig { host, port })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "HOST",
                reason: e.to_string(),
            })
    }
}
