use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

use crate::auth::Credential;
use crate::cluster::Node;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub cluster: ClusterConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Address peers use to reach this node; defaults to the bind port
    pub advertise_ip: String,
    pub advertise_port: Option<u16>,
    /// Initial master, until the election says otherwise
    pub master: Option<Node>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub token_expiry_hours: u64,
    pub token_issuer: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("GATEWAY_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("GATEWAY_PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Cluster overrides
        if let Ok(v) = env::var("GATEWAY_ADVERTISE_IP") {
            self.cluster.advertise_ip = v;
        }
        if let Ok(v) = env::var("GATEWAY_ADVERTISE_PORT") {
            self.cluster.advertise_port = v.parse().ok();
        }
        if let (Ok(ip), Ok(port)) = (env::var("GATEWAY_MASTER_IP"), env::var("GATEWAY_MASTER_PORT")) {
            self.cluster.master = port.parse().ok().map(|port| Node::new(ip, port));
        }

        // Credential overrides
        if let Ok(v) = env::var("GATEWAY_USERNAME") {
            self.security.username = v;
        }
        if let Ok(v) = env::var("GATEWAY_PASSWORD") {
            self.security.password = v;
        }
        if let Ok(v) = env::var("SECURITY_TOKEN_EXPIRY_HOURS") {
            self.security.token_expiry_hours = v.parse().unwrap_or(self.security.token_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_TOKEN_ISSUER") {
            self.security.token_issuer = v;
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 7070,
            },
            cluster: ClusterConfig {
                advertise_ip: "127.0.0.1".to_string(),
                advertise_port: None,
                master: None,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                username: "admin".to_string(),
                password: "admin".to_string(),
                token_expiry_hours: 24 * 7, // 1 week
                token_issuer: "admin-gateway".to_string(),
            },
        }
    }

    fn staging() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Staging;
        config.api.max_request_size_bytes = 5 * 1024 * 1024;
        config.security.token_expiry_hours = 24;
        config
    }

    fn production() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Production;
        config.api.max_request_size_bytes = 2 * 1024 * 1024;
        config.security.token_expiry_hours = 4;
        config
    }

    pub fn credential(&self) -> Credential {
        Credential::new(&self.security.username, &self.security.password)
    }

    /// This node as peers see it
    pub fn local_node(&self) -> Node {
        Node::new(
            self.cluster.advertise_ip.clone(),
            self.cluster.advertise_port.unwrap_or(self.server.port),
        )
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 7070);
        assert!(config.api.enable_request_logging);
        assert!(config.cluster.master.is_none());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.security.token_expiry_hours, 4);
    }

    #[test]
    fn local_node_defaults_to_bind_port() {
        let mut config = AppConfig::development();
        config.server.port = 9000;
        assert_eq!(config.local_node(), Node::new("127.0.0.1", 9000));

        config.cluster.advertise_port = Some(9100);
        assert_eq!(config.local_node().port, 9100);
    }
}
