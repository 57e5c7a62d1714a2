use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::handling::{JurisdictionTable, RuleSetId, NATIONAL_RULE_SET, YVELINES_RULE_SET};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub resolver: ResolverConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let national = env::var("APP_NATIONAL_RULE_SET")
            .unwrap_or_else(|_| NATIONAL_RULE_SET.to_string());
        if national.trim().is_empty() {
            return Err(ConfigError::MissingNationalRuleSet);
        }
        let jurisdictions = match env::var("APP_JURISDICTION_RULE_SETS") {
            Ok(raw) => parse_jurisdictions(&raw)?,
            Err(_) => JurisdictionTable::standard(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            resolver: ResolverConfig {
                national_rule_set: RuleSetId::new(national.trim()),
                jurisdictions,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Which rule sets the resolver consults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub national_rule_set: RuleSetId,
    pub jurisdictions: JurisdictionTable,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            national_rule_set: RuleSetId::new(NATIONAL_RULE_SET),
            jurisdictions: JurisdictionTable::standard(),
        }
    }
}

/// Parse `dept=rule_set` pairs separated by commas. Blank input yields an empty table.
pub fn parse_jurisdictions(raw: &str) -> Result<JurisdictionTable, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let invalid = || ConfigError::InvalidJurisdiction {
                entry: entry.to_string(),
            };
            let (department, rule_set) = entry.split_once('=').ok_or_else(invalid)?;
            let (department, rule_set) = (department.trim(), rule_set.trim());
            if department.is_empty() || rule_set.is_empty() {
                return Err(invalid());
            }
            Ok((department.to_string(), RuleSetId::new(rule_set)))
        })
        .collect()
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingNationalRuleSet,
    InvalidJurisdiction { entry: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::MissingNationalRuleSet => {
                write!(f, "APP_NATIONAL_RULE_SET must not be blank")
            }
            ConfigError::InvalidJurisdiction { entry } => write!(
                f,
                "APP_JURISDICTION_RULE_SETS entry '{}' must look like <department>=<rule set> (e.g. 78={})",
                entry, YVELINES_RULE_SET
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::MissingNationalRuleSet
            | ConfigError::InvalidJurisdiction { .. } => None,
        }
    }
}
