//! Configuración de variables de entorno
//!
//! Todo tiene un valor por defecto razonable; un valor presente pero
//! inválido es un error de configuración.

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Usuario de demostración por defecto
pub const DEFAULT_DEMO_USER_ID: &str = "demo-user";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub demo_user_id: String,
    pub seed_demo_on_start: bool,
    pub run_migrations: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: vec!["*".to_string()],
            demo_user_id: DEFAULT_DEMO_USER_ID.to_string(),
            seed_demo_on_start: false,
            run_migrations: true,
        }
    }
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Construir desde cualquier fuente de variables (tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT")?.unwrap_or(defaults.port),
            cors_origins: lookup("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            demo_user_id: lookup("DEMO_USER_ID")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.demo_user_id),
            seed_demo_on_start: parse_flag(&lookup, "SEED_DEMO_ON_START")?.unwrap_or(defaults.seed_demo_on_start),
            run_migrations: parse_flag(&lookup, "RUN_MIGRATIONS")?.unwrap_or(defaults.run_migrations),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Dirección de escucha del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub(crate) fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

fn parse_flag<F>(lookup: &F, name: &'static str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::Invalid { name, value }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.is_development());
        assert_eq!(config.port, 3000);
        assert_eq!(config.demo_user_id, DEFAULT_DEMO_USER_ID);
        assert!(!config.seed_demo_on_start);
        assert!(config.run_migrations);
    }

    #[test]
    fn test_values_from_env() {
        let config = EnvironmentConfig::from_lookup(lookup(&[
            ("ENVIRONMENT", "production"),
            ("PORT", "8080"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("SEED_DEMO_ON_START", "true"),
            ("RUN_MIGRATIONS", "0"),
        ]))
        .unwrap();

        assert!(config.is_production());
        assert_eq!(config.server_url(), "0.0.0.0:8080");
        assert_eq!(config.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert!(config.seed_demo_on_start);
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_invalid_values() {
        let err = EnvironmentConfig::from_lookup(lookup(&[("PORT", "abc")])).unwrap_err();
        assert_eq!(err, ConfigError::Invalid { name: "PORT", value: "abc".to_string() });

        let err = EnvironmentConfig::from_lookup(lookup(&[("SEED_DEMO_ON_START", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "SEED_DEMO_ON_START", .. }));
    }
}
