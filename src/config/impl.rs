use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

const DEVELOPMENT_JWT_SECRET: &str = "spada-development-secret-change-me";

impl AppConfig {
    /// Loads the configuration.
    ///
    /// Sources, later ones winning: compiled-in defaults, `config.toml`,
    /// `config.{APP_ENV}.toml`, `SPADA_*` environment variables, then the
    /// conventional variables such as `JWT_SECRET` and `DATABASE_URL`.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::with_name("config").required(false))
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            .add_source(
                Environment::with_prefix("SPADA")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("app.services")
                    .try_parsing(true),
            );

        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("cache.redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option(
                "cache.redis.key_prefix",
                std::env::var("REDIS_KEY_PREFIX").ok(),
            )?
            .set_override_option("cache.default_ttl", std::env::var("REDIS_TTL").ok())?
            .set_override_option("gateway.port", std::env::var("GATEWAY_PORT").ok())?
            .set_override_option(
                "bootstrap.admin_password",
                std::env::var("ADMIN_PASSWORD").ok(),
            )?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        if app_config.jwt.secret.is_empty() {
            if app_config.is_production() {
                return Err(ConfigError::Message(
                    "jwt.secret must be set in production".to_string(),
                ));
            }
            app_config.jwt.secret = DEVELOPMENT_JWT_SECRET.to_string();
        }

        Ok(app_config)
    }

    /// Global configuration instance.
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// Called once at startup.
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn gateway_bind_address(&self) -> String {
        format!("{}:{}", self.gateway.host, self.gateway.port)
    }

    /// Whether the route group `name` is mounted by this process.
    pub fn service_enabled(&self, name: &str) -> bool {
        self.app
            .services
            .iter()
            .any(|s| s == "all" || s.eq_ignore_ascii_case(name))
    }

    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_every_service() {
        let config = AppConfig::default();
        for name in super::super::ALL_SERVICES {
            assert!(config.service_enabled(name), "{name} should be enabled");
        }
    }

    #[test]
    fn test_service_selection() {
        let mut config = AppConfig::default();
        config.app.services = vec!["users".to_string(), "Scheduling".to_string()];
        assert!(config.service_enabled("users"));
        assert!(config.service_enabled("scheduling"));
        assert!(!config.service_enabled("grading"));

        config.app.services = vec!["all".to_string()];
        assert!(config.service_enabled("grading"));
    }

    #[test]
    fn test_defaults_survive_serialization() {
        let config = Config::builder()
            .add_source(Config::try_from(&AppConfig::default()).unwrap())
            .build()
            .unwrap();
        let parsed: AppConfig = config.try_deserialize().unwrap();
        assert_eq!(parsed.server.port, 8080);
        assert_eq!(parsed.gateway.routes.len(), AppConfig::default().gateway.routes.len());
        assert_eq!(parsed.rate_limit.login_max_requests, 5);
    }
}
