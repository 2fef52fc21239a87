use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub argon2: Argon2Config,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
    pub upload: UploadConfig,
    pub rate_limit: RateLimitConfig,
    pub bootstrap: BootstrapConfig,
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub school_name: String,
    pub academic_year: String,
    pub semester: u8,
    pub environment: String,
    pub log_level: String,
    /// Route groups mounted by the `spada` binary.
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// Timeouts, in milliseconds except `keep_alive` (seconds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(skip_serializing, default)] // never echoed back
    pub secret: String,
    /// Minutes.
    pub access_token_expiry: i64,
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    pub memory_cost: u32, // KiB
    pub time_cost: u32,
    pub parallelism: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // backend inferred from the scheme
    pub pool_size: u32,
    pub timeout: u64,   // seconds
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(rename = "type")]
    pub cache_type: String,
    pub default_ttl: u64,
    pub redis: RedisConfig,
    pub memory: MemoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    pub key_prefix: String,
    pub pool_size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub max_capacity: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub max_age: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub dir: String,
    pub max_size: usize,            // bytes per file
    pub allowed_types: Vec<String>, // extensions, with leading dot
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub login_max_requests: u32,
    pub login_window_secs: u64,
}

/// Account created on first start when the users table is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    pub admin_username: String,
    pub admin_email: String,
    /// Empty means a random password is generated and logged once.
    #[serde(skip_serializing, default)]
    pub admin_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Milliseconds.
    pub upstream_timeout: u64,
    pub routes: Vec<GatewayRoute>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GatewayRoute {
    pub prefix: String,
    pub upstream: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let upstream = |prefix: &str, port: u16| GatewayRoute {
            prefix: prefix.to_string(),
            upstream: format!("http://127.0.0.1:{port}"),
        };

        Self {
            app: AppSettings {
                school_name: "SPADA".to_string(),
                academic_year: "2025/2026".to_string(),
                semester: 1,
                environment: "development".to_string(),
                log_level: "info".to_string(),
                services: super::ALL_SERVICES.iter().map(|s| s.to_string()).collect(),
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                unix_socket_path: String::new(),
                workers: 0,
                max_workers: 8,
                timeouts: TimeoutConfig {
                    client_request: 5000,
                    client_disconnect: 1000,
                    keep_alive: 30,
                },
                limits: LimitConfig {
                    max_payload_size: 32 * 1024 * 1024,
                },
            },
            jwt: JwtConfig {
                secret: String::new(),
                access_token_expiry: 1440,
            },
            argon2: Argon2Config {
                memory_cost: 19_456,
                time_cost: 2,
                parallelism: 1,
            },
            database: DatabaseConfig {
                url: "sqlite://spada.db?mode=rwc".to_string(),
                pool_size: 10,
                timeout: 30,
            },
            cache: CacheConfig {
                cache_type: "moka".to_string(),
                default_ttl: 3600,
                redis: RedisConfig {
                    url: "redis://127.0.0.1:6379".to_string(),
                    key_prefix: "spada:".to_string(),
                    pool_size: 8,
                },
                memory: MemoryConfig {
                    max_capacity: 10_000,
                },
            },
            cors: CorsConfig {
                allowed_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
                max_age: 86400,
            },
            upload: UploadConfig {
                dir: "uploads".to_string(),
                max_size: 20 * 1024 * 1024,
                allowed_types: [
                    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".txt", ".zip",
                    ".rar", ".7z", ".jpg", ".jpeg", ".png", ".gif", ".webp",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            },
            rate_limit: RateLimitConfig {
                login_max_requests: 5,
                login_window_secs: 60,
            },
            bootstrap: BootstrapConfig {
                admin_username: "admin".to_string(),
                admin_email: "admin@spada.local".to_string(),
                admin_password: String::new(),
            },
            gateway: GatewayConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                upstream_timeout: 30_000,
                routes: vec![
                    upstream("/api/v1/auth", 8081),
                    upstream("/api/v1/users", 8081),
                    upstream("/api/v1/classes", 8082),
                    upstream("/api/v1/subjects", 8082),
                    upstream("/api/v1/topics", 8082),
                    upstream("/api/v1/materials", 8082),
                    upstream("/api/v1/assignments", 8083),
                    upstream("/api/v1/submissions", 8083),
                    upstream("/api/v1/grades", 8083),
                    upstream("/api/v1/attendances", 8084),
                    upstream("/api/v1/admin", 8085),
                    upstream("/api/v1/system", 8085),
                    upstream("/api/v1/announcements", 8086),
                    upstream("/api/v1/homeroom", 8087),
                    upstream("/api/v1/schedules", 8088),
                    upstream("/api/v1/files", 8089),
                ],
            },
        }
    }
}
