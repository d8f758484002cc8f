use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub spin_wheel: SpinWheelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expires_in: i64, // seconds
}

/// 转盘业务参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinWheelConfig {
    /// 首次发放的抽奖次数
    pub first_time_spins: i64,
    /// 随机发放命中概率 (basis points, 100% = 10000)
    pub random_grant_probability_bp: i32,
    /// 随机发放冷却 (小时)
    pub random_grant_cooldown_hours: i64,
}

impl Default for SpinWheelConfig {
    fn default() -> Self {
        Self {
            first_time_spins: 3,
            random_grant_probability_bp: 500,
            random_grant_cooldown_hours: 24,
        }
    }
}

impl Config {
    pub fn from_toml() -> anyhow::Result<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件, 如果不存在则完全依赖环境变量
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                // 有配置文件: 先解析再用环境变量覆盖
                toml::from_str(&config_str)
                    .map_err(|e| anyhow::anyhow!("解析配置文件失败: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // 无配置文件: 使用环境变量与默认值构建
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // 数据库 URL 在无配置文件时必须提供
                let database_url = get_env("DATABASE_URL").ok_or_else(|| {
                    anyhow::anyhow!("缺少 DATABASE_URL 环境变量, 且未找到配置文件 config.toml")
                })?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        access_token_expires_in: get_env_parse("JWT_ACCESS_EXPIRES_IN", 7200i64),
                    },
                    spin_wheel: SpinWheelConfig {
                        first_time_spins: get_env_parse("SPIN_WHEEL_FIRST_TIME_SPINS", 3i64),
                        random_grant_probability_bp: get_env_parse(
                            "SPIN_WHEEL_RANDOM_GRANT_PROBABILITY_BP",
                            500i32,
                        ),
                        random_grant_cooldown_hours: get_env_parse(
                            "SPIN_WHEEL_RANDOM_GRANT_COOLDOWN_HOURS",
                            24i64,
                        ),
                    },
                }
            }
            Err(e) => {
                return Err(anyhow::anyhow!("无法读取配置文件 {config_path}: {e}"));
            }
        };

        // 环境变量覆盖 (即便文件存在时也覆盖)
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            config.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_ACCESS_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            config.jwt.access_token_expires_in = n;
        }
        if let Ok(v) = env::var("SPIN_WHEEL_FIRST_TIME_SPINS")
            && let Ok(n) = v.parse()
        {
            config.spin_wheel.first_time_spins = n;
        }
        if let Ok(v) = env::var("SPIN_WHEEL_RANDOM_GRANT_PROBABILITY_BP")
            && let Ok(n) = v.parse()
        {
            config.spin_wheel.random_grant_probability_bp = n;
        }
        if let Ok(v) = env::var("SPIN_WHEEL_RANDOM_GRANT_COOLDOWN_HOURS")
            && let Ok(n) = v.parse()
        {
            config.spin_wheel.random_grant_cooldown_hours = n;
        }

        Ok(config)
    }
}
