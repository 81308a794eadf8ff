// --- File: crates/blakely_config/src/lib.rs ---
use config::{Config, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod env_vars;
pub mod models;
pub use models::*;

pub use config::ConfigError;

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the application configuration.
///
/// Sources are layered in this order, later ones winning:
///
/// 1. `<CONFIG_DIR>/default.{toml,yaml,json}`
/// 2. `<CONFIG_DIR>/<RUN_ENV>.{toml,yaml,json}` (optional)
/// 3. environment variables prefixed with `PREFIX` (default `BLAKELY`), e.g.
///    `BLAKELY__SERVER__PORT=9000`
///
/// `CONFIG_DIR` defaults to `config` and `RUN_ENV` to `debug`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| env_vars::DEFAULT_PREFIX.to_string());

    load_config_from(Path::new(&config_dir), &run_env, &prefix)
}

/// Loads the configuration from an explicit directory, run environment and env prefix.
pub fn load_config_from(
    config_dir: &Path,
    run_env: &str,
    prefix: &str,
) -> Result<AppConfig, ConfigError> {
    let default_path: PathBuf = config_dir.join("default");
    let env_path: PathBuf = config_dir.join(run_env);

    debug!("config: default_path: {}", default_path.display());
    debug!("config: env_path: {}", env_path.display());

    let builder = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(Environment::with_prefix(prefix).separator("__"));

    builder.build()?.try_deserialize()
}

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file named by `DOTENV_OVERRIDE` is used if set, otherwise `.env`. Loading
/// happens at most once per process. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_config_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("blakely-config-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_config_from_default_file() {
        let dir = temp_config_dir("default");
        fs::write(
            dir.join("default.toml"),
            r#"
use_stripe = true

[server]
host = "0.0.0.0"
port = 9090

[database]
url = "sqlite://tmp/test.db"

[stripe]
success_url = "https://example.com/success"
cancel_url = "https://example.com/cancel"
"#,
        )
        .unwrap();

        let config = load_config_from(&dir, "nope", "BLAKELY_TEST_UNUSED").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert!(config.use_stripe);
        assert!(!config.use_vip);
        assert_eq!(config.booking.list_limit, DEFAULT_BOOKING_LIST_LIMIT);
        assert_eq!(
            config.stripe.as_ref().map(|s| s.cancel_url.as_str()),
            Some("https://example.com/cancel")
        );
    }

    #[test]
    fn test_run_env_file_overrides_default() {
        let dir = temp_config_dir("layered");
        fs::write(
            dir.join("default.toml"),
            "[server]\nhost = \"127.0.0.1\"\nport = 8086\n",
        )
        .unwrap();
        fs::write(
            dir.join("production.toml"),
            "use_vip = true\n[server]\nhost = \"127.0.0.1\"\nport = 80\n[booking]\nlist_limit = 50\n",
        )
        .unwrap();

        let config = load_config_from(&dir, "production", "BLAKELY_TEST_UNUSED").unwrap();
        assert_eq!(config.server.port, 80);
        assert!(config.use_vip);
        assert_eq!(config.booking.list_limit, 50);
    }

    #[test]
    fn test_missing_server_section_is_an_error() {
        let dir = temp_config_dir("empty");
        let result = load_config_from(&dir, "nope", "BLAKELY_TEST_EMPTY");
        assert!(result.is_err());
    }
}
