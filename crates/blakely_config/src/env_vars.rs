//! Environment variable naming for secrets.
//!
//! Secrets never live in the config files. They are looked up under
//! `BLAKELY_SECRET_<SECTION>_<KEY>` first and then under the legacy
//! `<SECTION>_<KEY>` name (e.g. `STRIPE_SECRET_KEY`).

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "BLAKELY";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "BLAKELY_SECRET";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Convert a secret path to an environment variable name
///
/// `"stripe.secret_key"` becomes `"BLAKELY_SECRET_STRIPE_SECRET_KEY"`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to its legacy environment variable name
///
/// `"stripe.secret_key"` becomes `"STRIPE_SECRET_KEY"`.
pub fn legacy_secret_path_to_env_var(path: &str) -> String {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() < 2 {
        return path.to_uppercase();
    }

    let service = parts[0];
    let key = parts[1..].join(SECRET_SEPARATOR);
    format!("{}_{}", service, key).to_uppercase()
}

/// Get the value of a secret, trying the prefixed name before the legacy one.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    let env_var = secret_path_to_env_var(path);
    if let Ok(value) = env::var(&env_var) {
        return Some(value);
    }

    let legacy_env_var = legacy_secret_path_to_env_var(path);
    env::var(&legacy_env_var).ok()
}
