//! Lock integration configuration.

use serde::Deserialize;

/// Configuration for the vendor lock account.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// Vendor account username.
    pub username: String,
    /// Vendor account password.
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_empty_credentials() {
        let config = LockConfig::default();
        assert!(config.username.is_empty());
        assert!(config.password.is_empty());
    }

    #[test]
    fn should_parse_toml() {
        let config: LockConfig = toml::from_str(
            "
            username = 'user@example.com'
            password = 'hunter2'
            ",
        )
        .unwrap();
        assert_eq!(config.username, "user@example.com");
        assert_eq!(config.password, "hunter2");
    }
}
