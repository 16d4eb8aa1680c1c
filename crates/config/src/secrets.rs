use secrecy::Secret;

use crate::error::{ConfigError, Result};

/// Credentials resolved once at startup from the process environment.
///
/// The API key never appears in config files or logs; `secrecy` keeps it
/// out of `Debug` output.
pub struct Secrets {
    pub gemini_api_key: Secret<String>,
}

impl Secrets {
    pub const GEMINI_API_KEY: &'static str = "GEMINI_API_KEY";

    /// Resolve secrets from the environment. Missing or empty credentials
    /// are startup-fatal.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(Self::GEMINI_API_KEY)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingCredential(Self::GEMINI_API_KEY))?;
        Ok(Self {
            gemini_api_key: Secret::new(api_key),
        })
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn resolves_present_key() {
        let secrets = Secrets::from_lookup(|_| Some("test-key".into())).expect("resolve");
        assert_eq!(secrets.gemini_api_key.expose_secret(), "test-key");
    }

    #[test]
    fn missing_key_is_fatal() {
        let err = Secrets::from_lookup(|_| None).expect_err("should fail");
        assert!(matches!(err, ConfigError::MissingCredential(_)));
    }

    #[test]
    fn blank_key_is_fatal() {
        let err = Secrets::from_lookup(|_| Some("   ".into())).expect_err("should fail");
        assert!(matches!(err, ConfigError::MissingCredential(_)));
    }
}
