use thiserror::Error;

use super::models::{AuthConfig, Config};

const MIN_SECRET_LENGTH: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("no database URL configured")]
    MissingDatabaseUrl,
    #[error("authentication secret {field} {reason}")]
    WeakSecret { field: &'static str, reason: String },
    #[error("CORS wildcard origins are not allowed when DEV_MODE is false")]
    DangerousCorsWildcard,
    #[error("token TTL must be greater than zero")]
    ZeroTokenTtl,
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if config.database.primary_url.is_none() {
        return Err(ConfigGuardRailError::MissingDatabaseUrl);
    }

    if config.auth.token_ttl_secs == 0 {
        return Err(ConfigGuardRailError::ZeroTokenTtl);
    }

    if config.dev_mode {
        if config.auth.is_default_token_secret() {
            warnings.push_with_hint(
                "AUTH_TOKEN_SECRET uses the built-in development value",
                "Set AUTH_TOKEN_SECRET before running with DEV_MODE=false",
            );
        }
        if config.auth.is_default_pepper() {
            warnings.push_with_hint(
                "AUTH_PASSWORD_PEPPER uses the built-in development value",
                "Changing the pepper later invalidates every stored password",
            );
        }
    } else {
        enforce_secrets(&config.auth)?;
        if config.cors.is_wildcard_included() {
            return Err(ConfigGuardRailError::DangerousCorsWildcard);
        }
    }

    if config.cors.allowed_origins.is_empty() && !config.dev_mode {
        warnings.push(
            "CORS_ALLOWED_ORIGINS is empty; browsers on other origins will be rejected",
        );
    }

    Ok(warnings)
}

fn enforce_secrets(auth: &AuthConfig) -> Result<(), ConfigGuardRailError> {
    if auth.is_default_token_secret() {
        return Err(ConfigGuardRailError::WeakSecret {
            field: "AUTH_TOKEN_SECRET",
            reason: "uses the default placeholder value".into(),
        });
    }

    if auth.token_secret.len() < MIN_SECRET_LENGTH {
        return Err(ConfigGuardRailError::WeakSecret {
            field: "AUTH_TOKEN_SECRET",
            reason: format!("must be at least {MIN_SECRET_LENGTH} characters"),
        });
    }

    if auth.is_default_pepper() {
        return Err(ConfigGuardRailError::WeakSecret {
            field: "AUTH_PASSWORD_PEPPER",
            reason: "uses the default placeholder value".into(),
        });
    }

    Ok(())
}
