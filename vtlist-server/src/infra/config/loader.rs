use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use url::Url;

use super::{
    models::{
        AuthConfig, Config, ConfigMetadata, CorsConfig, DEFAULT_MAX_CONNECTIONS,
        DEFAULT_PASSWORD_PEPPER, DEFAULT_TOKEN_SECRET, DEFAULT_TOKEN_TTL_SECS,
        DatabaseConfig, ServerConfig,
    },
    sources::{EnvConfig, FileConfig, FileDatabaseConfig},
    validation::{self, ConfigGuardRailError, ConfigWarnings},
};

const DEFAULT_CONFIG_LOCATIONS: [&str; 2] = ["vtlist.toml", "config/vtlist.toml"];

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        self.load_from(EnvConfig::gather(), env_file_loaded)
    }

    /// Resolve against an already gathered environment.
    pub fn load_from(
        &self,
        env_config: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env_config)?;

        let (config, warnings) = self.compose_config(
            file_config,
            env_config,
            config_path,
            env_file_loaded,
        )?;

        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let mut source = ConfigPathSource::default();

        if let Some(explicit) = &self.options.config_path {
            source.explicit = Some(explicit.clone());
        } else if let Some(from_env) = &env_config.config_path {
            source.env = Some(from_env.clone());
        } else {
            source.default = DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists());
        }

        let Some((path, provenance)) = source.resolved_path() else {
            return Ok((None, None));
        };

        if !path.exists() {
            if provenance.is_explicit() {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let contents =
            fs::read_to_string(&path).map_err(|err| ConfigLoadError::Io {
                path: path.clone(),
                source: err,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
                path: path.clone(),
                source: err,
            })?;

        Ok((Some(file_config), Some(path)))
    }

    fn compose_config(
        &self,
        file_config: Option<FileConfig>,
        env: EnvConfig,
        config_path: Option<PathBuf>,
        env_file_loaded: bool,
    ) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();

        if config_path.is_none() {
            warnings.push_with_hint(
                "No vtlist.toml detected; falling back to environment variables",
                "Pass --config or set VTLIST_CONFIG to use a configuration file",
            );
        }

        let FileConfig {
            server: file_server,
            database: file_database,
            cors: file_cors,
            auth: file_auth,
            dev_mode: file_dev_mode,
        } = file_config.unwrap_or_default();

        let server = ServerConfig {
            host: env
                .server_host
                .clone()
                .or(file_server.host)
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: env.server_port.or(file_server.port).unwrap_or(8080),
        };

        let database = DatabaseConfig {
            primary_url: self.resolve_database_url(&env, &file_database)?,
            max_connections: env
                .database_max_connections
                .or(file_database.max_connections)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
        };

        let cors = CorsConfig {
            allowed_origins: env
                .cors_allowed_origins
                .clone()
                .or(file_cors.allowed_origins)
                .unwrap_or_else(default_cors_origins),
        };

        let dev_mode = env.dev_mode.or(file_dev_mode).unwrap_or(false);

        let auth = AuthConfig {
            token_secret: env
                .auth_token_secret
                .clone()
                .or(file_auth.token_secret)
                .unwrap_or_else(|| DEFAULT_TOKEN_SECRET.to_string()),
            token_ttl_secs: env
                .auth_token_ttl_secs
                .or(file_auth.token_ttl_secs)
                .unwrap_or(DEFAULT_TOKEN_TTL_SECS),
            password_pepper: env
                .auth_password_pepper
                .clone()
                .or(file_auth.password_pepper)
                .unwrap_or_else(|| DEFAULT_PASSWORD_PEPPER.to_string()),
        };

        let config = Config {
            server,
            database,
            cors,
            dev_mode,
            auth,
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        };

        let guard_warnings = validation::apply_guard_rails(&config)?;
        warnings.extend(guard_warnings);

        Ok((config, warnings))
    }

    fn resolve_database_url(
        &self,
        env: &EnvConfig,
        file_database: &FileDatabaseConfig,
    ) -> Result<Option<String>, ConfigLoadError> {
        if let Some(url) = env
            .database_url
            .clone()
            .filter(|value| !value.trim().is_empty())
        {
            return Ok(Some(url));
        }

        for path in [
            env.database_url_file.as_ref(),
            file_database.url_file.as_ref(),
        ]
        .into_iter()
        .flatten()
        {
            if let Some(url) = Self::read_secret_file(path)? {
                return Ok(Some(url));
            }
        }

        if let Some(ref stored_url) = file_database.url {
            let trimmed = stored_url.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            let mut parsed = Url::parse(trimmed).map_err(|source| {
                ConfigLoadError::InvalidDatabaseUrl { source }
            })?;
            if parsed.password().is_none()
                && let Some(password) =
                    self.resolve_database_password(env, file_database)?
            {
                parsed
                    .set_password(Some(&password))
                    .map_err(|_| ConfigLoadError::InvalidDatabasePassword)?;
            }
            return Ok(Some(parsed.to_string()));
        }

        let host = non_blank(&env.database_host);
        let user = non_blank(&env.database_user);
        let name = non_blank(&env.database_name);

        if let (Some(host), Some(user), Some(name)) = (host, user, name) {
            let port = env.database_port.unwrap_or(5432);
            let mut url =
                Url::parse(&format!("postgresql://{host}:{port}/{name}"))
                    .map_err(|source| ConfigLoadError::InvalidDatabaseUrl {
                        source,
                    })?;
            url.set_username(&user).map_err(|_| {
                ConfigLoadError::InvalidDatabaseUsername {
                    username: user.clone(),
                }
            })?;
            if let Some(password) =
                self.resolve_database_password(env, file_database)?
            {
                url.set_password(Some(&password))
                    .map_err(|_| ConfigLoadError::InvalidDatabasePassword)?;
            }
            return Ok(Some(url.to_string()));
        }

        Ok(None)
    }

    fn resolve_database_password(
        &self,
        env: &EnvConfig,
        file_database: &FileDatabaseConfig,
    ) -> Result<Option<String>, ConfigLoadError> {
        if let Some(password) = non_blank(&env.database_password) {
            return Ok(Some(password));
        }

        for path in [
            env.database_password_file.as_ref(),
            file_database.password_file.as_ref(),
        ]
        .into_iter()
        .flatten()
        {
            if let Some(secret) = Self::read_secret_file(path)? {
                return Ok(Some(secret));
            }
        }

        Ok(None)
    }

    fn read_secret_file(
        path: &Path,
    ) -> Result<Option<String>, ConfigLoadError> {
        let contents = fs::read_to_string(path).map_err(|source| {
            ConfigLoadError::SecretFileIo {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.clone().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid database URL")]
    InvalidDatabaseUrl {
        #[source]
        source: url::ParseError,
    },
    #[error("invalid database username '{username}'")]
    InvalidDatabaseUsername { username: String },
    #[error("failed to encode database password into URL")]
    InvalidDatabasePassword,
    #[error("failed to read secret file {path}")]
    SecretFileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

#[derive(Debug, Default)]
struct ConfigPathSource {
    explicit: Option<PathBuf>,
    env: Option<PathBuf>,
    default: Option<PathBuf>,
}

impl ConfigPathSource {
    fn resolved_path(&self) -> Option<(PathBuf, ConfigPathProvenance)> {
        if let Some(path) = &self.explicit {
            return Some((path.clone(), ConfigPathProvenance::Explicit));
        }
        if let Some(path) = &self.env {
            return Some((path.clone(), ConfigPathProvenance::Env));
        }
        if let Some(path) = &self.default {
            return Some((path.clone(), ConfigPathProvenance::Default));
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigPathProvenance {
    Explicit,
    Env,
    Default,
}

impl ConfigPathProvenance {
    fn is_explicit(self) -> bool {
        matches!(
            self,
            ConfigPathProvenance::Explicit | ConfigPathProvenance::Env
        )
    }
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn dev_env() -> EnvConfig {
        EnvConfig {
            dev_mode: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn environment_overrides_file_values() {
        let file = write_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 4000

            [database]
            url = "postgresql://vtlist:secret@db/vtlist"
            "#,
        );
        let env = EnvConfig {
            server_port: Some(5000),
            ..dev_env()
        };

        let load = ConfigLoader::new()
            .with_config_path(file.path())
            .load_from(env, false)
            .unwrap();

        assert_eq!(load.config.server.host, "127.0.0.1");
        assert_eq!(load.config.server.port, 5000);
        assert_eq!(
            load.config.database.primary_url.as_deref(),
            Some("postgresql://vtlist:secret@db/vtlist")
        );
        assert_eq!(load.config.metadata.config_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn database_url_is_assembled_from_parts() {
        let env = EnvConfig {
            database_host: Some("db.internal".into()),
            database_user: Some("vtlist".into()),
            database_name: Some("catalogue".into()),
            database_password: Some("p@ss".into()),
            ..dev_env()
        };

        let load = ConfigLoader::new()
            .with_config_path(write_config("").path())
            .load_from(env, false)
            .unwrap();

        let url = Url::parse(load.config.database.primary_url.as_deref().unwrap())
            .unwrap();
        assert_eq!(url.host_str(), Some("db.internal"));
        assert_eq!(url.port(), Some(5432));
        assert_eq!(url.username(), "vtlist");
        assert_eq!(url.password(), Some("p%40ss"));
        assert_eq!(url.path(), "/catalogue");
    }

    #[test]
    fn password_file_fills_file_url_without_password() {
        let secret = write_config("from-file\n");
        let config = write_config(
            r#"
            [database]
            url = "postgresql://vtlist@db/vtlist"
            "#,
        );
        let env = EnvConfig {
            database_password_file: Some(secret.path().to_path_buf()),
            ..dev_env()
        };

        let load = ConfigLoader::new()
            .with_config_path(config.path())
            .load_from(env, false)
            .unwrap();

        let url = Url::parse(load.config.database.primary_url.as_deref().unwrap())
            .unwrap();
        assert_eq!(url.password(), Some("from-file"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let err = ConfigLoader::new()
            .with_config_path("/definitely/not/here/vtlist.toml")
            .load_from(dev_env(), false)
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));
    }

    #[test]
    fn no_database_url_trips_the_guard_rail() {
        let err = ConfigLoader::new()
            .with_config_path(write_config("dev_mode = true").path())
            .load_from(EnvConfig::default(), false)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::GuardRail(ConfigGuardRailError::MissingDatabaseUrl)
        ));
    }

    #[test]
    fn dev_defaults_load_with_warnings() {
        let env = EnvConfig {
            database_url: Some("postgresql://localhost/vtlist".into()),
            ..dev_env()
        };
        let load = ConfigLoader::new()
            .with_config_path(write_config("").path())
            .load_from(env, true)
            .unwrap();

        assert!(load.config.dev_mode);
        assert!(load.config.auth.is_default_token_secret());
        assert_eq!(load.config.auth.token_ttl_secs, DEFAULT_TOKEN_TTL_SECS);
        assert_eq!(
            load.config.database.max_connections,
            DEFAULT_MAX_CONNECTIONS
        );
        assert!(load.config.metadata.env_file_loaded);
        assert!(!load.warnings.is_empty());
    }
}
