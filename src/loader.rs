//! Entry-point facade: dispatch a config file to the right load path.
//!
//! `.env` files load into the environment provider and bind against it;
//! `.yaml` files go through the YAML-subset reader. Both paths end in the
//! same binding engine.

use crate::bind::{Bindable, ProviderResolver, bind};
use crate::envfile::load_env_file;
use crate::error::{ConfigError, Result};
use crate::provider::{EnvProvider, ProcessEnv};
use crate::yaml::{self, MappingResolver};
use std::path::Path;
use tracing::{debug, warn};

/// Loads configuration files into [`Bindable`] targets.
///
/// Holds the environment provider that `.env` files are stored into and
/// that environment-sourced fields resolve against.
#[derive(Debug, Default)]
pub struct Loader<P: EnvProvider> {
    env: P,
}

impl Loader<ProcessEnv> {
    /// Loader over the real process environment (with a write overlay, so
    /// loading never mutates the process-global table).
    pub fn new() -> Self {
        Self {
            env: ProcessEnv::new(),
        }
    }
}

impl<P: EnvProvider> Loader<P> {
    /// Loader over an injected provider; use with
    /// [`MemoryEnv`](crate::MemoryEnv) for isolated tests.
    pub fn with_provider(env: P) -> Self {
        Self { env }
    }

    /// Load the file at `path` and bind it into `target`.
    ///
    /// Dispatches on the final `.`-delimited extension: `env` loads the file
    /// into the provider and binds against it; `yaml` parses the subset
    /// grammar and binds from the resulting mapping. Any other extension is
    /// a no-op success — a long-standing quirk kept for compatibility, so a
    /// typo'd path binds nothing rather than failing.
    pub fn load<T: Bindable>(&mut self, target: &mut T, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Structural(
                "config file path must not be empty".to_string(),
            ));
        }

        // Dispatch on the final `.`-delimited segment of the whole path, so
        // extension-only names like `.env` still dispatch.
        let display = path.to_string_lossy();
        match display.rsplit('.').next().unwrap_or("") {
            "env" => {
                debug!(path = %path.display(), "loading .env file");
                load_env_file(path, &mut self.env)?;
                bind(target, &ProviderResolver(&self.env))
            }
            "yaml" => {
                debug!(path = %path.display(), "loading YAML-subset file");
                let mapping = yaml::parse_file(path)?;
                bind(target, &MappingResolver::new(&mapping))
            }
            _ => {
                warn!(path = %path.display(), "unrecognized config extension, binding nothing");
                Ok(())
            }
        }
    }

    /// The provider `.env` pairs were loaded into.
    pub fn env(&self) -> &P {
        &self.env
    }

    /// Mutable access to the provider, e.g. to seed keys before loading.
    pub fn env_mut(&mut self) -> &mut P {
        &mut self.env
    }
}

/// Load a config file into `target` using the process environment.
///
/// Convenience over [`Loader::new`] for one-shot loads.
pub fn load_config<T: Bindable>(target: &mut T, path: impl AsRef<Path>) -> Result<()> {
    Loader::new().load(target, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::Binder;
    use crate::provider::MemoryEnv;
    use tempfile::TempDir;

    #[derive(Debug, Default, PartialEq)]
    struct AppConfig {
        name: String,
        port: u16,
        verbose: bool,
    }

    impl Bindable for AppConfig {
        fn bind(&mut self, b: &mut Binder<'_>) -> Result<()> {
            b.field("APP_NAME").bind(&mut self.name)?;
            b.field("APP_PORT").default("8080").bind(&mut self.port)?;
            b.field("APP_VERBOSE").bind(&mut self.verbose)?;
            Ok(())
        }
    }

    #[test]
    fn test_env_file_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.env");
        std::fs::write(&path, "APP_NAME=demo\nAPP_PORT=9000\nAPP_VERBOSE=true\n").unwrap();

        let mut config = AppConfig::default();
        let mut loader = Loader::with_provider(MemoryEnv::new());
        loader.load(&mut config, &path).unwrap();
        assert_eq!(
            config,
            AppConfig {
                name: "demo".to_string(),
                port: 9000,
                verbose: true,
            }
        );
    }

    #[test]
    fn test_yaml_file_dispatch() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "APP_NAME: demo\nAPP_PORT: 9000\n").unwrap();

        let mut config = AppConfig::default();
        let mut loader = Loader::with_provider(MemoryEnv::new());
        loader.load(&mut config, &path).unwrap();
        assert_eq!(config.name, "demo");
        assert_eq!(config.port, 9000);
        assert!(!config.verbose);
    }

    #[test]
    fn test_unrecognized_extension_is_noop_success() {
        let mut config = AppConfig::default();
        let mut loader = Loader::with_provider(MemoryEnv::new());
        loader.load(&mut config, "config.toml").unwrap();
        // nothing was bound, defaults in the binder were not consulted either
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_empty_path_is_structural_error() {
        let mut config = AppConfig::default();
        let mut loader = Loader::with_provider(MemoryEnv::new());
        let err = loader.load(&mut config, "").unwrap_err();
        assert!(matches!(err, ConfigError::Structural(_)));
    }

    #[test]
    fn test_missing_env_file_is_io_error() {
        let mut config = AppConfig::default();
        let mut loader = Loader::with_provider(MemoryEnv::new());
        let err = loader.load(&mut config, "/nonexistent/app.env").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_loaded_pairs_visible_through_provider() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.env");
        std::fs::write(&path, "APP_NAME=demo\n").unwrap();

        let mut config = AppConfig::default();
        let mut loader = Loader::with_provider(MemoryEnv::new());
        loader.load(&mut config, &path).unwrap();
        assert_eq!(loader.env().get("APP_NAME").as_deref(), Some("demo"));
    }
}
