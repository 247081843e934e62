//! # envbind
//!
//! Typed configuration binding: read key/value configuration from process
//! environment variables, `.env`-style files, or a restricted YAML subset,
//! and populate a caller-defined struct field by field.
//!
//! Targets implement [`Bindable`], declaring each bound field's source key
//! plus optional format layout (for timestamps) and default literal:
//!
//! ```
//! use envbind::{Bindable, Binder, ConfigError, MemoryEnv, ProviderResolver};
//! use chrono::{DateTime, Utc};
//!
//! #[derive(Default)]
//! struct AppConfig {
//!     name: String,
//!     port: u16,
//!     started_at: Option<DateTime<Utc>>,
//! }
//!
//! impl Bindable for AppConfig {
//!     fn bind(&mut self, b: &mut Binder<'_>) -> Result<(), ConfigError> {
//!         b.field("APP_NAME").bind(&mut self.name)?;
//!         b.field("APP_PORT").default("8080").bind(&mut self.port)?;
//!         b.field("STARTED_AT").format("%Y-%m-%d").bind(&mut self.started_at)?;
//!         Ok(())
//!     }
//! }
//!
//! let env = MemoryEnv::from_pairs([
//!     ("APP_NAME", "demo"),
//!     ("STARTED_AT", "2022-01-01"),
//! ]);
//! let mut config = AppConfig::default();
//! envbind::bind(&mut config, &ProviderResolver(&env)).unwrap();
//! assert_eq!(config.name, "demo");
//! assert_eq!(config.port, 8080); // absent key, default literal applied
//! assert!(config.started_at.is_some());
//! ```
//!
//! File loading goes through [`Loader::load`] (or the [`load_config`]
//! convenience), which dispatches on extension: `.env` files fill the
//! environment provider, `.yaml` files run through the hand-rolled
//! [YAML-subset reader](crate::yaml). Both paths share one binding engine.
//!
//! The YAML subset is deliberately narrow: flat `key: value` lines plus one
//! level of nested blocks. It is not a YAML parser.

pub mod bind;
pub mod coerce;
pub mod envfile;
pub mod error;
pub mod loader;
pub mod provider;
pub mod time;
pub mod yaml;

pub use bind::{Bindable, Binder, Field, FieldContext, FieldValue, ProviderResolver, Resolver, bind};
pub use coerce::{Scalar, coerce};
pub use error::{ConfigError, Result};
pub use loader::{Loader, load_config};
pub use provider::{EnvProvider, MemoryEnv, ProcessEnv};
pub use time::{FALLBACK_LAYOUTS, TimeError, parse_duration, parse_timestamp, parse_timestamp_any};
pub use yaml::{Mapping, MappingResolver, Node};
