//! Field-by-field binding of resolved config values into target structs.
//!
//! Runtime struct-tag reflection is replaced by a registration-time schema:
//! a target implements [`Bindable`] and declares each bound field once
//! against the [`Binder`], naming its source key and optional format layout
//! and default literal. Both load paths (`.env` provider and YAML-subset
//! mapping) feed the same assignment engine through the [`Resolver`] seam.

use crate::coerce::parse_bool;
use crate::error::{ConfigError, Result};
use crate::provider::EnvProvider;
use crate::time;
use chrono::{DateTime, TimeDelta, Utc};

/// Key lookup the binder resolves fields against.
///
/// `scope` exposes the single supported nesting level; sources without
/// nesting (the environment) keep the default `None`, which makes nested
/// fields resolve as absent and skip.
pub trait Resolver {
    /// Resolve a source key to its raw string value.
    fn get(&self, key: &str) -> Option<String>;

    /// Resolve a source key to a nested sub-resolver, if the source has a
    /// sub-mapping under that key.
    fn scope(&self, _key: &str) -> Option<Box<dyn Resolver + '_>> {
        None
    }
}

/// Adapts an [`EnvProvider`] to the binder's [`Resolver`] seam.
pub struct ProviderResolver<'p, P: EnvProvider>(pub &'p P);

impl<P: EnvProvider> Resolver for ProviderResolver<'_, P> {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key)
    }
}

/// A target record that can be populated from resolved config keys.
///
/// Implementations declare every bound field exactly once; fields that are
/// not declared are simply never touched.
///
/// # Example
/// ```
/// use envbind::{Bindable, Binder, ConfigError};
///
/// #[derive(Default)]
/// struct ServerConfig {
///     host: String,
///     port: u16,
/// }
///
/// impl Bindable for ServerConfig {
///     fn bind(&mut self, b: &mut Binder<'_>) -> Result<(), ConfigError> {
///         b.field("HOST").bind(&mut self.host)?;
///         b.field("PORT").default("8080").bind(&mut self.port)?;
///         Ok(())
///     }
/// }
/// ```
pub trait Bindable {
    fn bind(&mut self, binder: &mut Binder<'_>) -> Result<()>;
}

/// Bind `target`'s declared fields against `resolver`.
///
/// Fail-fast and non-transactional: when an error is returned, fields that
/// were assigned before the failing one keep their values.
pub fn bind<T: Bindable>(target: &mut T, resolver: &dyn Resolver) -> Result<()> {
    target.bind(&mut Binder::new(resolver))
}

/// Drives one bind pass over a target's declared fields.
pub struct Binder<'r> {
    resolver: &'r dyn Resolver,
    layout_fallback: bool,
}

impl<'r> Binder<'r> {
    /// Binder with the default (canonical) temporal policy: a timestamp
    /// field without a format layout is a [`ConfigError::MissingFormat`].
    pub fn new(resolver: &'r dyn Resolver) -> Self {
        Self {
            resolver,
            layout_fallback: false,
        }
    }

    /// Compatibility mode: timestamp fields without a layout search
    /// [`time::FALLBACK_LAYOUTS`] in order instead of erroring.
    pub fn with_layout_fallback(resolver: &'r dyn Resolver) -> Self {
        Self {
            resolver,
            layout_fallback: true,
        }
    }

    /// Start declaring a field bound to `key`.
    pub fn field<'b>(&'b mut self, key: &'b str) -> Field<'b> {
        Field {
            resolver: self.resolver,
            layout_fallback: self.layout_fallback,
            key,
            format: None,
            default: None,
        }
    }
}

/// One field declaration in flight: source key plus optional annotations.
pub struct Field<'b> {
    resolver: &'b dyn Resolver,
    layout_fallback: bool,
    key: &'b str,
    format: Option<&'b str>,
    default: Option<&'b str>,
}

impl<'b> Field<'b> {
    /// Chrono format layout for a timestamp field.
    pub fn format(mut self, layout: &'b str) -> Self {
        self.format = Some(layout);
        self
    }

    /// Fallback literal used when the key is absent or resolves empty.
    pub fn default(mut self, literal: &'b str) -> Self {
        self.default = Some(literal);
        self
    }

    /// Resolve the key and assign the parsed value into `slot`.
    ///
    /// Resolution order: a present, non-empty value wins; otherwise the
    /// default literal; otherwise the field is skipped and keeps its current
    /// value. An empty string from the source falls through to the default.
    pub fn bind<T: FieldValue>(self, slot: &mut T) -> Result<()> {
        let raw = match self.resolver.get(self.key) {
            Some(value) if !value.is_empty() => value,
            _ => match self.default {
                Some(literal) => literal.to_string(),
                None => return Ok(()),
            },
        };
        let ctx = FieldContext {
            key: self.key,
            format: self.format,
            layout_fallback: self.layout_fallback,
        };
        slot.assign(&raw, &ctx)
    }

    /// Bind a nested record (one level) from the source's sub-mapping under
    /// this key. Sources without nesting resolve no scope and skip.
    pub fn nested<T: Bindable>(self, target: &mut T) -> Result<()> {
        match self.resolver.scope(self.key) {
            Some(sub) => {
                let mut binder = Binder {
                    resolver: &*sub,
                    layout_fallback: self.layout_fallback,
                };
                target.bind(&mut binder)
            }
            None => Ok(()),
        }
    }
}

/// Per-field context handed to [`FieldValue::assign`].
pub struct FieldContext<'a> {
    /// Source key, used to name the field in errors.
    pub key: &'a str,
    /// Format layout annotation, if declared.
    pub format: Option<&'a str>,
    /// Whether the binder allows the fallback layout search.
    pub layout_fallback: bool,
}

/// A field type the binder knows how to assign from a raw string.
///
/// There is no "unrecognized kind" at runtime: a type without an impl cannot
/// be declared against the binder at all.
pub trait FieldValue {
    fn assign(&mut self, raw: &str, ctx: &FieldContext<'_>) -> Result<()>;
}

impl FieldValue for String {
    fn assign(&mut self, raw: &str, _ctx: &FieldContext<'_>) -> Result<()> {
        *self = raw.to_string();
        Ok(())
    }
}

impl FieldValue for bool {
    fn assign(&mut self, raw: &str, ctx: &FieldContext<'_>) -> Result<()> {
        *self = parse_bool(raw).ok_or_else(|| ConfigError::bind(ctx.key, raw, "bool"))?;
        Ok(())
    }
}

macro_rules! parse_field_value {
    ($($ty:ty),*) => {$(
        impl FieldValue for $ty {
            fn assign(&mut self, raw: &str, ctx: &FieldContext<'_>) -> Result<()> {
                *self = raw
                    .parse()
                    .map_err(|_| ConfigError::bind(ctx.key, raw, stringify!($ty)))?;
                Ok(())
            }
        }
    )*};
}

parse_field_value!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl FieldValue for DateTime<Utc> {
    fn assign(&mut self, raw: &str, ctx: &FieldContext<'_>) -> Result<()> {
        *self = parse_timestamp_field(raw, ctx)?;
        Ok(())
    }
}

/// Optional timestamp: the nullable form of a temporal field. Absent keys
/// leave it `None`; a resolved value stores `Some(parsed)`.
impl FieldValue for Option<DateTime<Utc>> {
    fn assign(&mut self, raw: &str, ctx: &FieldContext<'_>) -> Result<()> {
        *self = Some(parse_timestamp_field(raw, ctx)?);
        Ok(())
    }
}

impl FieldValue for TimeDelta {
    fn assign(&mut self, raw: &str, ctx: &FieldContext<'_>) -> Result<()> {
        *self = time::parse_duration(raw)
            .map_err(|e| ConfigError::bind(ctx.key, raw, e.to_string()))?;
        Ok(())
    }
}

fn parse_timestamp_field(raw: &str, ctx: &FieldContext<'_>) -> Result<DateTime<Utc>> {
    match ctx.format {
        Some(layout) => time::parse_timestamp(layout, raw)
            .map_err(|e| ConfigError::bind(ctx.key, raw, e.to_string())),
        None if ctx.layout_fallback => time::parse_timestamp_any(raw)
            .map_err(|e| ConfigError::bind(ctx.key, raw, e.to_string())),
        None => Err(ConfigError::MissingFormat {
            field: ctx.key.to_string(),
        }),
    }
}
