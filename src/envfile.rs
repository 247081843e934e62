//! `.env` file grammar: one `key=value` pair per line.
//!
//! Purely mechanical splitting, no type inference. Keys are trimmed and
//! lower-cased on store; values are trimmed and may contain `=`.

use crate::error::{ConfigError, Result};
use crate::provider::EnvProvider;
use std::path::Path;

/// Split `.env` content into (key, value) pairs.
///
/// Blank lines are skipped; lines whose first non-space character is `#` are
/// comments. A non-comment line without `=` aborts the parse with a
/// [`ConfigError::Format`] naming the 1-based line number.
pub fn parse_env_lines(content: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            return Err(ConfigError::format(
                idx + 1,
                format!("expected `key=value`, got {trimmed:?}"),
            ));
        };
        pairs.push((
            key.trim().to_lowercase(),
            value.trim().to_string(),
        ));
    }
    Ok(pairs)
}

/// Read a `.env` file and store its pairs into `env`.
pub fn load_env_file(path: &Path, env: &mut impl EnvProvider) -> Result<()> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::io("read", path, e))?;
    for (key, value) in parse_env_lines(&content)? {
        env.set(&key, &value);
    }
    Ok(())
}
