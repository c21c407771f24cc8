use anyhow::{anyhow, Context, Result};
use rag_studio_chunker::StrategyOptions;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Parse a `key=value` override; the value is read as JSON, falling back to a plain string
pub fn parse_override(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing option name in '{raw}'"));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Load strategy options from a JSON or TOML file
pub fn load_options_file(path: &Path) -> Result<StrategyOptions> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read config {}", path.display()))?;
    parse_options(&bytes).with_context(|| format!("Invalid config {}", path.display()))
}

fn parse_options(bytes: &[u8]) -> Result<StrategyOptions> {
    let value: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(json_err) => {
            let utf8 = std::str::from_utf8(bytes).map_err(|err| anyhow!("{json_err}; {err}"))?;
            let toml_value: toml::Value = toml::from_str(utf8).map_err(|toml_err| {
                anyhow!("Config is not valid JSON or TOML ({json_err}); TOML parse error: {toml_err}")
            })?;
            serde_json::to_value(toml_value)
                .map_err(|err| anyhow!("Failed to convert TOML config to JSON: {err}"))?
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("Config must be a table of strategy options, got {other}"),
    }
}

/// File options first, then command-line overrides in order
pub fn merge_options(
    file: Option<StrategyOptions>,
    overrides: Vec<(String, Value)>,
) -> StrategyOptions {
    let mut options = file.unwrap_or_default();
    for (key, value) in overrides {
        log::debug!("option override {key}={value}");
        options.insert(key, value);
    }
    options
}
