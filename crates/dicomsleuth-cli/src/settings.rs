//! Effective configuration: the JSON config file (if any) with command-line
//! overrides applied on top.

use crate::args::GlobalArgs;
use anyhow::{bail, Context, Result};
use dicomsleuth_core::config::ScanConfig;
use dicomsleuth_core::model::{FieldKind, FieldSpec};

/// Load the config file named by `--config` (or defaults) and apply flags.
pub fn resolve_config(global: &GlobalArgs) -> Result<ScanConfig> {
    let mut config = match &global.config {
        Some(path) => ScanConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ScanConfig::default(),
    };

    if let Some(workers) = global.workers {
        config.workers = Some(workers);
    }
    if let Some(sentinel) = &global.sentinel {
        config.sentinel = sentinel.clone();
    }
    if global.skip_hidden {
        config.skip_hidden = true;
    }
    Ok(config)
}

/// Parse `Name` or `Name:kind` into a field spec.
pub fn parse_field(raw: &str) -> Result<FieldSpec> {
    let (name, kind) = match raw.split_once(':') {
        Some((name, kind)) => (name, parse_kind(kind)?),
        None => (raw, FieldKind::Text),
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("empty field name in `{raw}`");
    }
    Ok(FieldSpec::new(name, kind))
}

fn parse_kind(kind: &str) -> Result<FieldKind> {
    match kind.trim().to_ascii_lowercase().as_str() {
        "text" | "str" => Ok(FieldKind::Text),
        "integer" | "int" => Ok(FieldKind::Integer),
        "decimal" | "float" => Ok(FieldKind::Decimal),
        other => bail!("unknown field kind `{other}` (expected text, integer or decimal)"),
    }
}

/// Split a `--fields` value on commas without breaking tag expressions.
///
/// A comma inside parentheses, or between two groups of four hex digits
/// (`0010,0020`), is part of the tag rather than a separator.
pub fn split_fields(raw: &str) -> Vec<String> {
    let mut pieces: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for ch in raw.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                pieces.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }
    pieces.push(current);

    let mut fields: Vec<String> = Vec::with_capacity(pieces.len());
    for piece in pieces {
        let piece = piece.trim();
        match fields.last_mut() {
            Some(prev) if is_hex_group(prev) && starts_with_hex_group(piece) => {
                prev.push(',');
                prev.push_str(piece);
            }
            _ => fields.push(piece.to_string()),
        }
    }
    fields.retain(|f| !f.is_empty());
    fields
}

fn is_hex_group(s: &str) -> bool {
    s.len() == 4 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// `EEEE` or `EEEE:kind`.
fn starts_with_hex_group(s: &str) -> bool {
    let element = s.split_once(':').map_or(s, |(tag, _)| tag);
    is_hex_group(element.trim())
}

/// Replace the configured field list with `--fields`, when given.
pub fn apply_fields(config: &mut ScanConfig, fields: &[String]) -> Result<()> {
    let specs = fields
        .iter()
        .flat_map(|raw| split_fields(raw))
        .map(|f| parse_field(&f))
        .collect::<Result<Vec<_>>>()?;
    if !specs.is_empty() {
        config.fields = specs;
    }
    Ok(())
}
