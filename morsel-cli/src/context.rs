use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use morsel::{Analyzer, Engine, IndexConfig, StandardAnalyzer};
use serde::Deserialize;

/// On-disk form of the index configuration.
///
/// ```toml
/// default_field = "*"
/// analyzer = "standard"
///
/// [fields.url]
/// indexed = false
///
/// [fields.title]
/// boost = 2.0
/// ```
#[derive(Deserialize)]
struct ConfigFile {
    /// `standard`, or `english_stemmer` when built with the `stemmers` feature.
    #[serde(default)]
    analyzer: Option<String>,
    #[serde(flatten)]
    index: IndexConfig,
}

/// Read an index configuration from a TOML file, or JSON if the file has a
/// `.json` extension.
pub fn load_config(path: &Path) -> Result<IndexConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let file: ConfigFile = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content).context("Failed to parse config JSON")?
    } else {
        toml::from_str(&content).context("Failed to parse config TOML")?
    };

    let mut config = file.index;
    if let Some(name) = file.analyzer {
        config.analyzer = analyzer(&name)?;
    }
    Ok(config)
}

fn analyzer(name: &str) -> Result<Arc<dyn Analyzer>> {
    match name {
        "standard" => Ok(Arc::new(StandardAnalyzer::new())),
        #[cfg(feature = "stemmers")]
        "english_stemmer" => Ok(Arc::new(morsel::StemmingAnalyzer::new())),
        other => bail!("Unknown analyzer '{other}'"),
    }
}

/// Create an engine with `config` and load the data file at `path` into it.
///
/// Files are read as a JSON array of objects unless `lines` is set or the
/// file has a `.txt` extension, in which case every non-empty line becomes a
/// document with a `title` field.
pub fn load_engine(path: &Path, lines: bool, config: IndexConfig) -> Result<Engine> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file {}", path.display()))?;

    let engine = Engine::with_config(config).context("Invalid index configuration")?;
    let as_lines = lines || path.extension().is_some_and(|ext| ext == "txt");
    let loaded = if as_lines {
        engine.load_text_lines(&data)
    } else {
        engine.load_json_array(&data)
    }
    .with_context(|| format!("Failed to load documents from {}", path.display()))?;

    eprintln!("Loaded {loaded} documents from {}.", path.display());
    Ok(engine)
}
