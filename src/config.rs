use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: Logging,
    pub parser: ParserCfg,
    pub render: RenderCfg,
    pub json: JsonCfg,
}

impl Config {
    pub fn load(path_opt: Option<&Path>) -> Result<Self> {
        let default_path = Path::new("config.toml");
        let path = if let Some(p) = path_opt {
            Some(p)
        } else if default_path.exists() {
            Some(default_path)
        } else {
            None
        };

        let Some(path) = path else {
            return Ok(Config::default());
        };

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed reading config file: {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))
    }

    pub fn to_toml_pretty(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed serializing config as TOML")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub format: String,
    pub debug_cue_samples: usize,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            debug_cue_samples: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserCfg {
    /// Terminators seen before a paragraph break is appended to a cue.
    pub sentence_break_threshold: usize,
    pub sentence_terminators: String,
    /// Drop NOTE / STYLE / REGION blocks instead of reporting them as malformed.
    pub skip_metadata_blocks: bool,
}

impl Default for ParserCfg {
    fn default() -> Self {
        Self {
            sentence_break_threshold: 10,
            sentence_terminators: ".?!".to_string(),
            skip_metadata_blocks: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderCfg {
    pub wrap_width: usize,
    /// Prefix for cues hidden by the current search.
    pub dim_marker: String,
    /// Prefix for the cue under the playhead.
    pub play_marker: String,
    pub show_timestamps: bool,
}

impl Default for RenderCfg {
    fn default() -> Self {
        Self {
            wrap_width: 80,
            dim_marker: "~".to_string(),
            play_marker: ">".to_string(),
            show_timestamps: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonCfg {
    pub time_units: String,
    pub wrapped: bool,
}

impl Default for JsonCfg {
    fn default() -> Self {
        Self {
            time_units: "ms".to_string(),
            wrapped: true,
        }
    }
}

pub fn init_tracing(logging: &Logging, cli_override_level: Option<&str>) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = cli_override_level.unwrap_or(logging.level.as_str());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let is_json = logging.format.eq_ignore_ascii_case("json");

    // Log output goes to stderr so stdout stays clean for command results.
    let res = if is_json {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .event_format(fmt::format().json())
            .with_target(true)
            .try_init()
    } else {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .pretty()
            .try_init()
    };
    res.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    tracing::info!(
        level = level,
        format = logging.format.as_str(),
        "logging initialized"
    );

    Ok(())
}
