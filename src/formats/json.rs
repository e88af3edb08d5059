use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use serde_json::Value;

use crate::{config::JsonCfg, model::CueCollection};

#[derive(Debug, Clone, Serialize)]
pub struct WrappedJson {
    pub schema: String,
    pub version: u32,
    pub cues: Vec<JsonCue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonCue {
    pub index: usize,
    pub start: Value,
    pub end: Value,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

/// Projects cues for a rendering layer. `visibility` comes from a search, if any.
pub fn write_json(
    cues: &CueCollection,
    cfg: &JsonCfg,
    visibility: Option<&[(usize, bool)]>,
) -> Result<String> {
    let visible_by_index: Option<HashMap<usize, bool>> =
        visibility.map(|v| v.iter().copied().collect());

    let items: Vec<JsonCue> = cues
        .iter()
        .map(|c| JsonCue {
            index: c.index,
            start: encode_time(c.start_ms, &cfg.time_units),
            end: encode_time(c.end_ms, &cfg.time_units),
            text: c.text.clone(),
            visible: visible_by_index
                .as_ref()
                .and_then(|m| m.get(&c.index).copied()),
        })
        .collect();

    if cfg.wrapped {
        let w = WrappedJson {
            schema: "vtt-transcript.cues".to_string(),
            version: 1,
            cues: items,
        };
        Ok(serde_json::to_string_pretty(&w)?)
    } else {
        Ok(serde_json::to_string_pretty(&items)?)
    }
}

fn encode_time(ms: u64, units: &str) -> Value {
    match units {
        "seconds" => Value::from((ms as f64) / 1000.0),
        _ => Value::from(ms),
    }
}
