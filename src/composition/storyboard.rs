use crate::{
    composition::model::{BoxVertices, FONT_OPTIONS, Phrase, PhraseContent, Position, VfxStyle},
    foundation::error::{StoryfxError, StoryfxResult},
};

const DEFAULT_VFX_ID: &str = "tr_01";
const DEFAULT_FONT_COLOR: &str = "#ffffff";
const DEFAULT_GLOW_TINT: &str = "#ffffff";
const DEFAULT_FONT_SIZE_PX: f64 = 19.0;
const FONT_SIZE_SCALE: f64 = 2.5;
const DEFAULT_BLUR: f64 = 2.0;
const DEFAULT_POSITION: (f64, f64) = (0.5, 0.85);

#[derive(Debug, serde::Deserialize)]
struct RawBlock {
    #[serde(default)]
    block_id: Option<String>,
    #[serde(default)]
    phrases: Option<Vec<RawPhrase>>,
}

#[derive(Debug, serde::Deserialize)]
struct RawPhrase {
    #[serde(default)]
    phrase_id: Option<String>,
    #[serde(default)]
    phrase_text: Option<PhraseContent>,
    start_time: f64,
    end_time: f64,
    #[serde(default)]
    font_size_px: Option<f64>,
    #[serde(default)]
    position: Option<RawPosition>,
    #[serde(default)]
    box_vertices: Option<BoxVertices>,
    #[serde(default)]
    vfx_id: Option<String>,
    #[serde(default)]
    sfx_id: Option<String>,
    #[serde(default)]
    font_color_hex: Option<String>,
    #[serde(default)]
    sfx_gain_db: Option<f64>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct RawPosition {
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
}

/// Parse a storyboard JSON document into a flat, ordered phrase list.
///
/// Block boundaries are discarded. A document without a `timeline` is a
/// [`StoryfxError::Storyboard`] error.
pub fn parse_storyboard(json: &str) -> StoryfxResult<Vec<Phrase>> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| StoryfxError::storyboard(format!("invalid JSON: {e}")))?;
    parse_storyboard_value(&value)
}

pub fn parse_storyboard_value(value: &serde_json::Value) -> StoryfxResult<Vec<Phrase>> {
    let Some(timeline) = value.get("timeline") else {
        return Err(StoryfxError::storyboard(
            "invalid storyboard format: 'timeline' property is missing",
        ));
    };
    let blocks: Vec<RawBlock> = serde_json::from_value(timeline.clone())
        .map_err(|e| StoryfxError::storyboard(format!("invalid timeline: {e}")))?;

    let mut out = Vec::new();
    for (block_index, block) in blocks.into_iter().enumerate() {
        let Some(phrases) = block.phrases else {
            continue;
        };
        let block_key = block
            .block_id
            .clone()
            .unwrap_or_else(|| format!("block{}", block_index + 1));
        for (i, raw) in phrases.into_iter().enumerate() {
            out.push(phrase_from_raw(raw, &block_key, i));
        }
    }

    tracing::debug!(phrases = out.len(), "parsed storyboard");
    Ok(out)
}

fn phrase_from_raw(raw: RawPhrase, block_key: &str, index: usize) -> Phrase {
    let vfx_id = raw.vfx_id.as_deref().unwrap_or(DEFAULT_VFX_ID);
    let pos = raw.position.unwrap_or_default();
    let font_size_px = raw
        .font_size_px
        .filter(|v| *v > 0.0)
        .unwrap_or(DEFAULT_FONT_SIZE_PX);

    Phrase {
        id: raw
            .phrase_id
            .unwrap_or_else(|| format!("{block_key}_{}", index + 1)),
        content: raw
            .phrase_text
            .unwrap_or_else(|| PhraseContent::Text(String::new())),
        start_time: raw.start_time,
        total_duration: raw.end_time - raw.start_time,
        vfx_style: VfxStyle::from_id(vfx_id),
        font_color: raw
            .font_color_hex
            .unwrap_or_else(|| DEFAULT_FONT_COLOR.to_string()),
        glow_tint: DEFAULT_GLOW_TINT.to_string(),
        background_color: None,
        font_family: FONT_OPTIONS[0].1.to_string(),
        font_size: font_size_px * FONT_SIZE_SCALE,
        position: Position {
            x: pos.x.unwrap_or(DEFAULT_POSITION.0) * 100.0,
            y: pos.y.unwrap_or(DEFAULT_POSITION.1) * 100.0,
        },
        box_vertices: raw.box_vertices,
        blur_intensity: DEFAULT_BLUR,
        sfx_id: raw.sfx_id,
        sfx_gain: Some(raw.sfx_gain_db.unwrap_or(0.0)),
    }
}
