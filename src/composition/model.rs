use crate::{
    foundation::core::{Fps, Point},
    foundation::error::{StoryfxError, StoryfxResult},
};

/// Caption text: one string revealed word by word, or discrete segments shown one at a time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PhraseContent {
    Text(String),
    Sequence(Vec<String>),
}

impl PhraseContent {
    /// Content flattened to a single line (segments joined with a space).
    pub fn joined(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Sequence(parts) => parts.join(" "),
        }
    }

    /// Whitespace-delimited words of a `Text` content; empty for sequences.
    pub fn words(&self) -> Vec<&str> {
        match self {
            Self::Text(s) => s.split_whitespace().collect(),
            Self::Sequence(_) => Vec::new(),
        }
    }
}

impl From<&str> for PhraseContent {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for PhraseContent {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<String>> for PhraseContent {
    fn from(parts: Vec<String>) -> Self {
        Self::Sequence(parts)
    }
}

/// Procedural caption treatment. Unrecognized ids resolve to [`VfxStyle::Fade`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VfxStyle {
    CinematicResolve,
    RisingBlur,
    EtherealPulse,
    FlareZoom,
    HeavyDrop,
    GlitchFlicker,
    ElasticPop,
    WordSwapper,
    Fade,
}

impl VfxStyle {
    pub const ALL: [Self; 8] = [
        Self::CinematicResolve,
        Self::RisingBlur,
        Self::EtherealPulse,
        Self::FlareZoom,
        Self::HeavyDrop,
        Self::GlitchFlicker,
        Self::ElasticPop,
        Self::WordSwapper,
    ];

    pub fn from_id(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "tr_01" => Self::CinematicResolve,
            "tr_02" => Self::RisingBlur,
            "tr_03" => Self::EtherealPulse,
            "tr_04" => Self::FlareZoom,
            "tr_05" => Self::HeavyDrop,
            "tr_06" => Self::GlitchFlicker,
            "tr_07" => Self::ElasticPop,
            "tr_08" => Self::WordSwapper,
            _ => Self::Fade,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::CinematicResolve => "tr_01",
            Self::RisingBlur => "tr_02",
            Self::EtherealPulse => "tr_03",
            Self::FlareZoom => "tr_04",
            Self::HeavyDrop => "tr_05",
            Self::GlitchFlicker => "tr_06",
            Self::ElasticPop => "tr_07",
            Self::WordSwapper => "tr_08",
            Self::Fade => "fade",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::CinematicResolve => "TR_01: Cinematic Resolve",
            Self::RisingBlur => "TR_02: Rising Blur",
            Self::EtherealPulse => "TR_03: Ethereal Pulse",
            Self::FlareZoom => "TR_04: Flare Zoom",
            Self::HeavyDrop => "TR_05: Heavy Drop",
            Self::GlitchFlicker => "TR_06: Glitch Flicker",
            Self::ElasticPop => "TR_07: Elastic Pop",
            Self::WordSwapper => "TR_08: Word Swapper",
            Self::Fade => "Fade",
        }
    }
}

impl From<String> for VfxStyle {
    fn from(id: String) -> Self {
        Self::from_id(&id)
    }
}

impl From<VfxStyle> for String {
    fn from(style: VfxStyle) -> Self {
        style.id().to_string()
    }
}

/// Font families offered by the editing UI: (display name, CSS value).
pub const FONT_OPTIONS: [(&str, &str); 10] = [
    ("Lexend", "\"Lexend\", sans-serif"),
    ("Inter", "\"Inter\", sans-serif"),
    ("Montserrat", "\"Montserrat\", sans-serif"),
    ("Outfit", "\"Outfit\", sans-serif"),
    ("Space Grotesk", "\"Space Grotesk\", sans-serif"),
    ("Cinzel", "\"Cinzel\", serif"),
    ("Syncopate", "\"Syncopate\", sans-serif"),
    ("Bebas Neue", "\"Bebas Neue\", sans-serif"),
    ("Orbitron", "\"Orbitron\", sans-serif"),
    ("Permanent Marker", "\"Permanent Marker\", cursive"),
];

/// Anchor position as percentages (0-100) of the canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Quadrilateral in normalized (0-1) canvas coordinates bounding a phrase.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoxVertices {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub bottom_left: Point,
}

impl BoxVertices {
    pub fn width_pct(&self) -> f64 {
        (self.top_right.x - self.top_left.x) * 100.0
    }

    pub fn height_pct(&self) -> f64 {
        (self.bottom_left.y - self.top_left.y) * 100.0
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phrase {
    pub id: String,
    pub content: PhraseContent,
    pub start_time: f64,     // seconds
    pub total_duration: f64, // seconds
    pub vfx_style: VfxStyle,
    pub font_color: String,
    pub glow_tint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    pub font_family: String,
    pub font_size: f64, // px
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_vertices: Option<BoxVertices>,
    pub blur_intensity: f64, // 0..20
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sfx_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sfx_gain: Option<f64>, // dB
}

impl Phrase {
    /// Phrase with the storyboard loader's defaults for every styling field.
    pub fn new(
        id: impl Into<String>,
        content: impl Into<PhraseContent>,
        start: f64,
        dur: f64,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            start_time: start,
            total_duration: dur,
            vfx_style: VfxStyle::CinematicResolve,
            font_color: "#ffffff".to_string(),
            glow_tint: "#ffffff".to_string(),
            background_color: None,
            font_family: FONT_OPTIONS[0].1.to_string(),
            font_size: 19.0 * 2.5,
            position: Position { x: 50.0, y: 85.0 },
            box_vertices: None,
            blur_intensity: 2.0,
            sfx_id: None,
            sfx_gain: None,
        }
    }

    pub fn with_style(mut self, style: VfxStyle) -> Self {
        self.vfx_style = style;
        self
    }

    pub fn with_sfx(mut self, id: impl Into<String>, gain_db: f64) -> Self {
        self.sfx_id = Some(id.into());
        self.sfx_gain = Some(gain_db);
        self
    }

    pub fn start_frame(&self, fps: Fps) -> i64 {
        fps.secs_to_frames_signed(self.start_time)
    }

    /// Length of the active window in frames; negative for inverted timings.
    pub fn duration_frames(&self, fps: Fps) -> i64 {
        fps.secs_to_frames_signed(self.total_duration)
    }

    pub fn end_secs(&self) -> f64 {
        self.start_time + self.total_duration
    }

    /// Non-empty sfx id, if any.
    pub fn sfx(&self) -> Option<&str> {
        self.sfx_id.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn validate(&self) -> StoryfxResult<()> {
        if self.id.trim().is_empty() {
            return Err(StoryfxError::validation("phrase id must be non-empty"));
        }
        if !self.start_time.is_finite() || self.start_time < 0.0 {
            return Err(StoryfxError::validation(format!(
                "phrase '{}' start_time must be finite and >= 0",
                self.id
            )));
        }
        if !self.total_duration.is_finite() {
            return Err(StoryfxError::validation(format!(
                "phrase '{}' total_duration must be finite",
                self.id
            )));
        }
        if !self.font_size.is_finite() || self.font_size < 0.0 {
            return Err(StoryfxError::validation(format!(
                "phrase '{}' font_size must be >= 0",
                self.id
            )));
        }
        if !(0.0..=40.0).contains(&self.blur_intensity) {
            return Err(StoryfxError::validation(format!(
                "phrase '{}' blur_intensity must be within 0..=40",
                self.id
            )));
        }
        Ok(())
    }
}

/// Field-level edit for one phrase. `None` leaves the field untouched.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhrasePatch {
    pub content: Option<PhraseContent>,
    pub start_time: Option<f64>,
    pub total_duration: Option<f64>,
    pub vfx_style: Option<VfxStyle>,
    pub font_color: Option<String>,
    pub glow_tint: Option<String>,
    pub background_color: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub position: Option<Position>,
    pub blur_intensity: Option<f64>,
    pub sfx_id: Option<String>,
    pub sfx_gain: Option<f64>,
}

impl PhrasePatch {
    pub fn apply_to(&self, phrase: &mut Phrase) {
        if let Some(v) = &self.content {
            phrase.content = v.clone();
        }
        if let Some(v) = self.start_time {
            phrase.start_time = v;
        }
        if let Some(v) = self.total_duration {
            phrase.total_duration = v;
        }
        if let Some(v) = self.vfx_style {
            phrase.vfx_style = v;
        }
        if let Some(v) = &self.font_color {
            phrase.font_color = v.clone();
        }
        if let Some(v) = &self.glow_tint {
            phrase.glow_tint = v.clone();
        }
        if let Some(v) = &self.background_color {
            phrase.background_color = Some(v.clone());
        }
        if let Some(v) = &self.font_family {
            phrase.font_family = v.clone();
        }
        if let Some(v) = self.font_size {
            phrase.font_size = v;
        }
        if let Some(v) = self.position {
            phrase.position = v;
        }
        if let Some(v) = self.blur_intensity {
            phrase.blur_intensity = v;
        }
        if let Some(v) = &self.sfx_id {
            phrase.sfx_id = Some(v.clone());
        }
        if let Some(v) = self.sfx_gain {
            phrase.sfx_gain = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_ids_are_case_insensitive_and_fall_back_to_fade() {
        assert_eq!(VfxStyle::from_id("TR_02"), VfxStyle::RisingBlur);
        assert_eq!(VfxStyle::from_id("tr_08"), VfxStyle::WordSwapper);
        assert_eq!(VfxStyle::from_id("tr_99"), VfxStyle::Fade);
        assert_eq!(VfxStyle::from_id(""), VfxStyle::Fade);
        for style in VfxStyle::ALL {
            assert_eq!(VfxStyle::from_id(style.id()), style);
        }
    }

    #[test]
    fn style_serializes_as_id() {
        let s = serde_json::to_string(&VfxStyle::FlareZoom).unwrap();
        assert_eq!(s, "\"tr_04\"");
        let de: VfxStyle = serde_json::from_str("\"TR_05\"").unwrap();
        assert_eq!(de, VfxStyle::HeavyDrop);
    }

    #[test]
    fn content_deserializes_string_or_array() {
        let a: PhraseContent = serde_json::from_str("\"one two\"").unwrap();
        assert_eq!(a, PhraseContent::Text("one two".to_string()));
        let b: PhraseContent = serde_json::from_str("[\"x\", \"y\"]").unwrap();
        assert_eq!(b.joined(), "x y");
        assert_eq!(a.words(), vec!["one", "two"]);
    }

    #[test]
    fn box_vertices_derive_percentages() {
        let b = BoxVertices {
            top_left: Point::new(0.2, 0.8),
            top_right: Point::new(0.7, 0.8),
            bottom_right: Point::new(0.7, 0.9),
            bottom_left: Point::new(0.2, 0.9),
        };
        assert!((b.width_pct() - 50.0).abs() < 1e-9);
        assert!((b.height_pct() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn frame_mapping_floors() {
        let fps = Fps::new(30, 1).unwrap();
        let p = Phrase::new("p", "a", 0.72, 0.56);
        assert_eq!(p.start_frame(fps), 21);
        assert_eq!(p.duration_frames(fps), 16);
        let inverted = Phrase::new("q", "a", 1.0, -0.5);
        assert_eq!(inverted.duration_frames(fps), -15);
    }

    #[test]
    fn validate_rejects_bad_fields() {
        assert!(Phrase::new("p", "a", 0.0, 1.0).validate().is_ok());
        assert!(Phrase::new("", "a", 0.0, 1.0).validate().is_err());
        assert!(Phrase::new("p", "a", -1.0, 1.0).validate().is_err());
        assert!(Phrase::new("p", "a", 0.0, f64::NAN).validate().is_err());
        let mut p = Phrase::new("p", "a", 0.0, 1.0);
        p.blur_intensity = 99.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn blank_sfx_id_is_ignored() {
        let p = Phrase::new("p", "a", 0.0, 1.0).with_sfx("  ", 0.0);
        assert_eq!(p.sfx(), None);
        let p = Phrase::new("p", "a", 0.0, 1.0).with_sfx("boom", -6.0);
        assert_eq!(p.sfx(), Some("boom"));
    }

    #[test]
    fn patch_touches_only_given_fields() {
        let mut p = Phrase::new("p", "hello", 1.0, 2.0);
        let patch = PhrasePatch {
            content: Some("bye".into()),
            blur_intensity: Some(8.0),
            ..PhrasePatch::default()
        };
        patch.apply_to(&mut p);
        assert_eq!(p.content, PhraseContent::Text("bye".to_string()));
        assert_eq!(p.blur_intensity, 8.0);
        assert_eq!(p.start_time, 1.0);
        assert_eq!(p.vfx_style, VfxStyle::CinematicResolve);
    }
}
