use crate::composition::model::Phrase;

const PROMPT_PREFIX: &str = "A cinematic scene matching these captions: ";
const PROMPT_SUFFIX: &str = ". Professional color grading, high contrast, 4k.";

/// All caption text in phrase order: sequences joined by spaces, phrases by `". "`.
pub fn caption_text(phrases: &[Phrase]) -> String {
    phrases
        .iter()
        .map(|p| p.content.joined())
        .collect::<Vec<_>>()
        .join(". ")
}

/// Request body for the external generative video service.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub prompt: String,
    pub number_of_videos: u32,
    pub resolution: String,
    pub aspect_ratio: String,
}

impl RenderRequest {
    pub fn from_phrases(phrases: &[Phrase]) -> Self {
        Self {
            prompt: format!("{PROMPT_PREFIX}{}{PROMPT_SUFFIX}", caption_text(phrases)),
            number_of_videos: 1,
            resolution: "1080p".to_string(),
            aspect_ratio: "16:9".to_string(),
        }
    }
}
