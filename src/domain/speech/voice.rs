use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// `ko-KR-Standard-A` -> `ko-KR`, `cmn-CN-Wavenet-B` -> `cmn-CN`
static VOICE_LANGUAGE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]{2,3}-[A-Za-z0-9]{2,4})-.+").unwrap());

/// A voice offered by the speech vendor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDescriptor {
    pub name: String,
    pub supported_language_codes: Vec<String>,
    pub gender: String,
    pub native_sample_rate_hz: u32,
}

/// Case-sensitive lexical order on name; empty names come first
pub fn sort_by_name(voices: &mut [VoiceDescriptor]) {
    voices.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Language code embedded in a vendor voice name, if it has one
pub fn language_for_voice(voice_name: &str) -> Option<String> {
    VOICE_LANGUAGE_PREFIX
        .captures(voice_name)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}
