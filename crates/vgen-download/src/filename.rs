//! Download filename derivation.

/// Fallback stem when the prompt yields nothing usable.
const FALLBACK_STEM: &str = "video";

/// Derive a download filename from the original prompt.
///
/// Takes the first two whitespace-separated tokens, lowercases them,
/// joins them with an underscore, strips everything outside
/// `[a-z0-9_]`, and appends `.mp4`. A prompt that yields nothing falls
/// back to `video.mp4`.
pub fn derive_filename(prompt: &str) -> String {
    let stem: String = prompt
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect();

    if stem.is_empty() {
        format!("{FALLBACK_STEM}.mp4")
    } else {
        format!("{stem}.mp4")
    }
}
