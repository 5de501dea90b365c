//! One-click service names offered next to the search box.

/// Services the analysis backend can resolve without a language model.
pub const PRESET_SERVICES: &[&str] = &[
    "Netflix",
    "Spotify",
    "Google",
    "Amazon",
    "Discord",
    "TikTok",
    "Instagram",
    "Uber",
    "Reddit",
    "Zoom",
];

/// Preset by 1-based position, as numbered in the UI.
pub fn preset(position: usize) -> Option<&'static str> {
    position
        .checked_sub(1)
        .and_then(|i| PRESET_SERVICES.get(i))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_one_based() {
        assert_eq!(preset(1), Some("Netflix"));
        assert_eq!(preset(PRESET_SERVICES.len()), PRESET_SERVICES.last().copied());
        assert_eq!(preset(0), None);
        assert_eq!(preset(PRESET_SERVICES.len() + 1), None);
    }
}
