//! Glyphs for the forecast conditions grid.

pub const TEMPERATURE: &str = "\u{1f321}\u{fe0f}"; // 🌡️
pub const WIND: &str = "\u{1f32c}\u{fe0f}"; // 🌬️
pub const TIDES: &str = "\u{1f30a}"; // 🌊
pub const WAVES: &str = "\u{3030}\u{fe0f}"; // 〰️

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Braille spinner glyph for a frame counter.
pub fn spinner_glyph(frame: u8) -> char {
    SPINNER_FRAMES[frame as usize % SPINNER_FRAMES.len()]
}

/// Glyph for the weather item, keyed off the condition text the service
/// returned. Unknown conditions get a neutral sky.
pub fn condition_glyph(condition: &str) -> &'static str {
    let lowered = condition.to_lowercase();
    if lowered.contains("storm") || lowered.contains("thunder") {
        "\u{26c8}\u{fe0f}" // ⛈️
    } else if lowered.contains("rain") || lowered.contains("shower") || lowered.contains("drizzle")
    {
        "\u{1f327}\u{fe0f}" // 🌧️
    } else if lowered.contains("fog") || lowered.contains("mist") {
        "\u{1f32b}\u{fe0f}" // 🌫️
    } else if lowered.contains("cloud") || lowered.contains("overcast") {
        "\u{2601}\u{fe0f}" // ☁️
    } else if lowered.contains("sun") || lowered.contains("clear") {
        "\u{2600}\u{fe0f}" // ☀️
    } else {
        "\u{1f324}\u{fe0f}" // 🌤️
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_conditions_get_distinct_glyphs() {
        assert_ne!(condition_glyph("Sunny"), condition_glyph("Thunderstorms"));
        assert_ne!(condition_glyph("Light rain"), condition_glyph("Overcast"));
    }

    #[test]
    fn unknown_condition_has_a_fallback() {
        assert!(!condition_glyph("weird sky business").is_empty());
    }
}
