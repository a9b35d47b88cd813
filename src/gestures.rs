use std::collections::HashMap;
use std::fmt;
use once_cell::sync::Lazy;
/// Hand shapes the glove firmware understands, plus the designated fallback
/// for predictions outside the known set. The set and its wire codes are
/// fixed at startup and shared read-only across the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureLabel {
    C,
    T,
    V,
    Unknown,
}
/// Labels a classifier may legitimately produce.
pub const KNOWN_GESTURES: [GestureLabel; 3] = [GestureLabel::C, GestureLabel::T, GestureLabel::V];
static BY_CODE: Lazy<HashMap<u8, GestureLabel>> = Lazy::new(|| {
    KNOWN_GESTURES
        .iter()
        .map(|label| (label.code(), *label))
        .collect()
});
impl GestureLabel {
    /// Stable single-byte code transmitted back to the device. Zero is
    /// outside the firmware's command set, so `Unknown` reports as a no-op.
    pub fn code(self) -> u8 {
        match self {
            GestureLabel::C => 1,
            GestureLabel::T => 2,
            GestureLabel::V => 3,
            GestureLabel::Unknown => 0,
        }
    }
    pub fn from_code(code: u8) -> GestureLabel {
        BY_CODE.get(&code).copied().unwrap_or(GestureLabel::Unknown)
    }
    /// One-letter name used in training-file labels and display.
    pub fn letter(self) -> char {
        match self {
            GestureLabel::C => 'C',
            GestureLabel::T => 'T',
            GestureLabel::V => 'V',
            GestureLabel::Unknown => '?',
        }
    }
    pub fn from_letter(letter: char) -> Option<GestureLabel> {
        KNOWN_GESTURES
            .iter()
            .copied()
            .find(|label| label.letter() == letter.to_ascii_uppercase())
    }
}
impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureLabel::Unknown => write!(f, "unknown"),
            other => write!(f, "{}", other.letter()),
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn codes_round_trip_for_known_gestures() {
        for label in KNOWN_GESTURES {
            assert_eq!(GestureLabel::from_code(label.code()), label);
        }
    }
    #[test]
    fn unknown_codes_decode_to_the_fallback_label() {
        assert_eq!(GestureLabel::from_code(0), GestureLabel::Unknown);
        assert_eq!(GestureLabel::from_code(200), GestureLabel::Unknown);
    }
    #[test]
    fn letters_parse_case_insensitively() {
        assert_eq!(GestureLabel::from_letter('c'), Some(GestureLabel::C));
        assert_eq!(GestureLabel::from_letter('V'), Some(GestureLabel::V));
        assert_eq!(GestureLabel::from_letter('x'), None);
    }
}
