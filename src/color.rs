use tracing::debug;

/// Opaque white, used whenever the input is not a six character color.
pub const DEFAULT_ASS_COLOR: &str = "&H00FFFFFF";

/// Convert a web color (`#RRGGBB`) to an ASS color token (`&HAABBGGRR`).
///
/// Alpha is always `00` (opaque). Only the length is checked: six arbitrary
/// characters are reordered and uppercased without being parsed as hex.
pub fn hex_to_ass_color(hex_color: &str) -> String {
    let digits: Vec<char> = hex_color.trim_start_matches('#').chars().collect();
    if digits.len() != 6 {
        debug!("Color {:?} is not six characters, using {}", hex_color, DEFAULT_ASS_COLOR);
        return DEFAULT_ASS_COLOR.to_string();
    }

    let channel = |i: usize| digits[i..i + 2].iter().collect::<String>();
    let (r, g, b) = (channel(0), channel(2), channel(4));

    format!("&H00{}{}{}", b, g, r).to_uppercase()
}
