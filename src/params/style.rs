//! Contour, band, mask and hover styling parameters.

/// Linear RGB color, each channel in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0.0, 0.0, 0.0]);
    pub const WHITE: Rgb = Rgb([1.0, 1.0, 1.0]);

    /// Parse `#rrggbb` or `rrggbb` (sRGB encoded) into linear RGB
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |i: usize| -> Option<f32> {
            let byte = u8::from_str_radix(&hex[i..i + 2], 16).ok()?;
            Some(srgb_to_linear(byte as f32 / 255.0))
        };

        Some(Self([channel(0)?, channel(2)?, channel(4)?]))
    }

    /// Parse a hex color, falling back to `fallback` on malformed input
    pub fn from_hex_or(s: &str, fallback: Rgb) -> Self {
        Self::from_hex(s).unwrap_or(fallback)
    }

    /// Padded to a WGSL `vec4<f32>` uniform slot
    pub fn to_vec4(self) -> [f32; 4] {
        [self.0[0], self.0[1], self.0[2], 1.0]
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c >= 1.0 {
        1.0
    } else if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Smallest usable contour spacing (height units)
pub const MIN_MINOR_STEP: f32 = 1e-4;

/// Topographic contour line parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ContourStyle {
    /// World-height spacing between minor lines
    pub minor_step: f32,

    /// Minor intervals per major line
    pub major_every: u32,

    /// Minor line half-thickness (height units)
    pub width_minor: f32,

    /// Major line half-thickness (height units)
    pub width_major: f32,

    /// Additive glow on minor lines
    pub glow_minor: f32,

    /// Additive glow on major lines
    pub glow_major: f32,

    /// Color of line glow and hover highlight
    pub line_color: Rgb,
}

impl Default for ContourStyle {
    fn default() -> Self {
        Self {
            minor_step: 0.06,
            major_every: 5,
            width_minor: 0.015,
            width_major: 0.03,
            glow_minor: 0.6,
            glow_major: 1.2,
            line_color: Rgb::from_hex_or("#00ffff", Rgb::WHITE),
        }
    }
}

impl ContourStyle {
    pub(super) fn clamp_in_place(&mut self) {
        self.minor_step = self.minor_step.max(MIN_MINOR_STEP);
        self.major_every = self.major_every.max(1);
        self.width_minor = self.width_minor.max(0.0);
        self.width_major = self.width_major.max(0.0);
        self.glow_minor = self.glow_minor.max(0.0);
        self.glow_major = self.glow_major.max(0.0);
    }
}

/// Hypsometric tint: height quantized into discrete color bands
#[derive(Debug, Clone, PartialEq)]
pub struct BandStyle {
    pub enabled: bool,

    /// Quantization levels of the normalized height (at least 2 are used)
    pub steps: u32,

    /// Blend weight of the band color against the base color (0..1)
    pub strength: f32,

    pub low: Rgb,
    pub mid: Rgb,
    pub high: Rgb,
}

impl Default for BandStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            steps: 18,
            strength: 0.85,
            low: Rgb::from_hex_or("#1a0033", Rgb::BLACK),
            mid: Rgb::from_hex_or("#00ff88", Rgb::BLACK),
            high: Rgb::from_hex_or("#ff00ff", Rgb::WHITE),
        }
    }
}

impl BandStyle {
    pub(super) fn clamp_in_place(&mut self) {
        self.steps = self.steps.max(2);
        self.strength = self.strength.clamp(0.0, 1.0);
    }
}

/// Radial visibility falloff around the world origin
#[derive(Debug, Clone, PartialEq)]
pub struct MaskParams {
    /// Fully visible up to this XZ distance
    pub radius: f32,

    /// Fade distance beyond `radius`
    pub feather: f32,
}

impl Default for MaskParams {
    fn default() -> Self {
        Self {
            radius: 14.0,
            feather: 2.5,
        }
    }
}

impl MaskParams {
    pub(super) fn clamp_in_place(&mut self) {
        self.radius = self.radius.max(0.0);
        self.feather = self.feather.max(0.0);
    }
}

/// Pointer-proximity glow
#[derive(Debug, Clone, PartialEq)]
pub struct HoverParams {
    /// Full-strength radius; fades out by 1.25x this distance
    pub radius: f32,

    pub strength: f32,

    /// Concentrate the glow on minor contour lines
    pub snap: bool,
}

impl Default for HoverParams {
    fn default() -> Self {
        Self {
            radius: 1.6,
            strength: 0.9,
            snap: false,
        }
    }
}

impl HoverParams {
    pub(super) fn clamp_in_place(&mut self) {
        self.radius = self.radius.max(0.0);
        self.strength = self.strength.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing_accepts_optional_hash() {
        assert_eq!(Rgb::from_hex("#ffffff"), Some(Rgb::WHITE));
        assert_eq!(Rgb::from_hex("000000"), Some(Rgb::BLACK));
        assert_eq!(Rgb::from_hex("  #FFFFFF "), Some(Rgb::WHITE));
    }

    #[test]
    fn test_hex_parsing_rejects_malformed() {
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#gggggg"), None);
        assert_eq!(Rgb::from_hex(""), None);
        assert_eq!(Rgb::from_hex_or("nope", Rgb::WHITE), Rgb::WHITE);
    }

    #[test]
    fn test_hex_is_decoded_to_linear() {
        let mid = Rgb::from_hex("#808080").unwrap();
        // sRGB 0.5 is roughly 0.216 linear
        assert!((mid.0[0] - 0.2158).abs() < 1e-3);
    }

    #[test]
    fn test_style_clamps_pull_into_range() {
        let mut contours = ContourStyle {
            minor_step: -1.0,
            major_every: 0,
            width_minor: -0.1,
            glow_major: -3.0,
            ..ContourStyle::default()
        };
        contours.clamp_in_place();
        assert_eq!(contours.minor_step, MIN_MINOR_STEP);
        assert_eq!(contours.major_every, 1);
        assert_eq!(contours.width_minor, 0.0);
        assert_eq!(contours.glow_major, 0.0);

        let mut bands = BandStyle {
            steps: 0,
            strength: 7.0,
            ..BandStyle::default()
        };
        bands.clamp_in_place();
        assert_eq!(bands.steps, 2);
        assert_eq!(bands.strength, 1.0);

        let mut mask = MaskParams {
            radius: -4.0,
            feather: -1.0,
        };
        mask.clamp_in_place();
        assert_eq!((mask.radius, mask.feather), (0.0, 0.0));
    }
}
