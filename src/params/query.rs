//! Query-string configuration surface (`scale=2&tilesZ=6&lineColor=%23ff8800`).
//!
//! Each recognised key overrides one field. A value that does not parse
//! leaves the current value in place; unknown keys are ignored.

use super::{Rgb, TopoConfig};

/// Parse a finite float
pub fn parse_num(value: &str) -> Option<f32> {
    value.trim().parse::<f32>().ok().filter(|n| n.is_finite())
}

/// Parse the leading integer of a value (`"12px"` -> 12, `"3.9"` -> 3)
pub fn parse_int(value: &str) -> Option<i64> {
    let s = value.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Parse `1/true/yes/on` or `0/false/no/off`, case-insensitive
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_count(value: &str) -> Option<u32> {
    parse_int(value).map(|n| n.clamp(0, u32::MAX as i64) as u32)
}

/// Decode `%XX` escapes and `+` as space
fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                let hex = &bytes[i + 1..i + 3];
                let escaped = if hex.iter().all(u8::is_ascii_hexdigit) {
                    std::str::from_utf8(hex)
                        .ok()
                        .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                } else {
                    None
                };
                match escaped {
                    Some(b) => {
                        out.push(b);
                        i += 2;
                    }
                    None => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Split a query string into decoded `(key, value)` pairs
pub fn pairs(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (k, v) = part.split_once('=').unwrap_or((part, ""));
            (percent_decode(k), percent_decode(v))
        })
        .collect()
}

fn set<T>(slot: &mut T, parsed: Option<T>) {
    if let Some(v) = parsed {
        *slot = v;
    }
}

/// Apply every recognised key of `query` to `config`
pub fn apply_query(config: &mut TopoConfig, query: &str) {
    for (key, value) in pairs(query) {
        let v = value.as_str();
        match key.as_str() {
            // Bands
            "bands" => set(&mut config.bands.enabled, parse_bool(v)),
            "bandSteps" => set(&mut config.bands.steps, parse_count(v)),
            "bandStrength" => set(&mut config.bands.strength, parse_num(v)),
            "lowColor" => set(&mut config.bands.low, Rgb::from_hex(v)),
            "midColor" => set(&mut config.bands.mid, Rgb::from_hex(v)),
            "highColor" => set(&mut config.bands.high, Rgb::from_hex(v)),

            // Terrain
            "scale" => set(&mut config.terrain.scale, parse_num(v)),
            "tileSize" => set(&mut config.terrain.tile_size, parse_num(v)),
            "tilesX" => set(&mut config.terrain.tiles_x, parse_count(v)),
            "tilesZ" => set(&mut config.terrain.tiles_z, parse_count(v)),
            "cols" => set(&mut config.terrain.cols, parse_count(v)),
            "rows" => set(&mut config.terrain.rows, parse_count(v)),
            "jitter" => set(&mut config.terrain.jitter, parse_num(v)),
            "baseColor" => set(&mut config.terrain.base_color, Rgb::from_hex(v)),

            // Contours
            "minor" => set(&mut config.contours.minor_step, parse_num(v)),
            "majorEvery" => set(&mut config.contours.major_every, parse_count(v)),
            "wMinor" => set(&mut config.contours.width_minor, parse_num(v)),
            "wMajor" => set(&mut config.contours.width_major, parse_num(v)),
            "glowMinor" => set(&mut config.contours.glow_minor, parse_num(v)),
            "glowMajor" => set(&mut config.contours.glow_major, parse_num(v)),
            "lineColor" => set(&mut config.contours.line_color, Rgb::from_hex(v)),

            // Mask
            "mask" => set(&mut config.mask.radius, parse_num(v)),
            "feather" => set(&mut config.mask.feather, parse_num(v)),

            // Hover
            "hR" => set(&mut config.hover.radius, parse_num(v)),
            "hS" => set(&mut config.hover.strength, parse_num(v)),
            "hSnap" => set(&mut config.hover.snap, parse_bool(v)),

            // Camera
            "yaw" => set(&mut config.camera.yaw_deg, parse_num(v)),
            "pitch" => set(&mut config.camera.pitch_deg, parse_num(v)),
            "fov" => set(&mut config.camera.fov_deg, parse_num(v)),
            "height" => set(&mut config.camera.height, parse_num(v)),
            "z" => set(&mut config.camera.distance, parse_num(v)),

            // Animation
            "scroll" => set(&mut config.animation.scroll_speed, parse_num(v)),
            "animate" => set(&mut config.animation.animate, parse_bool(v)),

            other => log::debug!("Ignoring unknown query key '{}'", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ContourStyle;

    #[test]
    fn test_parse_int_takes_leading_digits() {
        assert_eq!(parse_int("12px"), Some(12));
        assert_eq!(parse_int("3.9"), Some(3));
        assert_eq!(parse_int(" -4"), Some(-4));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn test_parse_num_rejects_non_finite() {
        assert_eq!(parse_num("1.5"), Some(1.5));
        assert_eq!(parse_num("inf"), None);
        assert_eq!(parse_num("NaN"), None);
        assert_eq!(parse_num("x"), None);
    }

    #[test]
    fn test_parse_bool_words() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_apply_query_overrides_and_falls_back() {
        let mut config = TopoConfig::default();
        apply_query(
            &mut config,
            "?scale=2.5&tilesZ=6&minor=bogus&lineColor=%23ff0000&hSnap=on&animate=0",
        );

        assert_eq!(config.terrain.scale, 2.5);
        assert_eq!(config.terrain.tiles_z, 6);
        assert_eq!(config.contours.minor_step, ContourStyle::default().minor_step);
        assert_eq!(config.contours.line_color, Rgb([1.0, 0.0, 0.0]));
        assert!(config.hover.snap);
        assert!(!config.animation.animate);
    }

    #[test]
    fn test_negative_counts_clamp_after_query() {
        let mut config = TopoConfig::default();
        apply_query(&mut config, "tilesX=-3&cols=9999&pitch=20");
        let config = config.clamped();

        assert_eq!(config.terrain.tiles_x, 1);
        assert_eq!(config.terrain.cols, 600);
        assert_eq!(config.camera.pitch_deg, -5.0);
    }

    #[test]
    fn test_out_of_range_values_clamp_after_query() {
        let mut config = TopoConfig::default();
        apply_query(
            &mut config,
            "tileSize=-5&scale=-2&minor=-1&bandStrength=7&majorEvery=0&bandSteps=0&mask=-3&hS=-1",
        );
        let config = config.clamped();

        assert!(config.terrain.tile_size > 0.0);
        assert_eq!(config.terrain.scale, 0.0);
        assert!(config.contours.minor_step > 0.0);
        assert_eq!(config.contours.major_every, 1);
        assert_eq!(config.bands.steps, 2);
        assert_eq!(config.bands.strength, 1.0);
        assert_eq!(config.mask.radius, 0.0);
        assert_eq!(config.hover.strength, 0.0);
    }

    #[test]
    fn test_percent_escapes_need_two_hex_digits() {
        assert_eq!(percent_decode("%23ff0000"), "#ff0000");
        assert_eq!(percent_decode("%+1"), "% 1");
        assert_eq!(percent_decode("%-1x"), "%-1x");
        assert_eq!(percent_decode("a+b"), "a b");
    }

    #[test]
    fn test_unknown_keys_leave_config_untouched() {
        let mut config = TopoConfig::default();
        apply_query(&mut config, "ui=0&whatever=12&&");
        assert_eq!(config, TopoConfig::default());
    }
}
