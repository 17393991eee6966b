//! RGBA colors: parsing and alpha composition.
//!
//! Compiled sheets usually carry colors as strings (`#ff0000`,
//! `rgba(255, 0, 0, 0.5)`, `steelblue`); the composer parses them at fold
//! time so opacity can be multiplied into the alpha channel.

/// A color with an 8-bit RGB part and a unit-range alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// A fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 1.0 }
    }

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Rgba { r, g, b, a }
    }

    /// Replaces the alpha channel.
    pub fn with_alpha(self, a: f32) -> Self {
        Rgba {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Multiplies the alpha channel by an opacity factor, clamped to `[0, 1]`.
    pub fn scale_alpha(self, factor: f64) -> Self {
        let a = (self.a as f64 * factor).clamp(0.0, 1.0) as f32;
        Rgba { a, ..self }
    }

    /// The `[r, g, b, a]` unit-range array form the renderer consumes.
    ///
    /// Channels are rounded to four decimals to keep serialized scenes tidy.
    pub fn to_unit_array(self) -> [f64; 4] {
        fn unit(v: f64) -> f64 {
            (v * 10_000.0).round() / 10_000.0
        }
        [
            unit(self.r as f64 / 255.0),
            unit(self.g as f64 / 255.0),
            unit(self.b as f64 / 255.0),
            unit(self.a as f64),
        ]
    }

    /// Parses a color from hex, functional, or named notation.
    ///
    /// Supported forms: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)`, and the CSS basic color keywords. Returns `None`
    /// for anything else.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Some(hex) = input.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = input.to_ascii_lowercase();
        if lower.starts_with("rgb") {
            return parse_functional(&lower);
        }
        parse_named(&lower)
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    let nibble = |s: &str| {
        u8::from_str_radix(s, 16).ok().map(|v| v * 16 + v)
    };
    match hex.len() {
        3 => Some(Rgba::rgb(
            nibble(&hex[0..1])?,
            nibble(&hex[1..2])?,
            nibble(&hex[2..3])?,
        )),
        6 => Some(Rgba::rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        8 => Some(Rgba::new(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])? as f32 / 255.0,
        )),
        _ => None,
    }
}

fn parse_functional(input: &str) -> Option<Rgba> {
    let args = input
        .strip_prefix("rgba")
        .or_else(|| input.strip_prefix("rgb"))?
        .strip_prefix('(')?
        .strip_suffix(')')?;
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();

    let channel = |s: &str| -> Option<u8> {
        let v: f64 = s.parse().ok()?;
        Some(v.clamp(0.0, 255.0).round() as u8)
    };
    match parts.as_slice() {
        [r, g, b] => Some(Rgba::rgb(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => {
            let alpha: f32 = a.parse().ok()?;
            Some(Rgba::new(
                channel(r)?,
                channel(g)?,
                channel(b)?,
                alpha.clamp(0.0, 1.0),
            ))
        }
        _ => None,
    }
}

fn parse_named(name: &str) -> Option<Rgba> {
    let (r, g, b) = match name {
        "black" => (0, 0, 0),
        "silver" => (192, 192, 192),
        "gray" | "grey" => (128, 128, 128),
        "white" => (255, 255, 255),
        "maroon" => (128, 0, 0),
        "red" => (255, 0, 0),
        "purple" => (128, 0, 128),
        "fuchsia" | "magenta" => (255, 0, 255),
        "green" => (0, 128, 0),
        "lime" => (0, 255, 0),
        "olive" => (128, 128, 0),
        "yellow" => (255, 255, 0),
        "navy" => (0, 0, 128),
        "blue" => (0, 0, 255),
        "teal" => (0, 128, 128),
        "aqua" | "cyan" => (0, 255, 255),
        "orange" => (255, 165, 0),
        "steelblue" => (70, 130, 180),
        "transparent" => return Some(Rgba::new(0, 0, 0, 0.0)),
        _ => return None,
    };
    Some(Rgba::rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(Rgba::parse("#f00"), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(Rgba::parse("#0f0"), Some(Rgba::rgb(0, 255, 0)));
    }

    #[test]
    fn test_parse_long_hex() {
        assert_eq!(Rgba::parse("#ff0000"), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(Rgba::parse("#a8a8a8"), Some(Rgba::rgb(168, 168, 168)));
    }

    #[test]
    fn test_parse_hex_with_alpha() {
        let c = Rgba::parse("#ff000080").unwrap();
        assert_eq!((c.r, c.g, c.b), (255, 0, 0));
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_functional() {
        assert_eq!(Rgba::parse("rgb(255, 0, 0)"), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(
            Rgba::parse("rgba(0, 0, 255, 0.5)"),
            Some(Rgba::new(0, 0, 255, 0.5))
        );
    }

    #[test]
    fn test_parse_functional_clamps_channels() {
        assert_eq!(Rgba::parse("rgb(300, -5, 0)"), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(
            Rgba::parse("rgba(0, 0, 0, 7)"),
            Some(Rgba::new(0, 0, 0, 1.0))
        );
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Rgba::parse("steelblue"), Some(Rgba::rgb(70, 130, 180)));
        assert_eq!(Rgba::parse("RED"), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(Rgba::parse("transparent"), Some(Rgba::new(0, 0, 0, 0.0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Rgba::parse(""), None);
        assert_eq!(Rgba::parse("#ff00"), None);
        assert_eq!(Rgba::parse("rgb(1, 2)"), None);
        assert_eq!(Rgba::parse("chartreuse-ish"), None);
        assert_eq!(Rgba::parse("#é0a"), None);
    }

    #[test]
    fn test_scale_alpha_clamps() {
        let c = Rgba::rgb(10, 20, 30);
        assert_eq!(c.scale_alpha(0.5).a, 0.5);
        assert_eq!(c.scale_alpha(4.0).a, 1.0);
        assert_eq!(c.scale_alpha(-1.0).a, 0.0);
    }

    #[test]
    fn test_unit_array() {
        assert_eq!(
            Rgba::rgb(255, 0, 0).with_alpha(0.5).to_unit_array(),
            [1.0, 0.0, 0.0, 0.5]
        );
        // Channels round to four decimals.
        assert_eq!(Rgba::rgb(168, 168, 168).to_unit_array()[0], 0.6588);
    }
}
