//! Canonical Color Type
//!
//! `Color` is keyed by its hex string. The RGB and HSL views are always
//! derived from the same 8-bit channels, so they can never disagree with the
//! hex value. Colors built from HSL are quantized to RGB first and their HSL
//! view recomputed from the quantized channels.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{BrandError, Result};

/// Matches hex, rgb()/rgba() and hsl()/hsla() tokens inside a CSS value
static COLOR_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#[0-9a-fA-F]{3,8}\b|(?i:rgba?|hsla?)\([^)]*\)").expect("valid color regex")
});

/// Matches url(...) references, whose fragments look like hex colors
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)url\([^)]*\)").expect("valid url regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSL with integer components: `h` in `[0, 360)`, `s` and `l` in `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

/// CIE L*a*b* coordinates (D65)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color {
    hex: String,
    rgb: Rgb,
    hsl: Hsl,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
}

/// Wire form accepted on deserialization; rgb/hsl are always recomputed
#[derive(Deserialize)]
struct ColorRepr {
    hex: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    usage: Option<String>,
}

impl TryFrom<ColorRepr> for Color {
    type Error = BrandError;

    fn try_from(repr: ColorRepr) -> Result<Self> {
        let mut color = Color::from_hex(&repr.hex)?;
        color.name = repr.name;
        color.usage = repr.usage;
        Ok(color)
    }
}

impl Color {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let rgb = Rgb { r, g, b };
        Self {
            hex: format!("#{:02x}{:02x}{:02x}", r, g, b),
            rgb,
            hsl: rgb_to_hsl(rgb),
            name: None,
            usage: None,
        }
    }

    /// Build from HSL in degrees and percent. Out-of-range input is wrapped
    /// (hue) or clamped (saturation, lightness).
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let h = h.rem_euclid(360.0) / 360.0;
        let s = (s / 100.0).clamp(0.0, 1.0);
        let l = (l / 100.0).clamp(0.0, 1.0);

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;
            (
                hue_to_channel(p, q, h + 1.0 / 3.0),
                hue_to_channel(p, q, h),
                hue_to_channel(p, q, h - 1.0 / 3.0),
            )
        };

        Self::from_rgb(to_channel(r), to_channel(g), to_channel(b))
    }

    /// Parse a strict hex color (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`)
    pub fn from_hex(hex: &str) -> Result<Self> {
        parse_hex(hex.trim()).ok_or_else(|| BrandError::InvalidColor(hex.to_string()))
    }

    /// Parse any supported CSS color token. Alpha is discarded.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.starts_with('#') {
            return parse_hex(token);
        }

        let lower = token.to_ascii_lowercase();
        let open = lower.find('(')?;
        let close = lower.rfind(')')?;
        if close <= open {
            return None;
        }
        let func = lower[..open].trim();
        let args: Vec<&str> = lower[open + 1..close]
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();
        if args.len() < 3 {
            return None;
        }

        match func {
            "rgb" | "rgba" => {
                let r = parse_rgb_component(args[0])?;
                let g = parse_rgb_component(args[1])?;
                let b = parse_rgb_component(args[2])?;
                Some(Self::from_rgb(r, g, b))
            }
            "hsl" | "hsla" => {
                let h = parse_hue(args[0])?;
                let s = parse_percent(args[1])?;
                let l = parse_percent(args[2])?;
                Some(Self::from_hsl(h, s, l))
            }
            _ => None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    pub fn hsl(&self) -> Hsl {
        self.hsl
    }

    pub fn lightness(&self) -> u8 {
        self.hsl.l
    }

    pub fn saturation(&self) -> u8 {
        self.hsl.s
    }

    pub fn hue(&self) -> u16 {
        self.hsl.h
    }

    /// Same saturation and lightness, hue rotated by `degrees`
    pub fn rotate_hue(&self, degrees: f64) -> Self {
        Self::from_hsl(
            f64::from(self.hsl.h) + degrees,
            f64::from(self.hsl.s),
            f64::from(self.hsl.l),
        )
    }

    /// CIE L*a*b* under D65
    pub fn lab(&self) -> Lab {
        let r = srgb_to_linear(self.rgb.r);
        let g = srgb_to_linear(self.rgb.g);
        let b = srgb_to_linear(self.rgb.b);

        let x = (r * 0.4124 + g * 0.3576 + b * 0.1805) / 0.95047;
        let y = r * 0.2126 + g * 0.7152 + b * 0.0722;
        let z = (r * 0.0193 + g * 0.1192 + b * 0.9505) / 1.08883;

        let (fx, fy, fz) = (lab_f(x), lab_f(y), lab_f(z));
        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// Perceptual distance (CIE76 ΔE)
    pub fn delta_e(&self, other: &Color) -> f64 {
        let a = self.lab();
        let b = other.lab();
        ((a.l - b.l).powi(2) + (a.a - b.a).powi(2) + (a.b - b.b).powi(2)).sqrt()
    }

    /// WCAG 2.x relative luminance
    pub fn relative_luminance(&self) -> f64 {
        let channel = |c: u8| {
            let c = f64::from(c) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * channel(self.rgb.r) + 0.7152 * channel(self.rgb.g) + 0.0722 * channel(self.rgb.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex)
    }
}

impl FromStr for Color {
    type Err = BrandError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| BrandError::InvalidColor(s.to_string()))
    }
}

/// Find every hex/rgb/hsl token in a CSS value, in source order.
/// Tokens inside `url(...)` are ignored.
pub fn extract_color_tokens(value: &str) -> Vec<String> {
    let stripped = URL_RE.replace_all(value, " ");
    COLOR_TOKEN_RE
        .find_iter(&stripped)
        .map(|m| m.as_str().to_string())
        .collect()
}

// =============================================================================
// Conversions
// =============================================================================

fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let d = max - min;

    let (h, s) = if d == 0.0 {
        (0.0, 0.0)
    } else {
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h * 60.0, s)
    };

    Hsl {
        h: (h.round() as u16) % 360,
        s: (s * 100.0).round().clamp(0.0, 100.0) as u8,
        l: (l * 100.0).round().clamp(0.0, 100.0) as u8,
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn srgb_to_linear(c: u8) -> f64 {
    let c = f64::from(c) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f64) -> f64 {
    if t > 0.008856 {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

// =============================================================================
// Token Parsing
// =============================================================================

fn parse_hex(token: &str) -> Option<Color> {
    let digits = token.strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expand = |c: u8| {
        let v = (c as char).to_digit(16)? as u8;
        Some(v * 16 + v)
    };
    let pair = |s: &str| u8::from_str_radix(s, 16).ok();

    let bytes = digits.as_bytes();
    match digits.len() {
        3 | 4 => Some(Color::from_rgb(
            expand(bytes[0])?,
            expand(bytes[1])?,
            expand(bytes[2])?,
        )),
        6 | 8 => Some(Color::from_rgb(
            pair(&digits[0..2])?,
            pair(&digits[2..4])?,
            pair(&digits[4..6])?,
        )),
        _ => None,
    }
}

fn parse_rgb_component(s: &str) -> Option<u8> {
    if let Some(pct) = s.strip_suffix('%') {
        let v: f64 = pct.parse().ok()?;
        return Some((v.clamp(0.0, 100.0) * 2.55).round() as u8);
    }
    let v: f64 = s.parse().ok()?;
    Some(v.round().clamp(0.0, 255.0) as u8)
}

fn parse_percent(s: &str) -> Option<f64> {
    let v: f64 = s.trim_end_matches('%').parse().ok()?;
    Some(v.clamp(0.0, 100.0))
}

fn parse_hue(s: &str) -> Option<f64> {
    if let Some(v) = s.strip_suffix("deg") {
        return v.parse().ok();
    }
    if let Some(v) = s.strip_suffix("turn") {
        return v.parse::<f64>().ok().map(|t| t * 360.0);
    }
    if let Some(v) = s.strip_suffix("grad") {
        return v.parse::<f64>().ok().map(|g| g * 0.9);
    }
    if let Some(v) = s.strip_suffix("rad") {
        return v.parse::<f64>().ok().map(f64::to_degrees);
    }
    s.parse().ok()
}
