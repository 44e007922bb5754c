use crate::Error;

/// 8-bit RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

/// Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

// Channel equality tolerance when picking the hue sector.
const HUE_CHANNEL_EPSILON: f64 = 0.001;

impl Color {
    pub const TRANSPARENT: Color = Color(0, 0, 0, 0);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(r, g, b, 255)
    }
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color(r, g, b, a)
    }
    pub fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color(r, g, b, a)
    }

    pub fn r(self) -> u8 {
        self.0
    }
    pub fn g(self) -> u8 {
        self.1
    }
    pub fn b(self) -> u8 {
        self.2
    }
    pub fn a(self) -> u8 {
        self.3
    }

    /// Lenient hex parse: `#RRGGBB` or `#RRGGBBAA`, bad digits read as zero.
    pub fn from_hex(hex: &str) -> Self {
        let s = hex.trim_start_matches('#');
        if !s.is_ascii() {
            return Color(0, 0, 0, 255);
        }
        let (r, g, b, a) = match s.len() {
            6 => (
                u8::from_str_radix(&s[0..2], 16).unwrap_or(0),
                u8::from_str_radix(&s[2..4], 16).unwrap_or(0),
                u8::from_str_radix(&s[4..6], 16).unwrap_or(0),
                255,
            ),
            8 => (
                u8::from_str_radix(&s[0..2], 16).unwrap_or(0),
                u8::from_str_radix(&s[2..4], 16).unwrap_or(0),
                u8::from_str_radix(&s[4..6], 16).unwrap_or(0),
                u8::from_str_radix(&s[6..8], 16).unwrap_or(255),
            ),
            _ => (0, 0, 0, 255),
        };
        Color(r, g, b, a)
    }

    /// Strict variant of [`Color::from_hex`].
    pub fn parse_hex(hex: &str) -> Result<Self, Error> {
        let bytes = hex_bytes(hex)?;
        Ok(match bytes[..] {
            [r, g, b] => Color(r, g, b, 255),
            [r, g, b, a] => Color(r, g, b, a),
            _ => return Err(Error::InvalidHex(hex.to_string())),
        })
    }

    /// Strict parse of `#RRGGBB` or `#AARRGGBB`, the form [`Color::to_argb_hex`] writes.
    pub fn parse_argb_hex(hex: &str) -> Result<Self, Error> {
        let bytes = hex_bytes(hex)?;
        Ok(match bytes[..] {
            [r, g, b] => Color(r, g, b, 255),
            [a, r, g, b] => Color(r, g, b, a),
            _ => return Err(Error::InvalidHex(hex.to_string())),
        })
    }

    /// `#AARRGGBB`, upper case.
    pub fn to_argb_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.3, self.0, self.1, self.2)
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Color(self.0, self.1, self.2, a)
    }

    /// Six-sector HSV to RGB. Every intermediate channel is truncated to a
    /// byte, `v` first, then `p`, `q` and `t` derived from the truncated `v`.
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let sector = (hue / 60.0).floor();
        let f = hue / 60.0 - sector;
        let v = (value * 255.0) as u8;
        let vf = v as f64;
        let p = (vf * (1.0 - saturation)) as u8;
        let q = (vf * (1.0 - f * saturation)) as u8;
        let t = (vf * (1.0 - (1.0 - f) * saturation)) as u8;
        match (sector as i64).rem_euclid(6) {
            0 => Color(v, t, p, 255),
            1 => Color(q, v, p, 255),
            2 => Color(p, v, t, 255),
            3 => Color(p, q, v, 255),
            4 => Color(t, p, v, 255),
            5 => Color(v, p, q, 255),
            _ => Color::WHITE,
        }
    }

    pub fn to_hsv(self) -> Hsv {
        let r = self.0 as f64 / 255.0;
        let g = self.1 as f64 / 255.0;
        let b = self.2 as f64 / 255.0;

        let max = r.max(g.max(b));
        let min = r.min(g.min(b));
        let delta = max - min;

        let s = if max == 0.0 { 0.0 } else { delta / max };

        let mut h = if delta == 0.0 {
            0.0
        } else if (max - r).abs() < HUE_CHANNEL_EPSILON {
            60.0 * (((g - b) / delta) % 6.0)
        } else if (max - g).abs() < HUE_CHANNEL_EPSILON {
            60.0 * ((b - r) / delta + 2.0)
        } else if (max - b).abs() < HUE_CHANNEL_EPSILON {
            60.0 * ((r - g) / delta + 4.0)
        } else {
            0.0
        };
        if h < 0.0 {
            h += 360.0;
        }
        if h >= 360.0 {
            h -= 360.0;
        }

        Hsv { h, s, v: max }
    }
}

impl From<Hsv> for Color {
    fn from(hsv: Hsv) -> Self {
        Color::from_hsv(hsv.h, hsv.s, hsv.v)
    }
}

impl From<Color> for Hsv {
    fn from(c: Color) -> Self {
        c.to_hsv()
    }
}

// Three or four channel bytes from six or eight hex digits.
fn hex_bytes(hex: &str) -> Result<Vec<u8>, Error> {
    let s = hex.trim_start_matches('#');
    let invalid = || Error::InvalidHex(hex.to_string());
    if !s.is_ascii() || !(s.len() == 6 || s.len() == 8) {
        return Err(invalid());
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| invalid()))
        .collect()
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_argb_hex())
    }
}

impl Hsv {
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }
}

/// Degrees in `[0, 360)`.
pub fn normalize_hue(degrees: f64) -> f64 {
    let h = degrees.rem_euclid(360.0);
    if h >= 360.0 { 0.0 } else { h }
}
