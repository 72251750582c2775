// SPDX: CC0-1.0

use core::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
}

/// Color of a curve nobody picked a color for.
pub const DEFAULT_CURVE: Rgb = Rgb::BLACK;

pub const AXIS: Rgb = Rgb::new(165, 165, 165);

pub const PALETTE: [(&str, Rgb); 8] = [
    ("black", Rgb::BLACK),
    ("red", Rgb::new(220, 38, 38)),
    ("orange", Rgb::new(234, 124, 22)),
    ("yellow", Rgb::new(202, 160, 8)),
    ("green", Rgb::new(22, 150, 60)),
    ("blue", Rgb::new(37, 99, 235)),
    ("purple", Rgb::new(126, 58, 200)),
    ("gray", Rgb::new(110, 110, 110)),
];

pub fn by_name(name: &str) -> Option<Rgb> {
    PALETTE
        .iter()
        .find(|(it, _)| it.eq_ignore_ascii_case(name))
        .map(|(_, rgb)| *rgb)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorErr {
    UnknownName(String),
    BadHex(String),
}

impl fmt::Display for ColorErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownName(name) => write!(f, "unknown color '{name}'"),
            Self::BadHex(text) => write!(f, "'{text}' is not a color of the form #rrggbb"),
        }
    }
}

impl std::error::Error for ColorErr {}

impl FromStr for Rgb {
    type Err = ColorErr;

    /// Accepts a palette name or `#rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            let bad = || ColorErr::BadHex(s.to_string());
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(bad());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
            Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
        } else {
            by_name(s).ok_or_else(|| ColorErr::UnknownName(s.to_string()))
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Palette name of `rgb`, if it has one.
pub fn name_of(rgb: Rgb) -> Option<&'static str> {
    PALETTE
        .iter()
        .find(|(_, it)| *it == rgb)
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_palette_names_case_insensitively() {
        assert_eq!("Blue".parse::<Rgb>(), Ok(Rgb::new(37, 99, 235)));
        assert_eq!("black".parse::<Rgb>(), Ok(Rgb::BLACK));
    }

    #[test]
    fn parses_hex() {
        assert_eq!("#ff8000".parse::<Rgb>(), Ok(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::new(255, 128, 0).to_string(), "#ff8000");
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!("#ff80".parse::<Rgb>(), Err(ColorErr::BadHex(_))));
        assert!(matches!("#gg0000".parse::<Rgb>(), Err(ColorErr::BadHex(_))));
        assert!(matches!(
            "mauve".parse::<Rgb>(),
            Err(ColorErr::UnknownName(_))
        ));
    }

    #[test]
    fn palette_is_distinct() {
        for (i, (_, a)) in PALETTE.iter().enumerate() {
            for (_, b) in &PALETTE[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(name_of(DEFAULT_CURVE), Some("black"));
    }
}
