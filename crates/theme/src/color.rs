//! Color expressions
//!
//! Theme roles hold CSS color expressions verbatim (`oklch(0.5 0.15 250)`,
//! `#1E1E1E`). They are never converted, only checked to be something a
//! stylesheet will accept.

use std::str::FromStr;

/// RGBA Color (0-255)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#')?;
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let nibble = |i: usize| u8::from_str_radix(&s[i..i + 1], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();

        match s.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Self::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

/// CSS color functions accepted in a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFunction {
    Rgb,
    Rgba,
    Hsl,
    Hsla,
    Hwb,
    Lab,
    Lch,
    Oklab,
    Oklch,
    Color,
}

impl ColorFunction {
    fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "rgb" => Some(Self::Rgb),
            "rgba" => Some(Self::Rgba),
            "hsl" => Some(Self::Hsl),
            "hsla" => Some(Self::Hsla),
            "hwb" => Some(Self::Hwb),
            "lab" => Some(Self::Lab),
            "lch" => Some(Self::Lch),
            "oklab" => Some(Self::Oklab),
            "oklch" => Some(Self::Oklch),
            "color" => Some(Self::Color),
            _ => None,
        }
    }
}

/// A parsed color expression
#[derive(Debug, Clone, PartialEq)]
pub enum ColorExpr {
    Hex(Rgba),
    Function { function: ColorFunction, args: String },
}

impl FromStr for ColorExpr {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.starts_with('#') {
            return Rgba::from_hex(s).map(Self::Hex).ok_or(());
        }

        let open = s.find('(').ok_or(())?;
        let body = s.strip_suffix(')').ok_or(())?;
        let function = ColorFunction::parse(&s[..open]).ok_or(())?;
        let args = body[open + 1..].trim();

        if args.is_empty() || args.contains(['(', ')']) {
            return Err(());
        }

        Ok(Self::Function {
            function,
            args: args.to_string(),
        })
    }
}

/// Whether a stylesheet would accept `expr` as a color
pub fn is_valid_color(expr: &str) -> bool {
    expr.parse::<ColorExpr>().is_ok()
}
