//! ARGB colors as edited in the property grid.

use crate::descriptor::{Describe, ParseConverter, PropertyDescriptor, Value, ValueKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{0}` (expected #RRGGBB, #AARRGGBB, r,g,b, a,r,g,b or a color name)")]
pub struct ParseColorError(pub String);

impl Color {
    /// Sentinel meaning "let the chart pick a palette color".
    pub const AUTOMATIC: Color = Color::argb(0, 0, 0, 1);
    pub const TRANSPARENT: Color = Color::argb(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub fn is_automatic(&self) -> bool {
        *self == Self::AUTOMATIC
    }

    fn named(name: &str) -> Option<Self> {
        let c = match name {
            "automatic" => Self::AUTOMATIC,
            "transparent" => Self::TRANSPARENT,
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "blue" => Self::rgb(0, 0, 255),
            "orange" => Self::rgb(255, 165, 0),
            "yellow" => Self::rgb(255, 255, 0),
            "purple" => Self::rgb(128, 0, 128),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            _ => return None,
        };
        Some(c)
    }

    /// Property-grid converter for colors. Bad input keeps the previous color.
    pub fn converter() -> ParseConverter {
        ParseConverter::new(
            ValueKind::Color,
            |s| s.parse::<Color>().map(Value::Color).map_err(|e| e.to_string()),
            |v| v.to_string(),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::AUTOMATIC
    }
}

fn hex_byte(s: &str) -> Option<u8> {
    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(s, 16).ok()
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let err = || ParseColorError(s.to_string());
        if let Some(hex) = t.strip_prefix('#') {
            if !hex.is_ascii() {
                return Err(err());
            }
            let bytes: Option<Vec<u8>> = (0..hex.len())
                .step_by(2)
                .map(|i| hex.get(i..i + 2).and_then(hex_byte))
                .collect();
            return match (hex.len(), bytes) {
                (6, Some(b)) => Ok(Self::rgb(b[0], b[1], b[2])),
                (8, Some(b)) => Ok(Self::argb(b[0], b[1], b[2], b[3])),
                _ => Err(err()),
            };
        }
        if t.contains(',') {
            let parts: Result<Vec<u8>, _> = t.split(',').map(|p| p.trim().parse::<u8>()).collect();
            return match parts.map_err(|_| err())?.as_slice() {
                [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
                [a, r, g, b] => Ok(Self::argb(*a, *r, *g, *b)),
                _ => Err(err()),
            };
        }
        Self::named(&t.to_ascii_lowercase()).ok_or_else(err)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_automatic() {
            f.write_str("Automatic")
        } else if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
        }
    }
}

fn channel(name: &str, get: fn(&Color) -> u8, set: fn(&mut Color, u8)) -> PropertyDescriptor {
    PropertyDescriptor::read_write(
        name,
        ValueKind::Int,
        move |c: &Color| Value::Int(get(c) as i64),
        move |c: &mut Color, v| {
            let n = v.into_int()?;
            set(c, n.clamp(0, 255) as u8);
            Ok(())
        },
    )
}

impl Describe for Color {
    const VALUE_KIND: Option<ValueKind> = Some(ValueKind::Color);

    fn describe_fields() -> Vec<PropertyDescriptor> {
        vec![
            channel("A", |c| c.a, |c, v| c.a = v),
            channel("R", |c| c.r, |c, v| c.r = v),
            channel("G", |c| c.g, |c, v| c.g = v),
            channel("B", |c| c.b, |c, v| c.b = v),
        ]
    }
}
