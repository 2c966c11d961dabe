//! G-code line builder
//!
//! Firmware interpreters tolerate whitespace and comments but expect axis
//! words in a consistent order, so [`GcodeCommand`] always renders
//! `X Y Z E F` regardless of the order the builder methods were called in.

use crate::units::{format_decimal, EXTRUSION_DIGITS, FEED_DIGITS};
use std::fmt;

/// A single G-code instruction with an optional trailing comment
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GcodeCommand {
    code: String,
    x: Option<String>,
    y: Option<String>,
    z: Option<String>,
    e: Option<String>,
    f: Option<String>,
    extra: Vec<String>,
    comment: Option<String>,
}

impl GcodeCommand {
    /// Start a command such as `G0`, `G1` or `M204`.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn x(mut self, value: f64, digits: u32) -> Self {
        self.x = Some(format_decimal(value, digits));
        self
    }

    pub fn y(mut self, value: f64, digits: u32) -> Self {
        self.y = Some(format_decimal(value, digits));
        self
    }

    pub fn z(mut self, value: f64, digits: u32) -> Self {
        self.z = Some(format_decimal(value, digits));
        self
    }

    /// Extruder word, always at five decimal places.
    pub fn e(mut self, value: f64) -> Self {
        self.e = Some(format_decimal(value, EXTRUSION_DIGITS));
        self
    }

    /// Feed rate word in mm/min.
    pub fn feed(mut self, value: f64) -> Self {
        self.f = Some(format_decimal(value, FEED_DIGITS));
        self
    }

    /// Any other parameter word, rendered after the axis words.
    pub fn param(mut self, letter: char, value: impl fmt::Display) -> Self {
        self.extra.push(format!("{}{}", letter, value));
        self
    }

    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.comment = Some(text.into());
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for GcodeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        let axes = [
            ('X', &self.x),
            ('Y', &self.y),
            ('Z', &self.z),
            ('E', &self.e),
            ('F', &self.f),
        ];
        for (letter, word) in axes {
            if let Some(value) = word {
                write!(f, " {}{}", letter, value)?;
            }
        }
        for word in &self.extra {
            write!(f, " {}", word)?;
        }
        if let Some(comment) = &self.comment {
            write!(f, " ; {}", comment)?;
        }
        Ok(())
    }
}
