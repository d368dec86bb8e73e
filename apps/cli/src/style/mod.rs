//! Style configuration — the single source of formatting truth.
//!
//! A `StyleConfig` is resolved once per generation (defaults + optional
//! user override, see [`resolver`]) and passed by reference into the
//! document sink. Nothing mutates it afterwards.

pub mod resolver;

use serde::{Deserialize, Serialize};

/// Resolved document formatting parameters.
///
/// Units: font sizes in points, margins in millimeters, indents in
/// centimeters, spacing in points, line spacing as a multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub font_name: String,
    pub font_size: f64,
    pub name_font_size: f64,
    pub heading_font_size: f64,
    pub margins: Margins,
    pub paragraph_spacing: ParagraphSpacing,
    pub bullet_style: BulletStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphSpacing {
    pub before: f64,
    pub after: f64,
    pub line_spacing: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletStyle {
    pub left_indent: f64,
    pub first_line_indent: f64,
    pub line_spacing: f64,
    pub space_after: f64,
    pub space_before: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig {
            font_name: "Calibri".to_string(),
            font_size: 11.0,
            name_font_size: 14.0,
            heading_font_size: 11.0,
            margins: Margins {
                top: 15.0,
                bottom: 15.0,
                left: 15.0,
                right: 15.0,
            },
            paragraph_spacing: ParagraphSpacing {
                before: 0.0,
                after: 2.0,
                line_spacing: 1.0,
            },
            bullet_style: BulletStyle {
                left_indent: 0.5,
                first_line_indent: -0.25,
                line_spacing: 1.0,
                space_after: 3.0,
                space_before: 0.0,
            },
        }
    }
}
