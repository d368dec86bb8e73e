//! Style resolution — merges a user override into the defaults.
//!
//! The merge is per-leaf: a partial `margins` override only changes the
//! named sides. Unknown keys anywhere in the override are rejected so a
//! typo never silently falls back to a default, and every numeric leaf
//! of the merged record is range-checked before the config is handed to
//! the renderer.

use serde_json::Value;

use crate::errors::StyleError;
use crate::style::StyleConfig;

// Documented ranges for every numeric leaf.
const FONT_SIZE_RANGE: (f64, f64) = (6.0, 72.0);
const MARGIN_RANGE_MM: (f64, f64) = (10.0, 50.0);
const SPACING_RANGE_PT: (f64, f64) = (0.0, 20.0);
const LINE_SPACING_RANGE: (f64, f64) = (1.0, 2.0);
const LEFT_INDENT_RANGE_CM: (f64, f64) = (0.0, 5.0);
const FIRST_LINE_INDENT_RANGE_CM: (f64, f64) = (-2.0, 2.0);

/// Merges `override_` (if any) into `defaults` and validates the result.
pub fn resolve(defaults: &StyleConfig, override_: Option<&Value>) -> Result<StyleConfig, StyleError> {
    let mut merged = defaults.clone();
    if let Some(value) = override_ {
        apply_override(&mut merged, value)?;
    }
    check_ranges(&merged)?;
    Ok(merged)
}

fn apply_override(style: &mut StyleConfig, value: &Value) -> Result<(), StyleError> {
    let map = value.as_object().ok_or(StyleError::NotAMapping)?;

    for (key, val) in map {
        match key.as_str() {
            "font_name" => style.font_name = string_leaf("font_name", val)?,
            "font_size" => style.font_size = number_leaf("font_size", val)?,
            "name_font_size" => style.name_font_size = number_leaf("name_font_size", val)?,
            "heading_font_size" => style.heading_font_size = number_leaf("heading_font_size", val)?,
            "margins" => apply_margins(style, val)?,
            "paragraph_spacing" => apply_paragraph_spacing(style, val)?,
            "bullet_style" => apply_bullet_style(style, val)?,
            other => return Err(StyleError::UnknownKey(other.to_string())),
        }
    }
    Ok(())
}

fn apply_margins(style: &mut StyleConfig, value: &Value) -> Result<(), StyleError> {
    let map = value.as_object().ok_or(StyleError::NotAMapping)?;
    for (key, val) in map {
        let field = format!("margins.{key}");
        match key.as_str() {
            "top" => style.margins.top = number_leaf(&field, val)?,
            "bottom" => style.margins.bottom = number_leaf(&field, val)?,
            "left" => style.margins.left = number_leaf(&field, val)?,
            "right" => style.margins.right = number_leaf(&field, val)?,
            _ => return Err(StyleError::UnknownKey(field)),
        }
    }
    Ok(())
}

fn apply_paragraph_spacing(style: &mut StyleConfig, value: &Value) -> Result<(), StyleError> {
    let map = value.as_object().ok_or(StyleError::NotAMapping)?;
    for (key, val) in map {
        let field = format!("paragraph_spacing.{key}");
        match key.as_str() {
            "before" => style.paragraph_spacing.before = number_leaf(&field, val)?,
            "after" => style.paragraph_spacing.after = number_leaf(&field, val)?,
            "line_spacing" => style.paragraph_spacing.line_spacing = number_leaf(&field, val)?,
            _ => return Err(StyleError::UnknownKey(field)),
        }
    }
    Ok(())
}

fn apply_bullet_style(style: &mut StyleConfig, value: &Value) -> Result<(), StyleError> {
    let map = value.as_object().ok_or(StyleError::NotAMapping)?;
    for (key, val) in map {
        let field = format!("bullet_style.{key}");
        match key.as_str() {
            "left_indent" => style.bullet_style.left_indent = number_leaf(&field, val)?,
            "first_line_indent" => style.bullet_style.first_line_indent = number_leaf(&field, val)?,
            "line_spacing" => style.bullet_style.line_spacing = number_leaf(&field, val)?,
            "space_after" => style.bullet_style.space_after = number_leaf(&field, val)?,
            "space_before" => style.bullet_style.space_before = number_leaf(&field, val)?,
            _ => return Err(StyleError::UnknownKey(field)),
        }
    }
    Ok(())
}

fn number_leaf(field: &str, value: &Value) -> Result<f64, StyleError> {
    value
        .as_f64()
        .ok_or_else(|| StyleError::ExpectedNumber(field.to_string()))
}

fn string_leaf(field: &str, value: &Value) -> Result<String, StyleError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| StyleError::ExpectedString(field.to_string()))
}

fn check_ranges(style: &StyleConfig) -> Result<(), StyleError> {
    let checks: &[(&str, f64, (f64, f64))] = &[
        ("font_size", style.font_size, FONT_SIZE_RANGE),
        ("name_font_size", style.name_font_size, FONT_SIZE_RANGE),
        ("heading_font_size", style.heading_font_size, FONT_SIZE_RANGE),
        ("margins.top", style.margins.top, MARGIN_RANGE_MM),
        ("margins.bottom", style.margins.bottom, MARGIN_RANGE_MM),
        ("margins.left", style.margins.left, MARGIN_RANGE_MM),
        ("margins.right", style.margins.right, MARGIN_RANGE_MM),
        (
            "paragraph_spacing.before",
            style.paragraph_spacing.before,
            SPACING_RANGE_PT,
        ),
        (
            "paragraph_spacing.after",
            style.paragraph_spacing.after,
            SPACING_RANGE_PT,
        ),
        (
            "paragraph_spacing.line_spacing",
            style.paragraph_spacing.line_spacing,
            LINE_SPACING_RANGE,
        ),
        (
            "bullet_style.left_indent",
            style.bullet_style.left_indent,
            LEFT_INDENT_RANGE_CM,
        ),
        (
            "bullet_style.first_line_indent",
            style.bullet_style.first_line_indent,
            FIRST_LINE_INDENT_RANGE_CM,
        ),
        (
            "bullet_style.line_spacing",
            style.bullet_style.line_spacing,
            LINE_SPACING_RANGE,
        ),
        (
            "bullet_style.space_after",
            style.bullet_style.space_after,
            SPACING_RANGE_PT,
        ),
        (
            "bullet_style.space_before",
            style.bullet_style.space_before,
            SPACING_RANGE_PT,
        ),
    ];

    for &(field, value, (min, max)) in checks {
        if !(min..=max).contains(&value) {
            return Err(StyleError::OutOfRange {
                field: field.to_string(),
                value,
                min,
                max,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_override_returns_defaults() {
        let defaults = StyleConfig::default();
        let resolved = resolve(&defaults, None).unwrap();
        assert_eq!(resolved, defaults);
    }

    #[test]
    fn test_merge_is_leaf_precise() {
        let defaults = StyleConfig::default();
        let override_ = json!({
            "font_size": 12,
            "margins": {"top": 20}
        });
        let resolved = resolve(&defaults, Some(&override_)).unwrap();

        // Overridden leaves take the override value.
        assert_eq!(resolved.font_size, 12.0);
        assert_eq!(resolved.margins.top, 20.0);
        // Sibling leaves of a partially-overridden map keep the defaults.
        assert_eq!(resolved.margins.bottom, defaults.margins.bottom);
        assert_eq!(resolved.margins.left, defaults.margins.left);
        assert_eq!(resolved.margins.right, defaults.margins.right);
        // Untouched maps stay default wholesale.
        assert_eq!(resolved.bullet_style, defaults.bullet_style);
        assert_eq!(resolved.font_name, defaults.font_name);
    }

    #[test]
    fn test_out_of_range_names_exact_field() {
        let override_ = json!({"margins": {"left": 60}});
        let err = resolve(&StyleConfig::default(), Some(&override_)).unwrap_err();
        match err {
            StyleError::OutOfRange { field, value, min, max } => {
                assert_eq!(field, "margins.left");
                assert_eq!(value, 60.0);
                assert_eq!((min, max), (10.0, 50.0));
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_line_spacing_bounds() {
        let too_low = json!({"paragraph_spacing": {"line_spacing": 0.5}});
        assert!(matches!(
            resolve(&StyleConfig::default(), Some(&too_low)),
            Err(StyleError::OutOfRange { .. })
        ));

        let at_bound = json!({"paragraph_spacing": {"line_spacing": 2.0}});
        let resolved = resolve(&StyleConfig::default(), Some(&at_bound)).unwrap();
        assert_eq!(resolved.paragraph_spacing.line_spacing, 2.0);
    }

    #[test]
    fn test_negative_first_line_indent_allowed() {
        let override_ = json!({"bullet_style": {"first_line_indent": -0.5}});
        let resolved = resolve(&StyleConfig::default(), Some(&override_)).unwrap();
        assert_eq!(resolved.bullet_style.first_line_indent, -0.5);
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let override_ = json!({"font_nmae": "Arial"});
        let err = resolve(&StyleConfig::default(), Some(&override_)).unwrap_err();
        assert_eq!(err, StyleError::UnknownKey("font_nmae".to_string()));
    }

    #[test]
    fn test_unknown_nested_key_rejected_with_path() {
        let override_ = json!({"margins": {"topp": 20}});
        let err = resolve(&StyleConfig::default(), Some(&override_)).unwrap_err();
        assert_eq!(err, StyleError::UnknownKey("margins.topp".to_string()));
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let override_ = json!({"font_size": "eleven"});
        let err = resolve(&StyleConfig::default(), Some(&override_)).unwrap_err();
        assert_eq!(err, StyleError::ExpectedNumber("font_size".to_string()));

        let override_ = json!({"font_name": 11});
        let err = resolve(&StyleConfig::default(), Some(&override_)).unwrap_err();
        assert_eq!(err, StyleError::ExpectedString("font_name".to_string()));
    }

    #[test]
    fn test_override_must_be_mapping() {
        let override_ = json!([1, 2, 3]);
        let err = resolve(&StyleConfig::default(), Some(&override_)).unwrap_err();
        assert_eq!(err, StyleError::NotAMapping);
    }
}
