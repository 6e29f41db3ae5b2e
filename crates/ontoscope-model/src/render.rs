//! Human-readable projection of property values.
//!
//! The renderer is the one place the three-way value dispatch is spelled out:
//! absent values become a placeholder dash, primitives their direct textual
//! form, and nested structures an indented serialization meant to be
//! human-diffable (whitespace is not expected to round-trip exactly).

use crate::value::{PropertyValue, Scalar};

/// Shown for null/missing property values.
pub const PLACEHOLDER: &str = "-";

/// Project a property value into displayable text. Pure; never fails.
pub fn render_value(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Absent => PLACEHOLDER.to_string(),
        PropertyValue::Scalar(Scalar::Text(text)) => text.clone(),
        PropertyValue::Scalar(Scalar::Number(number)) => number.to_string(),
        PropertyValue::Scalar(Scalar::Bool(flag)) => flag.to_string(),
        PropertyValue::Structured(structured) => {
            // Serializing a Value back to JSON cannot fail; the compact form
            // is the fallback either way.
            serde_json::to_string_pretty(structured).unwrap_or_else(|_| structured.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(raw: serde_json::Value) -> String {
        render_value(&PropertyValue::classify(raw))
    }

    #[test]
    fn test_absent_renders_placeholder() {
        assert_eq!(render(json!(null)), PLACEHOLDER);
        assert_eq!(render_value(&PropertyValue::Absent), PLACEHOLDER);
    }

    #[test]
    fn test_scalars_render_directly() {
        assert_eq!(render(json!("hello")), "hello");
        assert_eq!(render(json!(42)), "42");
        assert_eq!(render(json!(true)), "true");
        assert_eq!(render(json!(4.5)), "4.5");
    }

    #[test]
    fn test_structured_renders_indented() {
        let text = render(json!({"a": 1}));
        assert!(text.contains('\n'), "structured output should be multi-line");
        assert!(text.contains("\"a\""));
        assert!(text.contains('1'));
    }

    #[test]
    fn test_array_renders_indented() {
        let text = render(json!([1, 2, 3]));
        assert!(text.starts_with('['));
        assert!(text.contains('\n'));
    }
}
