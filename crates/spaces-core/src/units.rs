// crates/spaces-core/src/units.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// A declared length: either a pixel count or an already formatted CSS length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeUnit {
    /// Literal pixel count, rendered as `<n>px`
    Pixels(f32),
    /// Pre-formatted length such as `"15%"` or `"10px"`, rendered verbatim
    Length(String),
}

impl SizeUnit {
    pub fn px(value: f32) -> Self {
        SizeUnit::Pixels(value)
    }

    pub fn length(value: impl Into<String>) -> Self {
        SizeUnit::Length(value.into())
    }

    /// Exactly the numeric zero. `"0"` or `"0px"` strings do not count.
    pub fn is_zero(&self) -> bool {
        matches!(self, SizeUnit::Pixels(px) if *px == 0.0)
    }

    /// A length that contributes nothing when stacked against a sibling
    pub fn is_blank(&self) -> bool {
        match self {
            SizeUnit::Pixels(px) => *px == 0.0 || px.is_nan(),
            SizeUnit::Length(value) => value.is_empty(),
        }
    }

    pub fn to_css(&self) -> String {
        match self {
            SizeUnit::Pixels(px) => format!("{}px", px),
            SizeUnit::Length(value) => value.clone(),
        }
    }

    /// Convert to pixels given the container length along the same axis.
    ///
    /// Understands plain numbers, `px` and `%` lengths. Anything else
    /// (`em`, `vh`, nested `calc`) cannot be resolved without a real
    /// layout engine and yields `None`.
    pub fn to_pixels(&self, container: f32) -> Option<f32> {
        match self {
            SizeUnit::Pixels(px) => Some(*px),
            SizeUnit::Length(value) => {
                let value = value.trim();

                if let Some(pct) = value.strip_suffix('%') {
                    return pct.trim().parse::<f32>().ok().map(|pct| pct * container / 100.0);
                }

                if let Some(px) = value.strip_suffix("px") {
                    return px.trim().parse::<f32>().ok();
                }

                value.parse::<f32>().ok()
            }
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl From<f32> for SizeUnit {
    fn from(value: f32) -> Self {
        SizeUnit::Pixels(value)
    }
}

impl From<i32> for SizeUnit {
    fn from(value: i32) -> Self {
        SizeUnit::Pixels(value as f32)
    }
}

impl From<&str> for SizeUnit {
    fn from(value: &str) -> Self {
        SizeUnit::Length(value.to_string())
    }
}

impl From<String> for SizeUnit {
    fn from(value: String) -> Self {
        SizeUnit::Length(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_formatting() {
        assert_eq!(SizeUnit::px(10.0).to_css(), "10px");
        assert_eq!(SizeUnit::px(12.5).to_css(), "12.5px");
        assert_eq!(SizeUnit::px(0.0).to_css(), "0px");
        assert_eq!(SizeUnit::length("15%").to_css(), "15%");
    }

    #[test]
    fn test_zero_is_numeric_only() {
        assert!(SizeUnit::px(0.0).is_zero());
        assert!(!SizeUnit::length("0").is_zero());
        assert!(!SizeUnit::length("0px").is_zero());
        assert!(!SizeUnit::px(1.0).is_zero());
    }

    #[test]
    fn test_blank_lengths() {
        assert!(SizeUnit::px(0.0).is_blank());
        assert!(SizeUnit::length("").is_blank());
        assert!(!SizeUnit::length("0").is_blank());
        assert!(!SizeUnit::length("20%").is_blank());
    }

    #[test]
    fn test_to_pixels() {
        assert_eq!(SizeUnit::px(100.0).to_pixels(400.0), Some(100.0));
        assert_eq!(SizeUnit::length("50%").to_pixels(400.0), Some(200.0));
        assert_eq!(SizeUnit::length("24px").to_pixels(400.0), Some(24.0));
        assert_eq!(SizeUnit::length("0").to_pixels(400.0), Some(0.0));
        assert_eq!(SizeUnit::length("2em").to_pixels(400.0), None);
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let units: Vec<SizeUnit> = serde_json::from_str(r#"[10, "20%"]"#).unwrap();
        assert_eq!(units, vec![SizeUnit::px(10.0), SizeUnit::length("20%")]);
    }
}
