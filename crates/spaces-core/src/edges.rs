// crates/spaces-core/src/edges.rs
use crate::SizeUnit;
use serde::{Deserialize, Serialize};

/// The six box edges a space carries geometry for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
    Width,
    Height,
}

impl Edge {
    /// Emission order of positional styling
    pub const ALL: [Edge; 6] = [
        Edge::Left,
        Edge::Top,
        Edge::Right,
        Edge::Bottom,
        Edge::Width,
        Edge::Height,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Top => "top",
            Edge::Right => "right",
            Edge::Bottom => "bottom",
            Edge::Width => "width",
            Edge::Height => "height",
        }
    }

    /// Whether percentages on this edge resolve against the container width
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Edge::Left | Edge::Right | Edge::Width)
    }
}

/// Geometry of one edge: the declared size plus offsets contributed by siblings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeMetric {
    pub size: Option<SizeUnit>,
    pub adjusted: Vec<SizeUnit>,
    /// Manual resize delta. Reset on every size change, never accumulated here.
    pub resized: f32,
}

impl EdgeMetric {
    pub fn new(size: Option<SizeUnit>) -> Self {
        Self {
            size,
            adjusted: Vec::new(),
            resized: 0.0,
        }
    }

    /// Replace the sibling adjustments, reporting whether anything moved.
    ///
    /// The comparison is by value, element by element, so recomputing the
    /// same contributions is a no-op.
    pub fn adjust(&mut self, adjusted: Vec<SizeUnit>) -> bool {
        if self.adjusted == adjusted {
            return false;
        }

        self.adjusted = adjusted;
        true
    }

    /// Set the declared size. Returns true and clears `resized` when it differs.
    pub fn set_size(&mut self, size: Option<SizeUnit>) -> bool {
        if self.size == size {
            return false;
        }

        self.size = size;
        self.resized = 0.0;
        true
    }

    /// Format the edge as a CSS length.
    ///
    /// `0` when the size is the numeric zero with nothing else applied,
    /// a `calc(..)` sum of the declared size and every adjustment otherwise,
    /// `None` when there is nothing to emit.
    pub fn css(&self) -> Option<String> {
        if self.size.as_ref().is_some_and(SizeUnit::is_zero)
            && self.adjusted.is_empty()
            && self.resized == 0.0
        {
            return Some("0".to_string());
        }

        let parts: Vec<String> = self
            .size
            .iter()
            .chain(self.adjusted.iter())
            .map(SizeUnit::to_css)
            .collect();

        if parts.is_empty() {
            return None;
        }

        Some(format!("calc({})", parts.join(" + ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_is_idempotent() {
        let mut edge = EdgeMetric::new(Some(SizeUnit::px(0.0)));
        let contributions = vec![SizeUnit::length("10px"), SizeUnit::length("5%")];

        assert!(edge.adjust(contributions.clone()));
        assert!(!edge.adjust(contributions));
        assert!(edge.adjust(Vec::new()));
        assert!(!edge.adjust(Vec::new()));
    }

    #[test]
    fn test_adjust_compares_values_not_lengths_only() {
        let mut edge = EdgeMetric::default();
        edge.adjust(vec![SizeUnit::length("10px")]);

        assert!(edge.adjust(vec![SizeUnit::length("20px")]));
        assert!(edge.adjust(vec![SizeUnit::px(20.0)]));
        assert_eq!(edge.adjusted, vec![SizeUnit::px(20.0)]);
    }

    #[test]
    fn test_css_literal_zero() {
        let edge = EdgeMetric::new(Some(SizeUnit::px(0.0)));
        assert_eq!(edge.css().as_deref(), Some("0"));
    }

    #[test]
    fn test_css_zero_with_adjustments() {
        let mut edge = EdgeMetric::new(Some(SizeUnit::px(0.0)));
        edge.adjust(vec![SizeUnit::length("15%")]);
        assert_eq!(edge.css().as_deref(), Some("calc(0px + 15%)"));
    }

    #[test]
    fn test_css_adjustments_only() {
        let mut edge = EdgeMetric::default();
        edge.adjust(vec![SizeUnit::length("10px"), SizeUnit::length("5%")]);
        assert_eq!(edge.css().as_deref(), Some("calc(10px + 5%)"));
    }

    #[test]
    fn test_css_unset() {
        assert_eq!(EdgeMetric::default().css(), None);
    }

    #[test]
    fn test_css_single_size() {
        let edge = EdgeMetric::new(Some(SizeUnit::length("20%")));
        assert_eq!(edge.css().as_deref(), Some("calc(20%)"));
    }

    #[test]
    fn test_set_size_resets_resize() {
        let mut edge = EdgeMetric::new(Some(SizeUnit::px(10.0)));
        edge.resized = 4.0;

        assert!(!edge.set_size(Some(SizeUnit::px(10.0))));
        assert_eq!(edge.resized, 4.0);

        assert!(edge.set_size(Some(SizeUnit::px(12.0))));
        assert_eq!(edge.resized, 0.0);
    }
}
