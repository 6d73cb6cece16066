//! draw.io style vocabulary for circuit diagrams.
//!
//! This module defines the visual attribute sets the exporter attaches
//! to diagram elements: [`NodeStyle`] for shapes and text nodes,
//! [`EdgeStyle`] for links, and the fixed style strings shared by every
//! export. Style strings use the draw.io (mxGraph) `key=value;` syntax
//! and are treated as opaque by everything downstream of this crate.
//!
//! Unit shapes are produced per kind by [`Unit::drawio_style`]
//! (sum = blue ellipse, product = green ellipse, leaf = amber box);
//! auxiliary variable labels use [`variable_label`].
//!
//! [`Unit::drawio_style`]: crate::unit::Unit::drawio_style

/// Fixed link style for circuit edges: a classic arrowhead on a
/// straight, unrounded connector. Weighted links append an `opacity`
/// entry to this base.
pub const ARROW_STYLE: &str = "endArrow=classic;html=1;rounded=0;";

/// Fixed style for the auxiliary text nodes that carry leaf variable
/// names, left-aligned beside the leaf shape.
pub const TEXT_STYLE: &str = "text;html=1;align=left;verticalAlign=middle;\
                              whiteSpace=wrap;rounded=0;fontFamily=Helvetica;\
                              fontSize=12;fontColor=default;";

const SUM_STYLE: &str =
    "ellipse;whiteSpace=wrap;html=1;aspect=fixed;fillColor=#dae8fc;strokeColor=#6c8ebf;";
const PRODUCT_STYLE: &str =
    "ellipse;whiteSpace=wrap;html=1;aspect=fixed;fillColor=#d5e8d4;strokeColor=#82b366;";
const LEAF_STYLE: &str =
    "rounded=1;whiteSpace=wrap;html=1;fillColor=#ffe6cc;strokeColor=#d79b00;";

/// Diameter of composite (sum/product) unit ellipses in pixels.
const COMPOSITE_SIZE: u32 = 40;
/// Edge length of leaf unit boxes in pixels.
const LEAF_SIZE: u32 = 30;
/// Footprint of a variable label text node in pixels.
const LABEL_WIDTH: u32 = 100;
const LABEL_HEIGHT: u32 = 30;

/// Visual attribute set for a diagram node.
///
/// Carries the draw.io style string, the node's footprint, and an
/// optional explicit label. A node with no label falls back to the
/// sink's default labelling (the node id), so styles that want an
/// unlabelled shape set an empty label explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStyle {
    style: String,
    label: Option<String>,
    width: u32,
    height: u32,
}

impl NodeStyle {
    /// Creates a node style with the given draw.io style string and
    /// footprint, and no explicit label.
    pub fn new(style: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            style: style.into(),
            label: None,
            width,
            height,
        }
    }

    /// Sets the explicit label. An empty string suppresses the sink's
    /// default node label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the draw.io style string.
    pub fn style(&self) -> &str {
        &self.style
    }

    /// Returns the explicit label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the node width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the node height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Visual attribute set for a diagram link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeStyle {
    style: String,
    label: Option<String>,
}

impl EdgeStyle {
    /// Creates an edge style with the given draw.io style string and no
    /// label.
    pub fn new(style: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            label: None,
        }
    }

    /// Sets the link label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the draw.io style string.
    pub fn style(&self) -> &str {
        &self.style
    }

    /// Returns the link label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Style for a sum unit: a blue ellipse.
pub fn sum_node() -> NodeStyle {
    NodeStyle::new(SUM_STYLE, COMPOSITE_SIZE, COMPOSITE_SIZE)
}

/// Style for a product unit: a green ellipse.
pub fn product_node() -> NodeStyle {
    NodeStyle::new(PRODUCT_STYLE, COMPOSITE_SIZE, COMPOSITE_SIZE)
}

/// Style for a leaf unit: a small amber box with its own label
/// suppressed; the variable name is rendered by a separate text node.
pub fn leaf_node() -> NodeStyle {
    NodeStyle::new(LEAF_STYLE, LEAF_SIZE, LEAF_SIZE).with_label("")
}

/// Style for the text node carrying a leaf's variable name.
pub fn variable_label(name: &str) -> NodeStyle {
    NodeStyle::new(TEXT_STYLE, LABEL_WIDTH, LABEL_HEIGHT).with_label(name)
}

/// Style for an unweighted structural link.
pub fn structural_link() -> EdgeStyle {
    EdgeStyle::new(ARROW_STYLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_style_defaults_to_no_label() {
        let style = NodeStyle::new("rounded=0;", 10, 20);
        assert_eq!(style.label(), None);
        assert_eq!(style.width(), 10);
        assert_eq!(style.height(), 20);
    }

    #[test]
    fn test_with_label_overrides() {
        let style = NodeStyle::new("text;", 100, 30).with_label("x");
        assert_eq!(style.label(), Some("x"));
    }

    #[test]
    fn test_variable_label_footprint() {
        let label = variable_label("humidity");
        assert_eq!(label.label(), Some("humidity"));
        assert_eq!((label.width(), label.height()), (100, 30));
        assert!(label.style().starts_with("text;"));
    }

    #[test]
    fn test_structural_link_is_unlabelled() {
        let link = structural_link();
        assert_eq!(link.label(), None);
        assert_eq!(link.style(), ARROW_STYLE);
    }

    #[test]
    fn test_composite_styles_are_ellipses() {
        assert!(sum_node().style().starts_with("ellipse;"));
        assert!(product_node().style().starts_with("ellipse;"));
    }
}
