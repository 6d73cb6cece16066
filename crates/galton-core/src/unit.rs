//! Probabilistic circuit units and variables.
//!
//! This module contains the node model of a probabilistic circuit: the
//! computation units that make up the circuit graph and the random
//! variables its leaves are defined over. These types carry only the
//! structure and display metadata a diagram needs; distribution
//! parameters and inference are out of scope.
//!
//! # Pipeline Position
//!
//! ```text
//! Circuit Document (JSON)
//!     ↓ circuit::document
//! ProbabilisticCircuit (DiGraph<Unit, Edge>)
//!     ↓ layout
//! Grid Positions
//!     ↓ export
//! draw.io XML
//! ```

use std::fmt;

use serde::Deserialize;

use crate::style::{self, NodeStyle};

/// A named random variable attached to a leaf unit.
///
/// Leaves are defined over an ordered, non-empty sequence of variables;
/// the first variable's name labels the leaf in the exported diagram.
///
/// # Examples
///
/// ```
/// use galton_core::unit::Variable;
///
/// let x = Variable::new("x");
/// assert_eq!(x.name(), "x");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct Variable(String);

impl Variable {
    /// Creates a variable with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the variable's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Variable {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A computation unit in a probabilistic circuit.
///
/// Circuits are directed acyclic graphs of units: composite units
/// (sums and products) combine their children, while leaves stand for
/// distributions over named variables. In circuit documents a unit is
/// written as a tagged object, e.g. `{"kind": "sum"}` or
/// `{"kind": "leaf", "variables": ["x"]}`.
///
/// Each unit kind produces its own draw.io style descriptor via
/// [`Unit::drawio_style`]; the exporter forwards it without inspecting
/// its contents.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Unit {
    /// A weighted mixture over its children. Outgoing edges carry
    /// log-space weights.
    Sum,

    /// A factorized product over its children. Outgoing edges are
    /// unweighted.
    Product,

    /// A distribution over one or more named variables. Well-formed
    /// leaves have at least one variable.
    Leaf {
        /// The variables this leaf is defined over, in scope order.
        variables: Vec<Variable>,
    },
}

impl Unit {
    /// Creates a leaf unit over the given variable names.
    ///
    /// # Examples
    ///
    /// ```
    /// use galton_core::unit::Unit;
    ///
    /// let leaf = Unit::leaf(["x"]);
    /// assert!(leaf.is_leaf());
    /// assert_eq!(leaf.variables()[0].name(), "x");
    /// ```
    pub fn leaf<I, S>(variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Leaf {
            variables: variables.into_iter().map(Variable::new).collect(),
        }
    }

    /// Returns true if this unit is a leaf distribution.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Returns the variables this unit is defined over.
    ///
    /// Composite units return an empty slice; their scope is implied by
    /// their descendants and is not materialized here.
    pub fn variables(&self) -> &[Variable] {
        match self {
            Self::Leaf { variables } => variables,
            Self::Sum | Self::Product => &[],
        }
    }

    /// Produces the draw.io style descriptor for this unit kind.
    ///
    /// The descriptor is owned by the unit: the exporter forwards it to
    /// the diagram verbatim, so shape, colors, and sizing are decided
    /// here per kind.
    pub fn drawio_style(&self) -> NodeStyle {
        match self {
            Self::Sum => style::sum_node(),
            Self::Product => style::product_node(),
            Self::Leaf { .. } => style::leaf_node(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_constructor() {
        let leaf = Unit::leaf(["x", "y"]);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.variables().len(), 2);
        assert_eq!(leaf.variables()[0].name(), "x");
        assert_eq!(leaf.variables()[1].name(), "y");
    }

    #[test]
    fn test_composite_units_have_no_variables() {
        assert!(!Unit::Sum.is_leaf());
        assert!(!Unit::Product.is_leaf());
        assert!(Unit::Sum.variables().is_empty());
        assert!(Unit::Product.variables().is_empty());
    }

    #[test]
    fn test_variable_display() {
        let var = Variable::new("rain");
        assert_eq!(var.to_string(), "rain");
        assert_eq!(format!("{var}"), "rain");
    }

    #[test]
    fn test_deserialize_tagged_units() {
        let sum: Unit = serde_json::from_str(r#"{"kind": "sum"}"#).unwrap();
        assert_eq!(sum, Unit::Sum);

        let product: Unit = serde_json::from_str(r#"{"kind": "product"}"#).unwrap();
        assert_eq!(product, Unit::Product);

        let leaf: Unit =
            serde_json::from_str(r#"{"kind": "leaf", "variables": ["x"]}"#).unwrap();
        assert_eq!(leaf, Unit::leaf(["x"]));
    }

    #[test]
    fn test_deserialize_unknown_kind_is_rejected() {
        let result: Result<Unit, _> = serde_json::from_str(r#"{"kind": "max"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_style_dispatch_per_kind() {
        let sum = Unit::Sum.drawio_style();
        let product = Unit::Product.drawio_style();
        let leaf = Unit::leaf(["x"]).drawio_style();

        assert_ne!(sum.style(), product.style());
        assert_ne!(sum.style(), leaf.style());
        // Leaves suppress their own shape label; the variable name is
        // carried by a separate text node.
        assert_eq!(leaf.label(), Some(""));
    }
}
