//! Validation module for AST elements using the visitor pattern
//!
//! This module implements a visitor-based (read-only) traversal system for AST validation.
//! It sits between the desugar and elaboration phases, allowing for semantic
//! validation of the AST before elaboration.
//!
//! ## Validations Performed
//!
//! - **Component Identifier References**: Validates that all component identifiers referenced
//!   in relations, notes, and activation statements are defined in the diagram
//! - **Activate/Deactivate Pairing**: Ensures activate statements have corresponding deactivate
//!   statements in sequence diagrams
//! - **Note Alignment**: Validates that note alignment values are appropriate for the diagram type

use std::collections::HashMap;

use super::{
    parser_types::{
        Attribute, AttributeValue, Diagram, Element, Fragment, FragmentSection, Note,
        TypeDefinition, TypeSpec,
    },
    span::{Span, Spanned},
};
use crate::{
    error::diagnostic::{DiagnosticError, Result},
    identifier::Id,
};

/// Visitor trait for traversing/analyzing AST nodes.
///
/// Each method takes a reference to its input and can accumulate state or errors.
/// Default implementations perform recursive traversal so implementors can override
/// only the methods they care about.
pub trait Visitor<'a> {
    /// Visit a complete diagram
    fn visit_diagram(&mut self, diagram: &Diagram<'a>) {
        self.visit_diagram_kind(&diagram.kind);
        self.visit_attributes(&diagram.attributes);
        self.visit_type_definitions(&diagram.type_definitions);
        self.visit_elements(&diagram.elements);
    }

    /// Visit the diagram kind (component, sequence, etc.)
    fn visit_diagram_kind(&mut self, _kind: &Spanned<&'a str>) {}

    /// Visit a list of attributes
    fn visit_attributes(&mut self, attributes: &[Attribute<'a>]) {
        for attr in attributes {
            self.visit_attribute(attr);
        }
    }

    /// Visit a single attribute
    fn visit_attribute(&mut self, attribute: &Attribute<'a>) {
        self.visit_attribute_name(&attribute.name);
        self.visit_attribute_value(&attribute.value);
    }

    /// Visit an attribute name
    fn visit_attribute_name(&mut self, _name: &Spanned<&'a str>) {}

    /// Visit an attribute value
    fn visit_attribute_value(&mut self, value: &AttributeValue<'a>) {
        match value {
            AttributeValue::String(s) => self.visit_string_value(s),
            AttributeValue::Float(f) => self.visit_float_value(f),
            AttributeValue::Attributes(attrs) => self.visit_attributes(attrs),
            AttributeValue::Identifiers(ids) => self.visit_identifiers(ids),
            AttributeValue::Empty => {}
        }
    }

    /// Visit a string attribute value
    fn visit_string_value(&mut self, _value: &Spanned<String>) {}

    /// Visit a float attribute value
    fn visit_float_value(&mut self, _value: &Spanned<f32>) {}

    /// Visit a single identifier (component reference)
    fn visit_identifier(&mut self, _identifier: &Spanned<Id>) {}

    /// Visit an identifiers attribute value (list of identifiers)
    fn visit_identifiers(&mut self, identifiers: &[Spanned<Id>]) {
        for identifier in identifiers {
            self.visit_identifier(identifier);
        }
    }

    /// Visit a list of type definitions
    fn visit_type_definitions(&mut self, type_definitions: &[TypeDefinition<'a>]) {
        for td in type_definitions {
            self.visit_type_definition(td);
        }
    }

    /// Visit a single type definition
    fn visit_type_definition(&mut self, type_def: &TypeDefinition<'a>) {
        self.visit_type_name(&type_def.name);
        self.visit_type_spec(&type_def.type_spec);
    }

    /// Visit a type name
    fn visit_type_name(&mut self, _name: &Spanned<Id>) {}

    /// Visit a base type
    fn visit_base_type(&mut self, _base_type: &Spanned<Id>) {}

    /// Visit a type specification
    fn visit_type_spec(&mut self, type_spec: &TypeSpec<'a>) {
        if let Some(ref type_name) = type_spec.type_name {
            self.visit_base_type(type_name);
        }
        self.visit_attributes(&type_spec.attributes);
    }

    /// Visit a list of elements
    fn visit_elements(&mut self, elements: &[Element<'a>]) {
        for elem in elements {
            self.visit_element(elem);
        }
    }

    /// Visit a single element
    fn visit_element(&mut self, element: &Element<'a>) {
        match *element {
            Element::Component {
                ref name,
                ref display_name,
                ref type_spec,
                ref nested_elements,
            } => self.visit_component(name, display_name, type_spec, nested_elements),
            Element::Relation {
                ref source,
                ref target,
                ref relation_type,
                ref type_spec,
                ref label,
            } => self.visit_relation(source, target, relation_type, type_spec, label),
            Element::Diagram(ref diagram) => self.visit_diagram(diagram),
            Element::ActivateBlock {
                ref component,
                ref type_spec,
                ref elements,
            } => self.visit_activate_block(component, type_spec, elements),
            Element::Activate {
                ref component,
                ref type_spec,
            } => self.visit_activate(component, type_spec),
            Element::Deactivate { ref component } => self.visit_deactivate(component),
            Element::Fragment(ref fragment) => self.visit_fragment(fragment),
            Element::AltElseBlock {
                keyword_span: _,
                ref type_spec,
                ref sections,
            } => {
                self.visit_type_spec(type_spec);
                for section in sections {
                    self.visit_elements(&section.elements);
                }
            }
            Element::OptBlock {
                keyword_span: _,
                ref type_spec,
                ref section,
            } => {
                self.visit_type_spec(type_spec);
                self.visit_elements(&section.elements);
            }
            Element::LoopBlock {
                keyword_span: _,
                ref type_spec,
                ref section,
            } => {
                self.visit_type_spec(type_spec);
                self.visit_elements(&section.elements);
            }
            Element::ParBlock {
                keyword_span: _,
                ref type_spec,
                ref sections,
            } => {
                self.visit_type_spec(type_spec);
                for section in sections {
                    self.visit_elements(&section.elements);
                }
            }
            Element::BreakBlock {
                keyword_span: _,
                ref type_spec,
                ref section,
            } => {
                self.visit_type_spec(type_spec);
                self.visit_elements(&section.elements);
            }
            Element::CriticalBlock {
                keyword_span: _,
                ref type_spec,
                ref section,
            } => {
                self.visit_type_spec(type_spec);
                self.visit_elements(&section.elements);
            }
            Element::Note(ref note) => {
                self.visit_note(note);
            }
        }
    }

    /// Visit a fragment
    fn visit_fragment(&mut self, fragment: &Fragment<'a>) {
        for section in &fragment.sections {
            self.visit_fragment_section(section);
        }
    }

    /// Visit a fragment section
    fn visit_fragment_section(&mut self, section: &FragmentSection<'a>) {
        // Traverse section title as a string literal and its elements
        if let Some(title) = &section.title {
            self.visit_string_value(title);
        }
        self.visit_elements(&section.elements);
    }

    /// Visit a component element
    fn visit_component(
        &mut self,
        name: &Spanned<Id>,
        display_name: &Option<Spanned<String>>,
        type_spec: &TypeSpec<'a>,
        nested_elements: &[Element<'a>],
    ) {
        self.visit_component_name(name);
        if let Some(dn) = display_name {
            self.visit_display_name(dn);
        }
        self.visit_type_spec(type_spec);
        self.visit_elements(nested_elements);
    }

    /// Visit a component name
    fn visit_component_name(&mut self, _name: &Spanned<Id>) {}

    /// Visit a display name
    fn visit_display_name(&mut self, _display_name: &Spanned<String>) {}

    /// Visit a relation element
    fn visit_relation(
        &mut self,
        source: &Spanned<Id>,
        target: &Spanned<Id>,
        relation_type: &Spanned<&'a str>,
        type_spec: &TypeSpec<'a>,
        label: &Option<Spanned<String>>,
    ) {
        self.visit_relation_source(source);
        self.visit_relation_target(target);
        self.visit_relation_type(relation_type);
        self.visit_type_spec(type_spec);
        if let Some(l) = label {
            self.visit_relation_label(l);
        }
    }

    /// Visit a relation source
    fn visit_relation_source(&mut self, source: &Spanned<Id>) {
        self.visit_identifier(source);
    }

    /// Visit a relation target
    fn visit_relation_target(&mut self, target: &Spanned<Id>) {
        self.visit_identifier(target);
    }

    /// Visit a relation type
    fn visit_relation_type(&mut self, _relation_type: &Spanned<&'a str>) {}

    /// Visit a relation label
    fn visit_relation_label(&mut self, _label: &Spanned<String>) {}

    /// Visit an activate block element
    fn visit_activate_block(
        &mut self,
        component: &Spanned<Id>,
        type_spec: &TypeSpec<'a>,
        elements: &[Element<'a>],
    ) {
        self.visit_activate_component(component);
        self.visit_type_spec(type_spec);
        self.visit_elements(elements);
    }

    /// Visit an activate block component reference
    fn visit_activate_component(&mut self, _component: &Spanned<Id>) {}

    /// Visit an activate statement
    fn visit_activate(&mut self, component: &Spanned<Id>, type_spec: &TypeSpec<'a>) {
        self.visit_identifier(component);
        self.visit_type_spec(type_spec);
    }

    /// Visit a deactivate statement
    fn visit_deactivate(&mut self, component: &Spanned<Id>) {
        self.visit_identifier(component);
    }

    /// Visit a note element
    fn visit_note(&mut self, note: &Note<'a>) {
        self.visit_type_spec(&note.type_spec);
        self.visit_note_content(&note.content);
    }

    /// Visit note content
    fn visit_note_content(&mut self, _content: &Spanned<String>) {}
}

/// Entry point for running a visitor on a diagram
pub fn visit_diagram<'a, V: Visitor<'a>>(visitor: &mut V, diagram: &Diagram<'a>) {
    visitor.visit_diagram(diagram)
}

/// Validator that checks all diagram semantic constraints
///
/// Uses a visitor-based traversal to validate:
/// - Component identifier references (relations, notes, activate/deactivate)
/// - Activate/deactivate pairing in sequence diagrams
/// - Note attribute values (align)
///
/// The validator collects all errors during traversal for reporting after traversal.
///
/// ## Component Registry
///
/// The validator maintains a component registry (`Vec<HashMap<String, Span>>`) with one
/// registry per diagram. Components are registered as they are visited, and all subsequent
/// identifier references (in relations, activations, and notes) are validated against this
/// registry. Since identifiers are fully qualified after desugaring, all components in a
/// diagram are accessible regardless of nesting depth.
pub struct Validator<'a> {
    // Activation validation state
    activation_stack: Vec<HashMap<Id, Vec<Span>>>,

    // Component identifier registry for validation
    component_registry: Vec<HashMap<Id, Span>>,

    // Note validation state
    diagram_kind: Option<&'a str>,

    // Shared error collection
    errors: Vec<DiagnosticError>,
}

impl<'a> Validator<'a> {
    pub fn new() -> Self {
        Self {
            activation_stack: Vec::new(),
            component_registry: Vec::new(),
            diagram_kind: None,
            errors: Vec::new(),
        }
    }

    fn activation_state_mut(&mut self) -> &mut HashMap<Id, Vec<Span>> {
        self.activation_stack
            .last_mut()
            .expect("activation scope not initialized")
    }

    /// Validate that align value is appropriate for the diagram type
    ///
    /// Sequence diagrams support: over, left, right
    /// Component diagrams support: left, right, top, bottom
    ///
    /// Note: The None and unknown diagram type cases are defensive programming.
    /// The parser enforces valid diagram types, but we handle these cases
    /// to fail gracefully if the validation is called incorrectly.
    fn validate_align_for_diagram_type(&mut self, align_value: &str, span: Span) {
        match self.diagram_kind {
            Some("sequence") => {
                if !matches!(align_value, "over" | "left" | "right") {
                    self.errors.push(DiagnosticError::from_span(
                        format!("Invalid align value '{}' for sequence diagram. Valid values: over, left, right", align_value),
                        span,
                        "invalid align value",
                        None,
                    ));
                }
            }
            Some("component") => {
                if !matches!(align_value, "left" | "right" | "top" | "bottom") {
                    self.errors.push(DiagnosticError::from_span(
                        format!("Invalid align value '{}' for component diagram. Valid values: left, right, top, bottom", align_value),
                        span,
                        "invalid align value",
                        None,
                    ));
                }
            }
            Some(kind) => {
                self.errors.push(DiagnosticError::from_span(
                    format!(
                        "Unknown diagram type '{}'. Cannot validate align attribute",
                        kind
                    ),
                    span,
                    "unknown diagram type",
                    None,
                ));
            }
            None => {
                self.errors.push(DiagnosticError::from_span(
                    "Diagram type not set. Cannot validate align attribute".to_string(),
                    span,
                    "missing diagram type",
                    None,
                ));
            }
        }
    }
}

impl<'a> Visitor<'a> for Validator<'a> {
    fn visit_diagram(&mut self, diagram: &Diagram<'a>) {
        // Begin component registry for this diagram
        self.component_registry.push(HashMap::new());

        // Call default traversal
        self.visit_diagram_kind(&diagram.kind);
        self.visit_attributes(&diagram.attributes);
        self.visit_type_definitions(&diagram.type_definitions);
        self.visit_elements(&diagram.elements);

        // End component registry scope
        self.component_registry.pop();
    }

    fn visit_diagram_kind(&mut self, kind: &Spanned<&'a str>) {
        self.diagram_kind = Some(kind.inner());
    }

    fn visit_elements(&mut self, elements: &[Element<'a>]) {
        // Begin new activation scope
        self.activation_stack.push(HashMap::new());

        // Traverse elements
        for elem in elements {
            self.visit_element(elem);
        }

        // End scope
        // Validate any remaining unpaired activations in this scope
        if let Some(state) = self.activation_stack.pop() {
            for (component_id, spans) in state.iter() {
                if !spans.is_empty() {
                    let span = spans.last().cloned().unwrap_or_default();
                    self.errors.push(DiagnosticError::from_span(
                        format!(
                            "Component '{}' was activated but never deactivated",
                            component_id
                        ),
                        span,
                        "unpaired activate",
                        Some(
                            "Every activate statement must have a corresponding deactivate statement"
                                .to_string(),
                        ),
                    ));
                }
            }
        }
    }

    fn visit_component_name(&mut self, name: &Spanned<Id>) {
        // Register this component in the current diagram's registry
        let registry = self
            .component_registry
            .last_mut()
            .expect("component registry not initialized");
        registry.insert(*name.inner(), name.span());
    }

    fn visit_activate(&mut self, component: &Spanned<Id>, type_spec: &TypeSpec<'a>) {
        // Validate component identifier exists
        self.visit_identifier(component);

        self.visit_type_spec(type_spec);

        // Then handle activation stack logic
        let state = self.activation_state_mut();
        state
            .entry(*component.inner())
            .or_default()
            .push(component.span());
    }

    fn visit_deactivate(&mut self, component: &Spanned<Id>) {
        // Validate component identifier exists
        self.visit_identifier(component);

        // Then handle activation stack logic
        let state = self.activation_state_mut();
        match state.get_mut(component.inner()) {
            Some(spans) if !spans.is_empty() => {
                // Remove the most recent activation span (LIFO)
                let _ = spans.pop();
            }
            _ => {
                // No matching activate
                self.errors.push(DiagnosticError::from_span(
                    format!(
                        "Cannot deactivate component '{}': no matching activate statement",
                        component.inner()
                    ),
                    component.span(),
                    "unpaired deactivate",
                    Some(
                        "Deactivate statements must be preceded by a corresponding activate statement"
                            .to_string(),
                    ),
                ));
            }
        }
    }

    fn visit_note(&mut self, note: &Note<'a>) {
        self.visit_type_spec(&note.type_spec);

        // Validation for align attribute
        for attr in &note.type_spec.attributes {
            if *attr.name.inner() == "align"
                && let Ok(align_value) = attr.value.as_str()
            {
                self.validate_align_for_diagram_type(align_value, attr.value.span());
            }
        }

        // Visit content
        self.visit_note_content(&note.content);
    }

    fn visit_identifier(&mut self, identifier: &Spanned<Id>) {
        let registry = self
            .component_registry
            .last()
            .expect("component registry not initialized");

        if !registry.contains_key(identifier.inner()) {
            self.errors.push(DiagnosticError::from_span(
                format!("Component '{}' not found", identifier.inner()),
                identifier.span(),
                "undefined component",
                Some("Component must be defined before it can be referenced".to_string()),
            ));
        }
    }
}

/// Convenience function to run all diagram validations
///
/// Returns:
/// - Ok(()) when no validation issues are found
/// - Err(DiagnosticError) with the first collected error otherwise
pub fn validate_diagram(diagram: &Diagram<'_>) -> Result<()> {
    let mut validator = Validator::new();
    visit_diagram(&mut validator, diagram);
    // TODO: Support multi error.
    if let Some(err) = validator.errors.into_iter().next() {
        Err(err)
    } else {
        Ok(())
    }
}

/// Deprecated: Use validate_diagram instead
///
/// Convenience function to run activation validation for a diagram
///
/// Returns:
/// - Ok(()) when no activation pairing issues are found
/// - Err(DiagnosticError) with the first collected error otherwise
#[allow(dead_code)]
#[deprecated(since = "0.1.0", note = "Use validate_diagram instead")]
pub fn validate_activation_pairs(diagram: &Diagram<'_>) -> Result<()> {
    validate_diagram(diagram)
}

/// Deprecated: Use validate_diagram instead
///
/// Convenience function to run note validation for a diagram
///
/// Returns:
/// - Ok(()) when no note validation issues are found
/// - Err(DiagnosticError) with the first collected error otherwise
#[allow(dead_code)]
#[deprecated(since = "0.1.0", note = "Use validate_diagram instead")]
pub fn validate_notes(diagram: &Diagram<'_>) -> Result<()> {
    validate_diagram(diagram)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test visitor that counts different element types
    struct CountingVisitor {
        component_count: usize,
        relation_count: usize,
        activate_count: usize,
        deactivate_count: usize,
    }

    impl CountingVisitor {
        fn new() -> Self {
            Self {
                component_count: 0,
                relation_count: 0,
                activate_count: 0,
                deactivate_count: 0,
            }
        }
    }

    impl<'a> Visitor<'a> for CountingVisitor {
        fn visit_component(
            &mut self,
            name: &Spanned<Id>,
            display_name: &Option<Spanned<String>>,
            type_spec: &TypeSpec<'a>,
            nested_elements: &[Element<'a>],
        ) {
            self.component_count += 1;
            // Call default traversal
            self.visit_component_name(name);
            if let Some(dn) = display_name {
                self.visit_display_name(dn);
            }
            self.visit_type_spec(type_spec);
            self.visit_elements(nested_elements);
        }

        fn visit_relation(
            &mut self,
            source: &Spanned<Id>,
            target: &Spanned<Id>,
            relation_type: &Spanned<&'a str>,
            type_spec: &TypeSpec<'a>,
            label: &Option<Spanned<String>>,
        ) {
            self.relation_count += 1;
            // Call default traversal
            self.visit_relation_source(source);
            self.visit_relation_target(target);
            self.visit_relation_type(relation_type);
            self.visit_type_spec(type_spec);
            if let Some(l) = label {
                self.visit_relation_label(l);
            }
        }

        fn visit_activate(&mut self, component: &Spanned<Id>, type_spec: &TypeSpec<'a>) {
            self.visit_identifier(component);
            self.visit_type_spec(type_spec);
            self.activate_count += 1;
        }

        fn visit_deactivate(&mut self, component: &Spanned<Id>) {
            self.deactivate_count += 1;
            self.visit_identifier(component);
        }
    }

    #[test]
    fn test_visitor_traversal() {
        // Create a simple test diagram
        let diagram = Diagram {
            kind: Spanned::new("sequence", Span::new(0..8)),
            attributes: vec![],
            type_definitions: vec![],
            elements: vec![
                Element::Component {
                    name: Spanned::new(Id::new("user"), Span::new(10..14)),
                    display_name: None,
                    type_spec: TypeSpec {
                        type_name: Some(Spanned::new(Id::new("Rectangle"), Span::new(16..25))),
                        attributes: vec![],
                    },
                    nested_elements: vec![],
                },
                Element::Activate {
                    component: Spanned::new(Id::new("user"), Span::new(30..34)),
                    type_spec: TypeSpec::default(),
                },
                Element::Relation {
                    source: Spanned::new(Id::new("user"), Span::new(40..44)),
                    target: Spanned::new(Id::new("server"), Span::new(48..54)),
                    relation_type: Spanned::new("->", Span::new(45..47)),
                    type_spec: TypeSpec::default(),
                    label: None,
                },
                Element::Deactivate {
                    component: Spanned::new(Id::new("user"), Span::new(60..64)),
                },
            ],
        };

        let mut visitor = CountingVisitor::new();
        visit_diagram(&mut visitor, &diagram);

        assert_eq!(visitor.component_count, 1);
        assert_eq!(visitor.relation_count, 1);
        assert_eq!(visitor.activate_count, 1);
        assert_eq!(visitor.deactivate_count, 1);
    }

    #[test]
    fn test_validate_ok_pair() {
        let diagram = Diagram {
            kind: Spanned::new("sequence", Span::new(0..8)),
            attributes: vec![],
            type_definitions: vec![],
            elements: vec![
                Element::Component {
                    name: Spanned::new(Id::new("user"), Span::new(0..4)),
                    display_name: None,
                    type_spec: TypeSpec {
                        type_name: Some(Spanned::new(Id::new("Rectangle"), Span::new(6..15))),
                        attributes: vec![],
                    },
                    nested_elements: vec![],
                },
                Element::Activate {
                    component: Spanned::new(Id::new("user"), Span::new(17..21)),
                    type_spec: TypeSpec::default(),
                },
                Element::Deactivate {
                    component: Spanned::new(Id::new("user"), Span::new(23..27)),
                },
            ],
        };

        let result = super::validate_diagram(&diagram);
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_unpaired_deactivate() {
        let diagram = Diagram {
            kind: Spanned::new("sequence", Span::new(0..8)),
            attributes: vec![],
            type_definitions: vec![],
            elements: vec![Element::Deactivate {
                component: Spanned::new(Id::new("user"), Span::new(0..4)),
            }],
        };

        let result = super::validate_diagram(&diagram);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_unpaired_activate_end_of_scope() {
        let diagram = Diagram {
            kind: Spanned::new("sequence", Span::new(0..8)),
            attributes: vec![],
            type_definitions: vec![],
            elements: vec![Element::Activate {
                component: Spanned::new(Id::new("user"), Span::new(0..4)),
                type_spec: TypeSpec::default(),
            }],
        };

        let result = super::validate_diagram(&diagram);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_nested_activations_ok() {
        let diagram = Diagram {
            kind: Spanned::new("sequence", Span::new(0..8)),
            attributes: vec![],
            type_definitions: vec![],
            elements: vec![
                Element::Component {
                    name: Spanned::new(Id::new("user"), Span::new(0..4)),
                    display_name: None,
                    type_spec: TypeSpec {
                        type_name: Some(Spanned::new(Id::new("Rectangle"), Span::new(6..15))),
                        attributes: vec![],
                    },
                    nested_elements: vec![],
                },
                Element::Activate {
                    component: Spanned::new(Id::new("user"), Span::new(17..21)),
                    type_spec: TypeSpec::default(),
                },
                Element::Activate {
                    component: Spanned::new(Id::new("user"), Span::new(23..27)),
                    type_spec: TypeSpec::default(),
                },
                Element::Deactivate {
                    component: Spanned::new(Id::new("user"), Span::new(29..33)),
                },
                Element::Deactivate {
                    component: Spanned::new(Id::new("user"), Span::new(35..39)),
                },
            ],
        };

        let result = super::validate_diagram(&diagram);
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_interleaved_components_ok() {
        let diagram = Diagram {
            kind: Spanned::new("sequence", Span::new(0..8)),
            attributes: vec![],
            type_definitions: vec![],
            elements: vec![
                Element::Component {
                    name: Spanned::new(Id::new("user"), Span::new(0..4)),
                    display_name: None,
                    type_spec: TypeSpec {
                        type_name: Some(Spanned::new(Id::new("Rectangle"), Span::new(6..15))),
                        attributes: vec![],
                    },
                    nested_elements: vec![],
                },
                Element::Component {
                    name: Spanned::new(Id::new("server"), Span::new(17..23)),
                    display_name: None,
                    type_spec: TypeSpec {
                        type_name: Some(Spanned::new(Id::new("Rectangle"), Span::new(25..34))),
                        attributes: vec![],
                    },
                    nested_elements: vec![],
                },
                Element::Activate {
                    component: Spanned::new(Id::new("user"), Span::new(36..40)),
                    type_spec: TypeSpec::default(),
                },
                Element::Activate {
                    component: Spanned::new(Id::new("server"), Span::new(42..48)),
                    type_spec: TypeSpec::default(),
                },
                Element::Deactivate {
                    component: Spanned::new(Id::new("user"), Span::new(50..54)),
                },
                Element::Deactivate {
                    component: Spanned::new(Id::new("server"), Span::new(56..62)),
                },
            ],
        };

        let result = super::validate_diagram(&diagram);
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_out_of_order_deactivate_first() {
        let diagram = Diagram {
            kind: Spanned::new("sequence", Span::new(0..8)),
            attributes: vec![],
            type_definitions: vec![],
            elements: vec![
                Element::Deactivate {
                    component: Spanned::new(Id::new("user"), Span::new(0..4)),
                },
                Element::Activate {
                    component: Spanned::new(Id::new("user"), Span::new(5..9)),
                    type_spec: TypeSpec::default(),
                },
            ],
        };

        let result = super::validate_diagram(&diagram);
        assert!(result.is_err());
    }
}
