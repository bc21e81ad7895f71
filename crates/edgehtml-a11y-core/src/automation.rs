//! The UI Automation client the adapter is built on.
//!
//! The host implements [`Automation`] over its COM wrappers. The adapter never
//! compares element handles itself: identity is always decided by
//! [`Automation::compare_elements`].

use std::fmt;

use crate::config::FormatConfig;
use crate::error::Result;
use crate::field::{ControlField, FieldRequest, TextItem};
use crate::ids::{PropertyId, PropertyValue, TextUnit};
use crate::range::TextRange;
use crate::role::ControlType;

/// Properties to prefetch with an element lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CacheRequest {
    properties: Vec<PropertyId>,
}

impl CacheRequest {
    /// The request used when building control fields.
    pub fn control_fields() -> Self {
        Self::default()
            .with_property(PropertyId::RUNTIME_ID)
            .with_property(PropertyId::CONTROL_TYPE)
            .with_property(PropertyId::LOCALIZED_CONTROL_TYPE)
            .with_property(PropertyId::NAME)
            .with_property(PropertyId::LEVEL)
            .with_property(PropertyId::IS_TEXT_PATTERN_AVAILABLE)
    }

    /// Add a property if it is not already requested.
    pub fn with_property(mut self, property: PropertyId) -> Self {
        if !self.properties.contains(&property) {
            self.properties.push(property);
        }
        self
    }

    /// Requested properties, in insertion order.
    pub fn properties(&self) -> &[PropertyId] {
        &self.properties
    }
}

/// A search condition over element properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Matches every element.
    True,
    /// Matches when the property equals the value.
    Property {
        property: PropertyId,
        value: PropertyValue,
    },
    And(Vec<Condition>),
    Or(Vec<Condition>),
}

impl Condition {
    /// Build a condition that requires every listed property to take one of its listed values.
    ///
    /// A property with a single value becomes a plain property condition;
    /// several values become an `Or`. Several properties are joined by `And`.
    pub fn multi_property<I, V>(properties: I) -> Self
    where
        I: IntoIterator<Item = (PropertyId, V)>,
        V: IntoIterator<Item = PropertyValue>,
    {
        let mut conditions: Vec<Condition> = properties
            .into_iter()
            .map(|(property, values)| {
                let mut alternatives: Vec<Condition> = values
                    .into_iter()
                    .map(|value| Condition::Property { property, value })
                    .collect();
                if alternatives.len() == 1 {
                    alternatives.remove(0)
                } else {
                    Condition::Or(alternatives)
                }
            })
            .collect();
        match conditions.len() {
            0 => Condition::True,
            1 => conditions.remove(0),
            _ => Condition::And(conditions),
        }
    }

    /// Evaluate against a property lookup.
    pub fn matches<F>(&self, lookup: &F) -> bool
    where
        F: Fn(PropertyId) -> Option<PropertyValue>,
    {
        match self {
            Condition::True => true,
            Condition::Property { property, value } => lookup(*property).as_ref() == Some(value),
            Condition::And(conditions) => conditions.iter().all(|c| c.matches(lookup)),
            Condition::Or(conditions) => conditions.iter().any(|c| c.matches(lookup)),
        }
    }
}

/// The first child of a container, as seen by the object model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildObject<E> {
    /// Exposed through UI Automation.
    Structural(E),
    /// Exposed through some other accessibility API.
    Opaque,
}

/// The UI Automation client: element operations plus the host's generic routines.
pub trait Automation {
    /// Opaque element handle.
    type Element: Clone + fmt::Debug;
    /// Text range handle.
    type Range: TextRange<Element = Self::Element>;

    /// Whether two handles refer to the same element.
    fn compare_elements(&self, a: &Self::Element, b: &Self::Element) -> Result<bool>;

    /// Parent through the raw tree walker, prefetching `cache`.
    fn parent_element_build_cache(
        &self,
        element: &Self::Element,
        cache: &CacheRequest,
    ) -> Result<Option<Self::Element>>;

    /// Deepest element enclosing `range`, prefetching `cache`.
    fn enclosing_element_build_cache(
        &self,
        range: &Self::Range,
        cache: &CacheRequest,
    ) -> Result<Option<Self::Element>> {
        let _ = cache;
        range.enclosing_element()
    }

    /// Children of `range`, prefetching `cache`.
    fn children_build_cache(
        &self,
        range: &Self::Range,
        cache: &CacheRequest,
    ) -> Result<Vec<Self::Element>> {
        let _ = cache;
        range.children()
    }

    /// Control type of an element.
    fn control_type(&self, element: &Self::Element) -> Result<ControlType>;

    /// Localized control type, for diagnostics.
    fn localized_control_type(&self, element: &Self::Element) -> Result<String>;

    /// Accessible name of an element.
    fn name(&self, element: &Self::Element) -> Result<Option<String>>;

    /// Whether the element supports the text pattern itself.
    fn is_text_pattern_available(&self, element: &Self::Element) -> Result<bool>;

    /// The document text pattern's range for a child element.
    fn range_from_child(&self, element: &Self::Element) -> Result<Option<Self::Range>>;

    /// Text range covering an element, before any engine-specific normalisation.
    fn element_range(&self, element: &Self::Element) -> Result<Option<Self::Range>>;

    /// First child of a container.
    fn first_child(&self, element: &Self::Element) -> Result<Option<ChildObject<Self::Element>>>;

    /// Control field data for an element.
    ///
    /// Fails with `MissingStructuralData` when the element cannot describe itself.
    fn control_field(&self, element: &Self::Element, cache: &CacheRequest) -> Result<ControlField>;

    /// The host's balanced field extraction for a range already scoped to `root`.
    fn balanced_fields(
        &self,
        root: &Self::Element,
        range: &Self::Range,
        format: &FormatConfig,
        request: FieldRequest,
    ) -> Result<Vec<TextItem>>;

    /// Descendants of `root` matching `condition`, in document order.
    fn find_all(&self, root: &Self::Element, condition: &Condition) -> Result<Vec<Self::Element>>;

    /// The host's collapsed move, which may skip replaced content such as math.
    fn collapsed_move(
        &self,
        range: &mut Self::Range,
        unit: TextUnit,
        count: i32,
        skip_replaced_content: bool,
    ) -> Result<i32> {
        let _ = skip_replaced_content;
        range.move_by(unit, count)
    }
}
