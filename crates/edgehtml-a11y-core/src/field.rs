//! Structural fields: the markers a browse-mode engine consumes.

use std::collections::BTreeMap;

use accesskit::Role;

use crate::ids::RuntimeId;
use crate::role::ControlType;

/// A style-derived extra value on a control field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Accessible data for one element, carried by start and end markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlField {
    /// Identity token of the element the field describes.
    pub runtime_id: RuntimeId,
    /// Role reported to the engine.
    pub role: Role,
    /// UIA control type the role was derived from.
    pub control_type: ControlType,
    /// Accessible name.
    pub name: Option<String>,
    /// Structural level (headings, nested lists).
    pub level: Option<u32>,
    /// Style-derived values the engine may present.
    pub extras: BTreeMap<String, FieldValue>,
    /// The element starts before the range being rendered.
    pub clipped_at_start: bool,
    /// The element ends after the range being rendered.
    pub clipped_at_end: bool,
}

impl ControlField {
    /// Create a field with the role derived from `control_type`.
    pub fn new(runtime_id: RuntimeId, control_type: ControlType) -> Self {
        Self {
            runtime_id,
            role: control_type.to_accesskit_role(None),
            control_type,
            name: None,
            level: None,
            extras: BTreeMap::new(),
            clipped_at_start: false,
            clipped_at_end: false,
        }
    }

    /// Set the accessible name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the structural level, re-deriving the role.
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self.role = self.control_type.to_accesskit_role(self.level);
        self
    }

    /// Add a style-derived extra.
    pub fn with_extra(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.extras.insert(key.into(), value);
        self
    }

    /// Set both clip flags.
    pub fn with_clipping(mut self, clipping: Clipping) -> Self {
        self.set_clipping(clipping);
        self
    }

    /// Overwrite both clip flags.
    pub fn set_clipping(&mut self, clipping: Clipping) {
        self.clipped_at_start = clipping.start;
        self.clipped_at_end = clipping.end;
    }

    /// Current clip flags.
    pub fn clipping(&self) -> Clipping {
        Clipping {
            start: self.clipped_at_start,
            end: self.clipped_at_end,
        }
    }
}

/// Whether an element extends past either end of the rendered range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Clipping {
    pub start: bool,
    pub end: bool,
}

impl Clipping {
    /// Clipped on both sides: nothing is known about the element's extent.
    pub const BOTH: Self = Self {
        start: true,
        end: true,
    };
    /// Fully contained.
    pub const NONE: Self = Self {
        start: false,
        end: false,
    };
}

/// One item of a field sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextItem {
    ControlStart(ControlField),
    ControlEnd(ControlField),
    Text(String),
}

impl TextItem {
    /// The field of a start or end marker.
    pub fn field(&self) -> Option<&ControlField> {
        match self {
            Self::ControlStart(field) | Self::ControlEnd(field) => Some(field),
            Self::Text(_) => None,
        }
    }

    /// The text of a content chunk.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Options for one field-building call.
///
/// The same shape is handed to the host's balanced extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldRequest {
    /// Emit markers for the root element itself.
    pub include_root: bool,
    /// Descend into the children of the enclosing element.
    pub recurse_children: bool,
    /// Let balanced extraction walk and emit ancestors of the range.
    pub always_walk_ancestors: bool,
    /// Clip flags to put on the root's field.
    pub root_clipped: Clipping,
}

impl Default for FieldRequest {
    fn default() -> Self {
        Self {
            include_root: true,
            recurse_children: true,
            always_walk_ancestors: true,
            root_clipped: Clipping::BOTH,
        }
    }
}
