//! UI Automation identifiers, units and values.

use std::fmt;

use static_assertions::const_assert_eq;

/// Style id of a level 1 heading (`StyleId_Heading1`).
pub const STYLE_ID_HEADING1: i32 = 70001;
/// Style id of a level 6 heading (`StyleId_Heading6`).
pub const STYLE_ID_HEADING6: i32 = 70006;
/// Style id of normal text (`StyleId_Normal`).
pub const STYLE_ID_NORMAL: i32 = 70012;

const_assert_eq!(STYLE_ID_HEADING6 - STYLE_ID_HEADING1, 5);

/// First Windows 10 build whose EdgeHTML no longer emits element-boundary gaps.
pub const GAP_REMOVAL_BUILD: u32 = 15048;

/// A UIA automation property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(pub i32);

impl PropertyId {
    pub const RUNTIME_ID: Self = Self(30000);
    pub const CONTROL_TYPE: Self = Self(30003);
    pub const LOCALIZED_CONTROL_TYPE: Self = Self(30004);
    pub const NAME: Self = Self(30005);
    pub const IS_TEXT_PATTERN_AVAILABLE: Self = Self(30040);
    pub const LEVEL: Self = Self(30154);
}

/// A UIA text attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextAttributeId(pub i32);

impl TextAttributeId {
    pub const STYLE_ID: Self = Self(40034);
}

/// Identity token reported by UIA for an element.
///
/// Carried in control fields so the consumer can pair start and end markers.
/// The adapter itself never uses it to decide identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RuntimeId(pub Vec<i32>);

impl fmt::Display for RuntimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|part| part.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// One endpoint of a text range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    End,
}

/// Granularity for moving and expanding text ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextUnit {
    Character,
    Format,
    Word,
    Line,
    Paragraph,
    Page,
    Document,
}

impl TextUnit {
    /// Units an embedded object must never be split by.
    pub fn is_fine_grained(self) -> bool {
        matches!(self, Self::Character | Self::Word)
    }

    /// Units whose forward moves the legacy engine handles correctly on its own.
    pub fn is_block(self) -> bool {
        matches!(self, Self::Line | Self::Paragraph)
    }
}

/// Search direction for quick navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Next,
    Previous,
}

/// Value of an automation property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Int(i32),
    Bool(bool),
    String(String),
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// Value of a text attribute over a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Int(i32),
    String(String),
    /// The attribute varies over the range.
    Mixed,
    /// The provider does not expose the attribute.
    NotSupported,
}

impl AttributeValue {
    /// The integer value, if the attribute is a single integer over the range.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }
}
