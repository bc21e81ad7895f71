//! UIA control types and their accessibility roles.

use accesskit::Role;

/// The UIA control type of an element.
///
/// This enum covers the control types EdgeHTML exposes for web content.
/// Anything else is kept as [`ControlType::Other`] with its raw id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ControlType {
    /// A push button.
    Button,

    /// A calendar widget.
    Calendar,

    /// A checkbox.
    CheckBox,

    /// A combo box / select element.
    ComboBox,

    /// An editable text field.
    Edit,

    /// A link.
    Hyperlink,

    /// An image or other graphic.
    Image,

    /// An item within a list.
    ListItem,

    /// A list.
    List,

    /// A menu item.
    MenuItem,

    /// A progress indicator.
    ProgressBar,

    /// A radio button.
    RadioButton,

    /// A slider.
    Slider,

    /// A tab item.
    TabItem,

    /// A run of text; EdgeHTML also uses this for headings and paragraphs.
    Text,

    /// A tree item.
    TreeItem,

    /// A custom element with no standard control type.
    Custom,

    /// A group, e.g. a `div` or `section`.
    Group,

    /// A data grid.
    DataGrid,

    /// A data item within a grid.
    DataItem,

    /// A document.
    Document,

    /// A window.
    Window,

    /// A pane; EdgeHTML reports its content root as one.
    Pane,

    /// A table.
    Table,

    /// A separator.
    Separator,

    /// Any other control type, by raw id.
    Other(i32),
}

impl ControlType {
    /// Decode a raw `UIA_*ControlTypeId`.
    pub fn from_id(id: i32) -> Self {
        match id {
            50000 => Self::Button,
            50001 => Self::Calendar,
            50002 => Self::CheckBox,
            50003 => Self::ComboBox,
            50004 => Self::Edit,
            50005 => Self::Hyperlink,
            50006 => Self::Image,
            50007 => Self::ListItem,
            50008 => Self::List,
            50011 => Self::MenuItem,
            50012 => Self::ProgressBar,
            50013 => Self::RadioButton,
            50015 => Self::Slider,
            50019 => Self::TabItem,
            50020 => Self::Text,
            50024 => Self::TreeItem,
            50025 => Self::Custom,
            50026 => Self::Group,
            50028 => Self::DataGrid,
            50029 => Self::DataItem,
            50030 => Self::Document,
            50032 => Self::Window,
            50033 => Self::Pane,
            50036 => Self::Table,
            50038 => Self::Separator,
            other => Self::Other(other),
        }
    }

    /// The raw `UIA_*ControlTypeId`.
    pub fn id(self) -> i32 {
        match self {
            Self::Button => 50000,
            Self::Calendar => 50001,
            Self::CheckBox => 50002,
            Self::ComboBox => 50003,
            Self::Edit => 50004,
            Self::Hyperlink => 50005,
            Self::Image => 50006,
            Self::ListItem => 50007,
            Self::List => 50008,
            Self::MenuItem => 50011,
            Self::ProgressBar => 50012,
            Self::RadioButton => 50013,
            Self::Slider => 50015,
            Self::TabItem => 50019,
            Self::Text => 50020,
            Self::TreeItem => 50024,
            Self::Custom => 50025,
            Self::Group => 50026,
            Self::DataGrid => 50028,
            Self::DataItem => 50029,
            Self::Document => 50030,
            Self::Window => 50032,
            Self::Pane => 50033,
            Self::Table => 50036,
            Self::Separator => 50038,
            Self::Other(id) => id,
        }
    }

    /// Convert to AccessKit's Role enum.
    ///
    /// Text with a structural level is a heading.
    pub fn to_accesskit_role(self, level: Option<u32>) -> Role {
        match self {
            ControlType::Button => Role::Button,
            ControlType::Calendar => Role::Grid,
            ControlType::CheckBox => Role::CheckBox,
            ControlType::ComboBox => Role::ComboBox,
            ControlType::Edit => Role::TextInput,
            ControlType::Hyperlink => Role::Link,
            ControlType::Image => Role::Image,
            ControlType::ListItem => Role::ListItem,
            ControlType::List => Role::List,
            ControlType::MenuItem => Role::MenuItem,
            ControlType::ProgressBar => Role::ProgressIndicator,
            ControlType::RadioButton => Role::RadioButton,
            ControlType::Slider => Role::Slider,
            ControlType::TabItem => Role::Tab,
            ControlType::Text if level.is_some() => Role::Heading,
            ControlType::Text => Role::Paragraph,
            ControlType::TreeItem => Role::TreeItem,
            ControlType::Custom => Role::GenericContainer,
            ControlType::Group => Role::Group,
            ControlType::DataGrid => Role::Grid,
            ControlType::DataItem => Role::Cell,
            ControlType::Document => Role::Document,
            ControlType::Window => Role::Window,
            ControlType::Pane => Role::Pane,
            ControlType::Table => Role::Table,
            ControlType::Separator => Role::Splitter, // No direct Separator, use Splitter
            ControlType::Other(_) => Role::Unknown,
        }
    }
}

impl From<ControlType> for Role {
    fn from(control_type: ControlType) -> Self {
        control_type.to_accesskit_role(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip_known() {
        for control_type in [
            ControlType::Text,
            ControlType::Pane,
            ControlType::Document,
            ControlType::Image,
            ControlType::Group,
        ] {
            assert_eq!(ControlType::from_id(control_type.id()), control_type);
        }
        assert_eq!(ControlType::from_id(12345), ControlType::Other(12345));
    }

    #[test]
    fn test_text_role_depends_on_level() {
        assert_eq!(ControlType::Text.to_accesskit_role(Some(2)), Role::Heading);
        assert_eq!(ControlType::Text.to_accesskit_role(None), Role::Paragraph);
        assert_eq!(Role::from(ControlType::Pane), Role::Pane);
    }
}
