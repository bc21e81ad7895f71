//! An in-memory UI Automation document.
//!
//! [`MockDocument`] flattens a [`Node`] tree into a sequence of text
//! positions. Leaf text nodes contribute one position per character, embedded
//! objects contribute a single position with no text, and documents built
//! with [`MockDocument::with_boundary_stops`] get an extra empty position at
//! the start of every text leaf, the way legacy EdgeHTML reports element
//! boundaries.
//!
//! The ranges follow EdgeHTML's shape. The enclosing element of a range is
//! the deepest element with a text pattern containing it, so a range over an
//! embedded object is enclosed by the object's parent. The children of a
//! range are the children of its enclosing element that overlap it.

use std::cell::Cell;
use std::cmp::Ordering;
use std::rc::Rc;

use crate::automation::{Automation, CacheRequest, ChildObject, Condition};
use crate::config::FormatConfig;
use crate::error::{Error, Result};
use crate::field::{Clipping, ControlField, FieldRequest, FieldValue, TextItem};
use crate::ids::{
    AttributeValue, Endpoint, PropertyId, PropertyValue, RuntimeId, STYLE_ID_HEADING1,
    STYLE_ID_NORMAL, TextAttributeId, TextUnit,
};
use crate::range::TextRange;
use crate::role::ControlType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Char(char),
    Stop,
    Object,
}

/// Builder for one element of a mock document.
#[derive(Debug, Clone)]
pub struct Node {
    control_type: ControlType,
    name: Option<String>,
    text: Option<String>,
    children: Vec<Node>,
    embedded: bool,
    level: Option<u32>,
    style_id: Option<i32>,
    field_unavailable: bool,
    detached: bool,
    opaque: bool,
}

impl Node {
    /// A container element.
    pub fn new(control_type: ControlType) -> Self {
        Self {
            control_type,
            name: None,
            text: None,
            children: Vec::new(),
            embedded: false,
            level: None,
            style_id: None,
            field_unavailable: false,
            detached: false,
            opaque: false,
        }
    }

    /// A leaf element holding text.
    pub fn text(control_type: ControlType, text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::new(control_type)
        }
    }

    /// A text paragraph.
    pub fn paragraph(text: &str) -> Self {
        Self::text(ControlType::Text, text)
    }

    /// A heading whose structural level and style agree.
    pub fn heading(level: u32, text: &str) -> Self {
        Self::paragraph(text)
            .with_level(level)
            .with_style(STYLE_ID_HEADING1 + level as i32 - 1)
    }

    /// An embedded object without a text pattern, occupying one position.
    pub fn embedded(control_type: ControlType, name: &str) -> Self {
        Self {
            embedded: true,
            ..Self::new(control_type).named(name)
        }
    }

    /// An embedded image.
    pub fn image(name: &str) -> Self {
        Self::embedded(ControlType::Image, name)
    }

    /// Append a child.
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Append children.
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set the accessible name.
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Set the structural level property.
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    /// Set the style id text attribute for this subtree.
    pub fn with_style(mut self, style_id: i32) -> Self {
        self.style_id = Some(style_id);
        self
    }

    /// Control field lookups for this element fail.
    pub fn without_field(mut self) -> Self {
        self.field_unavailable = true;
        self
    }

    /// Every call touching this element fails as if its process died.
    pub fn detached(mut self) -> Self {
        self.detached = true;
        self
    }

    /// The element is exposed through a non-UIA accessibility API.
    pub fn opaque(mut self) -> Self {
        self.opaque = true;
        self
    }
}

#[derive(Debug)]
struct NodeData {
    control_type: ControlType,
    name: Option<String>,
    embedded: bool,
    level: Option<u32>,
    style_id: Option<i32>,
    field_unavailable: bool,
    detached: bool,
    opaque: bool,
    parent: Option<usize>,
    children: Vec<usize>,
    start: usize,
    end: usize,
}

/// Handle to an element of a [`MockDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MockElement(pub usize);

/// A flattened mock document.
#[derive(Debug)]
pub struct MockDocument {
    units: Vec<Unit>,
    nodes: Vec<NodeData>,
}

impl MockDocument {
    /// Flatten `root` without boundary stops.
    pub fn new(root: Node) -> Rc<Self> {
        Self::build(root, false)
    }

    /// Flatten `root`, adding an empty stop at the start of each text leaf.
    pub fn with_boundary_stops(root: Node) -> Rc<Self> {
        Self::build(root, true)
    }

    fn build(root: Node, stops: bool) -> Rc<Self> {
        let mut document = Self {
            units: Vec::new(),
            nodes: Vec::new(),
        };
        document.flatten(root, None, stops);
        Rc::new(document)
    }

    fn flatten(&mut self, node: Node, parent: Option<usize>, stops: bool) -> usize {
        let id = self.nodes.len();
        let start = self.units.len();
        self.nodes.push(NodeData {
            control_type: node.control_type,
            name: node.name,
            embedded: node.embedded,
            level: node.level,
            style_id: node.style_id,
            field_unavailable: node.field_unavailable,
            detached: node.detached,
            opaque: node.opaque,
            parent,
            children: Vec::new(),
            start,
            end: start,
        });
        if node.embedded {
            self.units.push(Unit::Object);
        } else if let Some(text) = node.text {
            if stops {
                self.units.push(Unit::Stop);
            }
            self.units.extend(text.chars().map(Unit::Char));
        }
        for child in node.children {
            let child_id = self.flatten(child, Some(id), stops);
            self.nodes[id].children.push(child_id);
        }
        self.nodes[id].end = self.units.len();
        id
    }

    /// The root element.
    pub fn root(&self) -> MockElement {
        MockElement(0)
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the document has no positions.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Text of the whole document.
    pub fn text(&self) -> String {
        self.text_between(0, self.len())
    }

    /// First element with the given name, in document order.
    pub fn find(&self, name: &str) -> Option<MockElement> {
        self.nodes
            .iter()
            .position(|node| node.name.as_deref() == Some(name))
            .map(MockElement)
    }

    /// Position span of an element.
    pub fn span(&self, element: MockElement) -> (usize, usize) {
        let node = &self.nodes[element.0];
        (node.start, node.end)
    }

    /// Range over `start..end`.
    pub fn range(self: &Rc<Self>, start: usize, end: usize) -> MockRange {
        MockRange {
            document: Rc::clone(self),
            start,
            end: end.max(start),
        }
    }

    /// Range covering the whole document.
    pub fn document_range(self: &Rc<Self>) -> MockRange {
        self.range(0, self.len())
    }

    /// Range covering one element.
    pub fn element_range(self: &Rc<Self>, element: MockElement) -> MockRange {
        let (start, end) = self.span(element);
        self.range(start, end)
    }

    fn text_between(&self, start: usize, end: usize) -> String {
        if start >= end {
            return String::new();
        }
        self.units[start..end]
            .iter()
            .filter_map(|unit| match unit {
                Unit::Char(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    fn enclosing(&self, start: usize, end: usize) -> usize {
        let mut current = 0;
        loop {
            let next = self.nodes[current].children.iter().copied().find(|&child| {
                let node = &self.nodes[child];
                if node.embedded {
                    false
                } else if start == end {
                    node.start <= start && start < node.end
                } else {
                    node.start < node.end && node.start <= start && end <= node.end
                }
            });
            match next {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    fn range_children(&self, start: usize, end: usize) -> Vec<MockElement> {
        if start == end {
            return Vec::new();
        }
        let parent = self.enclosing(start, end);
        self.nodes[parent]
            .children
            .iter()
            .copied()
            .filter(|&child| {
                let node = &self.nodes[child];
                node.start < end && node.end > start
            })
            .map(MockElement)
            .collect()
    }

    fn style_at(&self, position: usize) -> i32 {
        let mut node = Some(self.enclosing(position, position));
        while let Some(id) = node {
            if let Some(style) = self.nodes[id].style_id {
                return style;
            }
            node = self.nodes[id].parent;
        }
        STYLE_ID_NORMAL
    }

    fn is_word_start(&self, position: usize) -> bool {
        let is_word_char = |unit: &Unit| matches!(unit, Unit::Char(c) if !c.is_whitespace());
        match self.units.get(position) {
            Some(Unit::Object) => true,
            Some(unit) if is_word_char(unit) => {
                position == 0 || !is_word_char(&self.units[position - 1])
            }
            _ => false,
        }
    }

    fn stops(&self, unit: TextUnit) -> Vec<usize> {
        match unit {
            TextUnit::Character => (0..=self.len()).collect(),
            TextUnit::Word => (0..self.len()).filter(|&p| self.is_word_start(p)).collect(),
            TextUnit::Format | TextUnit::Line | TextUnit::Paragraph => {
                let mut starts: Vec<usize> = self
                    .nodes
                    .iter()
                    .filter(|node| node.children.is_empty() && node.start < node.end)
                    .map(|node| node.start)
                    .collect();
                starts.sort_unstable();
                starts.dedup();
                starts
            }
            TextUnit::Page | TextUnit::Document => vec![0],
        }
    }

    fn step(stops: &[usize], from: usize, count: i32) -> (usize, i32) {
        let mut position = from;
        let mut moved = 0;
        while moved != count {
            let next = if count > 0 {
                stops.iter().copied().find(|&stop| stop > position)
            } else {
                stops.iter().rev().copied().find(|&stop| stop < position)
            };
            match next {
                Some(stop) => {
                    position = stop;
                    moved += count.signum();
                }
                None => break,
            }
        }
        (position, moved)
    }
}

/// A range over a [`MockDocument`].
#[derive(Debug, Clone)]
pub struct MockRange {
    document: Rc<MockDocument>,
    start: usize,
    end: usize,
}

impl MockRange {
    /// `(start, end)` positions.
    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    fn get(&self, endpoint: Endpoint) -> usize {
        match endpoint {
            Endpoint::Start => self.start,
            Endpoint::End => self.end,
        }
    }

    fn set(&mut self, endpoint: Endpoint, position: usize) {
        match endpoint {
            Endpoint::Start => {
                self.start = position;
                self.end = self.end.max(position);
            }
            Endpoint::End => {
                self.end = position;
                self.start = self.start.min(position);
            }
        }
    }
}

impl TextRange for MockRange {
    type Element = MockElement;

    fn clone_range(&self) -> Result<Self> {
        Ok(self.clone())
    }

    fn compare_endpoints(
        &self,
        endpoint: Endpoint,
        target: &Self,
        target_endpoint: Endpoint,
    ) -> Result<Ordering> {
        Ok(self.get(endpoint).cmp(&target.get(target_endpoint)))
    }

    fn move_endpoint_by_range(
        &mut self,
        endpoint: Endpoint,
        target: &Self,
        target_endpoint: Endpoint,
    ) -> Result<()> {
        self.set(endpoint, target.get(target_endpoint));
        Ok(())
    }

    fn move_by(&mut self, unit: TextUnit, count: i32) -> Result<i32> {
        let stops = self.document.stops(unit);
        let (position, moved) = MockDocument::step(&stops, self.start, count);
        self.start = position;
        self.end = position;
        Ok(moved)
    }

    fn move_endpoint_by_unit(
        &mut self,
        endpoint: Endpoint,
        unit: TextUnit,
        count: i32,
    ) -> Result<i32> {
        let mut stops = self.document.stops(unit);
        if stops.last() != Some(&self.document.len()) {
            stops.push(self.document.len());
        }
        let (position, moved) = MockDocument::step(&stops, self.get(endpoint), count);
        self.set(endpoint, position);
        Ok(moved)
    }

    fn expand_to_enclosing_unit(&mut self, unit: TextUnit) -> Result<()> {
        let len = self.document.len();
        let (start, end) = match unit {
            TextUnit::Character => (self.start, (self.start + 1).min(len)),
            TextUnit::Page | TextUnit::Document => (0, len),
            _ => {
                let stops = self.document.stops(unit);
                let start = stops
                    .iter()
                    .rev()
                    .copied()
                    .find(|&stop| stop <= self.start)
                    .unwrap_or(0);
                let end = stops
                    .iter()
                    .copied()
                    .find(|&stop| stop > start)
                    .unwrap_or(len);
                (start, end)
            }
        };
        self.start = start;
        self.end = end;
        Ok(())
    }

    fn text(&self, max_length: Option<usize>) -> Result<String> {
        let text = self.document.text_between(self.start, self.end);
        Ok(match max_length {
            Some(max) => text.chars().take(max).collect(),
            None => text,
        })
    }

    fn children(&self) -> Result<Vec<MockElement>> {
        Ok(self.document.range_children(self.start, self.end))
    }

    fn enclosing_element(&self) -> Result<Option<MockElement>> {
        if self.document.nodes.is_empty() {
            return Ok(None);
        }
        Ok(Some(MockElement(self.document.enclosing(self.start, self.end))))
    }

    fn attribute_value(&self, attribute: TextAttributeId) -> Result<AttributeValue> {
        if attribute != TextAttributeId::STYLE_ID {
            return Ok(AttributeValue::NotSupported);
        }
        let last = self.end.max(self.start + 1).min(self.document.len());
        let mut styles = (self.start..last).map(|p| self.document.style_at(p));
        let Some(first) = styles.next() else {
            return Ok(AttributeValue::Int(STYLE_ID_NORMAL));
        };
        if styles.all(|style| style == first) {
            Ok(AttributeValue::Int(first))
        } else {
            Ok(AttributeValue::Mixed)
        }
    }
}

/// [`Automation`] over a [`MockDocument`].
#[derive(Debug)]
pub struct MockAutomation {
    document: Rc<MockDocument>,
    balanced_calls: Cell<usize>,
}

impl MockAutomation {
    /// Wrap a document.
    pub fn new(document: Rc<MockDocument>) -> Self {
        Self {
            document,
            balanced_calls: Cell::new(0),
        }
    }

    /// The wrapped document.
    pub fn document(&self) -> &Rc<MockDocument> {
        &self.document
    }

    /// How many times balanced extraction has run.
    pub fn balanced_calls(&self) -> usize {
        self.balanced_calls.get()
    }

    fn node(&self, element: &MockElement, operation: &'static str) -> Result<&NodeData> {
        let node = self
            .document
            .nodes
            .get(element.0)
            .ok_or_else(|| Error::communication(operation, "element does not exist"))?;
        if node.detached {
            return Err(Error::communication(operation, "the element is not available"));
        }
        Ok(node)
    }

    fn field_for(&self, id: usize) -> ControlField {
        let node = &self.document.nodes[id];
        let mut field = ControlField::new(RuntimeId(vec![42, id as i32]), node.control_type);
        if let Some(name) = &node.name {
            field = field.with_name(name.clone());
        }
        if let Some(level) = node.level {
            field = field.with_level(level);
        }
        if let Some(style_id) = node.style_id {
            field = field.with_extra("styleId", FieldValue::Int(i64::from(style_id)));
        }
        field
    }

    fn content(&self, id: usize, start: usize, end: usize, recurse: bool, out: &mut Vec<TextItem>) {
        let node = &self.document.nodes[id];
        if node.embedded {
            return;
        }
        if node.children.is_empty() || !recurse {
            let text = self
                .document
                .text_between(start.max(node.start), end.min(node.end));
            if !text.is_empty() {
                out.push(TextItem::Text(text));
            }
            return;
        }
        for &child in &node.children {
            let data = &self.document.nodes[child];
            if data.start >= end || data.end <= start {
                continue;
            }
            let field = self.field_for(child).with_clipping(Clipping {
                start: data.start < start,
                end: data.end > end,
            });
            out.push(TextItem::ControlStart(field.clone()));
            self.content(child, start, end, true, out);
            out.push(TextItem::ControlEnd(field));
        }
    }
}

impl Automation for MockAutomation {
    type Element = MockElement;
    type Range = MockRange;

    fn compare_elements(&self, a: &MockElement, b: &MockElement) -> Result<bool> {
        self.node(a, "CompareElements")?;
        self.node(b, "CompareElements")?;
        Ok(a.0 == b.0)
    }

    fn parent_element_build_cache(
        &self,
        element: &MockElement,
        _cache: &CacheRequest,
    ) -> Result<Option<MockElement>> {
        Ok(self.node(element, "GetParentElementBuildCache")?.parent.map(MockElement))
    }

    fn control_type(&self, element: &MockElement) -> Result<ControlType> {
        Ok(self.node(element, "CurrentControlType")?.control_type)
    }

    fn localized_control_type(&self, element: &MockElement) -> Result<String> {
        let node = self.node(element, "CurrentLocalizedControlType")?;
        Ok(format!("{:?}", node.control_type).to_lowercase())
    }

    fn name(&self, element: &MockElement) -> Result<Option<String>> {
        Ok(self.node(element, "CurrentName")?.name.clone())
    }

    fn is_text_pattern_available(&self, element: &MockElement) -> Result<bool> {
        Ok(!self.node(element, "IsTextPatternAvailable")?.embedded)
    }

    fn range_from_child(&self, element: &MockElement) -> Result<Option<MockRange>> {
        let node = self.node(element, "RangeFromChild")?;
        Ok(Some(self.document.range(node.start, node.end)))
    }

    fn element_range(&self, element: &MockElement) -> Result<Option<MockRange>> {
        let node = self.node(element, "RangeFromChild")?;
        Ok(Some(self.document.range(node.start, node.end)))
    }

    fn first_child(&self, element: &MockElement) -> Result<Option<ChildObject<MockElement>>> {
        let node = self.node(element, "GetFirstChildElement")?;
        Ok(node.children.first().map(|&child| {
            if self.document.nodes[child].opaque {
                ChildObject::Opaque
            } else {
                ChildObject::Structural(MockElement(child))
            }
        }))
    }

    fn control_field(&self, element: &MockElement, _cache: &CacheRequest) -> Result<ControlField> {
        let node = self.node(element, "BuildControlField")?;
        if node.field_unavailable {
            return Err(Error::missing_structural_data(
                format!("{:?}", node.control_type),
                "control field data unavailable",
            ));
        }
        Ok(self.field_for(element.0))
    }

    fn balanced_fields(
        &self,
        root: &MockElement,
        range: &MockRange,
        _format: &FormatConfig,
        request: FieldRequest,
    ) -> Result<Vec<TextItem>> {
        self.node(root, "GetTextWithFields")?;
        self.balanced_calls.set(self.balanced_calls.get() + 1);
        let mut out = Vec::new();
        let field = self.field_for(root.0).with_clipping(request.root_clipped);
        if request.include_root {
            out.push(TextItem::ControlStart(field.clone()));
        }
        self.content(root.0, range.start, range.end, request.recurse_children, &mut out);
        if request.include_root {
            out.push(TextItem::ControlEnd(field));
        }
        Ok(out)
    }

    fn find_all(&self, root: &MockElement, condition: &Condition) -> Result<Vec<MockElement>> {
        self.node(root, "FindAll")?;
        let mut found = Vec::new();
        let mut pending: Vec<usize> = self.document.nodes[root.0].children.iter().rev().copied().collect();
        while let Some(id) = pending.pop() {
            let node = &self.document.nodes[id];
            let lookup = |property: PropertyId| match property {
                PropertyId::CONTROL_TYPE => Some(PropertyValue::Int(node.control_type.id())),
                PropertyId::LEVEL => node.level.map(|level| PropertyValue::Int(level as i32)),
                PropertyId::NAME => node.name.clone().map(PropertyValue::String),
                PropertyId::IS_TEXT_PATTERN_AVAILABLE => Some(PropertyValue::Bool(!node.embedded)),
                _ => None,
            };
            if condition.matches(&lookup) {
                found.push(MockElement(id));
            }
            pending.extend(node.children.iter().rev().copied());
        }
        Ok(found)
    }
}
