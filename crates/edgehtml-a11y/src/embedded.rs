//! Detection of embedded objects at a range position.

use edgehtml_a11y_core::{Automation, Result, TextRange};

/// Whether `range` sits on an embedded object.
///
/// EdgeHTML exposes an embedded object (image, control, frame) as a range
/// with exactly one child that has no text pattern of its own, and whose own
/// range has that same element as its only child.
pub fn is_embedded<A: Automation>(automation: &A, range: &A::Range) -> Result<bool> {
    let children = range.children()?;
    let [child] = children.as_slice() else {
        return Ok(false);
    };
    if automation.is_text_pattern_available(child)? {
        return Ok(false);
    }
    let Some(child_range) = automation.range_from_child(child)? else {
        return Ok(false);
    };
    let grandchildren = child_range.children()?;
    match grandchildren.as_slice() {
        [only] => automation.compare_elements(only, child),
        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgehtml_a11y_core::ControlType;
    use edgehtml_a11y_core::mock::{MockAutomation, MockDocument, Node};

    fn document() -> MockAutomation {
        MockAutomation::new(MockDocument::new(
            Node::new(ControlType::Pane).children([
                Node::paragraph("ab").named("text"),
                Node::image("logo"),
                Node::new(ControlType::Group)
                    .named("pair")
                    .children([Node::image("left"), Node::image("right")]),
            ]),
        ))
    }

    #[test]
    fn test_image_is_embedded() {
        let automation = document();
        let doc = automation.document();
        let logo = doc.find("logo").unwrap();
        assert!(is_embedded(&automation, &doc.element_range(logo)).unwrap());
    }

    #[test]
    fn test_text_is_not_embedded() {
        let automation = document();
        let doc = automation.document();
        let text = doc.find("text").unwrap();
        assert!(!is_embedded(&automation, &doc.element_range(text)).unwrap());
    }

    #[test]
    fn test_collapsed_position_has_no_children() {
        let automation = document();
        let doc = automation.document();
        let (start, _) = doc.span(doc.find("logo").unwrap());
        assert!(!is_embedded(&automation, &doc.range(start, start)).unwrap());
    }

    #[test]
    fn test_two_children_is_not_embedded() {
        let automation = document();
        let doc = automation.document();
        let pair = doc.find("pair").unwrap();
        let (start, end) = doc.span(pair);
        let both = doc.range(start, end);
        assert_eq!(both.children().unwrap().len(), 2);
        assert!(!is_embedded(&automation, &both).unwrap());
    }
}
