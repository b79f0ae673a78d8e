//! Headless document model the page controllers operate on.

use std::collections::BTreeMap;

use crate::prelude::*;

mod class_list;
mod selector;

pub use self::class_list::ClassList;
pub use self::selector::Selector;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    pub classes: ClassList,
    pub inner_html: String,

    /// Form control value.
    pub value: String,

    pub disabled: bool,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    #[must_use]
    pub fn class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.classes.add(class);
        }
        self
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    #[must_use]
    pub fn html(mut self, inner_html: impl Into<String>) -> Self {
        self.inner_html = inner_html.into();
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn get_id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    /// Whether the element contributes to form data.
    pub fn is_form_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "select" | "textarea")
    }
}

#[derive(Debug)]
struct Node {
    element: Element,
    parent: Option<ElementId>,
}

#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<Node>,

    /// Current URL path.
    pub path: String,

    /// Vertical scroll offset in CSS pixels.
    pub scroll_y: f64,
}

impl Document {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn append(&mut self, parent: Option<ElementId>, element: Element) -> ElementId {
        self.nodes.push(Node { element, parent });
        ElementId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id.0).map(|node| &node.element)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0).map(|node| &mut node.element)
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.ids().find(|element_id| self.nodes[element_id.0].element.get_id() == Some(id))
    }

    pub fn query_selector(&self, selectors: &str) -> Result<Option<ElementId>> {
        Ok(self.query_selector_all(selectors)?.into_iter().next())
    }

    pub fn query_selector_all(&self, selectors: &str) -> Result<Vec<ElementId>> {
        let selector: Selector = selectors.parse()?;
        Ok(self
            .ids()
            .filter(|id| selector.matches(&self.nodes[id.0].element))
            .collect())
    }

    /// Like [`Document::query_selector`] but only among the descendants of `ancestor`.
    pub fn query_selector_within(
        &self,
        ancestor: ElementId,
        selectors: &str,
    ) -> Result<Option<ElementId>> {
        Ok(self
            .query_selector_all(selectors)?
            .into_iter()
            .find(|id| self.is_descendant(*id, ancestor)))
    }

    pub fn descendants(&self, ancestor: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        self.ids().filter(move |id| self.is_descendant(*id, ancestor))
    }

    pub fn is_descendant(&self, id: ElementId, ancestor: ElementId) -> bool {
        let mut parent = self.nodes.get(id.0).and_then(|node| node.parent);
        while let Some(current) = parent {
            if current == ancestor {
                return true;
            }
            parent = self.nodes[current.0].parent;
        }
        false
    }

    fn ids(&self) -> impl Iterator<Item = ElementId> {
        (0..self.nodes.len()).map(ElementId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_selector_ok() -> Result {
        let mut document = Document::new("/");
        let navbar = document.append(None, Element::new("nav").class("navbar navbar-expand-lg"));
        let link = document.append(Some(navbar), Element::new("a").class("nav-link").attr("href", "/"));
        assert_eq!(document.query_selector(".navbar")?, Some(navbar));
        assert_eq!(document.query_selector_all(".nav-link")?, vec![link]);
        assert_eq!(document.query_selector(".navbar-toggler")?, None);
        Ok(())
    }

    #[test]
    fn query_selector_within_ok() -> Result {
        let mut document = Document::new("/predict");
        let outside = document.append(None, Element::new("button").attr("type", "submit"));
        let form = document.append(None, Element::new("form").id("predictionForm"));
        let row = document.append(Some(form), Element::new("div").class("row"));
        let inside = document.append(Some(row), Element::new("button").attr("type", "submit"));
        assert_eq!(document.query_selector(r#"button[type="submit"]"#)?, Some(outside));
        assert_eq!(
            document.query_selector_within(form, r#"button[type="submit"]"#)?,
            Some(inside),
        );
        assert_eq!(document.descendants(form).collect::<Vec<_>>(), vec![row, inside]);
        Ok(())
    }

    #[test]
    fn get_element_by_id_ok() {
        let mut document = Document::new("/");
        let age = document.append(None, Element::new("input").id("Age").with_value("1"));
        assert_eq!(document.get_element_by_id("Age"), Some(age));
        assert_eq!(document.get_element_by_id("age"), None);
        assert!(document.get(age).unwrap().is_form_control());
    }
}
