use anyhow::{bail, Result};

/// One node of the in-memory host document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_by_id_mut(id))
    }

    fn find_by_tag(&self, tag: &str) -> Option<&Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_tag(tag))
    }

    fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_by_tag_mut(tag))
    }
}

/// The host document: a body with named mount points. Mirrors the runtime
/// surface of the demo page, nothing more.
#[derive(Debug, Clone)]
pub struct Document {
    pub body: Element,
}

impl Document {
    /// A body containing one empty mount point with the given id.
    pub fn with_mount_point(id: &str) -> Self {
        Self {
            body: Element::new("body").child(Element::new("div").with_id(id)),
        }
    }

    /// Attach a rendered tree under the node with the given id. Fails when
    /// the mount point does not exist; no recovery (the page would be blank
    /// either way).
    pub fn mount(&mut self, id: &str, tree: Element) -> Result<()> {
        match self.body.find_by_id_mut(id) {
            Some(node) => {
                node.children.push(tree);
                Ok(())
            }
            None => bail!("mount point #{} not found", id),
        }
    }

    /// First element with the given tag, document order.
    pub fn select_tag(&self, tag: &str) -> Option<&Element> {
        self.body.find_by_tag(tag)
    }

    pub fn select_tag_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.body.find_by_tag_mut(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Element {
        Element::new("div")
            .with_class("container")
            .child(Element::new("h1").with_text("Title"))
            .child(Element::new("pre"))
    }

    #[test]
    fn test_mount_into_root() {
        let mut doc = Document::with_mount_point("root");
        doc.mount("root", sample_tree()).unwrap();
        assert!(doc.select_tag("h1").is_some());
        assert_eq!(doc.select_tag("h1").unwrap().text, "Title");
    }

    #[test]
    fn test_missing_mount_point_fails() {
        let mut doc = Document::with_mount_point("root");
        assert!(doc.mount("app", sample_tree()).is_err());
    }

    #[test]
    fn test_tag_selector_finds_placeholder() {
        let mut doc = Document::with_mount_point("root");
        doc.mount("root", sample_tree()).unwrap();
        let pre = doc.select_tag_mut("pre").unwrap();
        pre.add_class("code");
        pre.add_class("code"); // idempotent
        pre.set_text("body");
        let pre = doc.select_tag("pre").unwrap();
        assert!(pre.has_class("code"));
        assert_eq!(pre.classes.len(), 1);
        assert_eq!(pre.text, "body");
    }
}
