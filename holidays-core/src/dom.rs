//! Generic view over a parsed HTML document tree.
//!
//! The extractor walks headings, siblings, and table rows through this trait
//! so the concrete HTML backend stays injectable; `scraper` provides the
//! production implementation.

use scraper::ElementRef;

/// An element node in a parsed document.
pub trait DocumentNode: Clone {
    /// Lowercase tag name.
    fn tag_name(&self) -> &str;

    /// Concatenated text of the node's subtree.
    fn text_content(&self) -> String;

    /// Attribute value, if present.
    fn attr(&self, name: &str) -> Option<&str>;

    fn parent(&self) -> Option<Self>;

    /// Next element sibling, skipping text and comment nodes.
    fn next_sibling(&self) -> Option<Self>;

    fn child_elements(&self) -> Vec<Self>;
}

impl<'a> DocumentNode for ElementRef<'a> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn parent(&self) -> Option<Self> {
        (**self).parent().and_then(ElementRef::wrap)
    }

    fn next_sibling(&self) -> Option<Self> {
        let mut node = (**self).next_sibling();
        while let Some(candidate) = node {
            if let Some(element) = ElementRef::wrap(candidate) {
                return Some(element);
            }
            node = candidate.next_sibling();
        }
        None
    }

    fn child_elements(&self) -> Vec<Self> {
        self.children().filter_map(ElementRef::wrap).collect()
    }
}

/// Depth-first collection of descendant elements with the given tag name, in
/// document order. The starting node itself is not considered.
pub fn descendants_with_tag<N: DocumentNode>(node: &N, tag: &str) -> Vec<N> {
    let mut found = Vec::new();
    collect_tag(node, tag, &mut found);
    found
}

fn collect_tag<N: DocumentNode>(node: &N, tag: &str, found: &mut Vec<N>) {
    for child in node.child_elements() {
        if child.tag_name() == tag {
            found.push(child.clone());
        }
        collect_tag(&child, tag, found);
    }
}
