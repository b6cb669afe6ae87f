//! The scoped root markup is committed to.

use crate::element::ElementHandle;
use crate::scanner;

/// The scoped root of one component instance: a shadow tree stand-in.
///
/// Holds the last committed markup and one [`ElementHandle`] per element in
/// it that carries attributes. Committing new markup replaces both, which
/// implicitly discards every listener wired against the previous markup.
#[derive(Debug, Default)]
pub struct ScopedRoot {
    markup: String,
    elements: Vec<ElementHandle>,
}

impl ScopedRoot {
    /// Creates an empty root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits markup, replacing all previous content and element handles.
    pub fn set_markup(&mut self, markup: &str) {
        self.markup = markup.to_string();
        self.elements = scanner::scan(markup)
            .into_iter()
            .map(|t| ElementHandle::new(t.tag, t.attributes))
            .collect();
    }

    /// The last committed markup.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Every element handle in the committed markup, in document order.
    pub fn elements(&self) -> &[ElementHandle] {
        &self.elements
    }

    /// Elements carrying the named attribute.
    pub fn query_by_attribute(&self, name: &str) -> Vec<ElementHandle> {
        self.elements
            .iter()
            .filter(|e| e.has_attribute(name))
            .cloned()
            .collect()
    }

    /// Elements carrying at least one attribute whose name starts with the
    /// given prefix (e.g. `"@"` for event directives).
    pub fn query_by_attribute_prefix(&self, prefix: &str) -> Vec<ElementHandle> {
        self.elements
            .iter()
            .filter(|e| !e.attributes_with_prefix(prefix).is_empty())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_replaces_elements() {
        let mut root = ScopedRoot::new();
        root.set_markup(r#"<input data-model="a"><input data-model="b">"#);
        assert_eq!(root.query_by_attribute("data-model").len(), 2);

        root.set_markup(r#"<input data-model="a">"#);
        assert_eq!(root.query_by_attribute("data-model").len(), 1);
        assert_eq!(root.markup(), r#"<input data-model="a">"#);
    }

    #[test]
    fn listeners_do_not_survive_commit() {
        let mut root = ScopedRoot::new();
        root.set_markup(r#"<input data-model="a">"#);
        let before = root.query_by_attribute("data-model");
        before[0].add_listener("input", |_| {});
        assert_eq!(before[0].listener_count("input"), 1);

        root.set_markup(r#"<input data-model="a">"#);
        let after = root.query_by_attribute("data-model");
        assert_eq!(after[0].listener_count("input"), 0);
    }

    #[test]
    fn prefix_query_finds_directive_elements() {
        let mut root = ScopedRoot::new();
        root.set_markup(
            r#"<button @click="go">x</button><p class="plain">y</p><a @focus="f" @blur="b">z</a>"#,
        );
        let found = root.query_by_attribute_prefix("@");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].tag_name(), "button");
        assert_eq!(found[1].attributes_with_prefix("@").len(), 2);
    }
}
