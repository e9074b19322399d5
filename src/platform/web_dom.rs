//! `web_sys::Document`-backed page

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions, Window,
};

use crate::dom::{Dom, Extent, NodeId};

/// Live browser page
///
/// Elements are registered on first lookup and keep their `NodeId` for the
/// life of the page. Selector results are cached; the markup is static.
pub struct WebDom {
    window: Window,
    document: Document,
    nodes: Vec<Element>,
    queries: HashMap<String, Vec<NodeId>>,
    scoped: HashMap<(NodeId, String), Option<NodeId>>,
}

impl WebDom {
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            window,
            document,
            nodes: Vec::new(),
            queries: HashMap::new(),
            scoped: HashMap::new(),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// `location.search`
    pub fn search(&self) -> String {
        self.window.location().search().unwrap_or_default()
    }

    /// `location.hash`
    pub fn hash(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    /// Handle for an element handed over by an event or observer
    pub fn adopt(&mut self, element: &Element) -> NodeId {
        match self.nodes.iter().position(|e| e == element) {
            Some(i) => NodeId(i),
            None => {
                self.nodes.push(element.clone());
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn html(&self, node: NodeId) -> Option<&HtmlElement> {
        self.element(node)?.dyn_ref::<HtmlElement>()
    }
}

impl Dom for WebDom {
    fn query(&mut self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).first().copied()
    }

    fn query_all(&mut self, selector: &str) -> Vec<NodeId> {
        if let Some(nodes) = self.queries.get(selector) {
            return nodes.clone();
        }

        let mut found = Vec::new();
        if let Ok(list) = self.document.query_selector_all(selector) {
            for i in 0..list.length() {
                if let Some(element) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    found.push(self.adopt(&element));
                }
            }
        }
        self.queries.insert(selector.to_string(), found.clone());
        found
    }

    fn query_in(&mut self, root: NodeId, selector: &str) -> Option<NodeId> {
        let key = (root, selector.to_string());
        if let Some(node) = self.scoped.get(&key) {
            return *node;
        }

        let element = self
            .element(root)?
            .query_selector(selector)
            .ok()
            .flatten();
        let node = element.map(|e| self.adopt(&e));
        self.scoped.insert(key, node);
        node
    }

    fn by_id(&mut self, id: &str) -> Option<NodeId> {
        let element = self.document.get_element_by_id(id)?;
        Some(self.adopt(&element))
    }

    fn body(&mut self) -> Option<NodeId> {
        let body = self.document.body()?;
        Some(self.adopt(&body))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element(node) {
            let _ = el.set_attribute(name, value);
        }
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element(node) {
            let _ = el.class_list().add_1(class);
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element(node) {
            let _ = el.class_list().remove_1(class);
        }
    }

    fn toggle_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element(node) {
            let _ = el.class_list().toggle(class);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|el| el.class_list().contains(class))
    }

    fn text(&self, node: NodeId) -> String {
        self.element(node)
            .and_then(|el| el.text_content())
            .unwrap_or_default()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(el) = self.element(node) {
            el.set_text_content(Some(text));
        }
    }

    fn value(&self, node: NodeId) -> String {
        let Some(el) = self.element(node) else {
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn reset_form(&mut self, form: NodeId) {
        if let Some(form) = self.element(form).and_then(|el| el.dyn_ref::<HtmlFormElement>()) {
            form.reset();
        }
    }

    fn hide(&mut self, node: NodeId) {
        if let Some(el) = self.html(node) {
            let _ = el.style().set_property("display", "none");
        }
    }

    fn extent(&self, node: NodeId) -> Extent {
        match (self.html(node), self.element(node)) {
            (Some(html), Some(el)) => Extent::new(html.offset_top() as f64, el.client_height() as f64),
            _ => Extent::default(),
        }
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to_top(&mut self) {
        self.window.scroll_to_with_x_and_y(0.0, 0.0);
    }

    fn scroll_into_view(&mut self, node: NodeId) {
        if let Some(el) = self.element(node) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            el.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn set_location_hash(&mut self, hash: &str) {
        let _ = self.window.location().set_hash(hash);
    }

    fn open_link(&mut self, href: &str) {
        // Detached: the click never reaches document listeners
        let Some(anchor) = self
            .document
            .create_element("a")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlAnchorElement>().ok())
        else {
            return;
        };
        anchor.set_href(href);
        anchor.click();
        anchor.remove();
    }
}
