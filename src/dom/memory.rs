//! In-memory page
//!
//! A small element tree with just enough behavior for the page scripts:
//! simple selectors (`#id`, `.class`, `tag`), classes, attributes, text,
//! form values, layout extents and scroll state. Side effects that would
//! leave the page (opened links, fragment changes) are recorded instead.

use std::collections::BTreeMap;

use super::{Dom, Extent, NodeId};

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    value: String,
    parent: Option<NodeId>,
    hidden: bool,
    extent: Extent,
}

/// In-memory [`Dom`] implementation
#[derive(Debug, Clone)]
pub struct MemoryDom {
    elements: Vec<Element>,
    scroll_y: f64,
    location_hash: String,
    opened_links: Vec<String>,
    scrolled_into_view: Vec<NodeId>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Empty document containing only `<body>`
    pub fn new() -> Self {
        Self {
            elements: vec![Element {
                tag: "body".to_string(),
                ..Default::default()
            }],
            scroll_y: 0.0,
            location_hash: String::new(),
            opened_links: Vec::new(),
            scrolled_into_view: Vec::new(),
        }
    }

    /// The `<body>` element
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append an element described as `tag#id.class.class` under `parent`
    pub fn create(&mut self, parent: NodeId, descriptor: &str) -> NodeId {
        let mut element = Element {
            parent: Some(parent),
            ..Default::default()
        };

        let mut rest = descriptor;
        let tag_end = rest.find(['#', '.']).unwrap_or(rest.len());
        element.tag = rest[..tag_end].to_string();
        rest = &rest[tag_end..];

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['#', '.']).unwrap_or(body.len());
            let name = body[..end].to_string();
            match marker {
                '#' => element.id = Some(name),
                _ => element.classes.push(name),
            }
            rest = &body[end..];
        }

        self.elements.push(element);
        NodeId(self.elements.len() - 1)
    }

    pub fn set_extent(&mut self, node: NodeId, extent: Extent) {
        if let Some(el) = self.elements.get_mut(node.0) {
            el.extent = extent;
        }
    }

    /// Type into a form field
    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(el) = self.elements.get_mut(node.0) {
            el.value = value.to_string();
        }
    }

    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y;
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.elements.get(node.0).is_some_and(|el| el.hidden)
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        self.elements
            .get(node.0)
            .map(|el| el.classes.as_slice())
            .unwrap_or_default()
    }

    pub fn location_hash(&self) -> &str {
        &self.location_hash
    }

    pub fn opened_links(&self) -> &[String] {
        &self.opened_links
    }

    /// Most recent smooth-scroll target
    pub fn scrolled_to(&self) -> Option<NodeId> {
        self.scrolled_into_view.last().copied()
    }

    fn matches(el: &Element, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            el.id.as_deref() == Some(id)
        } else if let Some(class) = selector.strip_prefix('.') {
            el.classes.iter().any(|c| c == class)
        } else {
            el.tag == selector
        }
    }

    fn is_descendant(&self, node: NodeId, root: NodeId) -> bool {
        let mut current = self.elements.get(node.0).and_then(|el| el.parent);
        while let Some(parent) = current {
            if parent == root {
                return true;
            }
            current = self.elements.get(parent.0).and_then(|el| el.parent);
        }
        false
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.elements.get_mut(node.0)
    }

    /// Page matching the portfolio markup contract
    ///
    /// Sections are stacked: home 0..800, about 800..1400,
    /// projects 1400..2300, contact 2300..3000.
    pub fn portfolio() -> Self {
        let mut dom = Self::new();
        let body = dom.root();

        let overlay = dom.create(body, "div#landing-overlay");
        let svg = dom.create(overlay, "svg");
        dom.create(svg, "g#gearL");
        dom.create(svg, "path#pathL");
        dom.create(svg, "g#gearS");
        dom.create(svg, "path#pathS");
        let ignite = dom.create(overlay, "button#igniteBtn");
        dom.set_text(ignite, "IGNITE");

        let header = dom.create(body, "header.blueprint-header.hidden-initially");
        dom.create(header, "span#current-date");
        dom.create(header, "div.hamburger");
        let menu = dom.create(header, "ul.nav-menu");
        for target in ["home", "about", "projects", "contact"] {
            let link = dom.create(menu, "a.nav-link");
            dom.set_attribute(link, "href", &format!("#{target}"));
        }

        let main = dom.create(body, "main.hidden-initially");

        let home = dom.create(main, "section#home.section");
        dom.set_extent(home, Extent::new(0.0, 800.0));
        dom.create(home, "span.typing-text");
        let hero = dom.create(home, "svg");
        dom.create(hero, "g#heroGearGroup");
        dom.create(hero, "path#heroGearPath");

        let about = dom.create(main, "section#about.section");
        dom.set_extent(about, Extent::new(800.0, 600.0));
        dom.create(about, "div.skill-card");
        dom.create(about, "div.skill-card");
        dom.create(about, "div.stats-grid");

        let projects = dom.create(main, "section#projects.section");
        dom.set_extent(projects, Extent::new(1400.0, 900.0));
        dom.create(projects, "article.project-entry");
        dom.create(projects, "article.project-entry.frame-container");

        let contact = dom.create(main, "section#contact.section");
        dom.set_extent(contact, Extent::new(2300.0, 700.0));
        let form = dom.create(contact, "form#contact-form");
        dom.create(form, "input#name");
        dom.create(form, "input#email");
        dom.create(form, "textarea#message");
        let button = dom.create(form, "button");
        dom.set_text(button, "TRANSMIT");

        dom
    }
}

impl Dom for MemoryDom {
    fn query(&mut self, selector: &str) -> Option<NodeId> {
        self.elements
            .iter()
            .position(|el| Self::matches(el, selector))
            .map(NodeId)
    }

    fn query_all(&mut self, selector: &str) -> Vec<NodeId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| Self::matches(el, selector))
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    fn query_in(&mut self, root: NodeId, selector: &str) -> Option<NodeId> {
        (0..self.elements.len())
            .map(NodeId)
            .find(|&n| Self::matches(&self.elements[n.0], selector) && self.is_descendant(n, root))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let el = self.elements.get(node.0)?;
        match name {
            "id" => el.id.clone(),
            _ => el.attributes.get(name).cloned(),
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.get_mut(node) {
            match name {
                "id" => el.id = Some(value.to_string()),
                _ => {
                    el.attributes.insert(name.to_string(), value.to_string());
                }
            }
        }
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.get_mut(node) {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.get_mut(node) {
            el.classes.retain(|c| c != class);
        }
    }

    fn toggle_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            self.remove_class(node, class);
        } else {
            self.add_class(node, class);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.elements
            .get(node.0)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    fn text(&self, node: NodeId) -> String {
        self.elements
            .get(node.0)
            .map(|el| el.text.clone())
            .unwrap_or_default()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(el) = self.get_mut(node) {
            el.text = text.to_string();
        }
    }

    fn value(&self, node: NodeId) -> String {
        self.elements
            .get(node.0)
            .map(|el| el.value.clone())
            .unwrap_or_default()
    }

    fn reset_form(&mut self, form: NodeId) {
        for i in 0..self.elements.len() {
            if self.is_descendant(NodeId(i), form) {
                let el = &mut self.elements[i];
                el.value = el.attributes.get("value").cloned().unwrap_or_default();
            }
        }
    }

    fn hide(&mut self, node: NodeId) {
        if let Some(el) = self.get_mut(node) {
            el.hidden = true;
        }
    }

    fn extent(&self, node: NodeId) -> Extent {
        self.elements
            .get(node.0)
            .map(|el| el.extent)
            .unwrap_or_default()
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to_top(&mut self) {
        self.scroll_y = 0.0;
    }

    fn scroll_into_view(&mut self, node: NodeId) {
        self.scroll_y = self.extent(node).top;
        self.scrolled_into_view.push(node);
    }

    fn set_location_hash(&mut self, hash: &str) {
        self.location_hash = if hash.starts_with('#') || hash.is_empty() {
            hash.to_string()
        } else {
            format!("#{hash}")
        };
    }

    fn open_link(&mut self, href: &str) {
        self.opened_links.push(href.to_string());
    }
}
