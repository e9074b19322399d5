//! Navigation: mobile menu, smooth scrolling and active-link highlighting

use crate::dom::{Dom, Extent, NodeId};

pub const MENU_TOGGLE: &str = ".hamburger";
pub const MENU_PANEL: &str = ".nav-menu";
pub const NAV_LINK: &str = ".nav-link";
pub const SECTION: &str = ".section";

/// Open state on the toggle and panel; highlighted state on links
pub const ACTIVE_CLASS: &str = "active";
/// Body flag dimming the page behind an open menu
pub const MENU_OVERLAY_CLASS: &str = "menu-overlay";

/// Mobile menu toggle and its panel
#[derive(Debug, Clone, Copy)]
pub struct MobileMenu {
    toggle: NodeId,
    panel: NodeId,
    body: Option<NodeId>,
}

impl MobileMenu {
    /// Both the toggle and the panel must be present
    pub fn find(dom: &mut dyn Dom) -> Option<Self> {
        let toggle = dom.query(MENU_TOGGLE)?;
        let panel = dom.query(MENU_PANEL)?;
        Some(Self {
            toggle,
            panel,
            body: dom.body(),
        })
    }

    pub fn toggle_node(&self) -> NodeId {
        self.toggle
    }

    pub fn panel_node(&self) -> NodeId {
        self.panel
    }

    pub fn is_open(&self, dom: &dyn Dom) -> bool {
        dom.has_class(self.toggle, ACTIVE_CLASS)
    }

    /// Menu control clicked
    pub fn toggle(&self, dom: &mut dyn Dom) {
        dom.toggle_class(self.toggle, ACTIVE_CLASS);
        dom.toggle_class(self.panel, ACTIVE_CLASS);
        if let Some(body) = self.body {
            dom.toggle_class(body, MENU_OVERLAY_CLASS);
            dom.toggle_class(body, ACTIVE_CLASS);
        }
    }

    pub fn close(&self, dom: &mut dyn Dom) {
        dom.remove_class(self.toggle, ACTIVE_CLASS);
        dom.remove_class(self.panel, ACTIVE_CLASS);
        if let Some(body) = self.body {
            dom.remove_class(body, MENU_OVERLAY_CLASS);
            dom.remove_class(body, ACTIVE_CLASS);
        }
    }

    /// Any click on the document; closes unless it landed in the toggle or panel
    pub fn on_document_click(&self, dom: &mut dyn Dom, in_toggle: bool, in_panel: bool) {
        if !in_toggle && !in_panel {
            self.close(dom);
        }
    }
}

/// Smoothly scroll to the fragment a nav link points at
pub fn follow_link(dom: &mut dyn Dom, link: NodeId) {
    let Some(href) = dom.attribute(link, "href") else {
        return;
    };
    let Some(id) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
        log::debug!("nav link {href} has no fragment");
        return;
    };
    if let Some(target) = dom.by_id(id) {
        dom.scroll_into_view(target);
    }
}

/// Last section (in document order) whose top, less a third of its height,
/// is at or above the scroll offset
pub fn current_section<'a>(sections: &[(&'a str, Extent)], scroll_y: f64) -> Option<&'a str> {
    let mut current = None;
    for (id, extent) in sections {
        if scroll_y >= extent.top - extent.height / 3.0 {
            current = Some(*id);
        }
    }
    current
}

/// Section tracker driving the active nav link
#[derive(Debug, Clone, Default)]
pub struct ScrollSpy {
    sections: Vec<NodeId>,
    links: Vec<NodeId>,
}

impl ScrollSpy {
    pub fn collect(dom: &mut dyn Dom) -> Self {
        Self {
            sections: dom.query_all(SECTION),
            links: dom.query_all(NAV_LINK),
        }
    }

    pub fn links(&self) -> &[NodeId] {
        &self.links
    }

    /// Re-mark nav links for the current scroll offset
    ///
    /// Links match by substring of their `href`. Above every section the
    /// current id is empty, which every link contains.
    pub fn on_scroll(&self, dom: &mut dyn Dom) {
        let measured: Vec<(String, Extent)> = self
            .sections
            .iter()
            .map(|&s| (dom.attribute(s, "id").unwrap_or_default(), dom.extent(s)))
            .collect();
        let bounds: Vec<(&str, Extent)> = measured.iter().map(|(id, e)| (id.as_str(), *e)).collect();
        let current = current_section(&bounds, dom.scroll_y()).unwrap_or_default();

        for &link in &self.links {
            dom.remove_class(link, ACTIVE_CLASS);
            let href = dom.attribute(link, "href").unwrap_or_default();
            if href.contains(current) {
                dom.add_class(link, ACTIVE_CLASS);
            }
        }
    }
}
