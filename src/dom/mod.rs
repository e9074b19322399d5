//! Page capability interface
//!
//! Every behavior talks to the page through [`Dom`], so the state machines
//! run unchanged against the browser document (`platform::WebDom`) or the
//! in-memory [`MemoryDom`] used by tests and the native binary.
//!
//! Lookups return `Option<NodeId>`; callers skip a step when the element is
//! absent. Operations on a handle never fail.

pub mod memory;

pub use memory::MemoryDom;

/// Handle to an element resolved through a [`Dom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Document-relative vertical layout box (offsetTop / clientHeight)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub top: f64,
    pub height: f64,
}

impl Extent {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// Minimal set of page operations the behaviors need
pub trait Dom {
    /// First element matching a selector
    fn query(&mut self, selector: &str) -> Option<NodeId>;

    /// All elements matching a selector, in document order
    fn query_all(&mut self, selector: &str) -> Vec<NodeId>;

    /// First descendant of `root` matching a selector
    fn query_in(&mut self, root: NodeId, selector: &str) -> Option<NodeId>;

    /// Element with the given id (without `#`)
    fn by_id(&mut self, id: &str) -> Option<NodeId> {
        self.query(&format!("#{id}"))
    }

    fn body(&mut self) -> Option<NodeId> {
        self.query("body")
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn add_class(&mut self, node: NodeId, class: &str);
    fn remove_class(&mut self, node: NodeId, class: &str);
    fn toggle_class(&mut self, node: NodeId, class: &str);
    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn text(&self, node: NodeId) -> String;
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Current value of a form field (input or textarea)
    fn value(&self, node: NodeId) -> String;

    /// Restore every field of a form to its initial value
    fn reset_form(&mut self, form: NodeId);

    /// `display: none`
    fn hide(&mut self, node: NodeId);

    fn extent(&self, node: NodeId) -> Extent;

    /// Current vertical scroll offset of the page
    fn scroll_y(&self) -> f64;
    fn scroll_to_top(&mut self);

    /// Smoothly scroll an element into view
    fn scroll_into_view(&mut self, node: NodeId);

    /// Replace the location fragment (`#home`)
    fn set_location_hash(&mut self, hash: &str);

    /// Activate a link through a detached anchor, leaving the page in place
    fn open_link(&mut self, href: &str);
}
