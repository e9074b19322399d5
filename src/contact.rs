//! Contact form: hand the message to the visitor's mail client

use std::fmt::Write as _;

use crate::config::SiteConfig;
use crate::consts::SUBMIT_FEEDBACK_MS;
use crate::dom::{Dom, NodeId};
use crate::schedule::{Spawn, Task, Wake};

pub const FORM: &str = "#contact-form";

const BODY_RULE: &str = "-----------------------------------";

/// Field values as typed, unvalidated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn subject(&self, config: &SiteConfig) -> String {
        format!("{} {}", config.subject_prefix, self.name)
    }

    /// Plain-text email body
    pub fn body(&self, config: &SiteConfig) -> String {
        let mut body = String::new();
        let _ = writeln!(body, "SENDER IDENTITY: {}", self.name);
        let _ = writeln!(body, "RETURN ADDRESS: {}", self.email);
        let _ = writeln!(body);
        let _ = writeln!(body, "DATA PACKET (MESSAGE):");
        let _ = writeln!(body, "{}", self.message);
        let _ = writeln!(body);
        let _ = writeln!(body, "{BODY_RULE}");
        body.push_str(&config.signature);
        body
    }

    /// `mailto:` URI with percent-encoded subject and body
    pub fn mailto(&self, config: &SiteConfig) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            config.contact_address,
            urlencoding::encode(&self.subject(config)),
            urlencoding::encode(&self.body(config)),
        )
    }
}

/// The contact form and its fields
#[derive(Debug, Clone)]
pub struct ContactForm {
    form: NodeId,
    name: Option<NodeId>,
    email: Option<NodeId>,
    message: Option<NodeId>,
    button: Option<NodeId>,
    /// Button label captured at load, restored after feedback
    label: String,
}

impl ContactForm {
    pub fn find(dom: &mut dyn Dom) -> Option<Self> {
        let form = dom.query(FORM)?;
        let button = dom.query_in(form, "button");
        let label = button.map(|b| dom.text(b)).unwrap_or_default();
        Some(Self {
            form,
            name: dom.by_id("name"),
            email: dom.by_id("email"),
            message: dom.by_id("message"),
            button,
            label,
        })
    }

    pub fn form_node(&self) -> NodeId {
        self.form
    }

    pub fn read(&self, dom: &dyn Dom) -> ContactMessage {
        let field = |node: Option<NodeId>| node.map(|n| dom.value(n)).unwrap_or_default();
        ContactMessage {
            name: field(self.name),
            email: field(self.email),
            message: field(self.message),
        }
    }

    /// Open the mail client and show transient feedback; returns the URI
    pub fn submit(&self, dom: &mut dyn Dom, spawn: &mut dyn Spawn, config: &SiteConfig) -> String {
        let uri = self.read(dom).mailto(config);
        dom.open_link(&uri);
        log::info!("Opened mail client for contact form");

        if let Some(button) = self.button {
            dom.set_text(button, &config.sending_label);
        }
        let feedback = SubmitFeedback {
            form: self.form,
            button: self.button,
            label: self.label.clone(),
        };
        spawn.spawn(Box::new(feedback), Wake::After(SUBMIT_FEEDBACK_MS));
        uri
    }
}

/// Restores the button label and clears the form
struct SubmitFeedback {
    form: NodeId,
    button: Option<NodeId>,
    label: String,
}

impl Task for SubmitFeedback {
    fn run(&mut self, dom: &mut dyn Dom) -> Wake {
        if let Some(button) = self.button {
            dom.set_text(button, &self.label);
        }
        dom.reset_form(self.form);
        Wake::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use crate::schedule::Timeline;

    fn filled(name: &str, email: &str, message: &str) -> (MemoryDom, ContactForm) {
        let mut dom = MemoryDom::portfolio();
        for (id, value) in [("name", name), ("email", email), ("message", message)] {
            let node = dom.by_id(id).unwrap();
            dom.set_value(node, value);
        }
        let form = ContactForm::find(&mut dom).unwrap();
        (dom, form)
    }

    fn decoded_param(uri: &str, key: &str) -> String {
        let query = uri.split_once('?').unwrap().1;
        let raw = query
            .split('&')
            .find_map(|kv| kv.strip_prefix(&format!("{key}=")))
            .unwrap();
        urlencoding::decode(raw).unwrap().into_owned()
    }

    #[test]
    fn test_submit_builds_mailto() {
        let (mut dom, form) = filled("Ada", "ada@example.com", "Hello");
        let mut timeline = Timeline::new();
        let config = SiteConfig::default();

        let uri = form.submit(&mut dom, &mut timeline, &config);
        assert!(uri.starts_with("mailto:j.diwan2005@gmail.com?subject="));
        assert_eq!(dom.opened_links(), [uri.clone()]);

        let body = decoded_param(&uri, "body");
        assert!(body.contains("SENDER IDENTITY: Ada"));
        assert!(body.contains("RETURN ADDRESS: ada@example.com"));
        assert!(body.contains("DATA PACKET (MESSAGE):\nHello\n"));
        assert!(body.ends_with("Sent via Diwan's Digital Portfolio"));
        assert_eq!(decoded_param(&uri, "subject"), "PORTFOLIO INQUIRY from Ada");

        // No in-page navigation
        assert_eq!(dom.location_hash(), "");
        assert_eq!(dom.scroll_y(), 0.0);
    }

    #[test]
    fn test_body_layout() {
        let msg = ContactMessage {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello".to_string(),
        };
        let expected = "SENDER IDENTITY: Ada\n\
                        RETURN ADDRESS: ada@example.com\n\
                        \n\
                        DATA PACKET (MESSAGE):\n\
                        Hello\n\
                        \n\
                        -----------------------------------\n\
                        Sent via Diwan's Digital Portfolio";
        assert_eq!(msg.body(&SiteConfig::default()), expected);
    }

    #[test]
    fn test_special_characters_are_encoded() {
        let (mut dom, form) = filled("A & B", "x@y.z?q=1", "50% off\nnew line");
        let mut timeline = Timeline::new();
        let uri = form.submit(&mut dom, &mut timeline, &SiteConfig::default());

        assert_eq!(uri.matches('&').count(), 1);
        assert_eq!(uri.matches('?').count(), 1);
        let body = decoded_param(&uri, "body");
        assert!(body.contains("RETURN ADDRESS: x@y.z?q=1"));
        assert!(body.contains("50% off\nnew line"));
    }

    #[test]
    fn test_empty_fields_pass_through() {
        let (mut dom, form) = filled("", "", "");
        let mut timeline = Timeline::new();
        let uri = form.submit(&mut dom, &mut timeline, &SiteConfig::default());
        assert_eq!(decoded_param(&uri, "subject"), "PORTFOLIO INQUIRY from ");
    }

    #[test]
    fn test_feedback_restores_label_and_clears() {
        let (mut dom, form) = filled("Ada", "ada@example.com", "Hello");
        let mut timeline = Timeline::new();
        let config = SiteConfig::default();
        let button = dom.query_in(form.form_node(), "button").unwrap();
        let name = dom.by_id("name").unwrap();

        form.submit(&mut dom, &mut timeline, &config);
        assert_eq!(dom.text(button), "TRANSMISSION INITIATED...");

        timeline.run_until(&mut dom, 2999);
        assert_eq!(dom.value(name), "Ada");

        timeline.run_until(&mut dom, 3000);
        assert_eq!(dom.text(button), "TRANSMIT");
        assert_eq!(dom.value(name), "");
    }

    #[test]
    fn test_double_submit_keeps_original_label() {
        let (mut dom, form) = filled("Ada", "ada@example.com", "Hello");
        let mut timeline = Timeline::new();
        let config = SiteConfig::default();
        let button = dom.query_in(form.form_node(), "button").unwrap();

        form.submit(&mut dom, &mut timeline, &config);
        timeline.run_until(&mut dom, 1000);
        form.submit(&mut dom, &mut timeline, &config);
        timeline.run_until(&mut dom, 5000);
        assert_eq!(dom.text(button), "TRANSMIT");
    }
}
