//! Site configuration
//!
//! Defaults are compiled in; a page may override them with an inline
//! `<script type="application/json" id="site-config">` block.

use serde::{Deserialize, Serialize};

use crate::dom::Dom;

/// Element holding the optional JSON override
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Content and contact settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Phrases cycled by the typing effect, in order
    pub phrases: Vec<String>,
    /// Destination of the contact form's mailto link
    pub contact_address: String,
    /// Subject line prefix; the sender's name follows
    pub subject_prefix: String,
    /// Closing line of every generated email
    pub signature: String,
    /// Submit button label while the mail client opens
    pub sending_label: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            phrases: vec![
                "MECHANICAL DESIGNER // ROBOTICS AUTOMATION".to_string(),
                "CAD SPECIALIST // PROTOTYPING".to_string(),
            ],
            contact_address: "j.diwan2005@gmail.com".to_string(),
            subject_prefix: "PORTFOLIO INQUIRY from".to_string(),
            signature: "Sent via Diwan's Digital Portfolio".to_string(),
            sending_label: "TRANSMISSION INITIATED...".to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load the page's override, falling back to defaults
    pub fn from_page(dom: &mut dyn Dom) -> Self {
        if let Some(node) = dom.by_id(CONFIG_ELEMENT_ID) {
            match Self::from_json(&dom.text(node)) {
                Ok(config) => {
                    log::info!("Loaded site config from #{CONFIG_ELEMENT_ID}");
                    return config;
                }
                Err(e) => log::warn!("Ignoring malformed #{CONFIG_ELEMENT_ID}: {e}"),
            }
        }

        log::info!("Using default site config");
        Self::default()
    }
}
