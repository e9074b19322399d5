//! Page-load entry point
//!
//! Decides between the landing sequence and a direct deep-link load, then
//! starts the independent page behaviors. The returned [`Site`] carries the
//! handles event listeners need.

use crate::config::SiteConfig;
use crate::contact::ContactForm;
use crate::date::CalendarDate;
use crate::dom::{Dom, NodeId};
use crate::hero::HeroGear;
use crate::landing::{self, Landing};
use crate::nav::{self, MobileMenu, ScrollSpy};
use crate::reveal;
use crate::schedule::Spawn;
use crate::typing::TypingEffect;

/// The parts of the page URL that affect loading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageUrl {
    /// `?skip=true`: bypass the landing sequence
    pub skip_landing: bool,
    /// Fragment without `#`
    pub fragment: Option<String>,
}

impl PageUrl {
    /// Parse `location.search` and `location.hash`
    pub fn parse(search: &str, hash: &str) -> Self {
        let query = search.strip_prefix('?').unwrap_or(search);
        let skip = query
            .split('&')
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(key), decode_component(value))
            })
            .find(|(key, _)| key == "skip")
            .is_some_and(|(_, value)| value == "true");

        let fragment = hash
            .strip_prefix('#')
            .filter(|f| !f.is_empty())
            .map(str::to_string);

        Self {
            skip_landing: skip,
            fragment,
        }
    }
}

/// Query-string component decoding (`+` is a space, invalid UTF-8 becomes U+FFFD)
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Running page behaviors
#[derive(Debug)]
pub struct Site {
    pub url: PageUrl,
    pub config: SiteConfig,
    /// Present only when the landing sequence runs
    pub landing: Option<Landing>,
    pub menu: Option<MobileMenu>,
    pub spy: ScrollSpy,
    /// Cards awaiting their entrance animation
    pub cards: Vec<NodeId>,
    pub contact: Option<ContactForm>,
}

/// Wire up the page
pub fn boot(
    dom: &mut dyn Dom,
    spawn: &mut dyn Spawn,
    url: PageUrl,
    config: SiteConfig,
    today: CalendarDate,
) -> Site {
    log::info!("Booting portfolio (skip landing: {})", url.skip_landing);

    let landing = if url.skip_landing {
        landing::skip(dom, spawn, url.fragment.as_deref());
        None
    } else {
        let landing = Landing::start(dom, spawn);
        today.stamp(dom);
        Some(landing)
    };

    HeroGear::start(dom, spawn);
    TypingEffect::start(dom, spawn, &config.phrases);

    Site {
        landing,
        menu: MobileMenu::find(dom),
        spy: ScrollSpy::collect(dom),
        cards: reveal::tag_cards(dom),
        contact: ContactForm::find(dom),
        url,
        config,
    }
}

impl Site {
    /// Ignite button
    pub fn ignite(&self, spawn: &mut dyn Spawn) {
        if let Some(landing) = &self.landing {
            landing.ignite(spawn);
        }
    }

    /// Mobile menu control
    pub fn toggle_menu(&self, dom: &mut dyn Dom) {
        if let Some(menu) = &self.menu {
            menu.toggle(dom);
        }
    }

    /// Any click on the document
    pub fn document_click(&self, dom: &mut dyn Dom, in_toggle: bool, in_panel: bool) {
        if let Some(menu) = &self.menu {
            menu.on_document_click(dom, in_toggle, in_panel);
        }
    }

    /// Nav link: close the menu and scroll to the link's section
    pub fn follow_link(&self, dom: &mut dyn Dom, link: NodeId) {
        if let Some(menu) = &self.menu {
            menu.close(dom);
        }
        nav::follow_link(dom, link);
    }

    pub fn scrolled(&self, dom: &mut dyn Dom) {
        self.spy.on_scroll(dom);
    }

    pub fn card_intersection(&self, dom: &mut dyn Dom, card: NodeId, intersecting: bool) {
        reveal::on_intersection(dom, card, intersecting);
    }

    /// Contact form submission; returns the opened `mailto:` URI
    pub fn submit_contact(&self, dom: &mut dyn Dom, spawn: &mut dyn Spawn) -> Option<String> {
        let form = self.contact.as_ref()?;
        Some(form.submit(dom, spawn, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use crate::landing::{HIDDEN_CLASS, MAIN, OVERLAY, REVEAL_CLASS};
    use crate::schedule::Timeline;

    fn booted(search: &str, hash: &str) -> (MemoryDom, Timeline, Site) {
        let mut dom = MemoryDom::portfolio();
        let mut timeline = Timeline::new();
        let site = boot(
            &mut dom,
            &mut timeline,
            PageUrl::parse(search, hash),
            SiteConfig::default(),
            CalendarDate::new(1, 2, 2026),
        );
        (dom, timeline, site)
    }

    #[test]
    fn test_parse_url() {
        let url = PageUrl::parse("?skip=true", "#projects");
        assert!(url.skip_landing);
        assert_eq!(url.fragment.as_deref(), Some("projects"));

        let url = PageUrl::parse("?a=1&skip=true", "");
        assert!(url.skip_landing);
        assert_eq!(url.fragment, None);

        assert!(!PageUrl::parse("?skip=false", "#").skip_landing);
        assert!(!PageUrl::parse("?skip", "").skip_landing);
        assert!(!PageUrl::parse("", "").skip_landing);
        assert!(PageUrl::parse("?sk%69p=tru%65", "").skip_landing);
    }

    #[test]
    fn test_parse_first_skip_wins() {
        assert!(!PageUrl::parse("?skip=no&skip=true", "").skip_landing);
        // Undecodable first value still counts as the first `skip`
        assert!(!PageUrl::parse("?skip=%FF&skip=true", "").skip_landing);
    }

    #[test]
    fn test_normal_boot_runs_landing() {
        let (mut dom, mut timeline, site) = booted("", "");
        let date = dom.by_id("current-date").unwrap();
        let main = dom.query(MAIN).unwrap();
        let typing = dom.query(".typing-text").unwrap();

        assert!(site.landing.as_ref().is_some_and(|l| l.is_running()));
        assert_eq!(dom.text(date), "01/02/2026");
        assert!(dom.has_class(main, HIDDEN_CLASS));
        assert_eq!(site.cards.len(), 5);

        // Landing spin, hero gear and typing effect are all scheduled
        assert_eq!(timeline.pending(), 3);
        timeline.run_until(&mut dom, 0);
        assert_eq!(dom.text(typing), "M");

        site.ignite(&mut timeline);
        timeline.run_until(&mut dom, 1800);
        assert!(dom.has_class(main, REVEAL_CLASS));
        let overlay = dom.query(OVERLAY).unwrap();
        assert!(dom.is_hidden(overlay));
    }

    #[test]
    fn test_skip_boot_with_fragment() {
        let (mut dom, mut timeline, site) = booted("?skip=true", "#projects");
        let overlay = dom.query(OVERLAY).unwrap();
        let path = dom.by_id("pathL").unwrap();
        let date = dom.by_id("current-date").unwrap();
        let projects = dom.by_id("projects").unwrap();

        assert!(dom.is_hidden(overlay));
        assert!(site.landing.is_none());
        assert_eq!(dom.attribute(path, "d"), None);
        assert_eq!(dom.text(date), "");

        timeline.run_until(&mut dom, 500);
        assert_eq!(dom.scrolled_to(), Some(projects));

        // Ignite is inert without a landing sequence
        site.ignite(&mut timeline);
        timeline.run_until(&mut dom, 3000);
        assert!(!dom.has_class(overlay, "fade-out"));
    }

    #[test]
    fn test_nav_click_closes_menu_and_scrolls() {
        let (mut dom, _, site) = booted("?skip=true", "");
        let about = dom.by_id("about").unwrap();
        let link = site.spy.links()[1];

        site.toggle_menu(&mut dom);
        assert!(site.menu.unwrap().is_open(&dom));

        site.follow_link(&mut dom, link);
        assert!(!site.menu.unwrap().is_open(&dom));
        assert_eq!(dom.scrolled_to(), Some(about));

        site.scrolled(&mut dom);
        let active: Vec<_> = site
            .spy
            .links()
            .iter()
            .map(|&l| dom.has_class(l, nav::ACTIVE_CLASS))
            .collect();
        assert_eq!(active, [false, true, false, false]);
    }

    #[test]
    fn test_submit_contact_through_site() {
        let (mut dom, mut timeline, site) = booted("", "");
        let name = dom.by_id("name").unwrap();
        dom.set_value(name, "Ada");

        let uri = site.submit_contact(&mut dom, &mut timeline).unwrap();
        assert!(uri.contains("subject=PORTFOLIO%20INQUIRY%20from%20Ada"));
    }
}
