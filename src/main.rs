//! Blueprint Portfolio entry point
//!
//! Boots the page behaviors in the browser, or walks through them headlessly
//! against an in-memory page on native targets.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_site {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Event, IntersectionObserver, IntersectionObserverEntry,
        IntersectionObserverInit, Node,
    };

    use blueprint_portfolio::consts::REVEAL_THRESHOLD;
    use blueprint_portfolio::date::CalendarDate;
    use blueprint_portfolio::platform::{WebDom, WebRuntime};
    use blueprint_portfolio::{PageUrl, Site, SiteConfig, boot};

    type SharedDom = Rc<RefCell<WebDom>>;

    pub fn start() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("no document");

        if document.ready_state() == "loading" {
            let closure = Closure::once_into_js(move |_event: Event| run());
            let _ = document
                .add_event_listener_with_callback("DOMContentLoaded", closure.unchecked_ref());
        } else {
            run();
        }
    }

    fn run() {
        let page = WebDom::new().expect("no window");
        let url = PageUrl::parse(&page.search(), &page.hash());
        let dom: SharedDom = Rc::new(RefCell::new(page));
        let mut runtime = WebRuntime::new(dom.clone());

        let site = {
            let mut page = dom.borrow_mut();
            let config = SiteConfig::from_page(&mut *page);
            boot(&mut *page, &mut runtime, url, config, CalendarDate::today())
        };
        let site = Rc::new(site);

        setup_ignite_button(&dom, &site, &runtime);
        setup_menu(&dom, &site);
        setup_nav_links(&dom, &site);
        setup_scroll_spy(&dom, &site);
        setup_reveal_observer(&dom, &site);
        setup_contact_form(&dom, &site, &runtime);

        log::info!("Portfolio running!");
    }

    fn setup_ignite_button(dom: &SharedDom, site: &Rc<Site>, runtime: &WebRuntime) {
        if site.landing.is_none() {
            return;
        }
        let Some(btn) = dom.borrow().document().get_element_by_id("igniteBtn") else {
            return;
        };

        let site = site.clone();
        let mut runtime = runtime.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            site.ignite(&mut runtime);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_menu(dom: &SharedDom, site: &Rc<Site>) {
        let Some(menu) = site.menu else {
            return;
        };
        let (toggle, panel) = {
            let page = dom.borrow();
            match (
                page.element(menu.toggle_node()).cloned(),
                page.element(menu.panel_node()).cloned(),
            ) {
                (Some(toggle), Some(panel)) => (toggle, panel),
                _ => return,
            }
        };

        // Menu control
        {
            let dom = dom.clone();
            let site = site.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
                site.toggle_menu(&mut *dom.borrow_mut());
            });
            let _ = toggle.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Clicks outside the control and panel close the menu
        {
            let dom = dom.clone();
            let site = site.clone();
            let document = dom.borrow().document().clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
                let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
                let in_toggle = toggle.contains(target.as_ref());
                let in_panel = panel.contains(target.as_ref());
                site.document_click(&mut *dom.borrow_mut(), in_toggle, in_panel);
            });
            let _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_nav_links(dom: &SharedDom, site: &Rc<Site>) {
        for &link in site.spy.links() {
            let Some(element) = dom.borrow().element(link).cloned() else {
                continue;
            };
            let dom = dom.clone();
            let site = site.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
                event.prevent_default();
                site.follow_link(&mut *dom.borrow_mut(), link);
            });
            let _ = element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_scroll_spy(dom: &SharedDom, site: &Rc<Site>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let dom = dom.clone();
        let site = site.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            site.scrolled(&mut *dom.borrow_mut());
        });
        let _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_reveal_observer(dom: &SharedDom, site: &Rc<Site>) {
        let callback = {
            let dom = dom.clone();
            let site = site.clone();
            Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                move |entries: js_sys::Array, _observer: IntersectionObserver| {
                    let mut page = dom.borrow_mut();
                    for entry in entries.iter() {
                        let entry: IntersectionObserverEntry = entry.unchecked_into();
                        let card = page.adopt(&entry.target());
                        site.card_intersection(&mut *page, card, entry.is_intersecting());
                    }
                },
            )
        };

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => observer,
            Err(e) => {
                log::warn!("IntersectionObserver unavailable: {:?}", e);
                return;
            }
        };
        callback.forget();

        let page = dom.borrow();
        for &card in &site.cards {
            if let Some(element) = page.element(card) {
                observer.observe(element);
            }
        }
    }

    fn setup_contact_form(dom: &SharedDom, site: &Rc<Site>, runtime: &WebRuntime) {
        let Some(contact) = &site.contact else {
            return;
        };
        let Some(form) = dom.borrow().element(contact.form_node()).cloned() else {
            return;
        };

        let dom = dom.clone();
        let site = site.clone();
        let mut runtime = runtime.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
            event.prevent_default();
            site.submit_contact(&mut *dom.borrow_mut(), &mut runtime);
        });
        let _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_site::start();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Blueprint Portfolio (native) starting...");
    log::info!("Native mode runs a headless walkthrough - run with `trunk serve` for the web version");

    // Optional page URL tail, e.g. `?skip=true#projects`
    let tail = std::env::args().nth(1).unwrap_or_default();
    headless_walkthrough(&tail);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn headless_walkthrough(tail: &str) {
    use blueprint_portfolio::date::CalendarDate;
    use blueprint_portfolio::landing::{MAIN, OVERLAY};
    use blueprint_portfolio::{Dom, MemoryDom, PageUrl, SiteConfig, Timeline, boot};

    let (search, hash) = match tail.find('#') {
        Some(i) => tail.split_at(i),
        None => (tail, ""),
    };

    let mut dom = MemoryDom::portfolio();
    let mut timeline = Timeline::new();
    let config = SiteConfig::from_page(&mut dom);
    let site = boot(
        &mut dom,
        &mut timeline,
        PageUrl::parse(search, hash),
        config,
        CalendarDate::today(),
    );

    timeline.advance(&mut dom, 1000);
    if let Some(landing) = &site.landing {
        println!("t={}ms landing gear at {:.1} deg", timeline.now(), landing.angle());
        site.ignite(&mut timeline);
    }
    timeline.advance(&mut dom, 2000);

    let overlay = dom.query(OVERLAY).map(|n| dom.is_hidden(n)).unwrap_or(true);
    let revealed = dom.query(MAIN).map(|n| dom.classes(n).join(" ")).unwrap_or_default();
    let typed = dom.query(".typing-text").map(|n| dom.text(n)).unwrap_or_default();
    println!("t={}ms overlay hidden: {overlay}, main classes: [{revealed}]", timeline.now());
    println!("typing: {typed:?}");
    println!("scroll offset: {}", dom.scroll_y());
    println!("✓ Walkthrough complete ({} tasks still scheduled)", timeline.pending());
}
