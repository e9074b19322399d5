//! Browser task driver

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use super::WebDom;
use crate::schedule::{Spawn, Task, Wake};

/// Runs tasks on `requestAnimationFrame` and `setTimeout`
#[derive(Clone)]
pub struct WebRuntime {
    dom: Rc<RefCell<WebDom>>,
}

impl WebRuntime {
    pub fn new(dom: Rc<RefCell<WebDom>>) -> Self {
        Self { dom }
    }
}

impl Spawn for WebRuntime {
    fn spawn(&mut self, task: Box<dyn Task>, wake: Wake) {
        schedule(self.dom.clone(), task, wake);
    }
}

fn schedule(dom: Rc<RefCell<WebDom>>, task: Box<dyn Task>, wake: Wake) {
    let Some(window) = web_sys::window() else {
        return;
    };

    match wake {
        Wake::Done => {}
        Wake::Frame => {
            let callback = Closure::once_into_js(move |_time: f64| step(dom, task));
            let _ = window.request_animation_frame(callback.unchecked_ref());
        }
        Wake::After(ms) => {
            let callback = Closure::once_into_js(move || step(dom, task));
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                ms as i32,
            );
        }
    }
}

fn step(dom: Rc<RefCell<WebDom>>, mut task: Box<dyn Task>) {
    let wake = task.run(&mut *dom.borrow_mut());
    schedule(dom, task, wake);
}
