//! Platform abstraction layer
//!
//! Browser bindings for:
//! - The page (`WebDom`, backed by `web_sys::Document`)
//! - Frames and timers (`WebRuntime`, `requestAnimationFrame` / `setTimeout`)
//!
//! Native builds use `MemoryDom` and `Timeline` instead.

#[cfg(target_arch = "wasm32")]
mod runtime;
#[cfg(target_arch = "wasm32")]
mod web_dom;

#[cfg(target_arch = "wasm32")]
pub use runtime::WebRuntime;
#[cfg(target_arch = "wasm32")]
pub use web_dom::WebDom;
