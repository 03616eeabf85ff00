//! ReadyLaw browser binding.
//!
//! Wires the injected wallet into the wallet core and exposes
//! [`ReadyLawApp`] to the page.

mod app;
mod host;
mod provider;

pub use app::ReadyLawApp;
pub use host::{ConsoleNotifier, PageReloader};
pub use provider::InjectedProvider;

use wasm_bindgen::prelude::*;

/// Called when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}
