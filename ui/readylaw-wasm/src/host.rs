//! Browser implementations of the connector's host hooks.

use js_sys::Function;
use rl_wallet_core::{Diagnostic, DiagnosticLevel, Notifier, Reloader};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use std::cell::Cell;
use wasm_bindgen::prelude::*;

thread_local! {
    static RELOAD_REQUESTED: Cell<bool> = const { Cell::new(false) };
}

/// First caller on the page wins; later calls are no-ops.
fn claim_reload() -> bool {
    RELOAD_REQUESTED.with(|requested| !requested.replace(true))
}

/// `location.reload()`, issued at most once per page even when several
/// app handles see the same chain change.
#[derive(Debug, Default, Clone, Copy)]
pub struct PageReloader;

impl Reloader for PageReloader {
    fn reload(&self) {
        if !claim_reload() {
            return;
        }
        let reloaded = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))
            .and_then(|window| window.location().reload());
        if let Err(err) = reloaded {
            gloo_console::error!("page reload failed", err);
        }
    }
}

/// Logs diagnostics to the console and forwards them to an optional page
/// callback as plain objects.
pub struct ConsoleNotifier {
    callback: Option<Function>,
}

impl ConsoleNotifier {
    pub fn new(callback: Option<Function>) -> Self {
        Self { callback }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, diagnostic: Diagnostic) {
        let line = format!("[readylaw] {}", diagnostic.message);
        match diagnostic.level {
            DiagnosticLevel::Success | DiagnosticLevel::Info => gloo_console::log!(line),
            DiagnosticLevel::Warning => gloo_console::warn!(line),
            DiagnosticLevel::Error => gloo_console::error!(line),
        }

        let Some(callback) = &self.callback else {
            return;
        };
        let delivered = diagnostic
            .serialize(&Serializer::json_compatible())
            .map_err(JsValue::from)
            .and_then(|payload| callback.call1(&JsValue::NULL, &payload));
        if let Err(err) = delivered {
            gloo_console::warn!("diagnostic callback failed", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_is_claimed_once_per_page() {
        assert!(claim_reload());
        assert!(!claim_reload());
        assert!(!claim_reload());
    }
}
