//! `window.ethereum` as a [`WalletProvider`].
//!
//! Requests go through the injected `request` function. Each event kind is
//! bridged once with a JS closure that fans out to the Rust listeners.

use async_trait::async_trait;
use js_sys::{Function, Object, Promise, Reflect};
use rl_provider::{
    Listener, ListenerId, ListenerSet, ProviderError, ProviderEvent, ProviderEventKind, RequestArguments,
    WalletProvider,
};
use serde::Serialize;
use serde_json::Value;
use serde_wasm_bindgen::Serializer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

type Bridge = (ProviderEventKind, Closure<dyn FnMut(JsValue)>);

pub struct InjectedProvider {
    ethereum: Object,
    listeners: Rc<ListenerSet>,
    bridges: RefCell<Vec<Bridge>>,
}

impl InjectedProvider {
    /// `None` when no wallet extension injected a provider.
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return None;
        }
        Some(Self {
            ethereum: ethereum.unchecked_into(),
            listeners: Rc::default(),
            bridges: RefCell::default(),
        })
    }

    fn function(&self, name: &str) -> Result<Function, ProviderError> {
        Reflect::get(&self.ethereum, &JsValue::from_str(name))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| {
                ProviderError::new(
                    ProviderError::UNSUPPORTED_METHOD,
                    format!("window.ethereum.{name} is not a function"),
                )
            })
    }

    fn bridge(&self, kind: ProviderEventKind) {
        if self.bridges.borrow().iter().any(|(bridged, _)| *bridged == kind) {
            return;
        }

        let listeners = Rc::clone(&self.listeners);
        let closure = Closure::wrap(Box::new(move |payload: JsValue| match decode_event(kind, payload) {
            Some(event) => {
                listeners.emit(&event);
            }
            None => gloo_console::warn!(format!("ignoring malformed {} payload", kind.as_str())),
        }) as Box<dyn FnMut(JsValue)>);

        let subscribed = self.function("on").and_then(|on| {
            on.call2(
                &self.ethereum,
                &JsValue::from_str(kind.as_str()),
                closure.as_ref().unchecked_ref(),
            )
            .map_err(provider_error)
        });
        if let Err(err) = subscribed {
            gloo_console::warn!(format!("cannot subscribe to {}: {err}", kind.as_str()));
            return;
        }
        self.bridges.borrow_mut().push((kind, closure));
    }
}

impl Drop for InjectedProvider {
    fn drop(&mut self) {
        let Ok(remove) = self.function("removeListener") else {
            return;
        };
        for (kind, closure) in self.bridges.get_mut().drain(..) {
            let _ = remove.call2(
                &self.ethereum,
                &JsValue::from_str(kind.as_str()),
                closure.as_ref().unchecked_ref(),
            );
        }
    }
}

#[async_trait(?Send)]
impl WalletProvider for InjectedProvider {
    async fn request(&self, args: RequestArguments) -> Result<Value, ProviderError> {
        let request = self.function("request")?;
        let payload = args
            .serialize(&Serializer::json_compatible())
            .map_err(|err| ProviderError::invalid_response(&err.to_string()))?;

        let pending = request.call1(&self.ethereum, &payload).map_err(provider_error)?;
        let promise = pending
            .dyn_into::<Promise>()
            .map_err(|_| ProviderError::invalid_response("request did not return a promise"))?;
        let result = JsFuture::from(promise).await.map_err(provider_error)?;

        serde_wasm_bindgen::from_value(result).map_err(|err| ProviderError::invalid_response(&err.to_string()))
    }

    fn add_listener(&self, kind: ProviderEventKind, listener: Listener) -> ListenerId {
        self.bridge(kind);
        self.listeners.add(kind, listener)
    }

    fn remove_listener(&self, _kind: ProviderEventKind, id: ListenerId) {
        self.listeners.remove(id);
    }
}

fn decode_event(kind: ProviderEventKind, payload: JsValue) -> Option<ProviderEvent> {
    match kind {
        ProviderEventKind::AccountsChanged => serde_wasm_bindgen::from_value(payload)
            .ok()
            .map(ProviderEvent::AccountsChanged),
        ProviderEventKind::ChainChanged => payload.as_string().map(ProviderEvent::ChainChanged),
    }
}

/// Reads `{ code, message, data }` off a rejected wallet request.
fn provider_error(raw: JsValue) -> ProviderError {
    let field = |name: &str| Reflect::get(&raw, &JsValue::from_str(name)).unwrap_or(JsValue::UNDEFINED);

    let code = field("code")
        .as_f64()
        .map(|code| code as i64)
        .unwrap_or(ProviderError::INTERNAL_ERROR);
    let message = field("message")
        .as_string()
        .or_else(|| raw.as_string())
        .unwrap_or_else(|| format!("{raw:?}"));

    let mut error = ProviderError::new(code, message);
    error.data = serde_wasm_bindgen::from_value(field("data"))
        .ok()
        .filter(|data: &Value| !data.is_null());
    error
}
