//! JS-facing application handle.

use js_sys::{Function, Promise};
use rl_contracts::{AddressOverrides, ContractService};
use rl_data::DataService;
use rl_provider::WalletProvider;
use rl_wallet_core::{ConnectionPhase, ConnectionState, WalletConnector};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

use crate::host::{ConsoleNotifier, PageReloader};
use crate::provider::InjectedProvider;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StateView {
    #[serde(flatten)]
    connection: ConnectionState,
    phase: ConnectionPhase,
    network: &'static str,
    indicator: &'static str,
}

/// Wallet connection plus data reads for one page.
///
/// Meant to be created once per page. Extra handles each bridge their own
/// provider listeners; the page still reloads only once on a chain change.
#[wasm_bindgen]
pub struct ReadyLawApp {
    connector: WalletConnector,
    data: Rc<DataService>,
}

#[wasm_bindgen]
impl ReadyLawApp {
    /// `addresses` is an optional `{ roles, documents, escrow, fund,
    /// listings }` object; `on_diagnostic` receives every diagnostic.
    #[wasm_bindgen(constructor)]
    pub fn new(addresses: JsValue, on_diagnostic: Option<Function>) -> Result<ReadyLawApp, JsValue> {
        let overrides: AddressOverrides = if addresses.is_undefined() || addresses.is_null() {
            AddressOverrides::default()
        } else {
            serde_wasm_bindgen::from_value(addresses)?
        };

        let provider = InjectedProvider::detect().map(|p| Rc::new(p) as Rc<dyn WalletProvider>);
        if provider.is_none() {
            gloo_console::warn!("no injected wallet found");
        }

        let contracts = Rc::new(ContractService::new());
        let connector = WalletConnector::new(
            provider,
            Rc::clone(&contracts),
            Rc::new(ConsoleNotifier::new(on_diagnostic)),
            Rc::new(PageReloader),
        )
        .with_address_overrides(overrides);
        connector.attach();
        if connector.has_provider() {
            let restoring = connector.clone();
            spawn_local(async move {
                if let Err(err) = restoring.check_existing_connection().await {
                    gloo_console::warn!(format!("restoring the wallet session failed: {err}"));
                }
            });
        }

        Ok(ReadyLawApp {
            connector,
            data: Rc::new(DataService::new(contracts)),
        })
    }

    /// Resolves to the connection state even when connecting fails; the
    /// failure has already been reported as a diagnostic.
    pub fn connect(&self) -> Promise {
        let connector = self.connector.clone();
        future_to_promise(async move {
            if let Err(err) = connector.connect_wallet().await {
                gloo_console::debug!(format!("connect ended without a connection: {err}"));
            }
            to_js(&connector.state())
        })
    }

    pub fn disconnect(&self) {
        self.connector.disconnect_wallet();
    }

    #[wasm_bindgen(js_name = switchNetwork)]
    pub fn switch_network(&self) -> Promise {
        let connector = self.connector.clone();
        future_to_promise(async move {
            if let Err(err) = connector.switch_network().await {
                gloo_console::debug!(format!("network switch not completed: {err}"));
            }
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Silently restores an already-authorized session; resolves to the
    /// state or `null`. The constructor already runs this once.
    pub fn restore(&self) -> Promise {
        let connector = self.connector.clone();
        future_to_promise(async move {
            match connector.check_existing_connection().await.map_err(wallet_error)? {
                Some(state) => to_js(&state),
                None => Ok(JsValue::NULL),
            }
        })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        let network = self.connector.network_status();
        to_js(&StateView {
            connection: self.connector.state(),
            phase: self.connector.phase(),
            network: network.label(),
            indicator: network.indicator(),
        })
    }

    #[wasm_bindgen(js_name = contractStatus)]
    pub fn contract_status(&self) -> Result<JsValue, JsValue> {
        to_js(&self.data.contract_status())
    }

    pub fn users(&self) -> Promise {
        let data = Rc::clone(&self.data);
        future_to_promise(async move { to_js(&data.users().await) })
    }

    pub fn documents(&self) -> Promise {
        let data = Rc::clone(&self.data);
        future_to_promise(async move { to_js(&data.documents().await) })
    }

    pub fn cases(&self) -> Promise {
        let data = Rc::clone(&self.data);
        future_to_promise(async move { to_js(&data.cases().await) })
    }

    pub fn campaigns(&self) -> Promise {
        let data = Rc::clone(&self.data);
        future_to_promise(async move { to_js(&data.campaigns().await) })
    }

    #[wasm_bindgen(js_name = lawyerListings)]
    pub fn lawyer_listings(&self) -> Promise {
        let data = Rc::clone(&self.data);
        future_to_promise(async move { to_js(&data.lawyer_listings().await) })
    }

    #[wasm_bindgen(js_name = globalSearch)]
    pub fn global_search(&self, query: String) -> Promise {
        let data = Rc::clone(&self.data);
        future_to_promise(async move { to_js(&data.global_search(&query).await) })
    }

    #[wasm_bindgen(js_name = dataSummary)]
    pub fn data_summary(&self) -> Promise {
        let data = Rc::clone(&self.data);
        future_to_promise(async move { to_js(&data.data_summary().await) })
    }

    #[wasm_bindgen(js_name = dashboardStats)]
    pub fn dashboard_stats(&self) -> Result<JsValue, JsValue> {
        to_js(&self.data.dashboard_stats())
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(JsValue::from)
}

fn wallet_error(err: rl_wallet_core::WalletError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
