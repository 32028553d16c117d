// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! WebAssembly bindings for the search widget.
//!
//! Two exports. `SearchClient` owns the loaded index and answers queries.
//! `SearchWidget` wraps the interaction controller and drives the page
//! through plain JS callbacks, so the glue script stays a few lines of event
//! listeners.
//!
//! ```js
//! const client = new SearchClient({ threshold: 0.3 }, { locale: "ko-KR" });
//! client.load("/search-index.json");          // fire and forget
//!
//! const widget = new SearchWidget(client, { mode: "modal" }, {
//!     render: (html) => { results.innerHTML = html; },
//!     setVisible: (on) => modal.classList.toggle("active", on),
//!     focusInput: (select) => { input.focus(); if (select) input.select(); },
//!     blurInput: () => input.blur(),
//!     clearInput: () => { input.value = ""; },
//! });
//! document.addEventListener("keydown", (e) => {
//!     const ev = { type: "key", key: e.key, ctrlKey: e.ctrlKey, metaKey: e.metaKey };
//!     if (widget.handle(ev, performance.now())) e.preventDefault();
//! });
//! input.addEventListener("input", () =>
//!     widget.handle({ type: "input", value: input.value }, performance.now()));
//! setInterval(() => widget.tick(performance.now()), 50);
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use gloo_net::http::Request;
use js_sys::{Function, Promise, Reflect};
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::{from_value, to_value};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::future_to_promise;

use crate::config::{ControllerOptions, RenderOptions, SearchOptions};
use crate::controller::{ControllerEvent, KeyPress, MountPoint, SearchController};
use crate::error::IndexLoadError;
use crate::render::{RenderedResult, Renderer};
use crate::service::{QueryState, Readiness, SearchService};

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// `undefined`/`null` → defaults, anything else must deserialize.
fn options_from<T: for<'de> Deserialize<'de> + Default>(value: JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        Ok(T::default())
    } else {
        from_value(value).map_err(|e| js_error(format!("Invalid options: {}", e)))
    }
}

/// `performance.now()` milliseconds → controller time.
fn to_duration(now_ms: f64) -> Duration {
    if now_ms.is_finite() && now_ms > 0.0 {
        Duration::from_secs_f64(now_ms / 1000.0)
    } else {
        Duration::ZERO
    }
}

async fn fetch_index(url: &str) -> Result<Vec<u8>, IndexLoadError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| IndexLoadError::Fetch(e.to_string()))?;
    if !response.ok() {
        return Err(IndexLoadError::Status(response.status()));
    }
    response
        .binary()
        .await
        .map_err(|e| IndexLoadError::Fetch(e.to_string()))
}

/// Query outcome for JavaScript consumption.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsSearchOutcome {
    state: QueryState,
    /// Status text for the non-result states.
    message: Option<String>,
    /// Ready-to-insert markup: result list or status message.
    html: String,
    results: Vec<RenderedResult>,
    total_matches: usize,
}

/// Loaded index plus renderer.
#[wasm_bindgen]
pub struct SearchClient {
    service: Arc<SearchService>,
    renderer: Renderer,
    load_started: Rc<Cell<bool>>,
}

#[wasm_bindgen]
impl SearchClient {
    /// `search` and `render` are partial option objects; omitted keys keep
    /// their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(search: JsValue, render: JsValue) -> Result<SearchClient, JsValue> {
        let search: SearchOptions = options_from(search)?;
        let render: RenderOptions = options_from(render)?;
        Ok(SearchClient {
            service: Arc::new(SearchService::new(search)),
            renderer: Renderer::new(render),
            load_started: Rc::new(Cell::new(false)),
        })
    }

    /// Fetch the index once. Resolves to `true` when it is ready to query.
    ///
    /// Later calls resolve immediately with the current readiness.
    pub fn load(&self, url: String) -> Promise {
        let service = Arc::clone(&self.service);
        let first = !self.load_started.replace(true);

        future_to_promise(async move {
            if first {
                let fetched = fetch_index(&url).await;
                service.finish_load(&url, fetched);
            } else {
                warn!(url = %url, "search index load already started");
            }
            Ok(JsValue::from_bool(service.readiness() == Readiness::Ready))
        })
    }

    #[wasm_bindgen(js_name = "isReady")]
    pub fn is_ready(&self) -> bool {
        self.service.is_ready()
    }

    /// Number of records, or 0 before the index has loaded.
    #[wasm_bindgen(js_name = "recordCount")]
    pub fn record_count(&self) -> usize {
        self.service.index().map_or(0, |index| index.len())
    }

    /// Run a query and render it.
    ///
    /// Returns `{ state, message, html, results, totalMatches }`.
    pub fn search(&self, query: &str) -> Result<JsValue, JsValue> {
        let outcome = self.service.search(query);
        let state = outcome.state();
        let html = match self.renderer.status_html(state) {
            Some(status) => status,
            None => self.renderer.render_html(outcome.results()),
        };
        let output = JsSearchOutcome {
            state,
            message: self.renderer.status_message(state).map(str::to_string),
            html,
            results: self.renderer.render(outcome.results()),
            total_matches: outcome.total_matches(),
        };
        to_value(&output).map_err(js_error)
    }
}

/// A `MountPoint` made of JS callbacks.
struct JsMountPoint {
    render: Function,
    set_visible: Function,
    focus_input: Function,
    blur_input: Function,
    clear_input: Function,
}

impl JsMountPoint {
    fn from_object(callbacks: &JsValue) -> Result<Self, JsValue> {
        let get = |name: &str| -> Result<Function, JsValue> {
            Reflect::get(callbacks, &JsValue::from_str(name))?
                .dyn_into::<Function>()
                .map_err(|_| js_error(format!("mount callback `{}` must be a function", name)))
        };
        Ok(Self {
            render: get("render")?,
            set_visible: get("setVisible")?,
            focus_input: get("focusInput")?,
            blur_input: get("blurInput")?,
            clear_input: get("clearInput")?,
        })
    }

    fn call(name: &str, callback: &Function, arg: &JsValue) {
        if let Err(e) = callback.call1(&JsValue::NULL, arg) {
            warn!(callback = name, error = ?e, "mount callback threw");
        }
    }
}

impl MountPoint for JsMountPoint {
    fn render(&mut self, html: &str) {
        Self::call("render", &self.render, &JsValue::from_str(html));
    }

    fn set_visible(&mut self, visible: bool) {
        Self::call("setVisible", &self.set_visible, &JsValue::from_bool(visible));
    }

    fn focus_input(&mut self, select: bool) {
        Self::call("focusInput", &self.focus_input, &JsValue::from_bool(select));
    }

    fn blur_input(&mut self) {
        Self::call("blurInput", &self.blur_input, &JsValue::UNDEFINED);
    }

    fn clear_input(&mut self) {
        Self::call("clearInput", &self.clear_input, &JsValue::UNDEFINED);
    }
}

/// Event shape accepted by `SearchWidget.handle`.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum JsEvent {
    #[serde(rename_all = "camelCase")]
    Key {
        key: String,
        #[serde(default)]
        ctrl_key: bool,
        #[serde(default)]
        meta_key: bool,
    },
    Input {
        value: String,
    },
    Focus,
    ClickOutside,
    Open,
    Close,
}

impl From<JsEvent> for ControllerEvent {
    fn from(event: JsEvent) -> Self {
        match event {
            JsEvent::Key {
                key,
                ctrl_key,
                meta_key,
            } => ControllerEvent::Key(KeyPress {
                key,
                ctrl: ctrl_key,
                meta: meta_key,
            }),
            JsEvent::Input { value } => ControllerEvent::Input(value),
            JsEvent::Focus => ControllerEvent::Focus,
            JsEvent::ClickOutside => ControllerEvent::ClickOutside,
            JsEvent::Open => ControllerEvent::Open,
            JsEvent::Close => ControllerEvent::Close,
        }
    }
}

/// The interaction controller, bound to JS callbacks.
#[wasm_bindgen]
pub struct SearchWidget {
    controller: SearchController<JsMountPoint>,
}

#[wasm_bindgen]
impl SearchWidget {
    #[wasm_bindgen(constructor)]
    pub fn new(
        client: &SearchClient,
        options: JsValue,
        callbacks: JsValue,
    ) -> Result<SearchWidget, JsValue> {
        let options: ControllerOptions = options_from(options)?;
        let mount = JsMountPoint::from_object(&callbacks)?;
        Ok(SearchWidget {
            controller: SearchController::new(
                Arc::clone(&client.service),
                client.renderer.clone(),
                options,
                mount,
            ),
        })
    }

    /// Feed one event. `true` means the caller should `preventDefault()`.
    pub fn handle(&mut self, event: JsValue, now_ms: f64) -> Result<bool, JsValue> {
        let event: JsEvent = from_value(event).map_err(|e| js_error(format!("Invalid event: {}", e)))?;
        Ok(self.controller.handle(event.into(), to_duration(now_ms)))
    }

    /// Run a debounced query if its quiet period is over.
    pub fn tick(&mut self, now_ms: f64) {
        self.controller.tick(to_duration(now_ms));
    }

    #[wasm_bindgen(js_name = "isOpen")]
    pub fn is_open(&self) -> bool {
        self.controller.is_open()
    }
}
