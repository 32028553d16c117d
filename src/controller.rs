// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search widget behavior without a DOM.
//!
//! The controller is a small state machine. The host feeds it events (keys,
//! input changes, focus, clicks outside the widget) and calls `tick` from a
//! timer; the controller decides what to show and pushes it through a
//! `MountPoint`. It never scores or ranks anything itself: queries go to the
//! `SearchService`, markup comes from the `Renderer`.
//!
//! Time is passed in as a `Duration` since any fixed origin the host likes
//! (`performance.now()` in a browser, a test clock in tests), because
//! `std::time::Instant` is not available on `wasm32-unknown-unknown`.
//!
//! # Modes
//!
//! | Event            | Modal                      | Inline                         |
//! |------------------|----------------------------|--------------------------------|
//! | Ctrl/Meta + K    | open, focus input          | focus and select input         |
//! | Escape           | close, clear input         | hide results, blur input       |
//! | Click outside    | close                      | hide results                   |
//! | Focus input      | -                          | re-show results if query ≥ 2   |
//! | Short query      | "type more" message        | hide results                   |

use std::sync::Arc;
use std::time::Duration;

use crate::config::{ControllerOptions, WidgetMode};
use crate::render::Renderer;
use crate::service::{QueryState, SearchService};

/// Where the widget lives in the host page.
pub trait MountPoint {
    /// Replace the results container's contents.
    fn render(&mut self, html: &str);
    /// Show or hide the modal (modal mode) or results panel (inline mode).
    fn set_visible(&mut self, visible: bool);
    /// Focus the input, selecting its text when `select` is set.
    fn focus_input(&mut self, select: bool);
    fn blur_input(&mut self);
    fn clear_input(&mut self);
}

/// A key event, reduced to what the controller cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            meta: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    fn is_escape(&self) -> bool {
        self.key == "Escape"
    }
}

/// Everything the host can tell the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    Key(KeyPress),
    /// The input's value changed.
    Input(String),
    /// The input gained focus.
    Focus,
    /// A click landed outside the widget (or on the modal backdrop).
    ClickOutside,
    /// The search button was pressed (modal mode).
    Open,
    /// The close button was pressed (modal mode).
    Close,
}

/// Trailing-edge debounce: only the newest value fires, once it has been
/// quiet for the whole window.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    pending: Option<(String, Duration)>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Record a new value; restarts the quiet period.
    pub fn push(&mut self, value: String, now: Duration) {
        self.pending = Some((value, now));
    }

    /// The pending value, if the quiet period has passed.
    pub fn ready(&mut self, now: Duration) -> Option<String> {
        match &self.pending {
            Some((_, since)) if now.saturating_sub(*since) >= self.window => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Drives one search widget.
pub struct SearchController<M: MountPoint> {
    service: Arc<SearchService>,
    renderer: Renderer,
    options: ControllerOptions,
    mount: M,
    debouncer: Debouncer,
    query: String,
    open: bool,
}

impl<M: MountPoint> SearchController<M> {
    pub fn new(
        service: Arc<SearchService>,
        renderer: Renderer,
        options: ControllerOptions,
        mount: M,
    ) -> Self {
        let debouncer = Debouncer::new(Duration::from_millis(options.debounce_ms));
        Self {
            service,
            renderer,
            options,
            mount,
            debouncer,
            query: String::new(),
            open: false,
        }
    }

    pub fn mount(&self) -> &M {
        &self.mount
    }

    pub fn mount_mut(&mut self) -> &mut M {
        &mut self.mount
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Modal open, or inline results showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Feed one event. Returns `true` when the host should suppress the
    /// event's default action (the shortcut, mostly).
    pub fn handle(&mut self, event: ControllerEvent, now: Duration) -> bool {
        match event {
            ControllerEvent::Key(key) => self.on_key(&key),
            ControllerEvent::Input(value) => {
                self.query = value.clone();
                self.debouncer.push(value, now);
                false
            }
            ControllerEvent::Focus => {
                if self.options.mode == WidgetMode::Inline && self.query_long_enough() {
                    self.show();
                }
                false
            }
            ControllerEvent::ClickOutside => {
                match self.options.mode {
                    WidgetMode::Modal if self.open => self.close(),
                    WidgetMode::Modal => {}
                    WidgetMode::Inline => self.hide(),
                }
                false
            }
            ControllerEvent::Open => {
                self.open_modal();
                false
            }
            ControllerEvent::Close => {
                self.close();
                false
            }
        }
    }

    /// Run the pending query if its quiet period is over.
    ///
    /// Returns the state that was displayed, if a query ran.
    pub fn tick(&mut self, now: Duration) -> Option<QueryState> {
        let query = self.debouncer.ready(now)?;
        Some(self.run_query(&query))
    }

    fn on_key(&mut self, key: &KeyPress) -> bool {
        if (key.ctrl || key.meta) && key.key.eq_ignore_ascii_case(&self.options.shortcut_key) {
            match self.options.mode {
                WidgetMode::Modal => self.open_modal(),
                WidgetMode::Inline => self.mount.focus_input(true),
            }
            return true;
        }
        if key.is_escape() {
            match self.options.mode {
                WidgetMode::Modal if self.open => self.close(),
                WidgetMode::Modal => return false,
                WidgetMode::Inline => {
                    self.hide();
                    self.mount.blur_input();
                }
            }
            return true;
        }
        false
    }

    fn run_query(&mut self, query: &str) -> QueryState {
        let outcome = self.service.search(query);
        let state = outcome.state();
        match (state, self.options.mode) {
            (QueryState::TypeMore, WidgetMode::Inline) => {
                self.mount.render("");
                self.hide();
            }
            (QueryState::Results, _) => {
                let html = self.renderer.render_html(outcome.results());
                self.mount.render(&html);
                self.show();
            }
            _ => {
                let html = self.renderer.status_html(state).unwrap_or_default();
                self.mount.render(&html);
                self.show();
            }
        }
        state
    }

    fn open_modal(&mut self) {
        self.show();
        self.mount.focus_input(false);
    }

    /// Modal close: hide, and forget the query.
    fn close(&mut self) {
        self.hide();
        self.debouncer.cancel();
        self.query.clear();
        self.mount.clear_input();
        self.mount.render("");
    }

    fn show(&mut self) {
        self.open = true;
        self.mount.set_visible(true);
    }

    fn hide(&mut self) {
        self.open = false;
        self.mount.set_visible(false);
    }

    fn query_long_enough(&self) -> bool {
        self.query.chars().count() >= self.service.options().min_query_len
    }
}
