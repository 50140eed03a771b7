//! Binds a [`LandingPage`] to the live document: intersection observer,
//! keyboard, click, error and unload listeners.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Document, Element, ErrorEvent, Event, EventTarget, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
};

use crate::config::{LandingConfig, CONFIG_ELEMENT_ID};
use crate::error::{LandingError, Result};
use crate::page::LandingPage;
use crate::surface::DomSurface;
use crate::timer::BrowserScheduler;
use crate::tracking::ConsoleSink;

/// Class carried by every modal overlay.
const OVERLAY_CLASS: &str = "modal";

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

fn js_error(err: JsValue) -> LandingError {
    LandingError::Dom(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(js_error)?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Reads overrides from `<script id="landing-config" type="application/json">`.
/// A missing block means defaults; a broken one is logged and ignored.
pub fn config_from_page(document: &Document) -> LandingConfig {
    let Some(json) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return LandingConfig::default();
    };
    match LandingConfig::from_json(&json) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring landing config: {}", err);
            LandingConfig::default()
        }
    }
}

/// A running landing page in the browser. Dropping it removes every listener
/// and cancels every timer.
pub struct BrowserSession {
    page: Rc<LandingPage>,
    observer: Option<IntersectionObserver>,
    _observer_callback: Option<ObserverCallback>,
    listeners: Vec<Listener>,
}

impl BrowserSession {
    pub fn mount() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| LandingError::Dom("no window".to_string()))?;
        let surface = DomSurface::from_window()?;
        let document = surface.document().clone();
        let config = config_from_page(&document);

        let page = Rc::new(LandingPage::new(
            config,
            Rc::new(surface),
            Rc::new(BrowserScheduler),
            Rc::new(ConsoleSink),
        ));
        page.start();

        let (observer, observer_callback) = observe_sections(&document, &page)?;

        let listeners = vec![
            Listener::attach(&document, "keydown", {
                let page = page.clone();
                move |event: Event| {
                    if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                        page.key_pressed(&event.key());
                    }
                }
            })?,
            Listener::attach(&document, "click", {
                let page = page.clone();
                move |event: Event| on_click(&page, &event)
            })?,
            Listener::attach(&window, "error", {
                let page = page.clone();
                move |event: Event| {
                    let Some(event) = event.dyn_ref::<ErrorEvent>() else {
                        return;
                    };
                    let message = event.message();
                    gloo_console::error!("JavaScript error:", message.clone());
                    let message = Some(message.as_str()).filter(|m| !m.is_empty());
                    page.report_error(message, &event.filename(), event.lineno());
                }
            })?,
            Listener::attach(&window, "beforeunload", {
                let page = page.clone();
                move |_: Event| page.teardown()
            })?,
        ];

        log::info!("🎓 CourseMate landing page loaded successfully!");
        Ok(Self {
            page,
            observer: Some(observer),
            _observer_callback: Some(observer_callback),
            listeners,
        })
    }

    pub fn page(&self) -> &Rc<LandingPage> {
        &self.page
    }

    pub fn teardown(&mut self) {
        self.page.teardown();
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self.listeners.clear();
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn observe_sections(
    document: &Document,
    page: &Rc<LandingPage>,
) -> Result<(IntersectionObserver, ObserverCallback)> {
    let callback = {
        let page = page.clone();
        Closure::wrap(Box::new(move |entries: Array, _: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    page.section_visible(&entry.target().id());
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>)
    };

    let focus = &page.config().focus;
    let options = IntersectionObserverInit::new();
    options.set_root_margin(&focus.root_margin);
    options.set_threshold(&JsValue::from_f64(focus.threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(js_error)?;

    for section in &focus.sections {
        match document.get_element_by_id(section) {
            Some(element) => observer.observe(&element),
            None => log::debug!("section {} not on page", section),
        }
    }
    Ok((observer, callback))
}

fn on_click(page: &LandingPage, event: &Event) {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };

    if target.class_list().contains(OVERLAY_CLASS) {
        page.overlay_clicked(&target.id());
    }

    if let Ok(Some(button)) = target.closest("button") {
        let section = button
            .closest("section")
            .ok()
            .flatten()
            .map(|section| section.id())
            .filter(|id| !id.is_empty());
        let text = button.text_content().unwrap_or_default();
        page.track_button_click(&text, section.as_deref());
    }
}
