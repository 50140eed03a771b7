use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions};

use super::{Surface, BODY};
use crate::error::{LandingError, Result};

/// [`Surface`] over the live document.
#[derive(Debug, Clone)]
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn from_window() -> Result<Self> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
            .ok_or_else(|| LandingError::Dom("no document available".to_string()))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self, id: &str) -> Result<Element> {
        let found = if id == BODY {
            self.document.body().map(Element::from)
        } else {
            self.document.get_element_by_id(id)
        };
        found.ok_or_else(|| LandingError::missing(id))
    }

    fn html_element(&self, id: &str) -> Result<HtmlElement> {
        self.element(id)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| LandingError::Dom(format!("#{} is not an HTML element", id)))
    }
}

fn js_error(err: JsValue) -> LandingError {
    LandingError::Dom(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

impl Surface for DomSurface {
    fn contains(&self, id: &str) -> bool {
        self.element(id).is_ok()
    }

    fn set_text(&self, id: &str, text: &str) -> Result<()> {
        self.element(id)?.set_text_content(Some(text));
        Ok(())
    }

    fn set_style(&self, id: &str, property: &str, value: &str) -> Result<()> {
        self.html_element(id)?
            .style()
            .set_property(property, value)
            .map_err(js_error)
    }

    fn add_marker(&self, id: &str, marker: &str) -> Result<()> {
        self.element(id)?.class_list().add_1(marker).map_err(js_error)
    }

    fn remove_marker(&self, id: &str, marker: &str) -> Result<()> {
        self.element(id)?
            .class_list()
            .remove_1(marker)
            .map_err(js_error)
    }

    fn focus_first_field(&self, id: &str) -> Result<()> {
        let input = self
            .element(id)?
            .query_selector("input")
            .map_err(js_error)?
            .and_then(|input| input.dyn_into::<HtmlElement>().ok());
        match input {
            Some(input) => input.focus().map_err(js_error),
            None => Ok(()),
        }
    }

    fn scroll_into_view(&self, id: &str) -> Result<()> {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        self.element(id)?
            .scroll_into_view_with_scroll_into_view_options(&options);
        Ok(())
    }
}
