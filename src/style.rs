use crate::constants::STYLE_PROPERTY_PREFIX;
use visual_core::StyleSink;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Writes style-channel properties as CSS custom properties on `<html>`.
pub struct DomStyleSink {
    style: web::CssStyleDeclaration,
    name: String,
}

impl DomStyleSink {
    pub fn new(document: &web::Document) -> Option<Self> {
        let root = document
            .document_element()
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
        match root {
            Some(el) => Some(Self {
                style: el.style(),
                name: String::with_capacity(32),
            }),
            None => {
                log::warn!("[style] no root element; CSS properties disabled");
                None
            }
        }
    }
}

impl StyleSink for DomStyleSink {
    fn set_property(&mut self, key: &str, value: &str) {
        self.name.clear();
        self.name.push_str(STYLE_PROPERTY_PREFIX);
        self.name.push_str(key);
        _ = self.style.set_property(&self.name, value);
    }
}
