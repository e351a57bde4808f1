// Pure conversions from raw DOM measurements to orchestrator inputs.

/// Client pointer coordinates normalized against the viewport, or `None`
/// when the viewport has no area or the inputs are not finite.
#[inline]
pub fn normalize_pointer(client_x: f64, client_y: f64, width: f64, height: f64) -> Option<[f32; 2]> {
    if !(client_x.is_finite() && client_y.is_finite()) {
        return None;
    }
    if width > 0.0 && height > 0.0 {
        let u = (client_x / width).clamp(0.0, 1.0) as f32;
        let v = (client_y / height).clamp(0.0, 1.0) as f32;
        Some([u, v])
    } else {
        None
    }
}

/// Scrollable range of the document; never negative.
#[inline]
pub fn scroll_range(scroll_height: f64, viewport_height: f64) -> f32 {
    (scroll_height - viewport_height).max(0.0) as f32
}

/// Key identifying a hover target: its id, or its position among targets.
#[inline]
pub fn hover_key(element_id: &str, index: usize) -> String {
    if element_id.is_empty() {
        format!("hover-{index}")
    } else {
        element_id.to_owned()
    }
}

/// Items whose section id equals `id` exactly. Ids are compared as values
/// rather than spliced into a CSS selector, so quotes and backslashes in an
/// id are harmless.
pub fn with_section_id<T>(
    items: impl IntoIterator<Item = T>,
    id: &str,
    section_id: impl Fn(&T) -> Option<String>,
) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| section_id(item).as_deref() == Some(id))
        .collect()
}
