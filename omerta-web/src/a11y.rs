// Accessibility helpers

/// Update the live region status for screen readers
///
/// Writes into the `#status-live` element from `index.html` if present.
pub fn set_status(msg: &str) {
    if let Some(node) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id("status-live"))
    {
        node.set_text_content(Some(msg));
    }
}

/// Move focus to the element with `id`, if it exists and is focusable.
pub fn focus_element(id: &str) {
    use wasm_bindgen::JsCast;

    if let Some(el) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    {
        let _ = el.focus();
    }
}
