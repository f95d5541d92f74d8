//! Thin wrappers over blocking browser dialogs and download links.
//!
//! TRADE-OFFS
//! ==========
//! Outside the hydrated browser build there is no window: `confirm` answers
//! `false` so nothing destructive happens, and the others no-op.

#[cfg(test)]
#[path = "browser_test.rs"]
mod browser_test;

/// Blocking yes/no prompt. Returns `true` only when the user accepts.
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
        false
    }
}

/// Blocking alert box.
pub fn alert(message: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
    }
}

/// Start a file download by synthesizing an anchor and clicking it.
pub fn trigger_download(href: &str, filename: &str) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast as _;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(anchor) = document
            .create_element("a")
            .ok()
            .and_then(|el| el.dyn_into::<web_sys::HtmlAnchorElement>().ok())
        else {
            return;
        };
        anchor.set_href(href);
        anchor.set_download(filename);
        let Some(body) = document.body() else {
            return;
        };
        if body.append_child(&anchor).is_ok() {
            anchor.click();
            let _ = body.remove_child(&anchor);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (href, filename);
    }
}
