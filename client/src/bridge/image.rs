//! Screenshot size budget.
//!
//! Extension captures arrive as data URLs. Anything over the budget is
//! re-encoded as JPEG at descending quality until it fits; if nothing fits
//! the screenshot is dropped and the bookmark is kept without one.
//!
//! The byte arithmetic is pure; only the re-encode touches the browser.

#[cfg(test)]
#[path = "image_test.rs"]
mod image_test;

/// Largest screenshot we are willing to persist, in decoded bytes.
pub const SCREENSHOT_BUDGET_BYTES: usize = 500 * 1024;

/// Re-encode qualities tried in order when a capture is over budget.
pub const QUALITY_LADDER: [f64; 4] = [0.8, 0.6, 0.4, 0.2];

/// Decoded byte length of a data URL.
///
/// For base64 payloads this is the exact decoded size (4 base64 chars per
/// 3 bytes, minus padding). Non-base64 data URLs fall back to the string
/// length, which over-counts and therefore errs toward dropping.
#[must_use]
pub fn data_url_byte_len(data_url: &str) -> usize {
    let Some(idx) = data_url.find(";base64,") else {
        return data_url.len();
    };
    let b64 = &data_url[idx + ";base64,".len()..];
    let padding = b64.chars().rev().take_while(|&c| c == '=').count();
    // The payload comes off the wire, so a truncated body may carry more
    // padding than its group count accounts for.
    ((b64.len() / 4) * 3).saturating_sub(padding)
}

#[must_use]
pub fn fits_budget(data_url: &str) -> bool {
    data_url_byte_len(data_url) <= SCREENSHOT_BUDGET_BYTES
}

/// Bring `data_url` within the budget, re-encoding if necessary.
///
/// Returns the original when it already fits, a re-encoded JPEG when a
/// ladder quality fits, and `None` when nothing does (or when re-encoding
/// is unavailable, as on native builds).
pub async fn budget_screenshot(data_url: &str) -> Option<String> {
    if fits_budget(data_url) {
        return Some(data_url.to_owned());
    }
    #[cfg(feature = "hydrate")]
    {
        match reencode_until_fit(data_url).await {
            Ok(result) => result,
            Err(err) => {
                log::warn!("screenshot re-encode failed: {err}");
                None
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

#[cfg(feature = "hydrate")]
async fn reencode_until_fit(data_url: &str) -> Result<Option<String>, String> {
    use wasm_bindgen::{JsCast, JsValue};

    let img = web_sys::HtmlImageElement::new().map_err(|_| "image element".to_owned())?;
    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        img.set_onload(Some(&resolve));
        img.set_onerror(Some(&reject));
    });
    img.set_src(data_url);
    wasm_bindgen_futures::JsFuture::from(loaded)
        .await
        .map_err(|_| "image decode".to_owned())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document".to_owned())?;
    let canvas: web_sys::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| "create canvas".to_owned())?
        .dyn_into()
        .map_err(|_| "canvas element".to_owned())?;
    canvas.set_width(img.natural_width());
    canvas.set_height(img.natural_height());

    let ctx: web_sys::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .ok_or_else(|| "2d context".to_owned())?
        .dyn_into()
        .map_err(|_| "2d context".to_owned())?;
    ctx.draw_image_with_html_image_element(&img, 0.0, 0.0)
        .map_err(|_| "draw image".to_owned())?;

    for quality in QUALITY_LADDER {
        let encoded = canvas
            .to_data_url_with_type_and_encoder_options("image/jpeg", &JsValue::from_f64(quality))
            .map_err(|_| "encode jpeg".to_owned())?;
        if fits_budget(&encoded) {
            return Ok(Some(encoded));
        }
    }
    Ok(None)
}
