//! Browser `fetch` with streamed download progress.

use js_sys::{Reflect, Uint8Array};
use viewer_core::progress::prealloc_bytes;
use viewer_core::{AssetFetcher, LoadError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub struct BrowserFetcher;

fn fetch_err(url: &str, e: JsValue) -> LoadError {
    LoadError::Fetch {
        url: url.to_string(),
        reason: format!("{:?}", e),
    }
}

impl AssetFetcher for BrowserFetcher {
    async fn fetch(
        &self,
        url: &str,
        on_progress: &mut dyn FnMut(u64, Option<u64>),
    ) -> Result<Vec<u8>, LoadError> {
        let win = web::window().ok_or_else(|| fetch_err(url, JsValue::from_str("no window")))?;
        let resp_val = JsFuture::from(win.fetch_with_str(url))
            .await
            .map_err(|e| fetch_err(url, e))?;
        let resp: web::Response = resp_val.dyn_into().map_err(|e| fetch_err(url, e))?;
        if !resp.ok() {
            return Err(LoadError::Http {
                url: url.to_string(),
                status: resp.status(),
            });
        }

        let total = resp
            .headers()
            .get("Content-Length")
            .ok()
            .flatten()
            .and_then(|v| v.parse::<u64>().ok());

        let Some(body) = resp.body() else {
            // no stream support: one progress report at the end
            let buf = JsFuture::from(resp.array_buffer().map_err(|e| fetch_err(url, e))?)
                .await
                .map_err(|e| fetch_err(url, e))?;
            let bytes = Uint8Array::new(&buf).to_vec();
            on_progress(bytes.len() as u64, total);
            return Ok(bytes);
        };

        let reader: web::ReadableStreamDefaultReader = body.get_reader().unchecked_into();
        let mut bytes: Vec<u8> = Vec::with_capacity(prealloc_bytes(total));
        loop {
            let chunk = JsFuture::from(reader.read())
                .await
                .map_err(|e| fetch_err(url, e))?;
            let done = Reflect::get(&chunk, &JsValue::from_str("done"))
                .ok()
                .and_then(|v| v.as_bool())
                .unwrap_or(true);
            if done {
                break;
            }
            let value = Reflect::get(&chunk, &JsValue::from_str("value"))
                .map_err(|e| fetch_err(url, e))?;
            let part = Uint8Array::new(&value);
            let start = bytes.len();
            bytes.resize(start + part.length() as usize, 0);
            part.copy_to(&mut bytes[start..]);
            on_progress(bytes.len() as u64, total);
        }
        log::info!("[loader] fetched {} ({} bytes)", url, bytes.len());
        Ok(bytes)
    }
}
