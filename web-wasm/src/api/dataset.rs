//! データセット取得
//!
//! 固定パスのCSVを1回だけ取得する。失敗時の縮退は呼び出し側で行う。

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};
use timeline_common::{parse_records, Error, Record};

/// JsValueのエラーを文字列化
fn js_error_message(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// URLの内容をテキストで取得
async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(url, &opts)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!("HTTP error: {}", resp.status())));
    }

    let text = JsFuture::from(resp.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))
}

/// CSVを取得してレコード列に変換
pub async fn fetch_records(url: &str) -> timeline_common::Result<Vec<Record>> {
    let text = fetch_text(url)
        .await
        .map_err(|e| Error::Fetch(js_error_message(&e)))?;
    let records = parse_records(&text)?;
    tracing::info!(url, records = records.len(), "dataset loaded");
    Ok(records)
}
