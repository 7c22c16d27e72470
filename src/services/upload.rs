//! HTTP transport for document uploads to the media service.
//!
//! One multipart `POST` per attempt, carrying the file plus the fixed
//! metadata fields (preset, tags, and a context string recording the
//! original filename and client timestamp). Progress comes from the
//! request's upload object; `fetch` has no equivalent, which is why this
//! module drives a raw `XmlHttpRequest`.

use chrono::{DateTime, SecondsFormat, Utc};
use js_sys::{Array, Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, ProgressEvent, XmlHttpRequest};

use crate::config::UploadConfig;
use crate::types::{AppError, AppResult, MediaUploadResponse};

/// Context metadata attached to every upload.
///
/// The media service stores this verbatim on the asset, so operators can
/// trace an asset back to the supplier's original filename and when the
/// client queued it.
pub fn build_context(original_name: &str, queued_at: &DateTime<Utc>) -> String {
    format!(
        "original_filename={}|uploaded_at={}",
        original_name,
        queued_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

/// Map a terminal transport outcome onto the error taxonomy.
///
/// A success status with a body that does not yield a `secure_url` is a
/// response-shape failure, handled exactly like a transport failure.
pub fn parse_upload_outcome(status: u16, body: &str) -> AppResult<String> {
    if !(200..300).contains(&status) {
        let snippet = body.chars().take(200).collect::<String>();
        return Err(AppError::Transport(format!(
            "server error ({}): {}",
            status,
            if snippet.is_empty() { "no response body" } else { &snippet }
        )));
    }

    serde_json::from_str::<MediaUploadResponse>(body)
        .map(|response| response.secure_url)
        .map_err(|e| {
            AppError::ResponseShape(format!("missing secure_url in upload response: {}", e))
        })
}

/// Upload one document and return its canonical stored location.
///
/// `on_progress` receives `(bytes_sent, bytes_total)` as the browser emits
/// upload progress events. The attempt is bounded by the configured
/// timeout; there is no abort and no automatic retry.
pub async fn upload_document(
    file: &File,
    original_name: &str,
    queued_at: DateTime<Utc>,
    config: &UploadConfig,
    on_progress: impl Fn(u64, u64) + 'static,
) -> AppResult<String> {
    let xhr = XmlHttpRequest::new()
        .map_err(|e| AppError::Transport(format!("could not create request: {:?}", e)))?;
    xhr.open_with_async("POST", &config.upload_url(), true)
        .map_err(|e| AppError::Transport(format!("could not open request: {:?}", e)))?;
    xhr.set_timeout(config.timeout_ms);

    let form = FormData::new()
        .map_err(|e| AppError::Transport(format!("could not create form data: {:?}", e)))?;
    form.append_with_blob("file", file)
        .map_err(|e| AppError::Transport(format!("could not attach file: {:?}", e)))?;
    form.append_with_str("upload_preset", &config.upload_preset)
        .map_err(|e| AppError::Transport(format!("could not attach preset: {:?}", e)))?;
    form.append_with_str("tags", &config.tags)
        .map_err(|e| AppError::Transport(format!("could not attach tags: {:?}", e)))?;
    form.append_with_str("context", &build_context(original_name, &queued_at))
        .map_err(|e| AppError::Transport(format!("could not attach context: {:?}", e)))?;

    // Byte-level progress only exists on the dedicated upload object.
    let upload = xhr
        .upload()
        .map_err(|e| AppError::Transport(format!("no upload channel: {:?}", e)))?;
    let progress = Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
        if event.length_computable() {
            on_progress(event.loaded() as u64, event.total() as u64);
        }
    });
    upload.set_onprogress(Some(progress.as_ref().unchecked_ref()));
    progress.forget();

    let timeout_message = format!("request timed out after {}s", config.timeout_ms / 1000);

    // Resolve with [status, body] on any server answer; reject only on
    // network error or timeout, where no status exists.
    let outcome = Promise::new(&mut |resolve: Function, reject: Function| {
        let xhr_done = xhr.clone();
        let onload = Closure::<dyn FnMut()>::new(move || {
            let status = xhr_done.status().unwrap_or(0);
            let body = xhr_done.response_text().ok().flatten().unwrap_or_default();
            let payload = Array::of2(
                &JsValue::from_f64(status as f64),
                &JsValue::from_str(&body),
            );
            let _ = resolve.call1(&JsValue::NULL, &payload);
        });
        xhr.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        let reject_network = reject.clone();
        let onerror = Closure::<dyn FnMut()>::new(move || {
            let _ = reject_network.call1(&JsValue::NULL, &JsValue::from_str("network error"));
        });
        xhr.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();

        let timeout_message = timeout_message.clone();
        let ontimeout = Closure::<dyn FnMut()>::new(move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str(&timeout_message));
        });
        xhr.set_ontimeout(Some(ontimeout.as_ref().unchecked_ref()));
        ontimeout.forget();
    });

    xhr.send_with_opt_form_data(Some(&form))
        .map_err(|e| AppError::Transport(format!("could not send request: {:?}", e)))?;

    log::info!("📤 Uploading {} to the media service...", original_name);

    match JsFuture::from(outcome).await {
        Ok(value) => {
            let payload = Array::from(&value);
            let status = payload.get(0).as_f64().unwrap_or(0.0) as u16;
            let body = payload.get(1).as_string().unwrap_or_default();
            parse_upload_outcome(status, &body)
        }
        Err(reason) => Err(AppError::Transport(
            reason
                .as_string()
                .unwrap_or_else(|| "network error".to_string()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_records_name_and_timestamp() {
        let queued_at: DateTime<Utc> = "2026-08-30T10:15:00Z".parse().unwrap();
        assert_eq!(
            build_context("Liability Insurance.pdf", &queued_at),
            "original_filename=Liability Insurance.pdf|uploaded_at=2026-08-30T10:15:00Z"
        );
    }

    #[test]
    fn test_success_outcome_yields_secure_url() {
        let body = r#"{"secure_url": "https://example/doc.pdf", "public_id": "supplier-docs/doc"}"#;
        assert_eq!(
            parse_upload_outcome(200, body).unwrap(),
            "https://example/doc.pdf"
        );
    }

    #[test]
    fn test_error_status_is_a_transport_failure() {
        let err = parse_upload_outcome(401, r#"{"error": {"message": "Invalid preset"}}"#)
            .unwrap_err();
        match err {
            AppError::Transport(msg) => assert!(msg.contains("401")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_success_body_is_a_response_shape_failure() {
        let err = parse_upload_outcome(200, r#"{"public_id": "supplier-docs/doc"}"#).unwrap_err();
        assert!(matches!(err, AppError::ResponseShape(_)));
    }
}
