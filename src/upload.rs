//! Image Upload Helpers
//!
//! Bridges a browser `File` into an `ImageUpload` the item facade can send.

use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, HtmlInputElement, Url};

use borrowdesk_api::services::ImageUpload;

/// The file chosen in an `<input type="file">`, if any
pub fn selected_file(ev: &Event) -> Option<File> {
    let input = ev.target()?.dyn_into::<HtmlInputElement>().ok()?;
    input.files()?.get(0)
}

/// Size and type are checked before the bytes are read
pub async fn read_image(file: &File) -> Result<ImageUpload, String> {
    let mime = file.type_();
    ImageUpload::check(&mime, file.size() as u64).map_err(str::to_string)?;

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| "Could not read the selected file".to_string())?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    tracing::debug!(name = %file.name(), bytes = bytes.len(), "image read");

    Ok(ImageUpload {
        file_name: file.name(),
        mime,
        bytes,
    })
}

/// Object URL for an `<img>` preview. Release with `revoke_preview`.
pub fn preview_url(file: &File) -> Option<String> {
    Url::create_object_url_with_blob(file).ok()
}

pub fn revoke_preview(url: &str) {
    let _ = Url::revoke_object_url(url);
}
