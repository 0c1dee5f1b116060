//! Item Facade
//!
//! Item create and update go out as multipart so an image can ride along.
//! Updates use POST with a `_method=PUT` field because multipart PUT bodies
//! are not parsed by the backend.

use serde::Serialize;

use crate::envelope::ApiResponse;
use crate::error::ApiResult;
use crate::gateway::{ApiRequest, Gateway};
use crate::models::{Item, ItemStatus};
use crate::transport::MultipartForm;

/// Largest accepted image upload (2 MB)
pub const MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;

pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/jpg", "image/gif"];

/// An image picked by the user, already read into memory
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Check size and type before reading the file
    pub fn check(mime: &str, size: u64) -> Result<(), &'static str> {
        if size > MAX_IMAGE_BYTES {
            return Err("Image size must be less than 2MB");
        }
        if !ALLOWED_IMAGE_TYPES.contains(&mime) {
            return Err("Only JPEG, PNG, JPG, and GIF images are allowed");
        }
        Ok(())
    }
}

/// Fields of the add/edit item forms
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemForm {
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub category_id: Option<u32>,
    pub status: ItemStatus,
    pub image: Option<ImageUpload>,
}

impl ItemForm {
    /// Prefill from an existing item (no image: the stored one is kept)
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            quantity: item.quantity,
            category_id: item.category_id,
            status: item.status.clone(),
            image: None,
        }
    }

    pub fn to_multipart(&self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .text("name", self.name.as_str())
            .text("description", self.description.as_str())
            .text("quantity", self.quantity.to_string())
            .text(
                "category_id",
                self.category_id.map(|id| id.to_string()).unwrap_or_default(),
            )
            .text("status", self.status.as_str());
        if let Some(image) = &self.image {
            form = form.file("image", image.file_name.as_str(), image.mime.as_str(), image.bytes.clone());
        }
        form
    }
}

pub struct ItemService<'a> {
    gateway: &'a Gateway,
}

impl<'a> ItemService<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    // ========================
    // User Routes
    // ========================

    pub async fn list(&self, query: &[(&str, &str)]) -> ApiResult<Vec<Item>> {
        let request = ApiRequest::get("/user/items").query(query.iter().copied());
        Ok(self.gateway.fetch_list(request).await?.data)
    }

    pub async fn get(&self, id: u32) -> ApiResult<Item> {
        Ok(self.gateway.fetch(ApiRequest::get(format!("/user/items/{id}"))).await?.data)
    }

    // ========================
    // Admin Routes
    // ========================

    pub async fn admin_list(&self, query: &[(&str, &str)]) -> ApiResult<Vec<Item>> {
        let request = ApiRequest::get("/admin/items").query(query.iter().copied());
        Ok(self.gateway.fetch_list(request).await?.data)
    }

    pub async fn admin_get(&self, id: u32) -> ApiResult<Item> {
        Ok(self.gateway.fetch(ApiRequest::get(format!("/admin/items/{id}"))).await?.data)
    }

    pub async fn create(&self, form: &ItemForm) -> ApiResult<ApiResponse<Item>> {
        let request = ApiRequest::post("/admin/items").multipart(form.to_multipart());
        self.gateway.fetch(request).await
    }

    /// Multipart update, tunnelled through POST
    pub async fn update(&self, id: u32, form: &ItemForm) -> ApiResult<ApiResponse<Item>> {
        let body = form.to_multipart().text("_method", "PUT");
        let request = ApiRequest::post(format!("/admin/items/{id}")).multipart(body);
        self.gateway.fetch(request).await
    }

    /// Plain JSON update, for changes that carry no file
    pub async fn update_json<T: Serialize + ?Sized>(&self, id: u32, fields: &T) -> ApiResult<ApiResponse<Item>> {
        let request = ApiRequest::put(format!("/admin/items/{id}")).json(fields)?;
        self.gateway.fetch(request).await
    }

    pub async fn delete(&self, id: u32) -> ApiResult<ApiResponse<()>> {
        self.gateway.send(ApiRequest::delete(format!("/admin/items/{id}"))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySession;
    use crate::testing::{gateway_with, MockTransport};
    use crate::transport::RequestBody;
    use reqwest::header::CONTENT_TYPE;
    use reqwest::Method;

    const ITEM: &str = r#"{"status":true,"message":"Item updated","data":{"id":4,"name":"Tripod","description":"Aluminium","quantity":2,"status":"available","category_id":1}}"#;

    fn form() -> ItemForm {
        ItemForm {
            name: "Tripod".into(),
            description: "Aluminium".into(),
            quantity: 2,
            category_id: Some(1),
            status: ItemStatus::Available,
            image: Some(ImageUpload {
                file_name: "tripod.png".into(),
                mime: "image/png".into(),
                bytes: vec![0x89, 0x50, 0x4e, 0x47],
            }),
        }
    }

    #[test]
    fn test_image_check() {
        assert!(ImageUpload::check("image/png", 1024).is_ok());
        assert_eq!(
            ImageUpload::check("image/png", MAX_IMAGE_BYTES + 1),
            Err("Image size must be less than 2MB")
        );
        assert_eq!(
            ImageUpload::check("image/webp", 1024),
            Err("Only JPEG, PNG, JPG, and GIF images are allowed")
        );
    }

    #[tokio::test]
    async fn test_create_is_multipart_without_content_type() {
        let (gateway, sent) = gateway_with(MemorySession::with_token("admin"), MockTransport::new().respond(201, ITEM));

        gateway.items().create(&form()).await.unwrap();

        let request = sent.last();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, "http://localhost:8000/api/admin/items");
        assert!(request.headers.get(CONTENT_TYPE).is_none());
        let RequestBody::Multipart(body) = request.body else { panic!("expected multipart body") };
        assert_eq!(body.text_value("quantity"), Some("2"));
        assert_eq!(body.text_value("category_id"), Some("1"));
        assert!(body.has_field("image"));
        assert!(!body.has_field("_method"));
    }

    #[tokio::test]
    async fn test_update_tunnels_put_through_post() {
        let (gateway, sent) = gateway_with(MemorySession::with_token("admin"), MockTransport::new().respond(200, ITEM));

        let updated = gateway.items().update(4, &form()).await.unwrap();
        assert_eq!(updated.data.name, "Tripod");
        assert_eq!(updated.message_or("Item updated successfully"), "Item updated");

        let request = sent.last();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, "http://localhost:8000/api/admin/items/4");
        let RequestBody::Multipart(body) = request.body else { panic!("expected multipart body") };
        assert_eq!(body.text_value("_method"), Some("PUT"));
    }

    #[tokio::test]
    async fn test_json_update_uses_put() {
        let (gateway, sent) = gateway_with(MemorySession::with_token("admin"), MockTransport::new().respond(200, ITEM));

        gateway
            .items()
            .update_json(4, &serde_json::json!({ "status": "maintenance" }))
            .await
            .unwrap();
        assert_eq!(sent.last().method, Method::PUT);
        assert_eq!(sent.last().headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[tokio::test]
    async fn test_list_passes_query() {
        let transport = MockTransport::new().respond(200, r#"{"status":true,"data":[]}"#);
        let (gateway, sent) = gateway_with(MemorySession::with_token("tok"), transport);

        let items = gateway.items().list(&[("category_id", "3")]).await.unwrap();
        assert!(items.is_empty());
        assert_eq!(sent.last().query, vec![("category_id".to_string(), "3".to_string())]);
    }

    #[tokio::test]
    async fn test_admin_reads_use_admin_routes() {
        let transport = MockTransport::new()
            .respond(200, ITEM)
            .respond(200, r#"{"status":true,"data":[]}"#);
        let (gateway, sent) = gateway_with(MemorySession::with_token("admin"), transport);

        let item = gateway.items().admin_get(4).await.unwrap();
        assert_eq!(item.id, 4);
        assert_eq!(sent.last().url, "http://localhost:8000/api/admin/items/4");

        gateway.items().admin_list(&[("status", "available")]).await.unwrap();
        let request = sent.last();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url, "http://localhost:8000/api/admin/items");
        assert_eq!(request.query, vec![("status".to_string(), "available".to_string())]);
    }
}
