//! Category Facade

use serde::Serialize;

use crate::envelope::ApiResponse;
use crate::error::ApiResult;
use crate::gateway::{ApiRequest, Gateway};
use crate::models::Category;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
}

impl CategoryForm {
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
        }
    }
}

pub struct CategoryService<'a> {
    gateway: &'a Gateway,
}

impl<'a> CategoryService<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    // ========================
    // User Routes
    // ========================

    pub async fn list(&self) -> ApiResult<Vec<Category>> {
        Ok(self.gateway.fetch_list(ApiRequest::get("/user/categories")).await?.data)
    }

    pub async fn get(&self, id: u32) -> ApiResult<Category> {
        Ok(self.gateway.fetch(ApiRequest::get(format!("/user/categories/{id}"))).await?.data)
    }

    // ========================
    // Admin Routes
    // ========================

    pub async fn admin_list(&self) -> ApiResult<Vec<Category>> {
        Ok(self.gateway.fetch_list(ApiRequest::get("/admin/categories")).await?.data)
    }

    pub async fn admin_get(&self, id: u32) -> ApiResult<Category> {
        Ok(self.gateway.fetch(ApiRequest::get(format!("/admin/categories/{id}"))).await?.data)
    }

    pub async fn create(&self, form: &CategoryForm) -> ApiResult<ApiResponse<Category>> {
        self.gateway.fetch(ApiRequest::post("/admin/categories").json(form)?).await
    }

    pub async fn update(&self, id: u32, form: &CategoryForm) -> ApiResult<ApiResponse<Category>> {
        self.gateway
            .fetch(ApiRequest::put(format!("/admin/categories/{id}")).json(form)?)
            .await
    }

    pub async fn delete(&self, id: u32) -> ApiResult<ApiResponse<()>> {
        self.gateway.send(ApiRequest::delete(format!("/admin/categories/{id}"))).await
    }
}
