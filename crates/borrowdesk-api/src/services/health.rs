//! Health Facade

use crate::envelope::ApiResponse;
use crate::error::ApiResult;
use crate::gateway::{ApiRequest, Gateway};

pub struct HealthService<'a> {
    gateway: &'a Gateway,
}

impl<'a> HealthService<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Backend liveness probe
    pub async fn check(&self) -> ApiResult<ApiResponse<()>> {
        self.gateway.send(ApiRequest::get("/health")).await
    }
}
