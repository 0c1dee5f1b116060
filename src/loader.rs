//! Page Data Loader
//!
//! Issues a page's independent fetches as separate local tasks so they run
//! concurrently. Each result lands in its own `RwSignal<Option<T>>`; `None`
//! means still loading. A page reports at most one failure per batch.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use borrowdesk_api::ApiResult;

use crate::context::AppContext;

#[derive(Clone, Copy)]
pub struct Loader {
    ctx: AppContext,
    fallback: &'static str,
    reported: StoredValue<bool>,
}

impl Loader {
    pub fn new(ctx: AppContext, fallback: &'static str) -> Self {
        Self {
            ctx,
            fallback,
            reported: StoredValue::new(false),
        }
    }

    /// Start a new batch: clear `target` and allow one more report
    pub fn fetch<T, F>(&self, target: RwSignal<Option<T>>, request: F)
    where
        T: Default + Send + Sync + 'static,
        F: Future<Output = ApiResult<T>> + 'static,
    {
        let loader = *self;
        target.set(None);
        loader.reported.set_value(false);
        spawn_local(async move {
            match request.await {
                Ok(value) => target.set(Some(value)),
                Err(err) => {
                    if !loader.reported.get_value() {
                        loader.reported.set_value(true);
                        loader.ctx.report(&err, loader.fallback);
                    } else {
                        tracing::debug!(error = %err, "further failure in the same batch");
                    }
                    target.set(Some(T::default()));
                }
            }
        });
    }

    /// Refresh `target` in place, keeping the old value on screen meanwhile
    pub fn refresh<T, F>(&self, target: RwSignal<Option<T>>, request: F)
    where
        T: Send + Sync + 'static,
        F: Future<Output = ApiResult<T>> + 'static,
    {
        let ctx = self.ctx;
        let fallback = self.fallback;
        spawn_local(async move {
            match request.await {
                Ok(value) => target.set(Some(value)),
                Err(err) => ctx.report(&err, fallback),
            }
        });
    }
}

/// Unwrap a loaded list for rendering, empty while loading
pub fn loaded<T: Clone + Send + Sync + 'static>(target: RwSignal<Option<Vec<T>>>) -> Vec<T> {
    target.get().unwrap_or_default()
}
