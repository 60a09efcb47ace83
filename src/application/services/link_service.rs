//! Link registration and resolution service.

use std::sync::Arc;

use crate::domain::access_gate::CycleGate;
use crate::domain::entities::LinkRecord;
use crate::domain::repositories::SnapshotStore;
use crate::error::AppError;
use crate::utils::code_generator::{SlugAllocator, generate_id};
use crate::utils::url_normalizer::normalize_url;
use serde_json::json;
use tracing::{debug, info};

/// Service for shortening URLs and resolving short slugs.
///
/// Every call is one load-mutate-save cycle against the store, bracketed by
/// the shared [`CycleGate`].
pub struct LinkService<S: SnapshotStore + ?Sized> {
    store: Arc<S>,
    gate: CycleGate,
    allocator: SlugAllocator,
}

impl<S: SnapshotStore + ?Sized> LinkService<S> {
    /// Creates a new link service.
    pub fn new(store: Arc<S>, gate: CycleGate) -> Self {
        Self::with_allocator(store, gate, SlugAllocator::new())
    }

    /// Creates a link service with a custom slug allocator.
    pub fn with_allocator(store: Arc<S>, gate: CycleGate, allocator: SlugAllocator) -> Self {
        Self {
            store,
            gate,
            allocator,
        }
    }

    /// Returns the record for `raw_url`, creating it on first submission.
    ///
    /// # Deduplication
    ///
    /// The URL is normalized (see [`normalize_url`]) and compared by exact
    /// string equality with stored URLs. An existing record is returned
    /// unchanged and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty.
    /// Returns [`AppError::Persistence`] if the store cannot be read or written.
    pub async fn register(
        &self,
        raw_url: &str,
        created_by: Option<String>,
    ) -> Result<LinkRecord, AppError> {
        let url = normalize_url(raw_url)?;

        let _guard = self.gate.enter().await;
        let mut snapshot = self.store.load().await?;

        if let Some(existing) = snapshot.find_link_by_url(&url) {
            debug!(slug = %existing.short_slug, "URL already shortened");
            return Ok(existing.clone());
        }

        let slug = self.allocator.allocate(&snapshot.slugs());
        let record = LinkRecord::new(generate_id(), url, slug, created_by);

        snapshot.links_table.push(record.clone());
        self.store.save(&snapshot).await?;

        info!(
            slug = %record.short_slug,
            url = %record.original_url,
            created_by = record.created_by.as_deref().unwrap_or("-"),
            "Created short link"
        );

        Ok(record)
    }

    /// Looks up `code`, counts the click and returns the updated record.
    ///
    /// Matching is exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this slug.
    /// Returns [`AppError::Persistence`] if the store cannot be read or written.
    pub async fn resolve(&self, code: &str) -> Result<LinkRecord, AppError> {
        let _guard = self.gate.enter().await;
        let mut snapshot = self.store.load().await?;

        let record = match snapshot.find_link_by_slug_mut(code) {
            Some(record) => {
                record.record_click();
                record.clone()
            }
            None => {
                return Err(AppError::not_found(
                    "Short link not found",
                    json!({ "code": code }),
                ));
            }
        };

        self.store.save(&snapshot).await?;

        debug!(slug = %record.short_slug, clicks = record.click_count, "Resolved short link");

        Ok(record)
    }

    /// Looks up a record without counting a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this slug.
    pub async fn get_link(&self, code: &str) -> Result<LinkRecord, AppError> {
        self.store
            .load()
            .await?
            .find_link_by_slug(code)
            .cloned()
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Lists the links created by `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the store cannot be read.
    pub async fn links_created_by(&self, user_id: &str) -> Result<Vec<LinkRecord>, AppError> {
        let snapshot = self.store.load().await?;

        let mut links: Vec<LinkRecord> = snapshot
            .links_table
            .into_iter()
            .filter(|l| l.created_by.as_deref() == Some(user_id))
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(links)
    }
}
