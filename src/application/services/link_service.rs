//! Link creation and retrieval service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_normalizer::normalize_url;

/// Service for creating and retrieving shortened links.
///
/// Handles URL normalization, code generation/validation, and
/// deduplication by normalized long URL.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service. `base_url` is the public origin short
    /// URLs are built from, e.g. `https://lt.example.com`.
    pub fn new(links: Arc<dyn LinkRepository>, base_url: String) -> Self {
        Self {
            links,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a short link.
    ///
    /// # Code Precedence
    ///
    /// A caller-supplied custom code always wins: it is validated and
    /// checked for conflicts, and a new link is created under it even if
    /// the URL is already shortened under another code. Re-shortening the
    /// same URL under the same custom code returns the existing link.
    ///
    /// # Deduplication
    ///
    /// Without a custom code, a normalized URL that is already shortened
    /// returns the existing link; otherwise a random 12-character code is
    /// generated, retrying up to 10 times on collision.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for invalid URLs or custom codes,
    /// [`AppError::Conflict`] when the custom code maps to another URL.
    pub async fn create_short_link(
        &self,
        long_url: String,
        custom_code: Option<String>,
        title: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Link, AppError> {
        let normalized_url = normalize_url(&long_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let code = if let Some(custom) = custom_code {
            validate_custom_code(&custom)?;

            if let Some(existing) = self.links.find_by_code(&custom).await? {
                if existing.long_url == normalized_url {
                    return Ok(existing);
                }

                return Err(AppError::conflict(
                    "Custom code already exists",
                    json!({ "code": custom }),
                ));
            }

            custom
        } else {
            if let Some(existing) = self.links.find_by_long_url(&normalized_url).await? {
                return Ok(existing);
            }

            self.generate_unique_code().await?
        };

        let new_link = NewLink {
            code,
            long_url: normalized_url,
            title,
            expires_at,
        };

        self.links.create(new_link).await
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn get_link_by_code(&self, code: &str) -> Result<Link, AppError> {
        self.links.find_by_code(code).await?.ok_or_else(|| {
            AppError::not_found("Short link not found", json!({ "code": code }))
        })
    }

    /// Lists links newest-first, optionally filtered by a case-insensitive
    /// substring match on title or long URL. Returns the page plus the
    /// total count of matches.
    pub async fn list_links(
        &self,
        page: i64,
        page_size: i64,
        search: Option<&str>,
    ) -> Result<(Vec<Link>, i64), AppError> {
        let links = self.links.list(page, page_size, search).await?;
        let total = self.links.count(search).await?;

        Ok((links, total))
    }

    /// Counts all links. Doubles as the health check's database probe.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.links.count(None).await
    }

    /// Constructs the full short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    /// Generates a unique short code with collision retry.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        const MAX_ATTEMPTS: usize = 10;

        for _ in 0..MAX_ATTEMPTS {
            let code = generate_code();

            if self.links.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}
