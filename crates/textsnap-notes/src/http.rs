//! HTTP implementation of the remote note store.
//!
//! Talks to a hosted PostgREST-style backend: the notes table lives under
//! `rest/v1/notes` and rows are filtered with `column=eq.value` query
//! parameters. Requests carry the project `apikey` plus an optional per-user
//! bearer token.
//!
//! There is deliberately no retry and no request cancellation: a failed call
//! surfaces once and the caller decides what to do with local state.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client, Response};
use std::sync::Arc;
use std::time::Duration;
use textsnap_auth::OwnerId;
use url::Url;

use crate::note::{Note, NoteCreateRequest, NoteId, NoteUpdateRequest};
use crate::store::{NoteStore, StoreError};

const NOTES_PATH: &str = "rest/v1/notes";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// REST client for the hosted note backend.
#[derive(Debug, Clone)]
pub struct HttpNoteStore {
    base_url: Url,
    client: Arc<Client>,
    api_key: Option<String>,
    access_token: Option<String>,
}

impl HttpNoteStore {
    /// Create a new store client for the given backend URL.
    pub fn new(api_url: &str, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(api_url).context("Invalid backend URL")?;

        Ok(Self {
            base_url,
            client: Arc::new(client),
            api_key,
            access_token: None,
        })
    }

    /// Attach the signed-in user's access token to subsequent requests.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    fn notes_url(&self) -> Result<Url, StoreError> {
        Ok(self.base_url.join(NOTES_PATH)?)
    }

    /// Build request with backend auth headers
    fn build_request(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let mut req = req.header(header::USER_AGENT, "textsnap-app");
        if let Some(key) = &self.api_key {
            req = req.header("apikey", key);
        }
        if let Some(token) = &self.access_token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        req
    }

    /// Check response status and extract error
    async fn check_response(&self, response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    fn owner_filter(owner: &OwnerId) -> (&'static str, String) {
        ("user", format!("eq.{}", owner))
    }

    fn id_filter(id: &NoteId) -> (&'static str, String) {
        ("id", format!("eq.{}", id))
    }
}

#[async_trait]
impl NoteStore for HttpNoteStore {
    async fn select(&self, owner: &OwnerId) -> Result<Vec<Note>, StoreError> {
        tracing::debug!("Fetching notes for owner {}", owner);

        let url = self.notes_url()?;
        let request = self.build_request(
            self.client
                .get(url)
                .query(&[Self::owner_filter(owner), ("select", "*".to_string())]),
        );

        let response = request.send().await?;
        let response = self.check_response(response).await?;
        let notes: Vec<Note> = response.json().await?;

        tracing::info!("Fetched {} notes", notes.len());
        Ok(notes)
    }

    async fn insert(&self, request: &NoteCreateRequest) -> Result<Note, StoreError> {
        tracing::debug!("Inserting note '{}' for owner {}", request.title, request.owner);

        let url = self.notes_url()?;
        let req = self
            .build_request(self.client.post(url))
            // Ask the backend to echo the stored row so we learn the assigned id
            .header("Prefer", "return=representation")
            .json(&[request]);

        let response = req.send().await?;
        let response = self.check_response(response).await?;
        let mut rows: Vec<Note> = response.json().await?;

        match rows.pop() {
            Some(note) => {
                tracing::info!("Inserted note {} (slug {})", note.id, note.slug);
                Ok(note)
            }
            None => Err(StoreError::InvalidResponse(
                "insert returned no rows".to_string(),
            )),
        }
    }

    async fn update(
        &self,
        owner: &OwnerId,
        id: &NoteId,
        fields: &NoteUpdateRequest,
    ) -> Result<(), StoreError> {
        tracing::debug!("Updating note {} for owner {}", id, owner);

        let url = self.notes_url()?;
        let request = self
            .build_request(
                self.client
                    .patch(url)
                    .query(&[Self::id_filter(id), Self::owner_filter(owner)]),
            )
            .json(fields);

        let response = request.send().await?;
        self.check_response(response).await?;

        tracing::info!("Updated note {}", id);
        Ok(())
    }

    async fn delete(&self, owner: &OwnerId, id: &NoteId) -> Result<(), StoreError> {
        tracing::debug!("Deleting note {} for owner {}", id, owner);

        let url = self.notes_url()?;
        let request = self.build_request(
            self.client
                .delete(url)
                .query(&[Self::id_filter(id), Self::owner_filter(owner)]),
        );

        let response = request.send().await?;
        self.check_response(response).await?;

        tracing::info!("Deleted note {}", id);
        Ok(())
    }
}
