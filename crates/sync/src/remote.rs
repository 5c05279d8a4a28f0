// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote notes API client.
//!
//! Provides a trait-based client layer that enables:
//! - Real HTTP requests against the notes API for production
//! - Mock remotes for unit testing
//!
//! Endpoints:
//!
//! ```text
//! GET    /posts         -> [note, ...]  or {posts: [note, ...]}
//! POST   /posts         -> {id}         or {savedPost: {_id}}
//! PUT    /posts/{id}    -> success | 404
//! DELETE /posts/{id}    -> success | 404
//! ```

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use quill_core::{Note, NoteDraft, NotePatch};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;

/// Header carrying the client-generated id of a create, so servers that
/// support it can recognise a resent create.
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// Longest server error body kept in an error message.
const MAX_ERROR_BODY: usize = 200;

/// Error type for remote operations.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Could not reach the server (connect failure or timeout).
    #[error("server unreachable: {0}")]
    Unreachable(String),

    /// The server does not know the target note.
    #[error("not found on server: {0}")]
    NotFound(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("invalid server response: {0}")]
    Decode(String),

    /// The request failed for another reason.
    #[error("request failed: {0}")]
    Request(String),
}

impl RemoteError {
    /// True for a 404 on the target note.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::NotFound(_))
    }

    /// True when the failure means the server could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, RemoteError::Unreachable(_))
    }
}

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Boxed future returned by [`RemoteNotes`] methods.
pub type RemoteFuture<'a, T> = Pin<Box<dyn Future<Output = RemoteResult<T>> + Send + 'a>>;

/// Operations against the notes API.
///
/// Implementations are expected to bound each call with their own timeout;
/// the sync engine waits for whatever they return.
pub trait RemoteNotes: Send + Sync {
    /// Fetch the authoritative, ordered list of the user's notes.
    fn list(&self) -> RemoteFuture<'_, Vec<Note>>;

    /// Create a note, returning the server-issued id.
    ///
    /// `idempotency_key` is the note's temporary id and stays the same if
    /// the create is ever resent.
    fn create(&self, draft: NoteDraft, idempotency_key: String) -> RemoteFuture<'_, String>;

    /// Apply a partial update to the note `id`.
    fn update(&self, id: String, patch: NotePatch) -> RemoteFuture<'_, ()>;

    /// Delete the note `id`.
    fn delete(&self, id: String) -> RemoteFuture<'_, ()>;
}

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the API (e.g. `http://localhost:7000/api/v1`).
    pub url: String,
    /// Bearer token sent with every request.
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            url: "http://localhost:7000/api/v1".to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

/// Listing body: a bare array or the `{posts: [...]}` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Envelope { posts: Vec<Note> },
    Bare(Vec<Note>),
}

/// Create body: `{id}` or the `{savedPost: {_id}}` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum CreateResponse {
    Flat {
        #[serde(alias = "_id")]
        id: String,
    },
    Envelope {
        #[serde(rename = "savedPost")]
        saved_post: CreatedNote,
    },
}

#[derive(Deserialize)]
struct CreatedNote {
    #[serde(alias = "_id")]
    id: String,
}

impl CreateResponse {
    fn into_id(self) -> String {
        match self {
            CreateResponse::Flat { id } => id,
            CreateResponse::Envelope { saved_post } => saved_post.id,
        }
    }
}

/// HTTP implementation of [`RemoteNotes`] using reqwest.
pub struct HttpRemote {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpRemote {
    /// Create a client for the API at `config.url`.
    pub fn new(config: &RemoteConfig) -> RemoteResult<Self> {
        let base_url = config.url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(RemoteError::Request("server URL cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("quill/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteError::Request(format!("failed to construct client: {}", e)))?;

        Ok(HttpRemote {
            base_url,
            token: config.token.clone(),
            client,
        })
    }

    /// Base URL requests are made against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Send a request and map transport failures and error statuses.
async fn send(builder: RequestBuilder, target: &str) -> RemoteResult<reqwest::Response> {
    let response = builder.send().await.map_err(classify)?;
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(RemoteError::NotFound(target.to_string()));
    }
    if !status.is_success() {
        let mut message = response.text().await.unwrap_or_default();
        if message.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|i| message.is_char_boundary(*i))
                .unwrap_or(0);
            message.truncate(cut);
        }
        return Err(RemoteError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}

fn classify(err: reqwest::Error) -> RemoteError {
    if err.is_connect() || err.is_timeout() {
        RemoteError::Unreachable(err.to_string())
    } else if err.is_decode() {
        RemoteError::Decode(err.to_string())
    } else {
        RemoteError::Request(err.to_string())
    }
}

fn decode(err: reqwest::Error) -> RemoteError {
    if err.is_timeout() {
        RemoteError::Unreachable(err.to_string())
    } else {
        RemoteError::Decode(err.to_string())
    }
}

impl RemoteNotes for HttpRemote {
    fn list(&self) -> RemoteFuture<'_, Vec<Note>> {
        Box::pin(async move {
            let response = send(self.request(Method::GET, "posts"), "posts").await?;
            let body: ListResponse = response.json().await.map_err(decode)?;
            Ok(match body {
                ListResponse::Envelope { posts } => posts,
                ListResponse::Bare(notes) => notes,
            })
        })
    }

    fn create(&self, draft: NoteDraft, idempotency_key: String) -> RemoteFuture<'_, String> {
        Box::pin(async move {
            let builder = self
                .request(Method::POST, "posts")
                .header(IDEMPOTENCY_HEADER, idempotency_key)
                .json(&draft);
            let response = send(builder, "posts").await?;
            let body: CreateResponse = response.json().await.map_err(decode)?;
            Ok(body.into_id())
        })
    }

    fn update(&self, id: String, patch: NotePatch) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            let path = format!("posts/{}", id);
            let builder = self.request(Method::PUT, &path).json(&patch);
            send(builder, &id).await?;
            Ok(())
        })
    }

    fn delete(&self, id: String) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            let path = format!("posts/{}", id);
            send(self.request(Method::DELETE, &path), &id).await?;
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;
