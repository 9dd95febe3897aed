// src/store/http.rs
//! HTTP client for the platform's document-store gateway.
//!
//! This module provides a thin wrapper around reqwest for talking to the
//! gateway's REST surface. It handles authentication, the wire envelope,
//! and error-body decoding; pagination logic lives above it.

use super::page::{Cursor, Page, PageQuery};
use super::DocumentStore;
use crate::constants::{CREATED_AT_FIELD, ERROR_BODY_PREVIEW_LENGTH, ID_FIELD};
use crate::error::{AppError, StoreError, StoreErrorCode};
use crate::record::Record;
use crate::types::{ApiKey, RecordId};
use reqwest::{header, Client, Response};
use serde::Deserialize;
use url::Url;

/// Wire shape of a successful page response.
#[derive(Debug, Deserialize)]
struct WirePage {
    records: Vec<Record>,
    next_cursor: Option<String>,
    has_more: bool,
}

/// Wire shape of a gateway error body.
#[derive(Debug, Deserialize)]
struct WireError {
    code: String,
    message: String,
}

/// Wire shape of a create response.
#[derive(Debug, Deserialize)]
struct WireCreated {
    id: String,
}

/// A reqwest-backed `DocumentStore` against the gateway REST API.
#[derive(Clone)]
pub struct HttpStore {
    client: Client,
    base_url: Url,
}

impl HttpStore {
    /// Creates a store client with bearer authentication installed.
    pub fn new(base_url: Url, api_key: &ApiKey) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()
            .map_err(StoreError::from)?;
        Ok(Self { client, base_url })
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Builds `{base}/collections/{collection}/records[/{id}]`.
    fn endpoint(&self, collection: &str, id: Option<&RecordId>) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                StoreError::MalformedResponse("store base URL cannot be a base".to_string())
            })?;
            segments.extend(["collections", collection, "records"]);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    /// Decodes a non-success response into the typed error vocabulary.
    async fn decode_error(response: Response) -> StoreError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        match serde_json::from_str::<WireError>(&body) {
            Ok(wire) => StoreError::Service {
                code: StoreErrorCode::from_wire(&wire.code),
                message: wire.message,
            },
            Err(_) => {
                let preview: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
                StoreError::Service {
                    code: StoreErrorCode::from_http_status(status.as_u16()),
                    message: preview,
                }
            }
        }
    }

    async fn expect_success(response: Response) -> Result<Response, StoreError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::decode_error(response).await)
        }
    }
}

#[async_trait::async_trait]
impl DocumentStore for HttpStore {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page, StoreError> {
        let url = self.endpoint(query.collection, None)?;
        log::debug!(
            "GET {} (page_size={}, cursor={:?})",
            url,
            query.page_size,
            query.cursor
        );

        // Explicit stable ordering: without it, concurrent inserts make
        // accumulated pages duplicate or skip records.
        let order_by = format!("{},{}", CREATED_AT_FIELD, ID_FIELD);
        let mut params: Vec<(&str, String)> = vec![
            ("page_size", query.page_size.to_string()),
            ("order_by", order_by),
        ];
        if let Some(cursor) = &query.cursor {
            params.push(("cursor", cursor.token().to_string()));
        }
        if let Some(tag) = &query.tag {
            params.push(("tag", tag.as_str().to_string()));
        }

        let response = self.client.get(url).query(&params).send().await?;
        let response = Self::expect_success(response).await?;

        let wire: WirePage = response
            .json()
            .await
            .map_err(|e| StoreError::MalformedResponse(e.to_string()))?;

        Ok(Page::new(
            wire.records,
            wire.next_cursor.map(Cursor::new),
            wire.has_more,
        ))
    }

    async fn delete(&self, collection: &str, id: &RecordId) -> Result<(), StoreError> {
        let url = self.endpoint(collection, Some(id))?;
        log::debug!("DELETE {}", url);

        let response = self.client.delete(url).send().await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn create(&self, collection: &str, record: Record) -> Result<RecordId, StoreError> {
        let url = self.endpoint(collection, None)?;
        log::debug!("POST {}", url);

        let response = self.client.post(url).json(&record).send().await?;
        let response = Self::expect_success(response).await?;

        let wire: WireCreated = response
            .json()
            .await
            .map_err(|e| StoreError::MalformedResponse(e.to_string()))?;
        RecordId::new(wire.id)
            .map_err(|e| StoreError::MalformedResponse(format!("created id rejected: {}", e)))
    }
}
