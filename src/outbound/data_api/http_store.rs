//! Reqwest-backed stores for the hosted data API.
//!
//! This adapter owns transport details only: authentication headers, filter
//! query parameters, timeout and HTTP error mapping, and JSON decoding into
//! domain rows.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::dto::{
    CategoryPatchDto, CategoryRow, NewCategoryRowDto, NewProductRowDto, ProductPatchDto, ProductRow,
};
use crate::domain::category::{Category, CategoryId};
use crate::domain::ports::{
    CategoryPatch, CategoryStore, NewCategoryRow, ProductStore, StoreError,
};
use crate::domain::product::{NewProduct, Product, ProductChanges, ProductId};

const CATEGORIES_TABLE: &str = "categorias";
const PRODUCTS_TABLE: &str = "produtos";
const ORDER_PARAM: &str = "order";
const ORDER_BY_POSITION: &str = "ordem.asc";
const ORDER_BY_ID: &str = "id.asc";

/// Shared HTTP client for the hosted data API.
///
/// One table per URL segment, PostgREST-style filters, `apikey` plus bearer
/// authentication on every request.
pub struct DataApiClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl DataApiClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, api_key: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn table_url(&self, table: &str, query: &[(&str, String)]) -> Result<Url, StoreError> {
        let mut url = self
            .base_url
            .join(table)
            .map_err(|error| StoreError::transport(format!("invalid table URL: {error}")))?;
        for (name, value) in query {
            url.query_pairs_mut().append_pair(name, value);
        }
        Ok(url)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", self.api_key.as_str())
            .bearer_auth(self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, StoreError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let url = self.table_url(table, query)?;
        let body = self.execute(self.authed(self.client.get(url))).await?;
        decode_rows(&body)
    }

    async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        payload: &B,
    ) -> Result<T, StoreError> {
        let url = self.table_url(table, &[])?;
        let request = self
            .authed(self.client.post(url))
            .header("Prefer", "return=representation")
            .json(payload);
        let body = self.execute(request).await?;
        let rows: Vec<T> = decode_rows(&body)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::decode("insert returned no representation"))
    }

    async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        filter: (&str, String),
        payload: &B,
    ) -> Result<Vec<T>, StoreError> {
        let url = self.table_url(table, &[filter])?;
        let request = self
            .authed(self.client.patch(url))
            .header("Prefer", "return=representation")
            .json(payload);
        let body = self.execute(request).await?;
        decode_rows(&body)
    }

    async fn delete(&self, table: &str, filter: (&str, String)) -> Result<(), StoreError> {
        let url = self.table_url(table, &[filter])?;
        self.execute(self.authed(self.client.delete(url))).await?;
        Ok(())
    }
}

fn decode_rows<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, StoreError> {
    serde_json::from_slice(body)
        .map_err(|error| StoreError::decode(format!("invalid data API payload: {error}")))
}

fn id_filter(id: i64) -> (&'static str, String) {
    ("id", format!("eq.{id}"))
}

fn parent_filter(parent: Option<CategoryId>) -> (&'static str, String) {
    let value = match parent {
        Some(id) => format!("eq.{id}"),
        None => "is.null".to_owned(),
    };
    ("parent_id", value)
}

fn map_transport_error(error: reqwest::Error) -> StoreError {
    if error.is_timeout() {
        StoreError::timeout(error.to_string())
    } else {
        StoreError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> StoreError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => StoreError::timeout(message),
        _ => StoreError::backend(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

/// Category store addressing the `categorias` table.
pub struct DataApiCategoryStore {
    client: Arc<DataApiClient>,
}

impl DataApiCategoryStore {
    pub fn new(client: Arc<DataApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CategoryStore for DataApiCategoryStore {
    async fn select_all(&self) -> Result<Vec<Category>, StoreError> {
        let rows: Vec<CategoryRow> = self
            .client
            .select(
                CATEGORIES_TABLE,
                &[(ORDER_PARAM, ORDER_BY_POSITION.to_owned())],
            )
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn select_by_id(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        let rows: Vec<CategoryRow> = self.client.select(CATEGORIES_TABLE, &[id_filter(id)]).await?;
        Ok(rows.into_iter().next().map(Into::into))
    }

    async fn select_children(
        &self,
        parent: Option<CategoryId>,
    ) -> Result<Vec<Category>, StoreError> {
        let rows: Vec<CategoryRow> = self
            .client
            .select(
                CATEGORIES_TABLE,
                &[
                    parent_filter(parent),
                    (ORDER_PARAM, ORDER_BY_POSITION.to_owned()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, row: NewCategoryRow) -> Result<Category, StoreError> {
        let created: CategoryRow = self
            .client
            .insert(CATEGORIES_TABLE, &NewCategoryRowDto::from(row))
            .await?;
        Ok(created.into())
    }

    async fn update(
        &self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, StoreError> {
        let rows: Vec<CategoryRow> = self
            .client
            .patch(CATEGORIES_TABLE, id_filter(id), &CategoryPatchDto::from(patch))
            .await?;
        Ok(rows.into_iter().next().map(Into::into))
    }

    async fn delete(&self, id: CategoryId) -> Result<(), StoreError> {
        self.client.delete(CATEGORIES_TABLE, id_filter(id)).await
    }
}

/// Product store addressing the `produtos` table.
pub struct DataApiProductStore {
    client: Arc<DataApiClient>,
}

impl DataApiProductStore {
    pub fn new(client: Arc<DataApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductStore for DataApiProductStore {
    async fn select_all(&self) -> Result<Vec<Product>, StoreError> {
        let rows: Vec<ProductRow> = self
            .client
            .select(PRODUCTS_TABLE, &[(ORDER_PARAM, ORDER_BY_ID.to_owned())])
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn select_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let rows: Vec<ProductRow> = self.client.select(PRODUCTS_TABLE, &[id_filter(id)]).await?;
        Ok(rows.into_iter().next().map(Into::into))
    }

    async fn select_by_categories(
        &self,
        categories: &[CategoryId],
    ) -> Result<Vec<Product>, StoreError> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }
        let ids = categories
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let rows: Vec<ProductRow> = self
            .client
            .select(
                PRODUCTS_TABLE,
                &[
                    ("categoria_id", format!("in.({ids})")),
                    (ORDER_PARAM, ORDER_BY_ID.to_owned()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, draft: NewProduct) -> Result<Product, StoreError> {
        let created: ProductRow = self
            .client
            .insert(PRODUCTS_TABLE, &NewProductRowDto::from(draft))
            .await?;
        Ok(created.into())
    }

    async fn update(
        &self,
        id: ProductId,
        changes: ProductChanges,
    ) -> Result<Option<Product>, StoreError> {
        let rows: Vec<ProductRow> = self
            .client
            .patch(PRODUCTS_TABLE, id_filter(id), &ProductPatchDto::from(changes))
            .await?;
        Ok(rows.into_iter().next().map(Into::into))
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        self.client.delete(PRODUCTS_TABLE, id_filter(id)).await
    }

    async fn reassign_category(
        &self,
        from: CategoryId,
        to: CategoryId,
    ) -> Result<(), StoreError> {
        let _rows: Vec<ProductRow> = self
            .client
            .patch(
                PRODUCTS_TABLE,
                ("categoria_id", format!("eq.{from}")),
                &serde_json::json!({ "categoria_id": to }),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT)]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT)]
    fn timeout_statuses_map_to_timeout(#[case] status: StatusCode) {
        let error = map_status_error(status, b"");
        assert!(matches!(error, StoreError::Timeout { .. }));
    }

    #[rstest]
    #[case(StatusCode::UNAUTHORIZED, 401)]
    #[case(StatusCode::CONFLICT, 409)]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, 500)]
    fn other_statuses_keep_their_code(#[case] status: StatusCode, #[case] expected: u16) {
        let error = map_status_error(status, b"{\"message\":\"permission denied\"}");
        match error {
            StoreError::Backend { status, message } => {
                assert_eq!(status, expected);
                assert!(message.contains("permission denied"));
            }
            other => panic!("expected Backend, got {other:?}"),
        }
    }

    #[test]
    fn body_preview_is_bounded_and_compacted() {
        let long = "x ".repeat(400);
        let preview = body_preview(long.as_bytes());
        assert!(preview.ends_with("..."));
        assert!(preview.chars().count() <= 163);
        assert!(!preview.contains("  "));
    }

    #[test]
    fn parent_filter_uses_null_test_for_top_level() {
        assert_eq!(parent_filter(None).1, "is.null");
        assert_eq!(parent_filter(Some(7)).1, "eq.7");
    }

    #[test]
    fn decode_failures_carry_the_serde_message() {
        let error = decode_rows::<CategoryRow>(b"not json").expect_err("decode must fail");
        assert!(matches!(error, StoreError::Decode { .. }));
    }
}
