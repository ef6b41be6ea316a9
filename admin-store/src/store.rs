use crate::error::StoreError;
use crate::models::{NewPost, Post, PostPatch};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;

/// The four logical operations the admin surface performs against the
/// remote posts table.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Fetch every row, unfiltered, in the store's default order.
    async fn select_all(&self) -> Result<Vec<Post>, StoreError>;
    async fn insert(&self, post: NewPost) -> Result<Post, StoreError>;
    async fn update(&self, id: i64, patch: PostPatch) -> Result<Post, StoreError>;
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

/// Client for a PostgREST-style table API exposed by the hosted store.
///
/// Rows live at `{base_url}/{table}`; single rows are addressed with the
/// `id=eq.{id}` filter. Mutations ask for `return=representation` so the
/// stored row comes back in the response.
#[derive(Debug, Clone)]
pub struct RestPostStore {
    client: Client,
    base_url: String,
    table: String,
    api_key: Option<String>,
}

impl RestPostStore {
    pub fn new(base_url: impl Into<String>, table: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
            table: table.into(),
            api_key: None,
        }
    }

    /// Attach the service API key sent with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn table_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.table.trim_start_matches('/')
        )
    }

    fn row_url(&self, id: i64) -> String {
        format!("{}?id=eq.{}", self.table_url(), id)
    }

    fn add_auth_headers(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }
        request
    }

    async fn read_rows(&self, response: reqwest::Response) -> Result<Vec<Post>, StoreError> {
        let status = response.status();

        match status {
            StatusCode::OK | StatusCode::CREATED => {
                let text = response.text().await?;
                serde_json::from_str(&text).map_err(|e| StoreError::Decode(e.to_string()))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let error_text = response.text().await?;
                Err(StoreError::Unauthorized(error_text))
            }
            StatusCode::NOT_FOUND => Err(StoreError::NotFound),
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT => {
                let error_text = response.text().await?;
                Err(StoreError::InvalidRequest(error_text))
            }
            _ => {
                let error_text = response.text().await?;
                Err(StoreError::Transport(format!(
                    "HTTP {}: {}",
                    status, error_text
                )))
            }
        }
    }
}

#[async_trait]
impl PostStore for RestPostStore {
    async fn select_all(&self) -> Result<Vec<Post>, StoreError> {
        let url = format!("{}?select=*", self.table_url());
        let response = self.add_auth_headers(self.client.get(&url)).send().await?;
        self.read_rows(response).await
    }

    async fn insert(&self, post: NewPost) -> Result<Post, StoreError> {
        // The table API takes a batch; we always send a single row.
        let response = self
            .add_auth_headers(self.client.post(&self.table_url()))
            .header("Prefer", "return=representation")
            .json(&[&post])
            .send()
            .await?;

        let mut rows = self.read_rows(response).await?;
        if rows.is_empty() {
            return Err(StoreError::Decode(
                "insert returned no representation".to_string(),
            ));
        }

        let created = rows.remove(0);
        tracing::info!("Post created: id={}, slug={}", created.id, created.slug);
        Ok(created)
    }

    async fn update(&self, id: i64, patch: PostPatch) -> Result<Post, StoreError> {
        let response = self
            .add_auth_headers(self.client.patch(&self.row_url(id)))
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await?;

        let mut rows = self.read_rows(response).await?;
        match rows.is_empty() {
            // An empty representation means the id filter matched nothing.
            true => Err(StoreError::NotFound),
            false => {
                let updated = rows.remove(0);
                tracing::info!("Post updated: id={}, slug={}", updated.id, updated.slug);
                Ok(updated)
            }
        }
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        // Ask for the deleted rows back so a zero-match id is observable.
        let response = self
            .add_auth_headers(self.client.delete(&self.row_url(id)))
            .header("Prefer", "return=representation")
            .send()
            .await?;

        if response.status() == StatusCode::NO_CONTENT {
            // The store ignored the representation request; nothing to check.
            tracing::info!("Post deleted: id={}", id);
            return Ok(());
        }

        let rows = self.read_rows(response).await?;
        confirm_delete(rows, id)
    }
}

fn confirm_delete(deleted: Vec<Post>, id: i64) -> Result<(), StoreError> {
    if deleted.is_empty() {
        // The id filter matched nothing.
        Err(StoreError::NotFound)
    } else {
        tracing::info!("Post deleted: id={}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_url_trims_slashes() {
        let store = RestPostStore::new("https://db.example.com/rest/v1/", "posts");
        assert_eq!(store.table_url(), "https://db.example.com/rest/v1/posts");
    }

    #[test]
    fn row_url_filters_by_id() {
        let store = RestPostStore::new("https://db.example.com/rest/v1", "posts");
        assert_eq!(
            store.row_url(42),
            "https://db.example.com/rest/v1/posts?id=eq.42"
        );
    }

    #[test]
    fn delete_with_empty_representation_is_not_found() {
        let result = confirm_delete(vec![], 5);
        assert!(result.expect_err("zero-match delete").is_not_found());
    }

    #[test]
    fn delete_with_returned_row_succeeds() {
        let doomed = Post {
            id: 5,
            title: "Doomed".to_string(),
            author: "Jane".to_string(),
            cover_image: None,
            content: String::new(),
            slug: "doomed".to_string(),
            created_at: None,
        };
        assert!(confirm_delete(vec![doomed], 5).is_ok());
    }

    #[test]
    fn insert_body_is_a_single_element_batch() {
        let post = NewPost {
            title: "Hello World".to_string(),
            author: "Jane".to_string(),
            cover_image: Some("https://img.example.com/cover.png".to_string()),
            content: "<p>hi</p>".to_string(),
            slug: "hello-world".to_string(),
        };

        let body = serde_json::to_value([&post]).expect("serialize");
        let rows = body.as_array().expect("array body");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["slug"], "hello-world");
    }
}
