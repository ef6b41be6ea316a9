use admin_store::{NewPost, Post, PostPatch};
use gloo_net::http::{Method, RequestBuilder, Response};
use serde::Serialize;

// Адрес и таблица вшиваются при сборке, как и ключ сервиса
const API_BASE: &str = match option_env!("ADMIN_STORE_URL") {
    Some(url) => url,
    None => "http://localhost:54321/rest/v1",
};
const TABLE: &str = match option_env!("ADMIN_STORE_TABLE") {
    Some(table) => table,
    None => "posts",
};
const API_KEY: Option<&str> = option_env!("ADMIN_STORE_API_KEY");

/// Browser-side client for the PostgREST-style table API. Mirrors the four
/// operations of the native store client, speaking through `fetch`.
#[derive(Debug, Clone)]
pub struct ApiStore {
    base_url: String,
}

impl ApiStore {
    pub fn new() -> Self {
        Self {
            base_url: API_BASE.to_string(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), TABLE)
    }

    fn row_url(&self, id: i64) -> String {
        format!("{}?id=eq.{}", self.table_url(), id)
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&impl Serialize>,
        representation: bool,
    ) -> Result<Response, String> {
        let mut builder = RequestBuilder::new(url)
            .method(method)
            .header("Content-Type", "application/json");

        if let Some(key) = API_KEY {
            builder = builder
                .header("apikey", key)
                .header("Authorization", &format!("Bearer {}", key));
        }
        if representation {
            builder = builder.header("Prefer", "return=representation");
        }

        // Создаем и отправляем запрос
        let request = match body {
            Some(body) => {
                let body_json = serde_json::to_string(body)
                    .map_err(|e| format!("Failed to serialize request: {}", e))?;
                builder
                    .body(body_json)
                    .map_err(|e| format!("Failed to set request body: {}", e))?
            }
            None => builder
                .build()
                .map_err(|e| format!("Failed to build request: {}", e))?,
        };

        let response = request
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        let status = response.status();
        if (200..300).contains(&status) {
            Ok(response)
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(format!("HTTP {}: {}", status, text))
        }
    }

    async fn rows(&self, response: Response) -> Result<Vec<Post>, String> {
        let text = response
            .text()
            .await
            .map_err(|e| format!("Failed to read response: {}", e))?;
        serde_json::from_str(&text).map_err(|e| format!("Failed to parse response: {}", e))
    }

    pub async fn select_all(&self) -> Result<Vec<Post>, String> {
        let url = format!("{}?select=*", self.table_url());
        let response = self.send(Method::GET, &url, None::<&()>, false).await?;
        self.rows(response).await
    }

    pub async fn insert(&self, post: &NewPost) -> Result<Post, String> {
        // Таблица принимает пакет строк; отправляем ровно одну
        let response = self
            .send(Method::POST, &self.table_url(), Some(&[post]), true)
            .await?;
        let mut rows = self.rows(response).await?;
        if rows.is_empty() {
            return Err("insert returned no representation".to_string());
        }
        Ok(rows.remove(0))
    }

    pub async fn update(&self, id: i64, patch: &PostPatch) -> Result<Post, String> {
        let response = self
            .send(Method::PATCH, &self.row_url(id), Some(patch), true)
            .await?;
        let mut rows = self.rows(response).await?;
        if rows.is_empty() {
            return Err(format!("post #{} not found", id));
        }
        Ok(rows.remove(0))
    }

    pub async fn delete(&self, id: i64) -> Result<(), String> {
        // Просим удаленные строки обратно, чтобы заметить пустое совпадение
        let response = self
            .send(Method::DELETE, &self.row_url(id), None::<&()>, true)
            .await?;
        if response.status() == 204 {
            return Ok(());
        }
        let rows = self.rows(response).await?;
        if rows.is_empty() {
            return Err(format!("post #{} not found", id));
        }
        Ok(())
    }
}

impl Default for ApiStore {
    fn default() -> Self {
        Self::new()
    }
}
