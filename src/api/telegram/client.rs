use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::models::{
    AnswerInlineQueryRequest, ApiResponse, GetUpdatesRequest, InlineQueryResultArticle, Message,
    SendChatActionRequest, SendMessageRequest, TelegramError, Update,
};

/// Telegram Bot API client used for long polling and replies
pub struct TelegramClient {
    http_client: HttpClient,
    base_url: String,
}

impl TelegramClient {
    const API_ROOT: &'static str = "https://api.telegram.org";

    /// Create a new client for the given bot token
    pub fn new(token: &str) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: format!("{}/bot{}", Self::API_ROOT, token),
        }
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> TelegramError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        // The Bot API wraps errors in the same envelope as results
        let description = serde_json::from_str::<serde_json::Value>(&body_text)
            .ok()
            .and_then(|v| {
                v.get("description")
                    .and_then(|d| d.as_str())
                    .map(|d| d.to_string())
            })
            .unwrap_or_else(|| body_text.clone());

        match status_code {
            400 => TelegramError::BadRequest(description),
            401 => TelegramError::Unauthorized(description),
            403 => TelegramError::Forbidden(description),
            429 => {
                let retry_after = serde_json::from_str::<serde_json::Value>(&body_text)
                    .ok()
                    .and_then(|v| {
                        v.get("parameters")
                            .and_then(|p| p.get("retry_after"))
                            .and_then(|r| r.as_i64())
                    })
                    .unwrap_or(1);
                warn!("Telegram rate limit hit, retry after {} s", retry_after);
                TelegramError::RateLimited { retry_after }
            }
            500..=599 => {
                warn!("Telegram server error {}: {}", status_code, description);
                TelegramError::ServerError(status_code as i32, description)
            }
            _ => TelegramError::HttpError(status_code as i32, description),
        }
    }

    /// POST a Bot API method and unwrap the response envelope
    async fn call<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, TelegramError> {
        let url = format!("{}/{}", self.base_url, method);

        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| TelegramError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let envelope = response
            .json::<ApiResponse<T>>()
            .await
            .map_err(|e| TelegramError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        if !envelope.ok {
            return Err(TelegramError::Api(
                envelope.description.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        envelope
            .result
            .ok_or_else(|| TelegramError::DeserializationError("ok response without result".to_string()))
    }

    /// getUpdates (long polling)
    ///
    /// `offset` must be the last seen `update_id + 1` so already-processed
    /// updates are confirmed and dropped server-side.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let body = GetUpdatesRequest {
            offset,
            timeout: timeout_secs,
            allowed_updates: &["message", "inline_query"],
        };
        self.call("getUpdates", &body).await
    }

    /// sendMessage with optional parse mode ("Markdown" for formatted replies)
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<&str>,
    ) -> Result<Message, TelegramError> {
        let body = SendMessageRequest {
            chat_id,
            text,
            parse_mode,
        };
        self.call("sendMessage", &body).await
    }

    /// sendChatAction ("typing", "upload_photo", ...)
    pub async fn send_chat_action(&self, chat_id: i64, action: &str) -> Result<bool, TelegramError> {
        let body = SendChatActionRequest { chat_id, action };
        self.call("sendChatAction", &body).await
    }

    /// sendPhoto with an in-memory PNG (multipart upload)
    pub async fn send_photo(
        &self,
        chat_id: i64,
        png_data: Vec<u8>,
        filename: String,
        caption: Option<String>,
    ) -> Result<Message, TelegramError> {
        let url = format!("{}/sendPhoto", self.base_url);

        let photo_part = reqwest::multipart::Part::bytes(png_data)
            .file_name(filename)
            .mime_str("image/png")
            .map_err(|e| TelegramError::RequestError(format!("Invalid photo part: {}", e)))?;

        let mut form = reqwest::multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .part("photo", photo_part);
        if let Some(caption) = caption {
            form = form.text("caption", caption);
        }

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TelegramError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let envelope = response
            .json::<ApiResponse<Message>>()
            .await
            .map_err(|e| TelegramError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        if !envelope.ok {
            return Err(TelegramError::Api(
                envelope.description.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        envelope
            .result
            .ok_or_else(|| TelegramError::DeserializationError("ok response without result".to_string()))
    }

    /// answerInlineQuery with article results
    pub async fn answer_inline_query(
        &self,
        inline_query_id: &str,
        results: Vec<InlineQueryResultArticle>,
        cache_time: u32,
    ) -> Result<bool, TelegramError> {
        let body = AnswerInlineQueryRequest {
            inline_query_id,
            results,
            cache_time,
        };
        self.call("answerInlineQuery", &body).await
    }
}
