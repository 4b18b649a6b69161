use serde::{Deserialize, Serialize};

/// Envelope every Bot API method returns
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
    pub parameters: Option<ResponseParameters>,
}

/// Extra error context, present on 429 and group migrations
#[derive(Debug, Deserialize)]
pub struct ResponseParameters {
    pub retry_after: Option<i64>,
    pub migrate_to_chat_id: Option<i64>,
}

/// One incoming update from long polling
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub inline_query: Option<InlineQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InlineQuery {
    pub id: String,
    pub from: User,
    pub query: String,
}

/// Request body for getUpdates (long polling)
#[derive(Debug, Serialize)]
pub struct GetUpdatesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u64,
    pub allowed_updates: &'static [&'static str],
}

/// Request body for sendMessage
#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'a str>,
}

/// Request body for sendChatAction
#[derive(Debug, Serialize)]
pub struct SendChatActionRequest<'a> {
    pub chat_id: i64,
    pub action: &'a str,
}

/// Request body for answerInlineQuery
#[derive(Debug, Serialize)]
pub struct AnswerInlineQueryRequest<'a> {
    pub inline_query_id: &'a str,
    pub results: Vec<InlineQueryResultArticle>,
    pub cache_time: u32,
}

/// Article-type inline result
#[derive(Debug, Serialize)]
pub struct InlineQueryResultArticle {
    #[serde(rename = "type")]
    pub result_type: &'static str,
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub input_message_content: InputTextMessageContent,
}

#[derive(Debug, Serialize)]
pub struct InputTextMessageContent {
    pub message_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
}

impl InlineQueryResultArticle {
    pub fn new(id: impl Into<String>, title: impl Into<String>, message_text: impl Into<String>) -> Self {
        Self {
            result_type: "article",
            id: id.into(),
            title: title.into(),
            description: None,
            input_message_content: InputTextMessageContent {
                message_text: message_text.into(),
                parse_mode: None,
            },
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Comprehensive error type for Bot API operations
#[derive(Debug, Clone)]
pub enum TelegramError {
    /// 400 Bad Request
    BadRequest(String),
    /// 401 Unauthorized (bad token)
    Unauthorized(String),
    /// 403 Forbidden (kicked from chat, user blocked the bot)
    Forbidden(String),
    /// 429 Too Many Requests
    RateLimited { retry_after: i64 },
    /// 5xx Server Error
    ServerError(i32, String),
    /// Other HTTP errors
    HttpError(i32, String),
    /// `ok: false` envelope on a 2xx response
    Api(String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
}

impl std::fmt::Display for TelegramError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelegramError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            TelegramError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            TelegramError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            TelegramError::RateLimited { retry_after } => {
                write!(f, "Rate Limited. Retry after {} s", retry_after)
            }
            TelegramError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            TelegramError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            TelegramError::Api(msg) => write!(f, "API Error: {}", msg),
            TelegramError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            TelegramError::DeserializationError(msg) => {
                write!(f, "Deserialization Error: {}", msg)
            }
        }
    }
}
