//! 认证请求网关
//!
//! 所有对后端的调用都经过这里：
//! 1. 拼接基础地址
//! 2. 存在会话时附加 `Authorization: Bearer <token>`
//! 3. 有请求体且未指定时默认 `Content-Type: application/json`
//! 4. 收到 401 时清除会话并跳转登录页，然后以 `Unauthorized` 失败
//!
//! 其余状态码原样返回，由调用方自行检查。不重试、不超时、不可取消。

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::AppConfig;
use crate::protocol::{ApiRequest, HttpMethod};
use crate::{CONTENT_TYPE_JSON, ErrorBody, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 发往传输层的完整请求
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    /// 查找请求头（名称大小写不敏感）
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// 设置请求头，已存在的同名请求头会被覆盖
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 2xx
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// 尝试解析 `{message, detail}` 错误体
    pub fn error_body(&self) -> Option<ErrorBody> {
        serde_json::from_str(&self.body).ok()
    }
}

/// 传输层错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("请求构建失败: {0}")]
    RequestBuild(String),
    #[error("网络错误: {0}")]
    Network(String),
    #[error("响应读取失败: {0}")]
    ResponseRead(String),
}

/// 传输层接口：浏览器中由 `fetch` 实现，测试中由 Mock 实现
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// 网关对会话的访问
pub trait SessionHandle {
    /// 当前 token（每次请求时读取）
    fn token(&self) -> Option<String>;

    /// 收到 401：清除会话并跳转到登录页
    fn on_unauthorized(&self);
}

// =========================================================
// 错误类型
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 401：会话已被清除，调用方不应继续原有流程
    #[error("Não autorizado")]
    Unauthorized,
    #[error(transparent)]
    Transport(#[from] HttpError),
    #[error("HTTP {status}")]
    Status {
        status: u16,
        body: Option<ErrorBody>,
    },
    #[error("响应解析失败: {0}")]
    Decode(String),
    #[error("请求体序列化失败: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            ApiError::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

// =========================================================
// 网关
// =========================================================

/// 类似 fetch 的请求描述（路径之外的部分）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestInit {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestInit {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    fn from_request<R: ApiRequest>(request: &R) -> Result<Self, ApiError> {
        let init = Self::new(R::METHOD);
        match request.body() {
            Some(body) => serde_json::to_string(body)
                .map(|json| init.with_body(json))
                .map_err(|e| ApiError::Encode(e.to_string())),
            None => Ok(init),
        }
    }
}

#[derive(Clone)]
pub struct Gateway<C, S> {
    base_url: String,
    client: C,
    session: S,
}

impl<C: HttpClient, S: SessionHandle> Gateway<C, S> {
    pub fn new(config: &AppConfig, client: C, session: S) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            client,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn build(&self, path: &str, init: RequestInit, token: Option<String>) -> HttpRequest {
        let mut request = HttpRequest::new(&self.url(path), init.method);
        request.headers = init.headers;
        if let Some(token) = token {
            request.set_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }
        if init.body.is_some() && request.header(HEADER_CONTENT_TYPE).is_none() {
            request.set_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);
        }
        request.body = init.body;
        request
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        self.client.send(request).await.map_err(|e| {
            crate::log_warn!("[Gateway] {} {} 失败: {}", method.as_str(), url, e);
            ApiError::from(e)
        })
    }

    /// 发送认证请求
    ///
    /// 401 时清除会话、跳转登录并返回 `Unauthorized`；其他状态码原样返回。
    pub async fn fetch(&self, path: &str, init: RequestInit) -> Result<HttpResponse, ApiError> {
        let request = self.build(path, init, self.session.token());
        let response = self.send(request).await?;

        if response.status == 401 {
            crate::log_warn!("[Gateway] 401 on {}. Clearing session.", path);
            self.session.on_unauthorized();
            return Err(ApiError::Unauthorized);
        }
        Ok(response)
    }

    /// 发送匿名请求：不附加 token，401 也不会触发登出（用于登录）
    pub async fn fetch_public(&self, path: &str, init: RequestInit) -> Result<HttpResponse, ApiError> {
        let request = self.build(path, init, None);
        self.send(request).await
    }

    /// 调用类型化接口，非 2xx 转为 `ApiError::Status`
    pub async fn call<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let init = RequestInit::from_request(request)?;
        let response = self.fetch(&request.path(), init).await?;
        Self::decode::<R>(response)
    }

    /// 匿名调用类型化接口
    pub async fn call_public<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let init = RequestInit::from_request(request)?;
        let response = self.fetch_public(&request.path(), init).await?;
        Self::decode::<R>(response)
    }

    fn decode<R: ApiRequest>(response: HttpResponse) -> Result<R::Response, ApiError> {
        if !response.ok() {
            return Err(ApiError::Status {
                status: response.status,
                body: response.error_body(),
            });
        }
        R::parse(&response)
    }
}

// =========================================================
// 测试工具: MockHttpClient / MemorySession
// =========================================================
