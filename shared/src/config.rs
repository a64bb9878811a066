//! 运行时配置
//!
//! 后端地址在构建时通过环境变量 `TESTHUB_API_URL` 注入（Trunk 构建时读取），
//! 未设置时使用默认值。

/// 未配置时使用的后端地址
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 后端基础地址，不带末尾 `/`
    pub api_base_url: String,
}

impl AppConfig {
    /// 读取构建时注入的配置
    pub fn from_env() -> Self {
        Self::resolve(option_env!("TESTHUB_API_URL"))
    }

    /// 根据可选的地址生成配置，空值回退到默认地址
    pub fn resolve(api_url: Option<&str>) -> Self {
        let url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL);
        Self::with_base_url(url)
    }

    pub fn with_base_url(url: &str) -> Self {
        Self {
            api_base_url: url.trim_end_matches('/').to_string(),
        }
    }
}
