use crate::auth::AuthContext;
use crate::web::FetchClient;
use leptos::prelude::*;
use testhub_shared::config::AppConfig;
use testhub_shared::gateway::Gateway;

/// 浏览器中使用的网关：`fetch` 传输 + 信号驱动的会话
pub type ApiGateway = Gateway<FetchClient, AuthContext>;

/// 创建网关并放入 Context
pub fn provide_api(auth: AuthContext) {
    let config = AppConfig::from_env();
    testhub_shared::log_info!("[Api] 后端地址: {}", config.api_base_url);
    provide_context(Gateway::new(&config, FetchClient, auth));
}

/// 从 Context 获取网关
pub fn use_api() -> ApiGateway {
    use_context::<ApiGateway>().expect("ApiGateway should be provided")
}
