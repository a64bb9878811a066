//! TestHub 共享层
//!
//! 不依赖 DOM 的全部逻辑都放在这里，便于在本机直接运行测试：
//! - 领域模型与接口协议
//! - 输入掩码与校验
//! - 会话、请求网关与各页面的业务服务

use serde::{Deserialize, Deserializer, Serialize};

pub mod config;
pub mod draft;
pub mod gateway;
pub mod linkage;
#[doc(hidden)]
pub mod log;
pub mod mask;
pub mod projection;
pub mod protocol;
pub mod service;
pub mod session;
pub mod status;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// LocalStorage 中保存 Bearer Token 的键
pub const STORAGE_TOKEN_KEY: &str = "authToken";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 年龄上限（含）
pub const MAX_AGE: u8 = 120;
/// CPF 数字位数
pub const CPF_DIGITS: usize = 11;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

pub type PersonId = i64;
pub type OrderId = i64;

/// 服务端可能返回 null 的文本字段统一视为空串
fn null_as_empty<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

fn null_as_zero<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(de)?.unwrap_or_default())
}

/// 人员 (Pessoa)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    #[serde(rename = "nome", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    /// 服务端保存的是纯数字
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cpf: String,
    #[serde(rename = "idade", default)]
    pub age: Option<i64>,
}

impl Person {
    /// 展示用年龄，限制在 [0, 120]
    pub fn display_age(&self) -> Option<u8> {
        self.age.map(|age| age.clamp(0, MAX_AGE as i64) as u8)
    }
}

/// 创建/更新人员时提交的载荷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonPayload {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    pub cpf: String,
    #[serde(rename = "idade")]
    pub age: Option<u8>,
}

/// 订单状态
///
/// 规范集合为 ABERTO / PAGO / CANCELADO。旧版本使用的 PENDENTE
/// 只在读取时视为 ABERTO，提交时永远不会出现。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "ABERTO")]
    Open,
    #[serde(rename = "PAGO")]
    Paid,
    #[serde(rename = "CANCELADO")]
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [OrderStatus::Open, OrderStatus::Paid, OrderStatus::Canceled];

    /// 线上传输值
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "ABERTO",
            OrderStatus::Paid => "PAGO",
            OrderStatus::Canceled => "CANCELADO",
        }
    }

    /// 界面标签
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Open => "Aberto",
            OrderStatus::Paid => "Pago",
            OrderStatus::Canceled => "Cancelado",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "ABERTO" | "PENDENTE" => Some(OrderStatus::Open),
            "PAGO" => Some(OrderStatus::Paid),
            "CANCELADO" => Some(OrderStatus::Canceled),
            _ => None,
        }
    }
}

/// 未知或缺失的状态读取为默认值，避免整个列表解析失败
impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(de)?;
        Ok(raw
            .as_deref()
            .and_then(|s| OrderStatus::from_wire(s.trim()))
            .unwrap_or_default())
    }
}

/// 订单 (Pedido)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(rename = "descricao", default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// 金额，例如 512.9
    #[serde(rename = "valor", default, deserialize_with = "null_as_zero")]
    pub value: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(rename = "pessoaId", default)]
    pub person_id: Option<PersonId>,
}

/// 创建/更新订单时提交的载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor")]
    pub value: f64,
    pub status: OrderStatus,
    #[serde(rename = "pessoaId")]
    pub person_id: PersonId,
}

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::User, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

/// 登录响应，除 token 外的字段一律忽略
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
    pub role: Role,
}

/// 服务端错误体：`{ "message": ..., "detail": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    fn non_empty(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// 优先 detail，其次 message
    pub fn detail_first(&self) -> Option<&str> {
        Self::non_empty(&self.detail).or_else(|| Self::non_empty(&self.message))
    }

    /// 优先 message，其次 detail
    pub fn message_first(&self) -> Option<&str> {
        Self::non_empty(&self.message).or_else(|| Self::non_empty(&self.detail))
    }
}
