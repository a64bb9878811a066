//! 页面业务服务
//!
//! 每个页面的操作（加载、提交、删除、登录、注册）都表达为网关之上的异步函数，
//! 结果统一转换为 `StatusMessage`，错误不会向上传播到界面。
//!
//! 顺序保证：变更请求完成之后才会发出重新加载请求；
//! 页面挂载时的两个列表请求并发执行，二者都结束后才返回。

use crate::draft::{OrderDraft, PersonDraft, UserDraft};
use crate::gateway::{ApiError, Gateway, HttpClient, SessionHandle};
use crate::linkage::LinkageMap;
use crate::protocol::{
    CreateOrder, CreatePerson, DeleteOrder, DeletePerson, ListOrders, ListPeople, Login, Register,
    UpdateOrder, UpdatePerson,
};
use crate::status::StatusMessage;
use crate::{LoginRequest, Order, OrderId, Person, PersonId};

// =========================================================
// 提示文本
// =========================================================

pub const CONFIRM_DELETE_PERSON: &str = "Tem certeza que deseja excluir esta pessoa?";
pub const CONFIRM_DELETE_ORDER: &str = "Tem certeza que deseja excluir este pedido?";

pub const MSG_PERSON_CREATED: &str = "Pessoa cadastrada com sucesso!";
pub const MSG_PERSON_UPDATED: &str = "Pessoa atualizada com sucesso!";
pub const MSG_PERSON_SAVE_FAILED: &str = "Erro ao salvar pessoa.";
pub const MSG_PERSON_DELETED: &str = "Pessoa excluída com sucesso!";
pub const MSG_PERSON_LINKED: &str = "Não é possível excluir: cliente vinculado a pedido(s).";
pub const MSG_PERSON_NOT_FOUND: &str = "Pessoa não encontrada.";
pub const MSG_PERSON_DELETE_FAILED: &str = "Erro ao excluir pessoa.";

pub const MSG_ORDER_CREATED: &str = "Pedido cadastrado com sucesso!";
pub const MSG_ORDER_UPDATED: &str = "Pedido atualizado com sucesso!";
pub const MSG_ORDER_SAVE_FAILED: &str = "Erro ao salvar pedido.";
pub const MSG_ORDER_DELETED: &str = "Pedido excluído com sucesso!";
pub const MSG_ORDER_CONFLICT: &str = "Não é possível excluir: pedido em uso.";
pub const MSG_ORDER_NOT_FOUND: &str = "Pedido não encontrado.";
pub const MSG_ORDER_DELETE_FAILED: &str = "Erro ao excluir pedido.";

pub const MSG_LOGIN_MISSING_FIELDS: &str = "Preencha email e senha.";
pub const MSG_LOGIN_INVALID: &str = "Credenciais inválidas";
pub const MSG_LOGIN_FAILED: &str = "Falha no login";

pub const MSG_USER_CREATED: &str = "Usuário cadastrado com sucesso!";
pub const MSG_USER_FAILED: &str = "Erro ao cadastrar usuário.";

/// 删除失败时按状态码选择的文本
struct DeleteTexts {
    conflict: &'static str,
    not_found: &'static str,
    failed: &'static str,
}

const PERSON_DELETE_TEXTS: DeleteTexts = DeleteTexts {
    conflict: MSG_PERSON_LINKED,
    not_found: MSG_PERSON_NOT_FOUND,
    failed: MSG_PERSON_DELETE_FAILED,
};

const ORDER_DELETE_TEXTS: DeleteTexts = DeleteTexts {
    conflict: MSG_ORDER_CONFLICT,
    not_found: MSG_ORDER_NOT_FOUND,
    failed: MSG_ORDER_DELETE_FAILED,
};

/// 409 / 404 优先使用服务端返回的 detail / message，其余一律使用通用文本。
/// 401 已经由网关处理（跳转登录），不再显示提示。
fn delete_failure(error: &ApiError, texts: &DeleteTexts) -> Option<StatusMessage> {
    let server_text = error.body().and_then(|b| b.detail_first());
    match error {
        ApiError::Unauthorized => None,
        ApiError::Status { status: 409, .. } => {
            Some(StatusMessage::error(server_text.unwrap_or(texts.conflict)))
        }
        ApiError::Status { status: 404, .. } => {
            Some(StatusMessage::error(server_text.unwrap_or(texts.not_found)))
        }
        _ => Some(StatusMessage::error(texts.failed)),
    }
}

// =========================================================
// 结果类型
// =========================================================

/// 页面加载状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
}

/// 提交或删除的结果
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome<T> {
    /// 要显示的提示；`None` 表示无需提示（例如 401 已跳转登录）
    pub status: Option<StatusMessage>,
    /// 变更是否已被服务端接受
    pub applied: bool,
    /// 变更成功后重新加载得到的列表；重新加载失败时为 `None`
    pub refreshed: Option<Vec<T>>,
}

impl<T> MutationOutcome<T> {
    fn rejected(status: StatusMessage) -> Self {
        Self {
            status: Some(status),
            applied: false,
            refreshed: None,
        }
    }

    fn failed(status: Option<StatusMessage>) -> Self {
        Self {
            status,
            applied: false,
            refreshed: None,
        }
    }

    fn applied(status: StatusMessage, refreshed: Option<Vec<T>>) -> Self {
        Self {
            status: Some(status),
            applied: true,
            refreshed,
        }
    }
}

// =========================================================
// 人员页面
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeopleSnapshot {
    pub people: Vec<Person>,
    pub linkage: LinkageMap,
}

pub struct PeopleService<'a, C, S> {
    gateway: &'a Gateway<C, S>,
}

impl<'a, C: HttpClient, S: SessionHandle> PeopleService<'a, C, S> {
    pub fn new(gateway: &'a Gateway<C, S>) -> Self {
        Self { gateway }
    }

    /// 并发加载人员与订单，并根据订单构建关联映射。失败的一侧视为空列表。
    pub async fn load(&self) -> PeopleSnapshot {
        let (people, orders) = futures::join!(
            self.gateway.call(&ListPeople),
            self.gateway.call(&ListOrders)
        );
        let people = people.unwrap_or_else(|e| {
            crate::log_warn!("[People] 加载人员失败: {}", e);
            Vec::new()
        });
        let orders = orders.unwrap_or_else(|e| {
            crate::log_warn!("[People] 加载订单失败: {}", e);
            Vec::new()
        });

        PeopleSnapshot {
            people,
            linkage: LinkageMap::from_orders(&orders),
        }
    }

    pub async fn reload(&self) -> Result<Vec<Person>, ApiError> {
        self.gateway.call(&ListPeople).await
    }

    async fn reload_after_mutation(&self) -> Option<Vec<Person>> {
        self.reload()
            .await
            .map_err(|e| crate::log_warn!("[People] 重新加载失败: {}", e))
            .ok()
    }

    /// 新建（`editing == None`）或更新人员
    ///
    /// 校验失败时不发请求；成功后重新加载列表。
    pub async fn submit(&self, draft: &PersonDraft, editing: Option<PersonId>) -> MutationOutcome<Person> {
        let payload = match draft.validate() {
            Ok(payload) => payload,
            Err(e) => return MutationOutcome::rejected(StatusMessage::error(e.to_string())),
        };

        let result = match editing {
            Some(id) => self.gateway.call(&UpdatePerson { id, payload }).await,
            None => self.gateway.call(&CreatePerson(payload)).await,
        };

        match result {
            Ok(()) => {
                let text = if editing.is_some() {
                    MSG_PERSON_UPDATED
                } else {
                    MSG_PERSON_CREATED
                };
                let refreshed = self.reload_after_mutation().await;
                MutationOutcome::applied(StatusMessage::success(text), refreshed)
            }
            Err(ApiError::Unauthorized) => MutationOutcome::failed(None),
            Err(e) => {
                crate::log_error!("[People] 保存失败: {}", e);
                MutationOutcome::failed(Some(StatusMessage::error(MSG_PERSON_SAVE_FAILED)))
            }
        }
    }

    /// 删除人员
    ///
    /// 先经过用户确认（返回 `None` 表示用户取消），再根据关联映射在本地拦截，
    /// 通过后才发出请求。
    pub async fn delete(
        &self,
        id: PersonId,
        linkage: &LinkageMap,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Option<MutationOutcome<Person>> {
        if !confirm(CONFIRM_DELETE_PERSON) {
            return None;
        }
        if linkage.is_linked(id) {
            return Some(MutationOutcome::rejected(StatusMessage::error(MSG_PERSON_LINKED)));
        }

        let outcome = match self.gateway.call(&DeletePerson { id }).await {
            Ok(()) => {
                let refreshed = self.reload_after_mutation().await;
                MutationOutcome::applied(StatusMessage::success(MSG_PERSON_DELETED), refreshed)
            }
            Err(e) => {
                crate::log_warn!("[People] 删除 {} 失败: {}", id, e);
                MutationOutcome::failed(delete_failure(&e, &PERSON_DELETE_TEXTS))
            }
        };
        Some(outcome)
    }
}

// =========================================================
// 订单页面
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrdersSnapshot {
    pub orders: Vec<Order>,
    /// 用于人员下拉框与列表中的人员名称
    pub people: Vec<Person>,
}

impl OrdersSnapshot {
    /// 订单所属人员的名称
    pub fn owner_name(&self, order: &Order) -> Option<&str> {
        let person_id = order.person_id?;
        self.people
            .iter()
            .find(|p| p.id == person_id)
            .map(|p| p.name.as_str())
    }
}

pub struct OrdersService<'a, C, S> {
    gateway: &'a Gateway<C, S>,
}

impl<'a, C: HttpClient, S: SessionHandle> OrdersService<'a, C, S> {
    pub fn new(gateway: &'a Gateway<C, S>) -> Self {
        Self { gateway }
    }

    /// 并发加载订单与人员
    pub async fn load(&self) -> OrdersSnapshot {
        let (orders, people) = futures::join!(
            self.gateway.call(&ListOrders),
            self.gateway.call(&ListPeople)
        );
        OrdersSnapshot {
            orders: orders.unwrap_or_else(|e| {
                crate::log_warn!("[Orders] 加载订单失败: {}", e);
                Vec::new()
            }),
            people: people.unwrap_or_else(|e| {
                crate::log_warn!("[Orders] 加载人员失败: {}", e);
                Vec::new()
            }),
        }
    }

    pub async fn reload(&self) -> Result<Vec<Order>, ApiError> {
        self.gateway.call(&ListOrders).await
    }

    async fn reload_after_mutation(&self) -> Option<Vec<Order>> {
        self.reload()
            .await
            .map_err(|e| crate::log_warn!("[Orders] 重新加载失败: {}", e))
            .ok()
    }

    pub async fn submit(
        &self,
        draft: &OrderDraft,
        editing: Option<OrderId>,
        people: &[Person],
    ) -> MutationOutcome<Order> {
        let payload = match draft.validate(people) {
            Ok(payload) => payload,
            Err(e) => return MutationOutcome::rejected(StatusMessage::error(e.to_string())),
        };

        let result = match editing {
            Some(id) => self.gateway.call(&UpdateOrder { id, payload }).await,
            None => self.gateway.call(&CreateOrder(payload)).await,
        };

        match result {
            Ok(()) => {
                let text = if editing.is_some() {
                    MSG_ORDER_UPDATED
                } else {
                    MSG_ORDER_CREATED
                };
                let refreshed = self.reload_after_mutation().await;
                MutationOutcome::applied(StatusMessage::success(text), refreshed)
            }
            Err(ApiError::Unauthorized) => MutationOutcome::failed(None),
            Err(e) => {
                crate::log_error!("[Orders] 保存失败: {}", e);
                MutationOutcome::failed(Some(StatusMessage::error(MSG_ORDER_SAVE_FAILED)))
            }
        }
    }

    pub async fn delete(
        &self,
        id: OrderId,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Option<MutationOutcome<Order>> {
        if !confirm(CONFIRM_DELETE_ORDER) {
            return None;
        }

        let outcome = match self.gateway.call(&DeleteOrder { id }).await {
            Ok(()) => {
                let refreshed = self.reload_after_mutation().await;
                MutationOutcome::applied(StatusMessage::success(MSG_ORDER_DELETED), refreshed)
            }
            Err(e) => {
                crate::log_warn!("[Orders] 删除 {} 失败: {}", id, e);
                MutationOutcome::failed(delete_failure(&e, &ORDER_DELETE_TEXTS))
            }
        };
        Some(outcome)
    }
}

// =========================================================
// 账号：登录与注册
// =========================================================

pub struct AccountService<'a, C, S> {
    gateway: &'a Gateway<C, S>,
}

impl<'a, C: HttpClient, S: SessionHandle> AccountService<'a, C, S> {
    pub fn new(gateway: &'a Gateway<C, S>) -> Self {
        Self { gateway }
    }

    /// 登录，成功时返回 token
    ///
    /// 使用匿名请求：凭据错误返回的 401 只显示提示，不触发强制登出。
    pub async fn login(&self, email: &str, password: &str) -> Result<String, StatusMessage> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(StatusMessage::error(MSG_LOGIN_MISSING_FIELDS));
        }

        let request = Login(LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        });
        match self.gateway.call_public(&request).await {
            Ok(response) if !response.token.is_empty() => Ok(response.token),
            Ok(_) => Err(StatusMessage::error(MSG_LOGIN_FAILED)),
            Err(ApiError::Status { body, .. }) => {
                let text = body
                    .as_ref()
                    .and_then(|b| b.message_first())
                    .unwrap_or(MSG_LOGIN_INVALID);
                Err(StatusMessage::error(text))
            }
            Err(e) => {
                crate::log_warn!("[Account] 登录失败: {}", e);
                Err(StatusMessage::error(MSG_LOGIN_FAILED))
            }
        }
    }

    /// 注册新用户（需要管理员 token，由后端校验）
    ///
    /// 返回 `None` 表示 401 已跳转登录页。
    pub async fn register(&self, draft: &UserDraft) -> Option<StatusMessage> {
        let request = match draft.validate() {
            Ok(request) => request,
            Err(e) => return Some(StatusMessage::error(e.to_string())),
        };

        match self.gateway.call(&Register(request)).await {
            Ok(()) => Some(StatusMessage::success(MSG_USER_CREATED)),
            Err(ApiError::Unauthorized) => None,
            Err(ApiError::Status { body, .. }) => {
                let text = body
                    .as_ref()
                    .and_then(|b| b.message_first())
                    .unwrap_or(MSG_USER_FAILED);
                Some(StatusMessage::error(text))
            }
            Err(e) => {
                crate::log_warn!("[Account] 注册失败: {}", e);
                Some(StatusMessage::error(MSG_USER_FAILED))
            }
        }
    }
}

#[cfg(test)]
mod tests;
