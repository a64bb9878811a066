//! 表单草稿
//!
//! 草稿保存输入框中的原始文本（已套用掩码），提交时校验并转换为请求载荷。
//! `Editor` 负责“新建 / 编辑”两种状态的切换。

use thiserror::Error;

use crate::mask::{format_cpf, format_currency_value, is_valid_cpf, only_digits, unmask_currency};
use crate::status::StatusMessage;
use crate::{
    MAX_AGE, Order, OrderPayload, OrderStatus, Person, PersonId, PersonPayload, RegisterRequest, Role,
};

/// 客户端校验失败，不会发出任何请求
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Preencha o campo {0}.")]
    Required(&'static str),
    #[error("CPF inválido. Use 000.000.000-00")]
    InvalidCpf,
    #[error("Idade deve estar entre 0 e 120.")]
    AgeOutOfRange,
    #[error("Valor inválido.")]
    InvalidValue,
    #[error("Selecione uma pessoa.")]
    MissingOwner,
    #[error("A pessoa selecionada não existe.")]
    UnknownOwner,
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(trimmed.to_string())
}

/// 可被编辑的记录
pub trait Record {
    fn id(&self) -> i64;
}

impl Record for Person {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Order {
    fn id(&self) -> i64 {
        self.id
    }
}

/// 与某种记录对应的表单草稿
pub trait Draft: Default + Clone {
    type Record: Record;

    fn from_record(record: &Self::Record) -> Self;
}

// =========================================================
// 人员草稿
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonDraft {
    pub name: String,
    pub email: String,
    /// 掩码后的 CPF，例如 `123.456.789-01`
    pub cpf: String,
    /// 归一化后的年龄文本，空串表示未填写
    pub age: String,
}

impl PersonDraft {
    pub fn validate(&self) -> Result<PersonPayload, ValidationError> {
        let name = required(&self.name, "Nome")?;
        let email = required(&self.email, "Email")?;
        if !is_valid_cpf(&self.cpf) {
            return Err(ValidationError::InvalidCpf);
        }
        let age = match only_digits(&self.age) {
            digits if digits.is_empty() => None,
            digits => match digits.parse::<u16>() {
                Ok(n) if n <= u16::from(MAX_AGE) => Some(n as u8),
                _ => return Err(ValidationError::AgeOutOfRange),
            },
        };

        Ok(PersonPayload {
            name,
            email,
            cpf: only_digits(&self.cpf),
            age,
        })
    }
}

impl Draft for PersonDraft {
    type Record = Person;

    fn from_record(person: &Person) -> Self {
        Self {
            name: person.name.clone(),
            email: person.email.clone(),
            cpf: format_cpf(&person.cpf),
            age: person.display_age().map(|a| a.to_string()).unwrap_or_default(),
        }
    }
}

// =========================================================
// 订单草稿
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    pub description: String,
    /// 金额掩码文本，例如 `512,90`
    pub value: String,
    pub status: OrderStatus,
    /// `<select>` 当前选中的人员 id，空串表示未选择
    pub person_id: String,
}

impl OrderDraft {
    /// 校验草稿
    ///
    /// `people` 为已加载的人员列表；列表为空时（加载失败）不检查人员是否存在，
    /// 交由后端判定。
    pub fn validate(&self, people: &[Person]) -> Result<OrderPayload, ValidationError> {
        let description = required(&self.description, "Descrição")?;
        if only_digits(&self.value).is_empty() {
            return Err(ValidationError::Required("Valor"));
        }
        let value = unmask_currency(&self.value);
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::InvalidValue);
        }
        let person_id: PersonId = match self.person_id.trim() {
            "" => return Err(ValidationError::MissingOwner),
            raw => raw.parse().map_err(|_| ValidationError::UnknownOwner)?,
        };
        if !people.is_empty() && !people.iter().any(|p| p.id == person_id) {
            return Err(ValidationError::UnknownOwner);
        }

        Ok(OrderPayload {
            description,
            value,
            status: self.status,
            person_id,
        })
    }
}

impl Draft for OrderDraft {
    type Record = Order;

    fn from_record(order: &Order) -> Self {
        Self {
            description: order.description.clone(),
            value: format_currency_value(order.value),
            status: order.status,
            person_id: order.person_id.map(|id| id.to_string()).unwrap_or_default(),
        }
    }
}

// =========================================================
// 新用户草稿
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl UserDraft {
    pub fn validate(&self) -> Result<RegisterRequest, ValidationError> {
        let email = required(&self.email, "Email")?;
        if self.password.is_empty() {
            return Err(ValidationError::Required("Senha"));
        }
        Ok(RegisterRequest {
            email,
            password: self.password.clone(),
            role: self.role,
        })
    }
}

// =========================================================
// 编辑状态
// =========================================================

/// 表单编辑状态
///
/// `editing == None` 表示新建，否则为正在编辑的记录 id。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Editor<D> {
    pub draft: D,
    pub editing: Option<i64>,
    pub status: Option<StatusMessage>,
}

impl<D: Draft> Editor<D> {
    pub fn new() -> Self {
        Self {
            draft: D::default(),
            editing: None,
            status: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// 把记录复制到草稿并进入编辑状态，同时清除提示
    pub fn begin_edit(&mut self, record: &D::Record) {
        self.draft = D::from_record(record);
        self.editing = Some(record.id());
        self.status = None;
    }

    /// 放弃编辑，回到空白的新建状态
    pub fn cancel(&mut self) {
        *self = Self::new();
    }

    /// 保存成功：清空草稿、退出编辑，保留提示
    pub fn finish(&mut self, status: StatusMessage) {
        self.draft = D::default();
        self.editing = None;
        self.status = Some(status);
    }
}
