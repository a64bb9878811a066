//! 列表投影：搜索 + 排序
//!
//! `project` 是纯函数，每次集合、搜索词、排序字段或方向变化时重新计算。

use std::cmp::Ordering;

use crate::{Order, Person};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortDirection::Asc => "Asc",
            SortDirection::Desc => "Desc",
        }
    }
}

/// 可投影的记录
pub trait Projectable {
    type SortKey: Copy;

    /// `needle` 已转为小写且非空
    fn matches(&self, needle: &str) -> bool;

    fn compare_by(&self, other: &Self, key: Self::SortKey) -> Ordering;
}

/// 过滤并排序，返回新的序列
///
/// 搜索大小写不敏感，前后空白忽略；排序稳定，相等元素保持原有顺序。
pub fn project<T>(items: &[T], filter: &str, key: T::SortKey, direction: SortDirection) -> Vec<T>
where
    T: Projectable + Clone,
{
    let needle = filter.trim().to_lowercase();
    let mut out: Vec<T> = if needle.is_empty() {
        items.to_vec()
    } else {
        items.iter().filter(|item| item.matches(&needle)).cloned().collect()
    };

    out.sort_by(|a, b| {
        let ord = a.compare_by(b, key);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    out
}

// =========================================================
// 文本排序规则
// =========================================================

/// 去掉葡萄牙语常见的变音符号
fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

fn collation_key(text: &str) -> String {
    text.to_lowercase().chars().map(fold_accent).collect()
}

/// pt-BR 风格的文本比较
///
/// 先比较去掉大小写与变音符号后的主键（`"Ávila"` 排在 `"Bruno"` 前），
/// 主键相同时再用小写原文区分，保证结果确定。
pub fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

// =========================================================
// 人员
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersonSortKey {
    #[default]
    Name,
    Email,
    Age,
}

impl PersonSortKey {
    pub const ALL: [PersonSortKey; 3] = [PersonSortKey::Name, PersonSortKey::Email, PersonSortKey::Age];

    /// `<select>` 的 value
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonSortKey::Name => "nome",
            PersonSortKey::Email => "email",
            PersonSortKey::Age => "idade",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PersonSortKey::Name => "Nome",
            PersonSortKey::Email => "Email",
            PersonSortKey::Age => "Idade",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "email" => PersonSortKey::Email,
            "idade" => PersonSortKey::Age,
            _ => PersonSortKey::Name,
        }
    }
}

impl Projectable for Person {
    type SortKey = PersonSortKey;

    fn matches(&self, needle: &str) -> bool {
        contains_folded(&self.name, needle) || contains_folded(&self.email, needle)
    }

    fn compare_by(&self, other: &Self, key: PersonSortKey) -> Ordering {
        match key {
            PersonSortKey::Name => collate(&self.name, &other.name),
            PersonSortKey::Email => collate(&self.email, &other.email),
            // 未填写年龄的排在最前
            PersonSortKey::Age => self.age.unwrap_or(-1).cmp(&other.age.unwrap_or(-1)),
        }
    }
}

// =========================================================
// 订单
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSortKey {
    #[default]
    Description,
    Status,
    Value,
}

impl OrderSortKey {
    pub const ALL: [OrderSortKey; 3] = [
        OrderSortKey::Description,
        OrderSortKey::Status,
        OrderSortKey::Value,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSortKey::Description => "descricao",
            OrderSortKey::Status => "status",
            OrderSortKey::Value => "valor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderSortKey::Description => "Descrição",
            OrderSortKey::Status => "Status",
            OrderSortKey::Value => "Valor",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "status" => OrderSortKey::Status,
            "valor" => OrderSortKey::Value,
            _ => OrderSortKey::Description,
        }
    }
}

impl Projectable for Order {
    type SortKey = OrderSortKey;

    fn matches(&self, needle: &str) -> bool {
        contains_folded(&self.description, needle) || contains_folded(self.status.as_str(), needle)
    }

    fn compare_by(&self, other: &Self, key: OrderSortKey) -> Ordering {
        match key {
            OrderSortKey::Description => collate(&self.description, &other.description),
            OrderSortKey::Status => collate(self.status.as_str(), other.status.as_str()),
            OrderSortKey::Value => self.value.total_cmp(&other.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrderStatus;

    fn person(id: i64, name: &str, email: &str, age: Option<i64>) -> Person {
        Person {
            id,
            name: name.to_string(),
            email: email.to_string(),
            cpf: "12345678901".to_string(),
            age,
        }
    }

    fn order(id: i64, description: &str, value: f64, status: OrderStatus) -> Order {
        Order {
            id,
            description: description.to_string(),
            value,
            status,
            person_id: Some(1),
        }
    }

    fn ids<T, F: Fn(&T) -> i64>(items: &[T], id: F) -> Vec<i64> {
        items.iter().map(id).collect()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let people = vec![
            person(1, "Ana Silva", "ana@teste.com", None),
            person(2, "Bruno", "bruno@teste.com", None),
        ];

        let result = project(&people, "ana", PersonSortKey::Name, SortDirection::Asc);
        assert_eq!(ids(&result, |p| p.id), vec![1]);

        let result = project(&people, "  ANA ", PersonSortKey::Name, SortDirection::Asc);
        assert_eq!(ids(&result, |p| p.id), vec![1]);
    }

    #[test]
    fn test_search_matches_email() {
        let people = vec![
            person(1, "Ana", "ana@empresa.com", None),
            person(2, "Bruno", "bruno@teste.com", None),
        ];
        let result = project(&people, "empresa", PersonSortKey::Name, SortDirection::Asc);
        assert_eq!(ids(&result, |p| p.id), vec![1]);
    }

    #[test]
    fn test_toggle_direction_reverses() {
        let people = vec![
            person(1, "Bruno", "b@t.com", None),
            person(2, "Ana", "a@t.com", None),
        ];

        let asc = project(&people, "", PersonSortKey::Name, SortDirection::Asc);
        let desc = project(&people, "", PersonSortKey::Name, SortDirection::Asc.toggle());

        assert_eq!(ids(&asc, |p| p.id), vec![2, 1]);
        assert_eq!(ids(&desc, |p| p.id), vec![1, 2]);
    }

    #[test]
    fn test_age_sorts_numerically_with_missing_first() {
        let people = vec![
            person(1, "A", "a", Some(30)),
            person(2, "B", "b", Some(4)),
            person(3, "C", "c", None),
        ];
        let result = project(&people, "", PersonSortKey::Age, SortDirection::Asc);
        assert_eq!(ids(&result, |p| p.id), vec![3, 2, 1]);
    }

    #[test]
    fn test_collation_ignores_accents_and_case() {
        let people = vec![
            person(1, "Bruno", "b", None),
            person(2, "Ávila", "a", None),
            person(3, "carla", "c", None),
        ];
        let result = project(&people, "", PersonSortKey::Name, SortDirection::Asc);
        assert_eq!(ids(&result, |p| p.id), vec![2, 1, 3]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let people = vec![
            person(1, "Ana", "x", None),
            person(2, "Ana", "y", None),
        ];
        let asc = project(&people, "", PersonSortKey::Name, SortDirection::Asc);
        let desc = project(&people, "", PersonSortKey::Name, SortDirection::Desc);
        assert_eq!(ids(&asc, |p| p.id), vec![1, 2]);
        assert_eq!(ids(&desc, |p| p.id), vec![1, 2]);
    }

    #[test]
    fn test_orders_filter_by_status_and_sort_by_value() {
        let orders = vec![
            order(1, "Teclado", 250.0, OrderStatus::Paid),
            order(2, "Mouse", 49.9, OrderStatus::Open),
            order(3, "Monitor", 1200.0, OrderStatus::Paid),
        ];

        let paid = project(&orders, "pago", OrderSortKey::Value, SortDirection::Desc);
        assert_eq!(ids(&paid, |o| o.id), vec![3, 1]);

        let by_value = project(&orders, "", OrderSortKey::Value, SortDirection::Asc);
        assert_eq!(ids(&by_value, |o| o.id), vec![2, 1, 3]);
    }

    #[test]
    fn test_sort_key_parsing_defaults() {
        assert_eq!(PersonSortKey::parse("idade"), PersonSortKey::Age);
        assert_eq!(PersonSortKey::parse("???"), PersonSortKey::Name);
        assert_eq!(OrderSortKey::parse("valor"), OrderSortKey::Value);
        for key in OrderSortKey::ALL {
            assert_eq!(OrderSortKey::parse(key.as_str()), key);
        }
    }
}
