//! 关联映射：每个人员名下的订单数量
//!
//! 每次重新加载订单时重新计算，不做持久化。仅用于界面上提前阻止删除，
//! 最终约束仍由后端负责（409）。

use std::collections::HashMap;

use crate::{Order, PersonId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkageMap(HashMap<PersonId, usize>);

impl LinkageMap {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut counts = HashMap::new();
        for person_id in orders.iter().filter_map(|o| o.person_id) {
            *counts.entry(person_id).or_insert(0) += 1;
        }
        Self(counts)
    }

    pub fn count(&self, person_id: PersonId) -> usize {
        self.0.get(&person_id).copied().unwrap_or(0)
    }

    /// 是否存在关联订单（存在则界面上禁止删除）
    pub fn is_linked(&self, person_id: PersonId) -> bool {
        self.count(person_id) > 0
    }
}
