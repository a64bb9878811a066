//! 表单状态管理模块
//!
//! 将草稿、编辑中的记录 id 与提示消息整合为一个 `RwSignal<Editor<D>>`，负责：
//! - 数据的持有
//! - 新建 / 编辑状态的切换
//! - 提交结果的应用

use leptos::prelude::*;
use testhub_shared::draft::{Draft, Editor};
use testhub_shared::service::MutationOutcome;
use testhub_shared::status::StatusMessage;

/// 表单状态结构体
///
/// 内部是 `RwSignal`，实现了 `Copy`，可以直接移入各个事件闭包。
pub struct FormState<D: Send + Sync + 'static> {
    editor: RwSignal<Editor<D>>,
}

impl<D: Send + Sync + 'static> Clone for FormState<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: Send + Sync + 'static> Copy for FormState<D> {}

impl<D: Draft + Send + Sync + 'static> FormState<D> {
    /// 创建空白的新建表单
    pub fn new() -> Self {
        Self {
            editor: RwSignal::new(Editor::new()),
        }
    }

    /// 读取草稿中的某个字段（追踪依赖）
    pub fn field<T>(&self, read: impl FnOnce(&D) -> T) -> T {
        self.editor.with(|e| read(&e.draft))
    }

    /// 修改草稿
    pub fn update(&self, write: impl FnOnce(&mut D)) {
        self.editor.update(|e| write(&mut e.draft));
    }

    /// 当前草稿的快照（不追踪依赖），用于提交
    pub fn snapshot(&self) -> D {
        self.editor.with_untracked(|e| e.draft.clone())
    }

    /// 正在编辑的记录 id（不追踪依赖）
    pub fn editing_id(&self) -> Option<i64> {
        self.editor.with_untracked(|e| e.editing)
    }

    pub fn is_editing(&self) -> bool {
        self.editor.with(|e| e.is_editing())
    }

    pub fn begin_edit(&self, record: &D::Record) {
        self.editor.update(|e| e.begin_edit(record));
    }

    pub fn cancel(&self) {
        self.editor.update(|e| e.cancel());
    }

    pub fn set_status(&self, status: Option<StatusMessage>) {
        self.editor.update(|e| e.status = status);
    }

    pub fn status(&self) -> Signal<Option<StatusMessage>> {
        let editor = self.editor;
        Signal::derive(move || editor.with(|e| e.status.clone()))
    }

    /// 应用提交结果
    ///
    /// 成功：清空草稿、退出编辑并替换列表（重新加载失败时保留旧列表）；
    /// 失败：保留草稿，只更新提示。
    pub fn apply_submit<T>(&self, list: impl FnOnce(Vec<T>), outcome: MutationOutcome<T>) {
        match outcome.status {
            Some(status) if outcome.applied => self.editor.update(|e| e.finish(status)),
            status => self.set_status(status),
        }
        if let Some(refreshed) = outcome.refreshed {
            list(refreshed);
        }
    }
}
