//! 表单状态管理模块
//!
//! 把零散的输入缓冲整合为 `FormState`，负责：
//! - 数据和并行错误表的持有
//! - 编辑时的校验（即时或提交时）
//! - 提交中标志与表单级错误
//! - 成功后的重置

use std::cell::RefCell;
use std::fmt::Display;

use crate::validation::{FieldErrors, Validate};

/// 校验时机
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// 每次修改都整体重新校验（博客创建 / 编辑）
    Eager,
    /// 提交时校验，修改某字段时只清除该字段的错误（登录 / 注册）
    #[default]
    OnSubmit,
}

/// 表单状态
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<M> {
    pub values: M,
    pub errors: FieldErrors,
    /// 表单级错误（服务端消息或通用提示）
    pub form_error: Option<String>,
    pub submitting: bool,
    mode: ValidationMode,
}

impl<M: Validate + Default + Clone> FormState<M> {
    /// 创建新的表单状态，所有字段使用默认值
    pub fn new(mode: ValidationMode) -> Self {
        Self::with_values(M::default(), mode)
    }

    pub fn with_values(values: M, mode: ValidationMode) -> Self {
        let errors = match mode {
            ValidationMode::Eager => values.validate(),
            ValidationMode::OnSubmit => FieldErrors::new(),
        };
        Self {
            values,
            errors,
            form_error: None,
            submitting: false,
            mode,
        }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// 修改一个字段
    pub fn edit(&mut self, field: &'static str, update: impl FnOnce(&mut M)) {
        update(&mut self.values);
        match self.mode {
            ValidationMode::Eager => self.errors = self.values.validate(),
            ValidationMode::OnSubmit => self.errors.clear(field),
        }
    }

    /// 替换全部字段（例如编辑器载入已有文章）
    pub fn load(&mut self, values: M) {
        *self = Self::with_values(values, self.mode);
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    /// 提交按钮是否可用
    pub fn can_submit(&self) -> bool {
        !self.submitting && self.errors.is_empty()
    }

    /// 开始提交
    ///
    /// 校验失败或已有提交在进行中时返回 `None`，否则标记为提交中并返回数据快照。
    pub fn begin_submit(&mut self) -> Option<M> {
        if self.submitting {
            return None;
        }
        self.errors = self.values.validate();
        if !self.errors.is_empty() {
            return None;
        }
        self.form_error = None;
        self.submitting = true;
        Some(self.values.clone())
    }

    /// 结束提交：成功时清空表单，失败时写入表单级错误并重新启用
    pub fn complete<T, E: Display>(&mut self, result: Result<T, E>) -> Option<T> {
        self.submitting = false;
        match result {
            Ok(value) => {
                self.reset();
                Some(value)
            }
            Err(e) => {
                self.form_error = Some(e.to_string());
                None
            }
        }
    }

    /// 不经过提交流程直接设置表单级错误
    pub fn fail(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.form_error = Some(message.into());
    }

    /// 重置表单到初始状态
    pub fn reset(&mut self) {
        *self = Self::new(self.mode);
    }
}

impl<M: Validate + Default + Clone> Default for FormState<M> {
    fn default() -> Self {
        Self::new(ValidationMode::default())
    }
}

/// 表单状态的持有者
///
/// 前端用 signal 实现，测试用 `RefCell` 实现。
/// 返回 `None` 表示表单已被销毁（组件卸载），迟到的结果应被丢弃。
pub trait FormStore<M> {
    fn with_form<R>(&self, f: impl FnOnce(&mut FormState<M>) -> R) -> Option<R>;
}

impl<M> FormStore<M> for RefCell<FormState<M>> {
    fn with_form<R>(&self, f: impl FnOnce(&mut FormState<M>) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{BlogDraft, LoginForm};

    #[test]
    fn test_on_submit_clears_only_edited_field() {
        let mut form: FormState<LoginForm> = FormState::new(ValidationMode::OnSubmit);
        assert!(form.errors.is_empty());
        assert!(form.begin_submit().is_none());
        assert!(form.errors.has("email") && form.errors.has("password"));

        form.edit("email", |v| v.email = "a@b".into());
        assert!(!form.errors.has("email"));
        assert!(form.errors.has("password"));
    }

    #[test]
    fn test_eager_revalidates_every_edit() {
        let mut form: FormState<BlogDraft> = FormState::new(ValidationMode::Eager);
        assert!(form.errors.has("title"));
        assert!(!form.can_submit());

        form.edit("title", |v| v.title = "Hello".into());
        assert!(!form.errors.has("title"));
        assert!(form.errors.has("description"));
    }

    #[test]
    fn test_submit_lifecycle() {
        let mut form: FormState<LoginForm> = FormState::new(ValidationMode::OnSubmit);
        form.edit("email", |v| v.email = "a@b.co".into());
        form.edit("password", |v| v.password = "secret1".into());

        let snapshot = form.begin_submit().unwrap();
        assert_eq!(snapshot.email, "a@b.co");
        assert!(form.submitting);
        // 提交中不允许重复提交
        assert!(form.begin_submit().is_none());

        let out: Option<()> = form.complete(Err("Invalid credentials"));
        assert!(out.is_none());
        assert!(!form.submitting);
        assert_eq!(form.form_error.as_deref(), Some("Invalid credentials"));
        assert_eq!(form.values.email, "a@b.co");

        form.begin_submit().unwrap();
        assert!(form.form_error.is_none());
        let out = form.complete::<_, String>(Ok(42));
        assert_eq!(out, Some(42));
        assert_eq!(form.values, LoginForm::default());
    }

    #[test]
    fn test_refcell_store() {
        let store = RefCell::new(FormState::<LoginForm>::default());
        let ok = store.with_form(|f| {
            f.fail("boom");
            f.form_error.clone()
        });
        assert_eq!(ok, Some(Some("boom".to_string())));
    }
}
