//! 基于 signal 的表单状态
//!
//! 组件卸载后 signal 被回收，`try_update` 返回 `None`，
//! 迟到的请求结果因此自然被丢弃。

use leptos::prelude::*;

use khelmela_shared::form::{FormState, FormStore, ValidationMode};
use khelmela_shared::validation::Validate;

pub struct SignalForm<M: Send + Sync + 'static>(RwSignal<FormState<M>>);

impl<M: Send + Sync + 'static> Clone for SignalForm<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: Send + Sync + 'static> Copy for SignalForm<M> {}

impl<M> SignalForm<M>
where
    M: Validate + Default + Clone + Send + Sync + 'static,
{
    pub fn new(mode: ValidationMode) -> Self {
        Self(RwSignal::new(FormState::new(mode)))
    }

    /// 修改字段
    pub fn edit(&self, field: &'static str, update: impl FnOnce(&mut M)) {
        self.0.update(|form| form.edit(field, update));
    }

    /// 载入已有数据
    pub fn load(&self, values: M) {
        self.0.update(|form| form.load(values));
    }

    pub fn fail(&self, message: impl Into<String>) {
        self.0.update(|form| form.fail(message));
    }

    /// 读取字段值（追踪）
    pub fn value<T>(&self, read: impl FnOnce(&M) -> T) -> T {
        self.0.with(|form| read(&form.values))
    }

    pub fn error(&self, field: &str) -> Option<String> {
        self.0.with(|form| form.field_error(field).map(str::to_string))
    }

    pub fn form_error(&self) -> Option<String> {
        self.0.with(|form| form.form_error.clone())
    }

    pub fn submitting(&self) -> bool {
        self.0.with(|form| form.submitting)
    }

    pub fn can_submit(&self) -> bool {
        self.0.with(FormState::can_submit)
    }
}

impl<M: Send + Sync + 'static> FormStore<M> for SignalForm<M> {
    fn with_form<R>(&self, f: impl FnOnce(&mut FormState<M>) -> R) -> Option<R> {
        self.0.try_update(f)
    }
}

/// 字段下方的错误提示
#[component]
pub fn FieldError(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <p class="text-error text-sm mt-1">{move || message.get().unwrap_or_default()}</p>
        </Show>
    }
}

/// 表单级错误提示
#[component]
pub fn FormAlert(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div role="alert" class="alert alert-error text-sm py-2">
                <svg xmlns="http://www.w3.org/2000/svg" class="stroke-current shrink-0 h-6 w-6" fill="none" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 14l2-2m0 0l2-2m-2 2l-2-2m2 2l2 2m7-2a9 9 0 11-18 0 9 9 0 0118 0z" /></svg>
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}
