//! Transient notifications for the outcome of plant operations.

use std::{cell::Cell, collections::BTreeMap, rc::Rc};
use yew::prelude::*;

/// How long a notification stays up before dismissing itself.
const DISMISS_AFTER_MS: u32 = 5000;

thread_local! {
    static NEXT_ID: Cell<u64> = const { Cell::new(0) };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    /// Creation order, which doubles as the toast's identity.
    pub id: u64,
    pub message: String,
    pub toast_type: ToastType,
}

/// Live toasts keyed by creation order, so iteration is oldest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    pub toasts: BTreeMap<u64, Toast>,
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(u64),
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(toast) => {
                next.toasts.insert(toast.id, toast);
            }
            ToastAction::Dismiss(id) => {
                next.toasts.remove(&id);
            }
        }
        Rc::new(next)
    }
}

pub type ToastContext = UseReducerHandle<ToastState>;

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component]
pub fn ToastProvider(props: &ToastProviderProps) -> Html {
    let toast_state = use_reducer(ToastState::default);

    html! {
        <ContextProvider<ToastContext> context={toast_state}>
            {props.children.clone()}
        </ContextProvider<ToastContext>>
    }
}

#[derive(Clone)]
pub struct ToastHandle {
    context: ToastContext,
}

impl ToastHandle {
    fn push(&self, message: String, toast_type: ToastType) {
        let id = NEXT_ID.replace(NEXT_ID.get() + 1);
        self.context.dispatch(ToastAction::Push(Toast {
            id,
            message,
            toast_type,
        }));

        let context = self.context.clone();
        yew::platform::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(DISMISS_AFTER_MS).await;
            context.dispatch(ToastAction::Dismiss(id));
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(message.into(), ToastType::Error);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(message.into(), ToastType::Success);
    }

    pub fn remove(&self, id: u64) {
        self.context.dispatch(ToastAction::Dismiss(id));
    }
}

#[hook]
pub fn use_toast() -> ToastHandle {
    let context = use_context::<ToastContext>()
        .expect("use_toast must be used within a ToastProvider");
    ToastHandle { context }
}
