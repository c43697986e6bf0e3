//! Transient toast notifications.

use std::cell::RefCell;

use derive_more::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum ToastKind {
    #[display(fmt = "success")]
    Success,
    #[display(fmt = "error")]
    Error,
    #[display(fmt = "info")]
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }
}

/// Sink for toasts raised by forms and actions
pub trait Notifier {
    fn notify(&self, toast: Toast);
}

/// Notifier that just collects toasts in order
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: RefCell<Vec<Toast>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts.borrow().last().cloned()
    }

    /// Remove and return everything queued so far
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.borrow_mut())
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, toast: Toast) {
        self.toasts.borrow_mut().push(toast);
    }
}

impl<F: Fn(Toast)> Notifier for F {
    fn notify(&self, toast: Toast) {
        self(toast)
    }
}
