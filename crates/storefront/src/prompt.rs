//! User prompts and notifications.
//!
//! Destructive actions ask the user first through [`Confirm`]; successful
//! actions that deserve a notice push a [`Toast`] onto a [`Toasts`] queue
//! that the front end drains and displays.

use std::collections::VecDeque;

/// Asks the user a yes/no question.
pub trait Confirm {
    /// Show `message` and return `true` if the user agreed.
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// A [`Confirm`] that always gives the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoConfirm(pub bool);

impl AutoConfirm {
    /// Agree to everything.
    pub const YES: Self = Self(true);
    /// Decline everything.
    pub const NO: Self = Self(false);
}

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        self.0
    }
}

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    /// A success notification.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    /// An informational notification.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Info,
            message: message.into(),
        }
    }
}

/// Pending notifications, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    queue: VecDeque<Toast>,
}

impl Toasts {
    /// Queue a notification.
    pub fn push(&mut self, toast: Toast) {
        self.queue.push_back(toast);
    }

    /// Take every pending notification.
    pub fn drain(&mut self) -> Vec<Toast> {
        self.queue.drain(..).collect()
    }

    /// Number of pending notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
