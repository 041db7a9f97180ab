use std::borrow::Cow;

pub const VERIFICATION_COMPLETE: &str = "Verification Complete";
pub const VERIFICATION_FAILED: &str = "Verification Failed";
pub const ERROR: &str = "Error";
pub const INVALID_FILE_TYPE: &str = "Invalid file type. Please upload a JSON file.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient notification. Terminal outcomes raise one that repeats the inline message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: Cow<'static, str>,
    pub description: Option<String>,
}

impl Toast {
    pub fn verification_complete(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            title: VERIFICATION_COMPLETE.into(),
            description: Some(message.into()),
        }
    }

    pub fn verification_failed(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            title: VERIFICATION_FAILED.into(),
            description: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            title: ERROR.into(),
            description: Some(message.into()),
        }
    }

    pub fn invalid_file_type() -> Self {
        Self {
            kind: ToastKind::Error,
            title: INVALID_FILE_TYPE.into(),
            description: None,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    fn notify(&self, toast: Toast);
}
