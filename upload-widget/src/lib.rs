pub mod file;
pub mod notify;
pub mod payload;
pub mod verifier;
pub mod view;
pub mod widget;

pub use widget::{Status, SubmitOutcome, UploadWidget, WidgetState};
