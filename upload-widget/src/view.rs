use crate::widget::{Status, WidgetState};
use std::fmt::Display;

pub const IDLE_HEADING: &str = "Upload Certification File";
pub const IDLE_BODY: &str = "Drag and drop your JSON file here, or click to browse";
pub const IDLE_ACTION: &str = "Select JSON File";
pub const UPLOADING_HEADING: &str = "Verifying Certification";
pub const VERIFIED_HEADING: &str = "Zer0 Trace Found!";
pub const VERIFIED_ACTION: &str = "Verify Another File";
pub const FAILED_HEADING: &str = "Verification Failed";
pub const FAILED_ACTION: &str = "Try Again";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    None,
    Dragging,
    Success,
    Failure,
}

/// What the drop zone shows for a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub heading: &'static str,
    pub body: String,
    pub action: Option<&'static str>,
    pub highlight: Highlight,
}

impl From<&WidgetState> for View {
    fn from(state: &WidgetState) -> Self {
        let message = state.message.clone().unwrap_or_default();
        let drag_highlight = if state.dragging {
            Highlight::Dragging
        } else {
            Highlight::None
        };

        match state.status {
            Status::Idle => View {
                heading: IDLE_HEADING,
                body: IDLE_BODY.to_string(),
                action: Some(IDLE_ACTION),
                highlight: drag_highlight,
            },
            Status::Uploading => View {
                heading: UPLOADING_HEADING,
                body: format!(
                    "Checking database for: {}",
                    state.file_name.as_deref().unwrap_or_default()
                ),
                action: None,
                highlight: drag_highlight,
            },
            Status::Verified => View {
                heading: VERIFIED_HEADING,
                body: message,
                action: Some(VERIFIED_ACTION),
                highlight: Highlight::Success,
            },
            Status::Failed => View {
                heading: FAILED_HEADING,
                body: message,
                action: Some(FAILED_ACTION),
                highlight: Highlight::Failure,
            },
        }
    }
}

impl Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.heading)?;
        write!(f, "{}", self.body)?;
        if let Some(action) = self.action {
            write!(f, "\n[{action}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(status: Status, message: Option<&str>) -> WidgetState {
        WidgetState {
            status,
            file_name: Some("cert.json".to_string()),
            message: message.map(str::to_string),
            dragging: false,
        }
    }

    #[test]
    fn idle_invites_an_upload() {
        let view = View::from(&WidgetState::default());

        assert_eq!(IDLE_HEADING, view.heading);
        assert_eq!(Some(IDLE_ACTION), view.action);
        assert_eq!(Highlight::None, view.highlight);
    }

    #[test]
    fn dragging_highlights_the_drop_zone() {
        let view = View::from(&WidgetState {
            dragging: true,
            ..WidgetState::default()
        });

        assert_eq!(Highlight::Dragging, view.highlight);
    }

    #[test]
    fn uploading_names_the_file() {
        let view = View::from(&state(Status::Uploading, None));

        assert_eq!(UPLOADING_HEADING, view.heading);
        assert_eq!("Checking database for: cert.json", view.body);
        assert_eq!(None, view.action);
    }

    #[test]
    fn verified_shows_the_server_message() {
        let view = View::from(&state(Status::Verified, Some("found it")));

        assert_eq!(VERIFIED_HEADING, view.heading);
        assert_eq!("found it", view.body);
        assert_eq!(Highlight::Success, view.highlight);
    }

    #[test]
    fn failed_offers_a_retry() {
        let view = View::from(&state(Status::Failed, Some("not found")));

        assert_eq!(FAILED_HEADING, view.heading);
        assert_eq!(Some(FAILED_ACTION), view.action);
        assert_eq!(
            "Verification Failed\nnot found\n[Try Again]",
            view.to_string()
        );
    }
}
