use crate::file::{InputSource, SelectedFile};
use crate::notify::{Notifier, Toast};
use crate::payload::{self, PayloadError};
use crate::verifier::Verifier;
use crate::view::View;
use certs_core::model::CertificationId;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Uploading,
    Verified,
    Failed,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Verified | Status::Failed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetState {
    pub status: Status,
    pub file_name: Option<String>,
    pub message: Option<String>,
    pub dragging: bool,
}

impl WidgetState {
    fn finish(&mut self, status: Status, message: String) {
        self.status = status;
        self.message = Some(message);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Not a JSON file. Nothing changed besides a notification.
    Rejected,
    /// The widget was busy or showing a result that has not been reset yet.
    Ignored,
    Finished(Status),
}

/// The upload widget's state machine.
///
/// `idle -> uploading -> verified | failed`, with local parse failures going straight from
/// `idle` to `failed` and `reset` leading back to `idle`. Only an idle widget takes a new
/// file, so there is never more than one verification in flight, even when clones of the
/// widget are driven from separate tasks.
pub struct UploadWidget<V, N> {
    state: Arc<RwLock<WidgetState>>,
    verifier: Arc<V>,
    notifier: Arc<N>,
}

impl<V, N> Clone for UploadWidget<V, N> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            verifier: Arc::clone(&self.verifier),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

enum Begin {
    Verify(CertificationId),
    Done(SubmitOutcome),
}

impl<V, N> UploadWidget<V, N>
where
    V: Verifier,
    N: Notifier,
{
    pub fn new(verifier: V, notifier: N) -> Self {
        Self {
            state: Arc::new(RwLock::new(WidgetState::default())),
            verifier: Arc::new(verifier),
            notifier: Arc::new(notifier),
        }
    }

    pub async fn state(&self) -> WidgetState {
        self.state.read().await.clone()
    }

    pub async fn view(&self) -> View {
        View::from(&*self.state.read().await)
    }

    pub async fn drag_over(&self) {
        self.state.write().await.dragging = true;
    }

    pub async fn drag_leave(&self) {
        self.state.write().await.dragging = false;
    }

    pub async fn drop_file(&self, file: SelectedFile) -> SubmitOutcome {
        self.drag_leave().await;
        self.submit(file, InputSource::Drop).await
    }

    pub async fn pick_file(&self, file: SelectedFile) -> SubmitOutcome {
        self.submit(file, InputSource::Picker).await
    }

    /// Back to `idle` from a result. Returns false, changing nothing, in any other state.
    pub async fn reset(&self) -> bool {
        let mut state = self.state.write().await;
        if !state.status.is_terminal() {
            debug!("ignoring reset while {:?}", state.status);
            return false;
        }

        *state = WidgetState {
            dragging: state.dragging,
            ..WidgetState::default()
        };
        true
    }

    async fn submit(&self, file: SelectedFile, source: InputSource) -> SubmitOutcome {
        let id = match self.begin(&file, source).await {
            Begin::Verify(id) => id,
            Begin::Done(outcome) => return outcome,
        };

        info!("verifying certification from {}", file.name());
        let result = self.verifier.verify(id).await;

        let mut state = self.state.write().await;
        let (status, toast) = match result {
            Ok(verdict) if verdict.verified => {
                let message = verdict.message.into_owned();
                (Status::Verified, Toast::verification_complete(message))
            }
            Ok(verdict) => {
                let message = verdict.message.into_owned();
                (Status::Failed, Toast::verification_failed(message))
            }
            Err(report) => {
                warn!("verification request failed: {report:?}");
                (Status::Failed, Toast::error(report.current_context().to_string()))
            }
        };

        state.finish(status, toast.description.clone().unwrap_or_default());
        self.notifier.notify(toast);
        SubmitOutcome::Finished(status)
    }

    /// The status check, the parse and the move to `uploading` share one write lock, so a
    /// second submission can't slip in between them.
    async fn begin(&self, file: &SelectedFile, source: InputSource) -> Begin {
        // a wrong file type is reported whatever the widget is showing
        if !file.is_accepted_from(source) {
            self.notifier.notify(Toast::invalid_file_type());
            return Begin::Done(SubmitOutcome::Rejected);
        }

        let mut state = self.state.write().await;

        if state.status != Status::Idle {
            debug!("ignoring {} while {:?}", file.name(), state.status);
            return Begin::Done(SubmitOutcome::Ignored);
        }

        state.file_name = Some(file.name().to_string());

        let parsed = file
            .text()
            .ok_or(PayloadError::NotText)
            .and_then(payload::extract_certification_id);

        match parsed {
            Ok(id) => {
                state.status = Status::Uploading;
                state.message = None;
                Begin::Verify(id)
            }
            Err(e) => {
                let message = e.to_string();
                state.finish(Status::Failed, message.clone());
                self.notifier.notify(Toast::error(message));
                Begin::Done(SubmitOutcome::Finished(Status::Failed))
            }
        }
    }
}
