use error_stack::{Report, ResultExt};
use std::path::Path;

pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, thiserror::Error)]
#[error("failed to read the selected file")]
pub struct FileReadError;

/// How a file reached the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Drop,
    Picker,
}

/// A file handed to the widget, with whatever content type the browser or OS declared
/// for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    content_type: Option<String>,
    contents: Vec<u8>,
}

impl SelectedFile {
    pub fn new(
        name: impl Into<String>,
        content_type: Option<&str>,
        contents: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.map(str::to_string),
            contents: contents.into(),
        }
    }

    /// Reads a file from disk the way a file picker would hand it over: `.json` files are
    /// declared as JSON, anything else has no declared type.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, Report<FileReadError>> {
        let path = path.as_ref();
        let contents = tokio::fs::read(path)
            .await
            .change_context(FileReadError)
            .attach_with(|| format!("path: {}", path.display()))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let content_type = has_json_extension(&name).then_some(JSON_CONTENT_TYPE);

        Ok(Self::new(name, content_type, contents))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.contents).ok()
    }

    /// Dropped files are judged on their declared type alone. Picked files with no
    /// declared type fall back to the file extension.
    pub fn is_accepted_from(&self, source: InputSource) -> bool {
        match (&self.content_type, source) {
            (Some(content_type), _) => is_json_content_type(content_type),
            (None, InputSource::Drop) => false,
            (None, InputSource::Picker) => has_json_extension(&self.name),
        }
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(JSON_CONTENT_TYPE))
}

fn has_json_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
