use crate::errors::{FoundryError, FoundryResult, NotFoundError, ValidationError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartBody {
    /// Binary part streamed from this path when the request is sent.
    File(PathBuf),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub body: PartBody,
}

impl MultipartPart {
    pub fn is_binary(&self) -> bool {
        matches!(self.body, PartBody::File(_))
    }
}

/// Ordered description of a multipart/form-data body.
///
/// Kept declarative until dispatch so both transports can turn it into a
/// streaming reqwest form and tests can inspect it without I/O.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    parts: Vec<MultipartPart>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binary part read from `path`; content type follows the extension.
    pub fn file(mut self, name: &str, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{name}.png"));
        self.parts.push(MultipartPart {
            name: name.to_string(),
            file_name: Some(file_name),
            content_type: Some(content_type_for(path).to_string()),
            body: PartBody::File(path.to_path_buf()),
        });
        self
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parts.push(MultipartPart {
            name: name.to_string(),
            file_name: None,
            content_type: None,
            body: PartBody::Text(value.into()),
        });
        self
    }

    pub fn parts(&self) -> &[MultipartPart] {
        &self.parts
    }

    pub fn binary_parts(&self) -> impl Iterator<Item = &MultipartPart> {
        self.parts.iter().filter(|p| p.is_binary())
    }

    pub fn text_parts(&self) -> impl Iterator<Item = &MultipartPart> {
        self.parts.iter().filter(|p| !p.is_binary())
    }

    /// Builds a form whose file parts are streamed through tokio.
    pub async fn into_async_form(self) -> FoundryResult<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            match part.body {
                PartBody::Text(value) => {
                    form = form.text(part.name, value);
                }
                PartBody::File(path) => {
                    let file = tokio::fs::File::open(&path)
                        .await
                        .map_err(|e| open_error(&part.name, &path, e))?;
                    let len = file
                        .metadata()
                        .await
                        .map_err(|e| FoundryError::io(&path, e))?
                        .len();
                    let stream = tokio_util::io::ReaderStream::new(file);
                    let mut file_part = reqwest::multipart::Part::stream_with_length(
                        reqwest::Body::wrap_stream(stream),
                        len,
                    );
                    if let Some(file_name) = part.file_name {
                        file_part = file_part.file_name(file_name);
                    }
                    if let Some(content_type) = part.content_type {
                        file_part = file_part
                            .mime_str(&content_type)
                            .map_err(|e| invalid_mime(&content_type, e))?;
                    }
                    form = form.part(part.name, file_part);
                }
            }
        }
        Ok(form)
    }

    /// Builds a form whose file parts are read from disk as the body is written.
    pub fn into_blocking_form(self) -> FoundryResult<reqwest::blocking::multipart::Form> {
        let mut form = reqwest::blocking::multipart::Form::new();
        for part in self.parts {
            match part.body {
                PartBody::Text(value) => {
                    form = form.text(part.name, value);
                }
                PartBody::File(path) => {
                    let file = std::fs::File::open(&path)
                        .map_err(|e| open_error(&part.name, &path, e))?;
                    let len = file
                        .metadata()
                        .map_err(|e| FoundryError::io(&path, e))?
                        .len();
                    let mut file_part =
                        reqwest::blocking::multipart::Part::reader_with_length(file, len);
                    if let Some(file_name) = part.file_name {
                        file_part = file_part.file_name(file_name);
                    }
                    if let Some(content_type) = part.content_type {
                        file_part = file_part
                            .mime_str(&content_type)
                            .map_err(|e| invalid_mime(&content_type, e))?;
                    }
                    form = form.part(part.name, file_part);
                }
            }
        }
        Ok(form)
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => mime::IMAGE_PNG.as_ref(),
        "jpg" | "jpeg" => mime::IMAGE_JPEG.as_ref(),
        "gif" => mime::IMAGE_GIF.as_ref(),
        "webp" => "image/webp",
        _ => mime::APPLICATION_OCTET_STREAM.as_ref(),
    }
}

fn open_error(name: &str, path: &Path, err: std::io::Error) -> FoundryError {
    if err.kind() == ErrorKind::NotFound {
        FoundryError::NotFound(NotFoundError {
            role: part_role(name),
            path: path.to_path_buf(),
        })
    } else {
        FoundryError::io(path, err)
    }
}

fn part_role(name: &str) -> &'static str {
    match name {
        "mask" => "mask",
        _ => "image",
    }
}

fn invalid_mime(content_type: &str, err: reqwest::Error) -> FoundryError {
    FoundryError::Validation(ValidationError::InvalidParameter {
        parameter: "content_type".to_string(),
        reason: format!("{content_type}: {err}"),
    })
}
