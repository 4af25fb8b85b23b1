//! File selection ahead of submission.

use std::io;
use std::path::Path;

use astem_models::is_video_file;

use crate::view::View;

/// A locally chosen file: name plus binary content.
///
/// Owned by the [`SelectionController`] until submission, at which
/// point ownership transfers to the workflow for one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    /// Read a local file into a selection candidate. Validation happens
    /// later, when the candidate is offered to the controller.
    pub async fn from_path(path: &Path) -> io::Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "path has no usable filename")
            })?
            .to_string();
        let content = tokio::fs::read(path).await?;
        Ok(Self { name, content })
    }
}

/// Mediates file selection and keeps the view's enablement in sync.
///
/// Any offered file runs through the extension validator. A valid file
/// replaces the current selection; an invalid one clears it, so a bad
/// pick is never silently shadowed by an earlier good one.
#[derive(Debug, Default)]
pub struct SelectionController {
    selected: Option<SelectedFile>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer one candidate file. Returns whether it was accepted.
    pub fn offer(&mut self, view: &mut impl View, file: SelectedFile) -> bool {
        if is_video_file(&file.name) {
            view.set_selected_file(Some(&file.name));
            self.selected = Some(file);
            true
        } else {
            self.selected = None;
            view.set_selected_file(None);
            false
        }
    }

    /// Offer a batch (multi-file drop or chooser selection); only the
    /// first file is considered.
    pub fn offer_first<I>(&mut self, view: &mut impl View, files: I) -> bool
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        match files.into_iter().next() {
            Some(file) => self.offer(view, file),
            None => {
                self.selected = None;
                view.set_selected_file(None);
                false
            }
        }
    }

    /// Transfer the selection to the caller for upload.
    pub fn take(&mut self) -> Option<SelectedFile> {
        self.selected.take()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.selected.as_ref().map(|f| f.name.as_str())
    }

    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }
}
