//! Presentation layer: view-model and renderers.
//!
//! All presentation surfaces live behind one constructed [`ViewModel`]
//! passed explicitly to the components that mutate it; exactly one of
//! the progress/result/error panels is visible once a submission has
//! begun, and none before.

use url::Url;

/// The mutually exclusive presentation panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Upload or processing underway
    Progress,
    /// Job finished, download link available
    Result,
    /// Submission or job failed
    Error,
}

/// Operations the workflow performs against the presentation layer.
pub trait View {
    /// Display (or clear) the selected file's name and toggle
    /// submission availability accordingly.
    fn set_selected_file(&mut self, name: Option<&str>);

    /// Busy flag over the submission control: disabled with a loader
    /// while a session is in flight, restored afterwards.
    fn set_busy(&mut self, busy: bool);

    /// Update the progress percentage and message line.
    fn set_progress(&mut self, percent: u8, message: &str);

    /// Switch to the progress panel.
    fn show_progress(&mut self);

    /// Switch to the result panel and bind the download target.
    fn show_result(&mut self, download_url: &Url);

    /// Switch to the error panel with a message.
    fn show_error(&mut self, message: &str);
}

/// Plain state holder implementing [`View`]; renderers wrap it.
#[derive(Debug, Default)]
pub struct ViewModel {
    pub panel: Panel,
    pub busy: bool,
    pub selected_file: Option<String>,
    pub percent: u8,
    pub message: String,
    pub download_url: Option<Url>,
}

impl ViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a valid file is selected and no session is in flight.
    pub fn can_submit(&self) -> bool {
        self.selected_file.is_some() && !self.busy
    }
}

impl View for ViewModel {
    fn set_selected_file(&mut self, name: Option<&str>) {
        self.selected_file = name.map(str::to_string);
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    fn set_progress(&mut self, percent: u8, message: &str) {
        self.percent = percent;
        self.message = message.to_string();
    }

    fn show_progress(&mut self) {
        self.panel = Panel::Progress;
        self.download_url = None;
    }

    fn show_result(&mut self, download_url: &Url) {
        self.panel = Panel::Result;
        self.download_url = Some(download_url.clone());
    }

    fn show_error(&mut self, message: &str) {
        self.panel = Panel::Error;
        self.download_url = None;
        self.message = message.to_string();
    }
}

/// Terminal renderer: keeps the view-model and echoes transitions to
/// stdout.
#[derive(Debug, Default)]
pub struct ConsoleView {
    model: ViewModel,
    last_line: Option<String>,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(&self) -> &ViewModel {
        &self.model
    }

    fn print_progress_line(&mut self) {
        let line = format!("{:>3}% {}", self.model.percent, self.model.message);
        // Only repaint when something changed; polls repeat identical
        // snapshots while the backend works.
        if self.last_line.as_deref() != Some(&line) {
            println!("{line}");
            self.last_line = Some(line);
        }
    }
}

impl View for ConsoleView {
    fn set_selected_file(&mut self, name: Option<&str>) {
        self.model.set_selected_file(name);
        match name {
            Some(n) => println!("Selected: {n}"),
            None => println!("No supported video file selected"),
        }
    }

    fn set_busy(&mut self, busy: bool) {
        self.model.set_busy(busy);
    }

    fn set_progress(&mut self, percent: u8, message: &str) {
        self.model.set_progress(percent, message);
        self.print_progress_line();
    }

    fn show_progress(&mut self) {
        self.model.show_progress();
    }

    fn show_result(&mut self, download_url: &Url) {
        self.model.show_result(download_url);
        println!("Done. Download the extracted audio at: {download_url}");
    }

    fn show_error(&mut self, message: &str) {
        self.model.show_error(message);
        eprintln!("Error: {message}");
    }
}
