//! Video filename validation.

/// File extensions accepted for upload.
pub const ALLOWED_VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm", "m4v"];

/// Classify a filename as an acceptable video file.
///
/// Takes the substring after the last `.`, lower-cases it and checks it
/// against [`ALLOWED_VIDEO_EXTENSIONS`]. A name with no `.` (or nothing
/// after it) is not a video file; there is no error condition.
pub fn is_video_file(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_VIDEO_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}
