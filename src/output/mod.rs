pub mod html;
pub mod text;

use std::io::Write;
use std::path::PathBuf;

use crate::render::Frame;
use crate::runner::FrameSink;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

pub fn render_json(frame: &Frame) -> Vec<u8> {
    let mut out = serde_json::to_vec_pretty(frame).unwrap_or_else(|_| b"{}".to_vec());
    out.push(b'\n');
    out
}

pub fn render(frame: &Frame, format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Text => text::render_text(frame),
        OutputFormat::Json => render_json(frame),
        OutputFormat::Html => html::render_html(frame),
    }
}

/// Prints every frame to stdout and keeps the latest one in `output` when
/// set, in that file's own format.
pub struct StdoutSink {
    format: OutputFormat,
    output: Option<(PathBuf, OutputFormat)>,
}

impl StdoutSink {
    pub fn new(format: OutputFormat, output: Option<(PathBuf, OutputFormat)>) -> Self {
        Self { format, output }
    }
}

impl FrameSink for StdoutSink {
    fn present(&mut self, frame: &Frame) {
        let rendered = render(frame, self.format);
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout.write_all(&rendered).and_then(|_| stdout.flush()) {
            tracing::warn!(error = %e, "failed to write frame to stdout");
        }
        if let Some((path, format)) = self.output.as_ref() {
            if let Err(e) = std::fs::write(path, render(frame, *format)) {
                tracing::warn!(path = %path.display(), error = %e, "failed to write output file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::overview::OverviewFrame;
    use crate::render::Panel;

    #[test]
    fn format_is_inferred_from_extension() {
        assert_eq!(infer_format_from_path("out.JSON"), Some(OutputFormat::Json));
        assert_eq!(infer_format_from_path("report.htm"), Some(OutputFormat::Html));
        assert_eq!(infer_format_from_path("notes.txt"), Some(OutputFormat::Text));
        assert_eq!(infer_format_from_path("frame.xml"), None);
        assert_eq!(OutputFormat::parse(" HTML "), Some(OutputFormat::Html));
        assert_eq!(OutputFormat::parse("xml"), None);
    }

    #[test]
    fn json_frame_is_tagged_by_page() {
        let frame = Frame::Overview(OverviewFrame {
            tick: 1,
            stats: Panel::Loading,
            latest_jobs: Panel::Empty("Aucun job trouvé".to_string()),
            logs: Panel::Failed("Erreur de chargement".to_string()),
        });
        let value: serde_json::Value = serde_json::from_slice(&render_json(&frame)).unwrap();
        assert_eq!(value["page"], "overview");
        assert_eq!(value["stats"]["state"], "loading");
        assert_eq!(value["logs"]["data"], "Erreur de chargement");
    }
}
