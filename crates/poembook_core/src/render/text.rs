//! Plain-text render sink for terminals.

use super::{DetailView, ListEntry, PoetCard, RenderSink, TagControl};
use crate::source::FetchError;
use std::fmt::Write;

const TITLE_COLUMN_WIDTH: usize = 32;

/// Render sink that writes every view into an in-memory text buffer.
#[derive(Debug, Default)]
pub struct TextRenderer {
    output: String,
    show_excerpts: bool,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints a body preview under each list row.
    pub fn with_excerpts(mut self, enabled: bool) -> Self {
        self.show_excerpts = enabled;
        self
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Returns the buffered text and clears the buffer.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Appends the poets directory.
    pub fn render_poets(&mut self, cards: &[PoetCard]) {
        for card in cards {
            let _ = writeln!(self.output, "{} [{}]", card.name, card.photo);
            if !card.bio.is_empty() {
                let _ = writeln!(self.output, "  {}", card.bio);
            }
            let _ = writeln!(self.output, "  Joined: {}", card.joined);
        }
    }
}

impl RenderSink for TextRenderer {
    fn render_tags(&mut self, controls: &[TagControl]) {
        let captions: Vec<String> = controls
            .iter()
            .map(|control| {
                if control.active {
                    format!("[{}]", control.caption())
                } else {
                    control.caption()
                }
            })
            .collect();
        let _ = writeln!(self.output, "Tags: {}", captions.join("  "));
    }

    fn render_list(&mut self, entries: &[ListEntry]) {
        if entries.is_empty() {
            let _ = writeln!(self.output, "(no poems match)");
            return;
        }
        for entry in entries {
            let marker = if entry.active { '>' } else { ' ' };
            let thumb = if entry.thumbnail.is_some() { '▣' } else { ' ' };
            let _ = writeln!(
                self.output,
                "{marker} {thumb} {:<width$} {:>4}  {}",
                entry.title,
                entry.id,
                entry.subtitle.as_deref().unwrap_or(""),
                width = TITLE_COLUMN_WIDTH
            );
            if self.show_excerpts {
                if let Some(excerpt) = &entry.excerpt {
                    let _ = writeln!(self.output, "      {excerpt}");
                }
            }
        }
    }

    fn render_detail(&mut self, detail: &DetailView) {
        let _ = writeln!(self.output, "----");
        let _ = writeln!(self.output, "{}", detail.title);
        let _ = writeln!(
            self.output,
            "✍️ {} • {}",
            detail.poet_name, detail.created_at
        );
        let _ = writeln!(self.output);
        for line in &detail.lines {
            let _ = writeln!(self.output, "{line}");
        }
    }

    fn render_load_failure(&mut self, error: &FetchError) {
        let _ = writeln!(self.output, "failed to load poems: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::TextRenderer;
    use crate::render::{DetailView, ListEntry, RenderSink};
    use crate::source::FetchError;

    #[test]
    fn list_marks_active_row() {
        let mut renderer = TextRenderer::new();
        renderer.render_list(&[
            ListEntry {
                id: "1".into(),
                title: "Sky".to_string(),
                thumbnail: None,
                subtitle: Some("2023-01-01".to_string()),
                excerpt: None,
                active: false,
            },
            ListEntry {
                id: "2".into(),
                title: "Rain".to_string(),
                thumbnail: None,
                subtitle: None,
                excerpt: None,
                active: true,
            },
        ]);
        let lines: Vec<&str> = renderer.output().lines().collect();
        assert!(lines[0].starts_with("  "));
        assert!(lines[1].starts_with('>'));
        assert!(lines[1].contains("Rain"));
    }

    #[test]
    fn detail_preserves_body_lines_and_failure_is_visible() {
        let mut renderer = TextRenderer::new();
        renderer.render_detail(&DetailView {
            poem_id: "1".into(),
            title: "Sky".to_string(),
            poet_name: "Unknown".to_string(),
            poet_known: false,
            created_at: String::new(),
            lines: vec!["one".to_string(), "two".to_string()],
        });
        assert!(renderer.output().ends_with("one\ntwo\n"));

        renderer.render_load_failure(&FetchError::Status {
            path: "data/poems.json".to_string(),
            status: 404,
        });
        let output = renderer.take_output();
        assert!(output.contains("failed to load poems"));
        assert!(renderer.output().is_empty());
    }
}
