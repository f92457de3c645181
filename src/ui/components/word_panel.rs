use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::engine::profile::LearnerProfile;
use crate::session::controller::ViewState;
use crate::ui::theme::Theme;

/// Word-details sidebar: the selected word, its tags, and the translation
/// (or its loading/error state).
pub struct WordPanel<'a> {
    view: &'a ViewState,
    profile: &'a LearnerProfile,
    theme: &'a Theme,
}

impl<'a> WordPanel<'a> {
    pub fn new(view: &'a ViewState, profile: &'a LearnerProfile, theme: &'a Theme) -> Self {
        Self {
            view,
            profile,
            theme,
        }
    }
}

impl Widget for WordPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let mut lines: Vec<Line> = Vec::new();

        match &self.view.selected {
            None => {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Select a word to see its translation and details here.",
                    Style::default().fg(colors.fade_1()),
                )));
            }
            Some(token) => {
                lines.push(Line::from(Span::styled(
                    token.text.clone(),
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                )));

                let cefr = token
                    .cefr
                    .map(|l| l.as_str().to_string())
                    .unwrap_or_else(|| "N/A".to_string());
                lines.push(Line::from(Span::styled(
                    format!("CEFR: {cefr}  Importance: {}", token.importance),
                    Style::default().fg(colors.fade_2()),
                )));

                if self.profile.is_learned(&token.text) {
                    lines.push(Line::from(Span::styled(
                        "learned",
                        Style::default().fg(colors.success()),
                    )));
                }
                lines.push(Line::from(""));

                if self.view.translation_loading {
                    lines.push(Line::from(Span::styled(
                        "Translating...",
                        Style::default().fg(colors.warning()),
                    )));
                } else if let Some(result) = &self.view.translation {
                    match result {
                        Err(e) => {
                            lines.push(Line::from(Span::styled(
                                e.to_string(),
                                Style::default().fg(colors.error()),
                            )));
                        }
                        Ok(translation) => {
                            lines.push(Line::from(Span::styled(
                                "TRANSLATION",
                                Style::default().fg(colors.fade_1()),
                            )));
                            lines.push(Line::from(Span::styled(
                                translation.translation.clone(),
                                Style::default()
                                    .fg(colors.fg())
                                    .add_modifier(Modifier::BOLD),
                            )));
                            if let Some(root) = &translation.root {
                                lines.push(Line::from(""));
                                lines.push(Line::from(Span::styled(
                                    "ROOT",
                                    Style::default().fg(colors.fade_1()),
                                )));
                                lines.push(Line::from(Span::styled(
                                    root.clone(),
                                    Style::default().fg(colors.fg()),
                                )));
                            }
                            if let Some(example) = &translation.example {
                                lines.push(Line::from(""));
                                lines.push(Line::from(Span::styled(
                                    "EXAMPLE",
                                    Style::default().fg(colors.fade_1()),
                                )));
                                lines.push(Line::from(Span::styled(
                                    format!("\"{example}\""),
                                    Style::default()
                                        .fg(colors.fg())
                                        .add_modifier(Modifier::ITALIC),
                                )));
                            }
                        }
                    }
                }

                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "[l] Mark learned  [r] Review later",
                    Style::default().fg(colors.accent_dim()),
                )));
            }
        }

        let block = Block::bordered()
            .title(" Word Details ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
