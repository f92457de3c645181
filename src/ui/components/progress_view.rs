use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::engine::profile::LearnerProfile;
use crate::ui::theme::Theme;

/// Learning progress dashboard: the study list (review queue) next to the
/// mastered words. Review rows are navigable; deletion asks for confirmation.
pub struct ProgressView<'a> {
    profile: &'a LearnerProfile,
    selected: usize,
    confirm_delete: bool,
    theme: &'a Theme,
}

impl<'a> ProgressView<'a> {
    pub fn new(
        profile: &'a LearnerProfile,
        selected: usize,
        confirm_delete: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            profile,
            selected,
            confirm_delete,
            theme,
        }
    }
}

impl Widget for ProgressView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        // Study list
        let mut review_lines: Vec<Line> = Vec::new();
        if self.profile.review_list.is_empty() {
            review_lines.push(Line::from(Span::styled(
                "No words saved for review yet.",
                Style::default().fg(colors.fade_1()),
            )));
        } else {
            for (i, (word, entry)) in self.profile.review_list.iter().enumerate() {
                let is_selected = i == self.selected;
                let indicator = if is_selected { "> " } else { "  " };
                let level = entry
                    .cefr
                    .map(|l| l.as_str().to_string())
                    .unwrap_or_else(|| "--".to_string());
                let translation = entry
                    .translation
                    .as_ref()
                    .map(|t| t.translation.as_str())
                    .unwrap_or("...");

                let word_style = if is_selected {
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg())
                };
                review_lines.push(Line::from(vec![
                    Span::styled(format!("{indicator}{word}"), word_style),
                    Span::styled(
                        format!("  {translation}  [{level}]"),
                        Style::default().fg(colors.fade_2()),
                    ),
                ]));
            }
        }
        if self.confirm_delete {
            review_lines.push(Line::from(""));
            review_lines.push(Line::from(Span::styled(
                "Remove from study list? [y/n]",
                Style::default().fg(colors.warning()),
            )));
        }

        let review_block = Block::bordered()
            .title(format!(
                " Study List ({}) ",
                self.profile.review_list.len()
            ))
            .border_style(Style::default().fg(colors.warning()))
            .style(Style::default().bg(colors.bg()));
        Paragraph::new(review_lines)
            .block(review_block)
            .render(columns[0], buf);

        // Mastered words
        let learned_lines: Vec<Line> = if self.profile.learned_words.is_empty() {
            vec![Line::from(Span::styled(
                "None yet. Mark words to see them here!",
                Style::default().fg(colors.fade_1()),
            ))]
        } else {
            let joined = self
                .profile
                .learned_words
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join("  ");
            vec![Line::from(Span::styled(
                joined,
                Style::default().fg(colors.success()),
            ))]
        };

        let learned_block = Block::bordered()
            .title(format!(
                " Mastered Words ({}) ",
                self.profile.learned_words.len()
            ))
            .border_style(Style::default().fg(colors.success()))
            .style(Style::default().bg(colors.bg()));
        Paragraph::new(learned_lines)
            .block(learned_block)
            .wrap(Wrap { trim: true })
            .render(columns[1], buf);
    }
}
