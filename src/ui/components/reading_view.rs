use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::engine::classify::classify;
use crate::engine::profile::LearnerProfile;
use crate::engine::token::Token;
use crate::ui::theme::Theme;

/// The emphasized document. Word emphasis comes straight from the
/// classification engine; the cursor token is rendered inverted.
pub struct ReadingView<'a> {
    tokens: &'a [Token],
    profile: &'a LearnerProfile,
    cursor: Option<usize>,
    scroll: u16,
    theme: &'a Theme,
}

impl<'a> ReadingView<'a> {
    pub fn new(
        tokens: &'a [Token],
        profile: &'a LearnerProfile,
        cursor: Option<usize>,
        scroll: u16,
        theme: &'a Theme,
    ) -> Self {
        Self {
            tokens,
            profile,
            cursor,
            scroll,
            theme,
        }
    }
}

/// Group token indices into display lines, splitting on line-break markers.
/// The markers themselves are not rendered.
fn group_into_lines(tokens: &[Token]) -> Vec<Vec<usize>> {
    let mut lines: Vec<Vec<usize>> = vec![Vec::new()];
    for (i, token) in tokens.iter().enumerate() {
        if token.is_line_break() {
            lines.push(Vec::new());
        } else {
            lines.last_mut().unwrap().push(i);
        }
    }
    lines
}

impl Widget for ReadingView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let lines: Vec<Line> = group_into_lines(self.tokens)
            .into_iter()
            .map(|indices| {
                let mut spans: Vec<Span> = Vec::new();
                for i in indices {
                    let token = &self.tokens[i];
                    let style = if self.cursor == Some(i) {
                        Style::default()
                            .fg(colors.selection_fg())
                            .bg(colors.selection_bg())
                    } else {
                        match classify(token, self.profile) {
                            Some(category) => colors.category_style(category),
                            // Untagged non-break token: render as plain text
                            None => Style::default().fg(colors.fg()),
                        }
                    };
                    spans.push(Span::styled(token.text.clone(), style));
                    spans.push(Span::raw(" "));
                }
                Line::from(spans)
            })
            .collect();

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));

        paragraph.render(area, buf);
    }
}
