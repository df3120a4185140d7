use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::controller::state::ViewState;
use crate::theme::THEME;
use crate::utils;

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &ViewState,
        editing: bool,
        busy: bool,
    ) {
        // Background
        let bg = Block::default().style(THEME.header_style());
        frame.render_widget(bg, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(44)])
            .split(area);

        // --- Left side: key hints ---
        let hints: &[(&str, &str)] = if editing {
            &[("Enter", ":Submit  "), ("Esc", ":Stop editing")]
        } else {
            &[
                ("Tab", ":Panel  "),
                ("c", ":Connect  "),
                ("?", ":Help  "),
                ("q", ":Quit"),
            ]
        };
        let mut spans = vec![Span::raw(" ")];
        for (key, label) in hints {
            spans.push(Span::styled(*key, Style::default().fg(THEME.text_accent)));
            spans.push(Span::styled(*label, Style::default().fg(THEME.text_muted)));
        }
        let left = Paragraph::new(Line::from(spans)).style(THEME.header_style());
        frame.render_widget(left, chunks[0]);

        // --- Right side: pending transactions + last tx hash ---
        let mut right = Vec::new();
        if busy {
            right.push(Span::styled("Loading...", THEME.accent_style()));
            right.push(Span::styled(" | ", THEME.muted_style()));
        }
        if state.pending_txs > 0 {
            right.push(Span::styled(
                format!("{} tx pending", state.pending_txs),
                Style::default().fg(THEME.warning),
            ));
            right.push(Span::styled(" | ", THEME.muted_style()));
        }
        match state.last_tx {
            Some(hash) => {
                right.push(Span::styled("last tx ", THEME.muted_style()));
                right.push(Span::styled(utils::truncate_hash(&hash), THEME.hash_style()));
            }
            None => right.push(Span::styled("no tx yet", THEME.muted_style())),
        }
        right.push(Span::raw(" "));

        let right = Paragraph::new(Line::from(right))
            .alignment(Alignment::Right)
            .style(THEME.header_style());
        frame.render_widget(right, chunks[1]);
    }
}
