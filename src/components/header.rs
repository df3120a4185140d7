use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;

pub struct Header {
    pub chain_name: String,
    pub wallet_available: bool,
    pub connected: bool,
}

impl Header {
    pub fn new(chain_name: String, wallet_available: bool) -> Self {
        Self {
            chain_name,
            wallet_available,
            connected: false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        // Background for the entire header bar
        let header_block = Block::default().style(THEME.header_style());
        frame.render_widget(header_block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(16), Constraint::Min(0)])
            .split(area);

        let title = Paragraph::new(Span::styled(
            " counter-tui",
            Style::default()
                .fg(THEME.text_accent)
                .add_modifier(Modifier::BOLD),
        ))
        .style(THEME.header_style());
        frame.render_widget(title, chunks[0]);

        let (dot_color, status_text) = match (self.wallet_available, self.connected) {
            (false, _) => (THEME.text_muted, "No wallet"),
            (true, false) => (THEME.error, "Disconnected"),
            (true, true) => (THEME.success, "Connected"),
        };
        let network_info = Line::from(vec![
            Span::styled(self.chain_name.as_str(), Style::default().fg(THEME.text)),
            Span::styled(" | ", THEME.muted_style()),
            Span::styled("\u{25cf} ", Style::default().fg(dot_color)),
            Span::styled(status_text, Style::default().fg(dot_color)),
            Span::raw(" "),
        ]);
        let network_paragraph = Paragraph::new(network_info)
            .alignment(Alignment::Right)
            .style(THEME.header_style());
        frame.render_widget(network_paragraph, chunks[1]);
    }
}
