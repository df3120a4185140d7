use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::controller::state::{Notice, NoticeKind};
use crate::events::AppEvent;
use crate::theme::THEME;

/// Modal popup for the oldest pending notice. Swallows every key until dismissed.
pub struct NoticeOverlay;

impl NoticeOverlay {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key(&self, key: KeyEvent) -> Option<AppEvent> {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(AppEvent::DismissNotice),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, notice: Option<&Notice>, queued: usize) {
        let Some(notice) = notice else {
            return;
        };

        let popup_width = (area.width * 60 / 100).max(30).min(area.width);
        let popup_height = 7u16.min(area.height);
        let x = area.x + (area.width - popup_width) / 2;
        let y = area.y + (area.height - popup_height) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let color = THEME.notice_color(notice.kind);
        let title = match notice.kind {
            NoticeKind::Info => " Done ",
            NoticeKind::Warning => " Notice ",
            NoticeKind::Error => " Error ",
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(THEME.surface));

        let more = if queued > 1 {
            format!("  (+{} more)", queued - 1)
        } else {
            String::new()
        };
        let lines = vec![
            Line::from(Span::styled(
                notice.message.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    notice.raised_at.format("%H:%M:%S").to_string(),
                    THEME.muted_style(),
                ),
                Span::styled(more, THEME.muted_style()),
            ]),
            Line::from(Span::styled("[Enter] OK", THEME.accent_style())),
        ];

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_dismiss_keys() {
        let overlay = NoticeOverlay::new();
        for code in [KeyCode::Enter, KeyCode::Esc, KeyCode::Char(' ')] {
            assert_eq!(
                overlay.handle_key(KeyEvent::new(code, KeyModifiers::NONE)),
                Some(AppEvent::DismissNotice)
            );
        }
        assert_eq!(
            overlay.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            None
        );
    }
}
