use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::{Component, FieldEdit, edit_field};
use crate::controller::state::{InputDraft, ViewState};
use crate::events::AppEvent;
use crate::theme::THEME;
use crate::view::{self, SliceView};

/// Num, array length, sliced array and the setNum form.
pub struct CounterPanel {
    pub focused: bool,
    editing: bool,
    list_state: ListState,
}

impl CounterPanel {
    pub fn new() -> Self {
        Self {
            focused: false,
            editing: false,
            list_state: ListState::default(),
        }
    }
}

impl Component for CounterPanel {
    fn handle_key(&mut self, key: KeyEvent, draft: &mut InputDraft) -> Option<AppEvent> {
        if self.editing {
            return match edit_field(&mut draft.pending_num, key) {
                FieldEdit::Submit => {
                    self.editing = false;
                    Some(AppEvent::SubmitNum)
                }
                FieldEdit::Cancel => {
                    self.editing = false;
                    None
                }
                FieldEdit::Changed | FieldEdit::Ignored => None,
            };
        }

        match key.code {
            KeyCode::Char('r') => Some(AppEvent::RefreshNum),
            KeyCode::Char('l') => Some(AppEvent::RefreshArrayLength),
            KeyCode::Char('g') => Some(AppEvent::RefreshSlicedArray),
            KeyCode::Char('n') | KeyCode::Char('e') => {
                self.editing = true;
                None
            }
            KeyCode::Enter => Some(AppEvent::SubmitNum),
            KeyCode::Char('j') | KeyCode::Down => {
                self.list_state.select_next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.list_state.select_previous();
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &ViewState) {
        let border = if self.focused {
            THEME.border_focused_style()
        } else {
            THEME.border_style()
        };
        let block = Block::default()
            .title(" Counter ")
            .borders(Borders::ALL)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(handle) = &state.contract else {
            let text = Paragraph::new("No contract initialized")
                .style(THEME.muted_style())
                .alignment(Alignment::Center);
            frame.render_widget(text, inner);
            return;
        };

        let warning = view::length_warning(handle.num, handle.array_length);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // num / set num / length
                Constraint::Min(3),    // sliced array
                Constraint::Length(if warning.is_some() { 1 } else { 0 }),
            ])
            .split(inner);

        // -- Values and form --
        let cursor = if self.editing { "_" } else { "" };
        let input = if state.draft.pending_num.is_empty() && !self.editing {
            Span::styled("Enter new number", THEME.muted_style())
        } else {
            Span::styled(
                format!("{}{cursor}", state.draft.pending_num),
                THEME.input_style(self.editing),
            )
        };
        let submit_hint = if self.editing {
            "  [Enter] Set Num (pay gas)  [Esc] Stop editing"
        } else {
            "  [n] Edit  [Enter] Set Num (pay gas)"
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(format!("  {}", view::num_line(handle.num)), THEME.heading_style()),
                Span::styled("  [r] refresh", THEME.muted_style()),
            ]),
            Line::from(""),
            Line::from(vec![Span::styled("  Set New Num: ", THEME.heading_style()), input]),
            Line::from(Span::styled(submit_hint, THEME.muted_style())),
            Line::from(vec![
                Span::styled(
                    format!("  {}", view::array_length_line(handle.array_length)),
                    THEME.heading_style(),
                ),
                Span::styled("  [l] refresh", THEME.muted_style()),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().fg(THEME.text)),
            chunks[0],
        );

        // -- Sliced array --
        let slice_block = Block::default()
            .title(format!(" {}  [g] get ", view::slice_title(handle.num)))
            .borders(Borders::TOP)
            .border_style(THEME.border_style());

        match view::slice_view(handle) {
            SliceView::Items(items) => {
                let list_items: Vec<ListItem> = items
                    .iter()
                    .map(|word| ListItem::new(format!("  \u{2022} {word}")))
                    .collect();
                let list = List::new(list_items)
                    .block(slice_block)
                    .style(Style::default().fg(THEME.text))
                    .highlight_style(THEME.accent_style().add_modifier(Modifier::BOLD));
                frame.render_stateful_widget(list, chunks[1], &mut self.list_state);
            }
            SliceView::NoItems => {
                let text = Paragraph::new(format!("  {}", view::NO_ITEMS))
                    .block(slice_block)
                    .style(THEME.muted_style());
                frame.render_widget(text, chunks[1]);
            }
            SliceView::Prompt => {
                let text = Paragraph::new(format!("  {}", view::FETCH_PROMPT))
                    .block(slice_block)
                    .style(THEME.muted_style());
                frame.render_widget(text, chunks[1]);
            }
        }

        // -- Warning --
        if let Some(warning) = warning {
            let text = Paragraph::new(format!("  {warning}")).style(THEME.warning_style());
            frame.render_widget(text, chunks[2]);
        }
    }

    fn is_editing(&self) -> bool {
        self.editing
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.editing = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_refresh_keys() {
        let mut panel = CounterPanel::new();
        let mut draft = InputDraft::default();
        assert_eq!(
            panel.handle_key(key(KeyCode::Char('r')), &mut draft),
            Some(AppEvent::RefreshNum)
        );
        assert_eq!(
            panel.handle_key(key(KeyCode::Char('l')), &mut draft),
            Some(AppEvent::RefreshArrayLength)
        );
        assert_eq!(
            panel.handle_key(key(KeyCode::Char('g')), &mut draft),
            Some(AppEvent::RefreshSlicedArray)
        );
    }

    #[test]
    fn test_editing_captures_refresh_letters() {
        let mut panel = CounterPanel::new();
        let mut draft = InputDraft::default();
        panel.handle_key(key(KeyCode::Char('n')), &mut draft);
        // 'r' is text while editing, not a refresh
        assert_eq!(panel.handle_key(key(KeyCode::Char('r')), &mut draft), None);
        assert_eq!(draft.pending_num, "r");
    }

    #[test]
    fn test_enter_submits_draft() {
        let mut panel = CounterPanel::new();
        let mut draft = InputDraft::default();
        panel.handle_key(key(KeyCode::Char('n')), &mut draft);
        panel.handle_key(key(KeyCode::Char('-')), &mut draft);
        panel.handle_key(key(KeyCode::Char('1')), &mut draft);
        assert_eq!(
            panel.handle_key(key(KeyCode::Enter), &mut draft),
            Some(AppEvent::SubmitNum)
        );
        assert_eq!(draft.pending_num, "-1");
        assert!(!panel.is_editing());
    }

    #[test]
    fn test_escape_keeps_draft() {
        let mut panel = CounterPanel::new();
        let mut draft = InputDraft::default();
        panel.handle_key(key(KeyCode::Char('n')), &mut draft);
        panel.handle_key(key(KeyCode::Char('5')), &mut draft);
        assert_eq!(panel.handle_key(key(KeyCode::Esc), &mut draft), None);
        assert_eq!(draft.pending_num, "5");
        assert!(!panel.is_editing());
    }
}
