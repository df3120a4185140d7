pub mod counter_panel;
pub mod header;
pub mod help;
pub mod notice;
pub mod status_bar;
pub mod wallet_panel;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::controller::state::{InputDraft, ViewState};
use crate::events::AppEvent;

/// Trait for the focusable panels
pub trait Component {
    /// Handle a key event, optionally returning an AppEvent.
    /// Text fields write straight into `draft`.
    fn handle_key(&mut self, key: KeyEvent, draft: &mut InputDraft) -> Option<AppEvent>;

    /// Render the component into the given area
    fn render(&mut self, frame: &mut Frame, area: Rect, state: &ViewState);

    /// True while a text field owns the keyboard
    fn is_editing(&self) -> bool;

    fn set_focused(&mut self, focused: bool);
}

/// Outcome of a key press inside a text field.
#[derive(Debug, PartialEq, Eq)]
pub enum FieldEdit {
    Changed,
    Submit,
    Cancel,
    Ignored,
}

/// Apply a key press to a single-line text field.
pub fn edit_field(field: &mut String, key: KeyEvent) -> FieldEdit {
    match key.code {
        KeyCode::Enter => FieldEdit::Submit,
        KeyCode::Esc => FieldEdit::Cancel,
        KeyCode::Backspace => {
            field.pop();
            FieldEdit::Changed
        }
        KeyCode::Char(c) => {
            field.push(c);
            FieldEdit::Changed
        }
        _ => FieldEdit::Ignored,
    }
}
