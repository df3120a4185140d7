use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::{Component, FieldEdit, edit_field};
use crate::controller::state::{InputDraft, ViewState};
use crate::events::AppEvent;
use crate::theme::THEME;
use crate::utils;

/// Connection, balance and the contract address field.
pub struct WalletPanel {
    pub focused: bool,
    pub symbol: String,
    editing: bool,
}

impl WalletPanel {
    pub fn new(symbol: String) -> Self {
        Self {
            focused: true,
            symbol,
            editing: false,
        }
    }
}

impl Component for WalletPanel {
    fn handle_key(&mut self, key: KeyEvent, draft: &mut InputDraft) -> Option<AppEvent> {
        if self.editing {
            return match edit_field(&mut draft.pending_contract_address, key) {
                FieldEdit::Submit => {
                    self.editing = false;
                    Some(AppEvent::InitializeContract)
                }
                FieldEdit::Cancel => {
                    self.editing = false;
                    None
                }
                FieldEdit::Changed | FieldEdit::Ignored => None,
            };
        }

        match key.code {
            KeyCode::Char('c') => Some(AppEvent::ConnectWallet),
            KeyCode::Char('b') => Some(AppEvent::RefreshBalance),
            KeyCode::Char('e') | KeyCode::Char('a') => {
                self.editing = true;
                None
            }
            KeyCode::Char('i') | KeyCode::Enter => Some(AppEvent::InitializeContract),
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
            .title(" Wallet ")
            .borders(Borders::ALL)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let session = &state.session;
        let mut lines: Vec<Line> = Vec::new();

        match session.address.filter(|_| session.connected) {
            None => {
                lines.push(Line::from(Span::styled(
                    "  Not connected",
                    THEME.muted_style(),
                )));
                lines.push(Line::from(vec![
                    Span::styled("  [c] ", THEME.accent_style()),
                    Span::styled("Connect wallet", Style::default().fg(THEME.text)),
                ]));
            }
            Some(address) => {
                lines.push(Line::from(vec![
                    Span::styled("  Connected: ", THEME.heading_style()),
                    Span::styled(utils::short_address(&address), THEME.address_style()),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("  Balance:   ", THEME.heading_style()),
                    Span::styled(
                        utils::format_balance_with_symbol(session.balance_wei, &self.symbol),
                        THEME.eth_style(),
                    ),
                    Span::styled("  [b] refresh", THEME.muted_style()),
                ]));
            }
        }

        lines.push(Line::from(""));

        let cursor = if self.editing { "_" } else { "" };
        let field = if state.draft.pending_contract_address.is_empty() && !self.editing {
            Span::styled("Enter deployed contract address", THEME.muted_style())
        } else {
            Span::styled(
                format!("{}{cursor}", state.draft.pending_contract_address),
                THEME.input_style(self.editing),
            )
        };
        lines.push(Line::from(vec![Span::styled("  Contract:  ", THEME.heading_style()), field]));

        let hint = if self.editing {
            "  [Enter] Initialize contract  [Esc] Stop editing"
        } else {
            "  [e] Edit address  [i] Initialize contract"
        };
        lines.push(Line::from(Span::styled(hint, THEME.muted_style())));

        if let Some(contract) = &state.contract {
            lines.push(Line::from(vec![
                Span::styled("  Bound to:  ", THEME.muted_style()),
                Span::styled(format!("{}", contract.address), THEME.address_style()),
            ]));
        }

        let paragraph = Paragraph::new(lines).style(Style::default().fg(THEME.text));
        frame.render_widget(paragraph, inner);
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
