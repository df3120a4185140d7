use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::prelude::*;
use ratatui::widgets::*;
use tokio::sync::mpsc;

use crate::components::Component;
use crate::components::counter_panel::CounterPanel;
use crate::components::header::Header;
use crate::components::help::HelpOverlay;
use crate::components::notice::NoticeOverlay;
use crate::components::status_bar::StatusBar;
use crate::components::wallet_panel::WalletPanel;
use crate::controller::Controller;
use crate::events::AppEvent;
use crate::theme::THEME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Wallet,
    Counter,
}

pub struct App {
    focus: Focus,

    // Components
    header: Header,
    wallet_panel: WalletPanel,
    counter_panel: CounterPanel,
    status_bar: StatusBar,
    notice: NoticeOverlay,
    help: HelpOverlay,

    // Data
    controller: Controller,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,

    // State
    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    pub fn new(
        controller: Controller,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        header: Header,
        symbol: String,
        tick_rate_ms: u64,
    ) -> Self {
        Self {
            focus: Focus::Wallet,
            header,
            wallet_panel: WalletPanel::new(symbol),
            counter_panel: CounterPanel::new(),
            status_bar: StatusBar::new(),
            notice: NoticeOverlay::new(),
            help: HelpOverlay::new(),
            controller,
            event_rx,
            should_quit: false,
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    pub async fn run(&mut self, mut terminal: ratatui::DefaultTerminal) -> color_eyre::Result<()> {
        let mut interval = tokio::time::interval(self.tick_rate);
        let mut events = EventStream::new();

        while !self.should_quit {
            tokio::select! {
                _ = interval.tick() => {
                    terminal.draw(|frame| self.render(frame))?;
                }
                Some(Ok(event)) = events.next() => {
                    self.handle_terminal_event(event);
                }
                Some(app_event) = self.event_rx.recv() => {
                    self.handle_app_event(app_event);
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Fill background
        frame.render_widget(
            Block::default().style(Style::default().bg(THEME.bg)),
            area,
        );

        // Layout: header (1) | wallet | counter | status bar (1)
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(9),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let state = self.controller.state();
        self.header.connected = state.session.connected;
        self.header.render(frame, chunks[0]);
        self.wallet_panel.render(frame, chunks[1], state);
        self.counter_panel.render(frame, chunks[2], state);

        let editing = self.wallet_panel.is_editing() || self.counter_panel.is_editing();
        let busy = !self.controller.is_idle();
        self.status_bar.render(frame, chunks[3], state, editing, busy);

        // Overlays (rendered on top)
        self.help.render(frame, area);
        self.notice.render(frame, area, state.notice(), state.notices.len());
    }

    fn focused_panel(&mut self) -> &mut dyn Component {
        match self.focus {
            Focus::Wallet => &mut self.wallet_panel,
            Focus::Counter => &mut self.counter_panel,
        }
    }

    fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Wallet => Focus::Counter,
            Focus::Counter => Focus::Wallet,
        };
        self.wallet_panel.set_focused(self.focus == Focus::Wallet);
        self.counter_panel.set_focused(self.focus == Focus::Counter);
    }

    fn handle_terminal_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only handle key press events (not release/repeat) for cross-platform compat
            if key.kind != KeyEventKind::Press {
                return;
            }
            if let Some(app_event) = self.handle_key(key) {
                self.handle_app_event(app_event);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(AppEvent::Quit);
        }

        // A pending notice blocks everything else
        if self.controller.state().notice().is_some() {
            return self.notice.handle_key(key);
        }

        // Help overlay consumes all keys when visible
        if self.help.handle_key(key) {
            return None;
        }

        if !self.focused_panel().is_editing() {
            match key.code {
                KeyCode::Char('q') => return Some(AppEvent::Quit),
                KeyCode::Char('?') => {
                    self.help.toggle();
                    return None;
                }
                KeyCode::Tab | KeyCode::BackTab => {
                    self.cycle_focus();
                    return None;
                }
                _ => {}
            }
        }

        let focus = self.focus;
        let draft = self.controller.draft_mut();
        match focus {
            Focus::Wallet => self.wallet_panel.handle_key(key, draft),
            Focus::Counter => self.counter_panel.handle_key(key, draft),
        }
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Quit => self.should_quit = true,
            AppEvent::InitializeContract => {
                self.controller.handle_event(event);
                // Move to the counter once a binding exists
                if self.controller.state().contract.is_some() && self.focus == Focus::Wallet {
                    self.cycle_focus();
                }
            }
            event => self.controller.handle_event(event),
        }
    }
}
