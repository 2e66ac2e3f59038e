use crossterm::event::{KeyCode, KeyModifiers};
use rollcall_core::Roster;
use rollcall_core::app::Command;
use tracing::{debug, info};

use crate::config::Config;
use crate::services::AppService;
use crate::tui::{TuiMessage, TuiModel, TuiUpdate, TuiView};

/// Wires the TUI model to the application service
///
/// One key press runs the whole cycle: update the model, commit any
/// resulting command, then replay the emitted roster events into the model.
#[derive(Debug)]
pub struct App {
    service: AppService,
    pub model: TuiModel,
}

impl App {
    pub fn new(config: &Config, roster: Roster) -> App {
        let model = TuiModel::with_roster(&roster, config.ui.show_email_column);
        App {
            service: AppService::new(roster),
            model,
        }
    }

    pub fn roster(&self) -> &Roster {
        self.service.roster()
    }

    pub fn should_quit(&self) -> bool {
        self.model.should_quit
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        let message =
            TuiUpdate::handle_key(&mut self.model, self.service.roster(), key, modifiers);
        self.dispatch(message);
    }

    /// Send a TUI message to the service and fold the outcome back into the model
    pub fn dispatch(&mut self, message: TuiMessage) {
        let TuiMessage::Command(cmd) = message else {
            return;
        };

        if cmd == Command::Quit {
            info!("Quit requested by user");
            self.model.should_quit = true;
            return;
        }

        match self.service.handle_command(cmd.clone()) {
            Ok(()) => self
                .model
                .command_succeeded(&cmd, self.service.roster()),
            // The open form stays up so the entry can be corrected
            Err(e) => self.model.add_error(e.to_string()),
        }

        for event in self.service.drain_events() {
            debug!("Applying {:?}", event);
            self.model.apply_event(&event, self.service.roster());
        }
    }

    pub fn render(&self, frame: &mut ratatui::Frame) {
        TuiView::render(&self.model, self.service.roster(), frame);
    }
}
