#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::path::PathBuf;

use anyhow::Result;
use ratatui::prelude::Rect;
use ratatui::text::Line;
use serde_json::Value;
use tokio::sync::mpsc;

use super::actions::help_text;
use super::IngestionStatusBridge;
use super::QueryController;
use super::ResultsView;
use super::Scroll;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::BackendArc;
use crate::domain::models::Event;
use crate::domain::models::QueryTicket;
use crate::domain::models::SlashCommand;

#[derive(Default)]
pub struct AppState {
    pub connector_status: String,
    pub help_visible: bool,
    history_cursor: Option<usize>,
    pub ingestion: IngestionStatusBridge,
    pub last_known_height: u16,
    pub last_known_width: u16,
    next_input: Option<String>,
    pub query: QueryController,
    pub schema: Option<Value>,
    pub scroll: Scroll,
    pub uploader_status: String,
}

impl AppState {
    pub async fn new(backend: &BackendArc) -> AppState {
        let mut app_state = AppState::default();

        if let Err(err) = backend.health_check().await {
            app_state.connector_status = format!(
                "Error: Backend at {} isn't reachable. Queries will fail until it's running. ({err})",
                Config::get(ConfigKey::BackendURL)
            );
        }

        return app_state;
    }

    /// Applies an event produced by the actions worker.
    pub fn handle_backend_event(&mut self, event: Event) {
        match event {
            Event::QueryCompleted(request, response) => {
                if self.query.complete(&request, response) {
                    self.help_visible = false;
                    self.scroll.top();
                }
            }
            Event::QueryFailed(request, err) => {
                self.query.fail(&request, &err);
            }
            Event::ConnectorStatus(status) => {
                self.connector_status = status;
            }
            Event::SchemaDiscovered(schema) => {
                self.schema = Some(schema);
            }
            Event::UploaderStatus(status) => {
                self.uploader_status = status;
            }
            Event::IngestionStatusChanged(status) => {
                self.ingestion.set(status);
            }
            _ => (),
        }

        self.sync_dependants();
    }

    /// Returns `(should_break, should_continue)`. Input that isn't a known
    /// slash command yields `(false, false)` and should be submitted as a
    /// query.
    pub fn handle_slash_commands(
        &mut self,
        input: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<(bool, bool)> {
        let command = match SlashCommand::parse(input) {
            Some(command) => command,
            None => return Ok((false, false)),
        };

        if command.is_quit() {
            return Ok((true, false));
        }

        if command.is_help() {
            self.help_visible = true;
            self.scroll.top();
            self.sync_dependants();
            return Ok((false, true));
        }

        if command.is_connect() {
            let mut connection_string = command.joined_args();
            if connection_string.is_empty() {
                connection_string = Config::get(ConfigKey::ConnectionString);
            }

            self.connector_status = "Connecting...".to_string();
            tx.send(Action::ConnectDatabase(connection_string))?;
            return Ok((false, true));
        }

        if command.is_upload() {
            if command.args.is_empty() {
                self.uploader_status = "Select files".to_string();
                return Ok((false, true));
            }

            let paths = command
                .args
                .iter()
                .map(PathBuf::from)
                .collect::<Vec<PathBuf>>();

            self.uploader_status = "Uploading...".to_string();
            tx.send(Action::UploadDocuments(paths))?;
            return Ok((false, true));
        }

        if command.is_schema() {
            tx.send(Action::RefreshSchema())?;
            return Ok((false, true));
        }

        if command.is_status() {
            tx.send(Action::RefreshIngestionStatus())?;
            return Ok((false, true));
        }

        if command.is_history() {
            let position = command
                .args
                .first()
                .map(|arg| return arg.to_string())
                .unwrap_or_else(|| return "1".to_string());

            match position.parse::<usize>() {
                Ok(number) if number > 0 && number <= self.query.history.len() => {
                    self.next_input = self.select_history(number - 1);
                }
                _ => {
                    self.query.status = format!("Error: No history entry {position}");
                }
            }

            return Ok((false, true));
        }

        return Ok((false, true));
    }

    /// Handles text entered in the input box: slash commands run, anything
    /// else is submitted as a query exactly as typed. Returns whether the UI
    /// should exit.
    pub fn submit_input(
        &mut self,
        input: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<bool> {
        if input.trim().is_empty() {
            return Ok(false);
        }

        let (should_break, should_continue) = self.handle_slash_commands(input, tx)?;
        if should_break || should_continue {
            return Ok(should_break);
        }

        self.submit_query(input, tx)?;
        return Ok(false);
    }

    pub fn submit_query(
        &mut self,
        text: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<Option<QueryTicket>> {
        let ticket = self.query.submit(text, tx)?;
        if ticket.is_some() {
            self.history_cursor = None;
        }

        return Ok(ticket);
    }

    /// Copies a history entry for the input box. Never submits.
    pub fn select_history(&mut self, idx: usize) -> Option<String> {
        let entry = self.query.history.get(idx)?.to_string();
        self.history_cursor = Some(idx);
        return Some(entry);
    }

    /// Steps through history from most recent to oldest, wrapping around.
    pub fn cycle_history(&mut self) -> Option<String> {
        if self.query.history.is_empty() {
            return None;
        }

        let idx = match self.history_cursor {
            Some(idx) => (idx + 1) % self.query.history.len(),
            None => 0,
        };

        return self.select_history(idx);
    }

    /// Text a slash command wants placed in the input box.
    pub fn take_input(&mut self) -> Option<String> {
        return self.next_input.take();
    }

    pub fn history_lines(&self) -> Vec<String> {
        return self
            .query
            .history
            .list()
            .iter()
            .enumerate()
            .map(|(idx, entry)| return format!("{}. {entry}", idx + 1))
            .collect();
    }

    pub fn results_lines(&self) -> Vec<Line<'static>> {
        if self.help_visible {
            return help_text()
                .split('\n')
                .map(|line| return Line::from(line.to_string()))
                .collect();
        }

        return ResultsView::lines(self.query.rendered());
    }

    pub fn schema_preview(&self) -> String {
        return match &self.schema {
            Some(schema) => {
                serde_json::to_string_pretty(schema).unwrap_or_else(|_| return schema.to_string())
            }
            None => "No schema discovered yet.".to_string(),
        };
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        let length = u16::try_from(self.results_lines().len()).unwrap_or(u16::MAX);
        self.scroll.set_state(length, self.last_known_height);
    }
}
