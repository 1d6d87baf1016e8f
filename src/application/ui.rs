use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::infrastructure::backends::BackendManager;

fn status_style(status: &str) -> Style {
    if status.starts_with("Error") {
        return Style::default().fg(Color::Red);
    }

    return Style::default();
}

fn render_collaborators<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(6), Constraint::Min(1)])
        .split(rect);

    let status_lines = vec![
        Line::from(Span::styled(
            app_state.ingestion.summary(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw("Connector: "),
            Span::styled(
                app_state.connector_status.to_string(),
                status_style(&app_state.connector_status),
            ),
        ]),
        Line::from(vec![
            Span::raw("Uploader: "),
            Span::styled(
                app_state.uploader_status.to_string(),
                status_style(&app_state.uploader_status),
            ),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(status_lines)
            .block(Block::default().borders(Borders::ALL).title("Ingestion"))
            .wrap(Wrap { trim: true }),
        layout[0],
    );

    frame.render_widget(
        Paragraph::new(app_state.schema_preview())
            .block(Block::default().borders(Borders::ALL).title("Schema"))
            .wrap(Wrap { trim: false }),
        layout[1],
    );
}

fn render_query<B: Backend>(
    frame: &mut Frame<B>,
    rect: Rect,
    app_state: &mut AppState,
    textarea: &tui_textarea::TextArea,
) {
    let history = app_state.history_lines();
    let history_height = u16::try_from(history.len()).unwrap_or(0).max(1) + 2;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(history_height),
            Constraint::Min(1),
        ])
        .split(rect);

    frame.render_widget(textarea.widget(), layout[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(
            app_state.query.status.to_string(),
            status_style(&app_state.query.status),
        )),
        layout[1],
    );

    let history_text = if history.is_empty() {
        vec![Line::from("No queries yet.")]
    } else {
        history.into_iter().map(Line::from).collect::<Vec<Line>>()
    };
    frame.render_widget(
        Paragraph::new(history_text).block(Block::default().borders(Borders::ALL).title("History")),
        layout[2],
    );

    let results_block = Block::default().borders(Borders::ALL).title("Results");
    let results_rect = results_block.inner(layout[3]);
    if results_rect.width != app_state.last_known_width
        || results_rect.height != app_state.last_known_height
    {
        app_state.set_rect(results_rect);
    }

    frame.render_widget(
        Paragraph::new(app_state.results_lines())
            .block(results_block)
            .scroll((app_state.scroll.position, 0)),
        layout[3],
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);
    let mut textarea = TextArea::default();

    tx.send(Action::RefreshSchema())?;
    tx.send(Action::RefreshIngestionStatus())?;

    loop {
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Percentage(35), Constraint::Percentage(65)])
                .split(frame.size());

            render_collaborators(frame, layout[0], app_state);
            render_query(frame, layout[1], app_state, &textarea);
        })?;

        match events.next().await? {
            Event::KeyboardCharInput(input) => {
                textarea.input(input);
            }
            Event::KeyboardPaste(text) => {
                textarea.insert_str(text.replace('\n', " "));
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardCTRLR() => {
                if let Some(text) = app_state.cycle_history() {
                    textarea = TextArea::with_text(&text);
                }
            }
            Event::KeyboardEnter() => {
                let input_str = textarea.lines().join(" ");
                if input_str.trim().is_empty() {
                    continue;
                }

                textarea = TextArea::default();
                let should_break = app_state.submit_input(&input_str, &tx)?;
                if should_break {
                    break;
                }
                if let Some(text) = app_state.take_input() {
                    textarea = TextArea::with_text(&text);
                }
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() | Event::UIResize() => (),
            event => {
                app_state.handle_backend_event(event);
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut app_state = AppState::new(&BackendManager::get()?).await;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    start_loop(&mut terminal, &mut app_state, tx, rx).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
