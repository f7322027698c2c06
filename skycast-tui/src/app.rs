//! Session state and the dashboard event loop.
//!
//! All mutable state lives in [`App`] and changes at exactly two points:
//! key input ([`App::on_key`]) and retrieval settling ([`App::apply`]).
//! Retrievals are spawned fire-and-forget; their results come back over an
//! mpsc channel drained once per loop iteration.

use std::{io, sync::Arc, time::Duration};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use skycast_core::{CityWeather, CurrentConditions, FetchError, ForecastEntry, WeatherProvider};
use tokio::sync::mpsc;
use tracing::warn;

use crate::ui;

/// Whether a retrieval is in flight. The interface stays interactive either
/// way: a second submission races the first, and whichever settles later
/// wins (there is no cancellation and no request sequencing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
}

/// Blocking notices. While one is shown, all input is swallowed until a key
/// acknowledges it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    EmptyQuery,
    CityNotFound,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::EmptyQuery => "Please enter a city",
            Notice::CityNotFound => "City not found",
        }
    }
}

/// A retrieval reaching success or failure.
#[derive(Debug)]
pub struct Settled {
    pub city: String,
    pub result: Result<CityWeather, FetchError>,
}

pub struct App {
    provider: Arc<dyn WeatherProvider>,
    outcomes: mpsc::UnboundedSender<Settled>,

    /// In-progress query text, edited on every keystroke.
    pub query: String,
    /// Last-submitted city; titles the chart.
    pub submitted_city: String,
    pub current: Option<CurrentConditions>,
    pub outlook: Vec<ForecastEntry>,
    pub phase: Phase,
    pub notice: Option<Notice>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        city: String,
        outcomes: mpsc::UnboundedSender<Settled>,
    ) -> Self {
        Self {
            provider,
            outcomes,
            query: city.clone(),
            submitted_city: city,
            current: None,
            outlook: Vec::new(),
            phase: Phase::Idle,
            notice: None,
            should_quit: false,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // A notice blocks everything else until acknowledged.
        if self.notice.is_some() {
            self.notice = None;
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.query.pop();
            }
            KeyCode::Char(c) => self.query.push(c),
            _ => {}
        }
    }

    /// Kick off a retrieval for the query text, verbatim. Control returns
    /// to the event loop immediately; the settle arrives over the channel.
    pub fn submit(&mut self) {
        if self.query.trim().is_empty() {
            self.notice = Some(Notice::EmptyQuery);
            return;
        }

        self.submitted_city = self.query.clone();
        self.phase = Phase::Loading;

        let provider = Arc::clone(&self.provider);
        let outcomes = self.outcomes.clone();
        let city = self.query.clone();
        tokio::spawn(async move {
            let result = provider.fetch_city(&city).await;
            // The receiver is gone only once the dashboard has exited.
            let _ = outcomes.send(Settled { city, result });
        });
    }

    /// The single point where retrieval results reach session state.
    pub fn apply(&mut self, settled: Settled) {
        self.phase = Phase::Idle;

        match settled.result {
            Ok(weather) => {
                // Replaced together: no render sees mismatched city data.
                self.current = Some(weather.current);
                self.outlook = weather.outlook;
            }
            Err(FetchError::CityNotFound) => {
                self.notice = Some(Notice::CityNotFound);
            }
            Err(err) => {
                // Silent to the user; prior state stays as it was.
                warn!(city = %settled.city, error = %err, "weather retrieval failed");
            }
        }
    }
}

/// Run the dashboard until the user quits, starting with one automatic
/// retrieval for `city`.
pub async fn run(provider: Arc<dyn WeatherProvider>, city: String) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(provider, city, tx);
    app.submit();

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, &mut rx).await;
    restore_terminal(&mut terminal)?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    outcomes: &mut mpsc::UnboundedReceiver<Settled>,
) -> Result<()> {
    while !app.should_quit {
        while let Ok(settled) = outcomes.try_recv() {
            app.apply(settled);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
