//! Interactive terminal dashboard: look up one company by name, see its
//! scraped details and a price-history chart.

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::pipeline::CompanyRow;

pub mod data;
mod ui;

use data::HistoricalRow;

/// Outcome of the last search, drives what the detail area shows.
pub enum SearchState {
    /// Nothing searched yet.
    Idle,
    /// Query matched no company name.
    NotFound,
    /// Matched company plus whatever history rows exist for it.
    Found {
        company: CompanyRow,
        history: Vec<HistoricalRow>,
    },
}

pub struct App {
    pub query: String,
    pub companies: Vec<CompanyRow>,
    pub history: Vec<HistoricalRow>,
    pub search: SearchState,
    pub running: bool,
}

impl App {
    pub fn new(companies: Vec<CompanyRow>, history: Vec<HistoricalRow>) -> Self {
        App {
            query: String::new(),
            companies,
            history,
            search: SearchState::Idle,
            running: true,
        }
    }

    /// Runs the query against the loaded tables. Empty queries reset to idle
    /// rather than matching everything.
    pub fn search(&mut self) {
        if self.query.trim().is_empty() {
            self.search = SearchState::Idle;
            return;
        }

        self.search = match data::find_company(&self.companies, &self.query) {
            Some(company) => {
                let history = data::find_history(&self.history, &self.query)
                    .into_iter()
                    .cloned()
                    .collect();
                SearchState::Found {
                    company: company.clone(),
                    history,
                }
            }
            None => SearchState::NotFound,
        };
    }
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Esc => app.running = false,
        KeyCode::Enter => app.search(),
        KeyCode::Backspace => {
            app.query.pop();
        }
        KeyCode::Char(c) => app.query.push(c),
        _ => {}
    }
}

/// Runs the dashboard until Esc. Terminal state is restored on the way out,
/// panics included.
pub fn run(companies: Vec<CompanyRow>, history: Vec<HistoricalRow>) -> Result<()> {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(companies, history);

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                handle_key(app, key);
            }
        }
    }

    Ok(())
}
