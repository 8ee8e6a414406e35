//! Interactive list view over the filtered task set.
//!
//! Keys: Up/Down select, Space toggle complete, f cycle status filter,
//! / search, a add, d delete, C clear completed, q quit. Every mutation is
//! saved immediately.

use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::io;
use taskdeck_core::{FilterState, resolve_category, visible_tasks};

use crate::state::AppState;

pub fn run(app: &mut AppState, tz: &str) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app, tz);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState, tz: &str) -> Result<()> {
    let mut filters = FilterState::default();
    let mut selected: usize = 0;

    loop {
        let now = Utc::now();
        let visible: Vec<String> = visible_tasks(app.tasks.tasks(), &filters)
            .iter()
            .map(|t| t.id.clone())
            .collect();
        if selected >= visible.len() {
            selected = visible.len().saturating_sub(1);
        }

        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Min(1), Constraint::Length(1)])
                .split(f.area());

            let items: Vec<ListItem> = visible
                .iter()
                .filter_map(|id| app.tasks.get(id))
                .map(|t| {
                    let mark = if t.completed { "[x] " } else { "[ ] " };
                    let category =
                        resolve_category(app.categories.categories(), t.category_id.as_deref())
                            .map(|c| c.name.as_str())
                            .unwrap_or("-");

                    let mut spans = vec![
                        Span::raw(mark),
                        Span::styled(
                            t.text.clone(),
                            if t.completed {
                                Style::default()
                                    .fg(Color::DarkGray)
                                    .add_modifier(Modifier::CROSSED_OUT)
                            } else {
                                Style::default().fg(Color::White)
                            },
                        ),
                        Span::raw(format!("  ({}, {category})", t.priority)),
                    ];
                    if t.is_overdue(now) {
                        spans.push(Span::styled(
                            " overdue",
                            Style::default().fg(Color::Red),
                        ));
                    }
                    ListItem::new(Line::from(spans))
                })
                .collect();

            let title = if filters.search.is_empty() {
                format!(" taskdeck — {} ", filters.status)
            } else {
                format!(" taskdeck — {} /{} ", filters.status, filters.search)
            };

            let list = List::new(items)
                .block(Block::default().title(title).borders(Borders::ALL))
                .highlight_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");

            let mut list_state = ListState::default();
            if !visible.is_empty() {
                list_state.select(Some(selected));
            }
            f.render_stateful_widget(list, chunks[0], &mut list_state);

            let help = Paragraph::new(
                "space toggle  f filter  / search  a add  d delete  C clear done  q quit",
            )
            .style(Style::default().fg(Color::DarkGray));
            f.render_widget(help, chunks[1]);
        })?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Up => {
                    selected = selected.saturating_sub(1);
                }
                KeyCode::Down => {
                    if selected + 1 < visible.len() {
                        selected += 1;
                    }
                }
                KeyCode::Char(' ') => {
                    if let Some(id) = visible.get(selected) {
                        if app.tasks.toggle_complete(id) {
                            app.save_tasks()?;
                        }
                    }
                }
                KeyCode::Char('f') => {
                    filters.cycle_status();
                    selected = 0;
                }
                KeyCode::Char('/') => {
                    if let Some(search) = prompt("Search (empty clears)") {
                        filters.search = search;
                        selected = 0;
                    }
                }
                KeyCode::Char('a') => {
                    if let Some(text) = prompt("New task") {
                        let due = prompt("Due date YYYY-MM-DD [HH:MM] (empty for none)")
                            .filter(|d| !d.is_empty())
                            .and_then(|d| match taskdeck_core::parse_due_date(&d, tz) {
                                Ok(due) => Some(due),
                                Err(err) => {
                                    eprintln!("ignoring due date: {err}");
                                    None
                                }
                            });
                        if app.tasks.add(&text, Utc::now(), due, None, None).is_some() {
                            app.save_tasks()?;
                            selected = 0;
                        }
                    }
                }
                KeyCode::Char('d') => {
                    if let Some(id) = visible.get(selected) {
                        if app.tasks.remove(id).is_some() {
                            app.save_tasks()?;
                        }
                    }
                }
                KeyCode::Char('C') => {
                    if app.tasks.clear_completed() > 0 {
                        app.save_tasks()?;
                    }
                    selected = 0;
                }
                _ => {}
            }
        }
    }
}

fn prompt(message: &str) -> Option<String> {
    disable_raw_mode().ok();
    println!("{}", message);
    let mut input = String::new();
    let result = io::stdin().read_line(&mut input);
    enable_raw_mode().ok();
    match result {
        Ok(_) => Some(input.trim().to_string()),
        Err(_) => None,
    }
}
