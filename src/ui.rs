use crate::input::parse_draw_request;
use crate::ledger::{FilteredEntry, Ledger};
use crate::store::Store;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Count,
    Digits,
    Search,
}

impl Field {
    pub fn next(&self) -> Self {
        match self {
            Field::Name => Field::Count,
            Field::Count => Field::Digits,
            Field::Digits => Field::Search,
            Field::Search => Field::Name,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Field::Name => Field::Search,
            Field::Count => Field::Name,
            Field::Digits => Field::Count,
            Field::Search => Field::Digits,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Field::Name => "Name",
            Field::Count => "Tickets",
            Field::Digits => "Digits",
            Field::Search => "Search",
        }
    }
}

pub struct App {
    pub ledger: Ledger,
    pub store: Box<dyn Store>,
    pub name_input: String,
    pub count_input: String,
    pub digits_input: String,
    pub search_input: String,
    pub focus: Field,
    pub notice: Option<String>,
    pub confirm_reset: bool,
}

impl App {
    pub fn new(store: Box<dyn Store>) -> Self {
        let ledger = Ledger::load(store.as_ref());

        Self {
            ledger,
            store,
            name_input: String::new(),
            count_input: String::new(),
            digits_input: String::new(),
            search_input: String::new(),
            focus: Field::Name,
            notice: None,
            confirm_reset: false,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focus {
            Field::Name => &mut self.name_input,
            Field::Count => &mut self.count_input,
            Field::Digits => &mut self.digits_input,
            Field::Search => &mut self.search_input,
        }
    }

    pub fn type_char(&mut self, c: char) {
        self.focused_input().push(c);
    }

    pub fn delete_char(&mut self) {
        self.focused_input().pop();
    }

    /// Entries currently visible, filtered by the live search term.
    pub fn visible_entries(&self) -> Vec<FilteredEntry> {
        self.ledger.filter(self.search_input.trim())
    }

    /// Run the generate/add action from the current form fields.
    pub fn submit(&mut self) -> Result<()> {
        let request = match parse_draw_request(
            &self.name_input,
            &self.count_input,
            &self.digits_input,
        ) {
            Ok(request) => request,
            Err(err) => {
                self.notice = Some(err.to_string());
                return Ok(());
            }
        };

        let outcome = self.ledger.add_or_append(
            self.store.as_mut(),
            &request.name,
            request.count,
            request.digits,
        )?;

        if outcome.exhausted {
            self.notice = Some(format!(
                "Exceeding all possible numbers for {} digits, can't add {} tickets for {}",
                request.digits, request.count, request.name
            ));
            return Ok(());
        }

        self.notice = Some(format!(
            "Issued {} number(s) to {}",
            outcome.numbers.len(),
            request.name
        ));

        // Name and count clear for the next participant; digits stick.
        self.name_input.clear();
        self.count_input.clear();

        Ok(())
    }

    pub fn request_reset(&mut self) {
        self.confirm_reset = true;
    }

    pub fn resolve_reset(&mut self, yes: bool) -> Result<()> {
        self.confirm_reset = false;

        if yes {
            self.ledger.reset(self.store.as_mut())?;
            self.notice = Some("New lottery started".to_string());
        }

        Ok(())
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if app.confirm_reset {
                let yes = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'));
                app.resolve_reset(yes)?;
                continue;
            }

            match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.request_reset();
                }
                KeyCode::Tab => app.focus_next(),
                KeyCode::BackTab => app.focus_previous(),
                KeyCode::Enter if app.focus != Field::Search => app.submit()?,
                KeyCode::Backspace => app.delete_char(),
                KeyCode::Char(c) => app.type_char(c),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Form inputs
            Constraint::Min(0),    // Participant list
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_form(f, chunks[1], app);
    render_list(f, chunks[2], app);
    render_status_bar(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let total_tickets: usize = app.ledger.entries.iter().map(|e| e.numbers.len()).sum();

    let mut spans = vec![
        Span::styled(
            "Lottery Draw",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Participants: {}", app.ledger.entries.len()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Tickets: {}", total_tickets),
            Style::default().fg(Color::White),
        ),
    ];

    if let Some(started) = app.ledger.date_generated {
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            format!("Started: {}", started.format("%Y-%m-%d %H:%M")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let header = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let boxes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
            Constraint::Percentage(35),
        ])
        .split(area);

    let fields = [
        (Field::Name, &app.name_input),
        (Field::Count, &app.count_input),
        (Field::Digits, &app.digits_input),
        (Field::Search, &app.search_input),
    ];

    for ((field, value), chunk) in fields.iter().zip(boxes.iter()) {
        let border = if *field == app.focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let widget = Paragraph::new(value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(format!(" {} ", field.title())),
        );

        f.render_widget(widget, *chunk);
    }
}

fn render_list(f: &mut Frame, area: Rect, app: &App) {
    let entries = app.visible_entries();

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let numbers = entry
                .matching
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(", ");

            ListItem::new(Line::from(vec![
                Span::styled(
                    entry.name.clone(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" ({} tickets):  ", entry.total)),
                Span::styled(numbers, Style::default().fg(Color::White)),
            ]))
        })
        .collect();

    let title = if app.search_input.trim().is_empty() {
        " Issued Numbers ".to_string()
    } else {
        format!(" Issued Numbers (matching \"{}\") ", app.search_input.trim())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    );

    f.render_widget(list, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let spans = if app.confirm_reset {
        vec![Span::styled(
            " Start a new lottery? This erases all existing data (y/n) ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )]
    } else {
        let mut spans = vec![
            Span::styled(
                format!(" Enter: {} ", app.ledger.action_label()),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw("| "),
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::raw(" next field | "),
            Span::styled("Ctrl-N", Style::default().fg(Color::Yellow)),
            Span::raw(" new lottery | "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" quit"),
        ];

        if let Some(notice) = &app.notice {
            spans.push(Span::raw("  |  "));
            spans.push(Span::styled(
                notice.clone(),
                Style::default().fg(Color::Magenta),
            ));
        }

        spans
    };

    let status = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(status, area);
}
