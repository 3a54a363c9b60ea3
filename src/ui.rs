use anyhow::Result;
use bill_splitter::{
    select_label, AddFriendField, BalanceStatus, Friend, Payer, SplitField, Splitter,
    SplitterError, UiMode,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

const ACTIVITY_LINES: usize = 12;

pub struct App {
    pub splitter: Splitter,
    /// Cursor over the friend list (not the same thing as the selected friend)
    pub state: TableState,
    pub should_quit: bool,
}

impl App {
    pub fn new(splitter: Splitter) -> Self {
        let mut state = TableState::default();
        if !splitter.friends().is_empty() {
            state.select(Some(0));
        }

        Self {
            splitter,
            state,
            should_quit: false,
        }
    }

    pub fn cursor_friend(&self) -> Option<&Friend> {
        self.state.selected().and_then(|i| self.splitter.friends().get(i))
    }

    pub fn next(&mut self) {
        let len = self.splitter.friends().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.splitter.friends().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    fn toggle_cursor_selection(&mut self) {
        let id = match self.cursor_friend() {
            Some(friend) => friend.id.clone(),
            None => return,
        };
        ignore_rejection(self.splitter.toggle_select(&id));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Up => return self.previous(),
            KeyCode::Down => return self.next(),
            _ => {}
        }

        if self.splitter.form_visible() {
            self.handle_add_friend_key(key);
        } else if self.splitter.selected_friend().is_some() {
            self.handle_split_key(key);
        } else {
            self.handle_idle_key(key);
        }
    }

    fn handle_idle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') => self.next(),
            KeyCode::Char('k') => self.previous(),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_cursor_selection(),
            KeyCode::Char('a') => self.splitter.toggle_add_friend_form(),
            _ => {}
        }
    }

    fn handle_add_friend_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.splitter.toggle_add_friend_form(),
            KeyCode::Enter => {
                if let Ok(id) = self.splitter.submit_add_friend() {
                    let row = self.splitter.registry().position(&id);
                    self.state.select(row);
                }
            }
            KeyCode::Tab | KeyCode::BackTab => {
                if let Some(draft) = self.splitter.add_friend_draft_mut() {
                    draft.focus = draft.focus.next();
                }
            }
            KeyCode::Backspace => {
                if let Some(draft) = self.splitter.add_friend_draft_mut() {
                    draft.focused_mut().pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(draft) = self.splitter.add_friend_draft_mut() {
                    draft.focused_mut().push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_split_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                let selected = self.splitter.selected_friend().map(|f| f.id.clone());
                if let Some(id) = selected {
                    ignore_rejection(self.splitter.toggle_select(&id));
                }
            }
            KeyCode::Char(' ') => self.toggle_cursor_selection(),
            KeyCode::Char('a') => self.splitter.toggle_add_friend_form(),
            KeyCode::Enter => ignore_rejection(self.splitter.submit_split().map(|_| ())),
            KeyCode::Tab | KeyCode::BackTab => {
                if let Some(form) = self.splitter.split_form_mut() {
                    form.focus = form.focus.next();
                }
            }
            KeyCode::Left | KeyCode::Right => {
                if let Some(form) = self.splitter.split_form_mut() {
                    if form.focus == SplitField::Payer {
                        form.who_is_paying = form.who_is_paying.toggle();
                    }
                }
            }
            KeyCode::Backspace => {
                if let Some(form) = self.splitter.split_form_mut() {
                    form.pop_char();
                }
            }
            KeyCode::Char(c) => {
                if let Some(form) = self.splitter.split_form_mut() {
                    ignore_rejection(form.push_char(c));
                }
            }
            _ => {}
        }
    }
}

/// Rejected input is silent in the UI; it only shows up in the log.
fn ignore_rejection(result: Result<(), SplitterError>) {
    if let Err(err) = result {
        tracing::debug!(reason = %err, "input rejected");
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Leave raw mode and the alternate screen before any panic is reported
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

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

    if let Err(err) = res {
        tracing::error!(error = %err, "ui loop failed");
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
            if app.should_quit {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with totals
            Constraint::Min(0),    // Friends + side panel
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Friend list
            Constraint::Percentage(45), // Form or activity
        ])
        .split(chunks[1]);

    render_friends(f, content_chunks[0], app);
    match app.splitter.mode() {
        UiMode::AddingFriend(_) => render_add_friend_form(f, content_chunks[1], app),
        UiMode::Splitting { .. } => render_split_form(f, content_chunks[1], app),
        UiMode::Idle => render_activity(f, content_chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn balance_color(status: BalanceStatus) -> Color {
    match status {
        BalanceStatus::YouOwe(_) => Color::Red,
        BalanceStatus::OwesYou(_) => Color::Green,
        BalanceStatus::Even => Color::White,
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let totals = app.splitter.registry().totals();

    let spans = vec![
        Span::styled(
            "Eat-'n-Split",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Friends: {}", app.splitter.friends().len()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("You owe ${}", totals.you_owe),
            Style::default().fg(Color::Red),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Owed to you ${}", totals.owed_to_you),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Even: {}", totals.settled_count),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let header = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_friends(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Name", "Balance", ""].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let splitter = &app.splitter;
    let rows = splitter.friends().iter().map(|friend| {
        let is_selected = splitter.is_selected(&friend.id);
        let color = balance_color(friend.status());

        let cells = vec![
            Cell::from(truncate(&friend.name, 20)),
            Cell::from(friend.status_text()).style(Style::default().fg(color)),
            Cell::from(format!("[{}]", select_label(is_selected))),
        ];

        let row = Row::new(cells).height(1);
        if is_selected {
            row.style(Style::default().bg(Color::Rgb(255, 245, 230)).fg(Color::Black))
        } else {
            row
        }
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(22),
            Constraint::Min(24),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Friends "),
    )
    .highlight_style(Style::default().add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn field_line<'a>(label: &'a str, value: String, focused: bool) -> Line<'a> {
    let label_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let value_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if focused { "_" } else { "" };

    Line::from(vec![
        Span::styled(label, label_style),
        Span::styled(format!("{}{}", value, cursor), value_style),
    ])
}

fn render_add_friend_form(f: &mut Frame, area: Rect, app: &App) {
    let draft = match app.splitter.add_friend_draft() {
        Some(d) => d,
        None => return,
    };

    let content = vec![
        Line::from(""),
        field_line(
            "  👫 Friend Name: ",
            draft.name.clone(),
            draft.focus == AddFriendField::Name,
        ),
        Line::from(""),
        field_line(
            "  🔍 Image URL:   ",
            draft.image_url.clone(),
            draft.focus == AddFriendField::ImageUrl,
        ),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  [ Add ]  Enter",
            Style::default().fg(Color::Green),
        )]),
    ];

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Add Friend "),
    );

    f.render_widget(panel, area);
}

fn render_split_form(f: &mut Frame, area: Rect, app: &App) {
    let (friend, form) = match (app.splitter.selected_friend(), app.splitter.split_form()) {
        (Some(friend), Some(form)) => (friend, form),
        _ => return,
    };

    let paid_by_friend = form
        .paid_by_friend()
        .map(|v| v.to_string())
        .unwrap_or_default();
    let friend_label = format!("  👫 {}'s Expense: ", friend.name);

    let payer_style = |payer: Payer| {
        if form.who_is_paying == payer {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    let payer_label_style = if form.focus == SplitField::Payer {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };

    let content = vec![
        Line::from(""),
        field_line(
            "  💵 Bill Value:   ",
            form.bill().text().to_string(),
            form.focus == SplitField::Bill,
        ),
        Line::from(""),
        field_line(
            "  🤵 Your Expense: ",
            form.paid_by_user().text().to_string(),
            form.focus == SplitField::YourExpense,
        ),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                friend_label,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
            ),
            Span::styled(paid_by_friend, Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  🤑 Who is paying the bill? ", payer_label_style),
            Span::styled(" You ", payer_style(Payer::User)),
            Span::raw(" "),
            Span::styled(format!(" {} ", friend.name), payer_style(Payer::Friend)),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  [ Split Bill ]  Enter",
            Style::default().fg(Color::Green),
        )]),
    ];

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" Split a bill with {} ", friend.name)),
    );

    f.render_widget(panel, area);
}

fn render_activity(f: &mut Frame, area: Rect, app: &App) {
    let log = app.splitter.activity();

    let content: Vec<Line> = if log.is_empty() {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Nothing yet. Select a friend to split a bill.",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )),
        ]
    } else {
        log.recent(ACTIVITY_LINES)
            .map(|event| {
                Line::from(vec![
                    Span::styled(
                        format!("  {} ", event.timestamp.format("%H:%M:%S")),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(event.summary()),
                ])
            })
            .collect()
    };

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Activity "),
    );

    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let mut spans = vec![key(" ↑/↓"), Span::raw(" Nav | ")];

    match app.splitter.mode() {
        UiMode::Idle => {
            spans.push(key("Enter"));
            spans.push(Span::raw(" Select | "));
            spans.push(key("a"));
            spans.push(Span::raw(format!(" {} | ", app.splitter.add_button_label())));
            spans.push(Span::styled("q", Style::default().fg(Color::Red)));
            spans.push(Span::raw(" Quit"));
        }
        UiMode::AddingFriend(_) => {
            spans.push(key("Tab"));
            spans.push(Span::raw(" Field | "));
            spans.push(key("Enter"));
            spans.push(Span::raw(" Add | "));
            spans.push(key("Esc"));
            spans.push(Span::raw(format!(" {}", app.splitter.add_button_label())));
        }
        UiMode::Splitting { .. } => {
            spans.push(key("Space"));
            spans.push(Span::raw(" Select | "));
            spans.push(key("Tab"));
            spans.push(Span::raw(" Field | "));
            spans.push(key("←/→"));
            spans.push(Span::raw(" Payer | "));
            spans.push(key("Enter"));
            spans.push(Span::raw(" Split | "));
            spans.push(key("Esc"));
            spans.push(Span::raw(" Close | "));
            spans.push(Span::styled("q", Style::default().fg(Color::Red)));
            spans.push(Span::raw(" Quit"));
        }
    }

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
