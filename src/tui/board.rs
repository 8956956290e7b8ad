//! Kanban board interface.
//!
//! Four columns, one per lifecycle status, with a new-task form above the
//! board. All mutations go through the lifecycle engine; after each one the
//! board re-reads the store's snapshot, so what is drawn always reflects the
//! persisted collection. Refused requests (duplicate titles, illegal moves)
//! surface as a transient notice that clears itself after a couple of
//! seconds.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use unicode_width::UnicodeWidthStr;
use uuid::Uuid;

use crate::fields::{Status, ThemeMode};
use crate::lifecycle;
use crate::store::{format_created, short_id, truncate, Store};
use crate::theme::{format_theme, load_theme, save_theme};
use crate::tui::colors::{palette_for, Palette, COLUMN_ACCENTS};
use crate::tui::input::InputField;

/// How long a notice stays on screen before it clears itself.
const NOTICE_TTL: Duration = Duration::from_secs(2);

const CARD_HEIGHT: usize = 4;

/// Main board application state.
pub struct BoardApp {
    store: Store,
    data_dir: PathBuf,
    theme: ThemeMode,
    selected_column: usize, // 0-3, matching column_order
    selected_card: usize,
    column_scroll_offsets: [usize; 4],
    input: InputField,
    notice: Option<(String, Instant)>,

    // Task ids organised by status column
    columns: [Vec<Uuid>; 4],
}

impl BoardApp {
    /// Create a new board for a data directory.
    pub fn new(data_dir: &Path) -> Self {
        let mut app = BoardApp {
            store: Store::open(data_dir),
            data_dir: data_dir.to_path_buf(),
            theme: load_theme(data_dir),
            selected_column: 0,
            selected_card: 0,
            column_scroll_offsets: [0; 4],
            input: InputField::new(),
            notice: None,
            columns: Default::default(),
        };
        app.update_columns();
        app
    }

    /// Rebuild the columns from the store's current snapshot.
    fn update_columns(&mut self) {
        for (i, column) in self.columns.iter_mut().enumerate() {
            column.clear();
            self.column_scroll_offsets[i] = 0;
        }
        for task in self.store.tasks() {
            self.columns[task.status.column_order()].push(task.id);
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.columns[self.selected_column].len();
        if self.selected_card >= len {
            self.selected_card = len.saturating_sub(1);
        }
    }

    fn selected_task(&self) -> Option<Uuid> {
        self.columns[self.selected_column]
            .get(self.selected_card)
            .copied()
    }

    /// Show a notice; any notice already on screen is superseded.
    fn set_notice(&mut self, msg: String) {
        self.notice = Some((msg, Instant::now()));
    }

    /// Drop the notice once its display time is up.
    fn expire_notice(&mut self) {
        if let Some((_, since)) = self.notice {
            if since.elapsed() >= NOTICE_TTL {
                self.notice = None;
            }
        }
    }

    /// Submit the new-task form.
    fn submit_input(&mut self) {
        let title = self.input.take();
        self.input.active = false;
        match lifecycle::create(&mut self.store, &title) {
            Ok(_) => self.update_columns(),
            Err(lifecycle::CreateError::EmptyTitle) => {}
            Err(e) => self.set_notice(e.to_string()),
        }
    }

    /// Request a status for the selected task and follow the card if it moved.
    fn request_status(&mut self, target: Status) {
        let Some(id) = self.selected_task() else { return };
        match lifecycle::set_status(&mut self.store, id, target) {
            Ok(true) => {
                self.update_columns();
                self.follow_card(id);
            }
            Ok(false) => {}
            Err(e) => self.set_notice(format!("Error saving: {e}")),
        }
    }

    /// Move the selected card one column forward along the line.
    fn move_card_forward(&mut self) {
        let Some(id) = self.selected_task() else { return };
        match lifecycle::advance(&mut self.store, id) {
            Ok(true) => {
                self.update_columns();
                self.follow_card(id);
            }
            Ok(false) => {}
            Err(e) => self.set_notice(format!("Error saving: {e}")),
        }
    }

    /// Move the selected card one column back along the line.
    fn move_card_back(&mut self) {
        let Some(id) = self.selected_task() else { return };
        match lifecycle::regress(&mut self.store, id) {
            Ok(true) => {
                self.update_columns();
                self.follow_card(id);
            }
            Ok(false) => {}
            Err(e) => self.set_notice(format!("Error saving: {e}")),
        }
    }

    /// Freeze the selected task, or unfreeze it if it already is.
    /// Done tasks are left alone, matching the transition rules.
    fn toggle_freeze(&mut self) {
        let Some(id) = self.selected_task() else { return };
        let Some(status) = self.store.get(id).map(|t| t.status) else {
            return;
        };
        match status {
            Status::Frozen => self.request_status(Status::Todo),
            Status::Done => {}
            _ => self.request_status(Status::Frozen),
        }
    }

    /// Delete the selected task.
    fn delete_selected(&mut self) {
        let Some(id) = self.selected_task() else { return };
        let title = self
            .store
            .get(id)
            .map(|t| t.title.clone())
            .unwrap_or_default();
        match lifecycle::delete(&mut self.store, id) {
            Ok(_) => {
                self.update_columns();
                self.set_notice(format!("Deleted '{title}'"));
            }
            Err(e) => self.set_notice(format!("Error saving: {e}")),
        }
    }

    /// Cycle the theme preference and persist it.
    fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        if let Err(e) = save_theme(&self.data_dir, self.theme) {
            self.set_notice(format!("Failed to save theme: {e}"));
        } else {
            self.set_notice(format!("Theme: {}", format_theme(self.theme)));
        }
    }

    /// Select the card again after a move changed its column.
    fn follow_card(&mut self, id: Uuid) {
        for (col, ids) in self.columns.iter().enumerate() {
            if let Some(pos) = ids.iter().position(|&i| i == id) {
                self.selected_column = col;
                self.selected_card = pos;
                return;
            }
        }
        self.clamp_selection();
    }

    /// Handle keyboard input. Returns true when the app should exit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // New-task form has focus
                if self.input.active {
                    match key.code {
                        KeyCode::Esc => {
                            self.input.take();
                            self.input.active = false;
                        }
                        KeyCode::Enter => self.submit_input(),
                        KeyCode::Backspace => self.input.handle_backspace(),
                        KeyCode::Left => self.input.move_cursor_left(),
                        KeyCode::Right => self.input.move_cursor_right(),
                        KeyCode::Char(c) => self.input.handle_char(c),
                        _ => {}
                    }
                    return Ok(false);
                }

                match key.code {
                    KeyCode::Char('q') => return Ok(true),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(true)
                    }
                    KeyCode::Esc => return Ok(true),

                    // New-task form
                    KeyCode::Char('n') => {
                        self.input.active = true;
                    }

                    // Card movement between columns (check first, before navigation)
                    KeyCode::Left if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.move_card_back();
                    }
                    KeyCode::Right if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.move_card_forward();
                    }

                    // Column navigation
                    KeyCode::Left => {
                        if self.selected_column > 0 {
                            self.selected_column -= 1;
                            self.clamp_selection();
                        }
                    }
                    KeyCode::Right => {
                        if self.selected_column < self.columns.len() - 1 {
                            self.selected_column += 1;
                            self.clamp_selection();
                        }
                    }

                    // Card navigation within a column
                    KeyCode::Up => {
                        if self.selected_card > 0 {
                            self.selected_card -= 1;
                        }
                    }
                    KeyCode::Down => {
                        let column_len = self.columns[self.selected_column].len();
                        if column_len > 0 && self.selected_card < column_len - 1 {
                            self.selected_card += 1;
                        }
                    }

                    // Lifecycle actions
                    KeyCode::Char('f') => self.toggle_freeze(),
                    KeyCode::Char('x') => self.delete_selected(),

                    // Theme preference
                    KeyCode::Char('t') => self.cycle_theme(),

                    // Help
                    KeyCode::Char('h') => {
                        self.set_notice(
                            "Help: n: New | Ctrl+←/→: Move | f: Freeze/unfreeze | x: Delete | t: Theme | q: Quit"
                                .to_string(),
                        );
                    }

                    _ => {}
                }
            }
        }
        Ok(false)
    }

    /// Render the board.
    fn render(&mut self, f: &mut Frame) {
        let palette = palette_for(self.theme);

        let base = Block::default().style(
            Style::default()
                .bg(palette.base_bg)
                .fg(palette.base_fg),
        );
        f.render_widget(base, f.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // New-task form
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_header(f, chunks[0], &palette);
        self.render_form(f, chunks[1], &palette);
        self.render_board(f, chunks[2], &palette);
        self.render_status_bar(f, chunks[3], &palette);
    }

    fn render_header(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let total = self.store.tasks().len();
        let header_text = vec![Line::from(vec![
            Span::styled("TASK BOARD", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("{} tasks | theme: {}", total, format_theme(self.theme)),
                Style::default().add_modifier(Modifier::ITALIC),
            ),
        ])];

        let header_block = Paragraph::new(header_text)
            .style(Style::default().fg(palette.base_fg))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header_block, area);
    }

    fn render_form(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let accent = COLUMN_ACCENTS[self.selected_column];
        let (text, style) = if self.input.active {
            (
                format!("> {}", self.input.value),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )
        } else if let Some((msg, _)) = &self.notice {
            // Refused submissions show up here, like the form placeholder
            (msg.clone(), Style::default().fg(ratatui::style::Color::Red))
        } else {
            (
                "Press n to add a task...".to_string(),
                Style::default().fg(palette.base_fg).add_modifier(Modifier::DIM),
            )
        };

        let form = Paragraph::new(text)
            .style(style)
            .block(Block::default().borders(Borders::ALL).title("New task"));
        f.render_widget(form, area);

        if self.input.active {
            // Border + "> " sit before the value; column tracks the rendered
            // width of the text left of the cursor, not its char count.
            let typed = self.input.value[..self.input.cursor].width() as u16;
            f.set_cursor_position((area.x + 3 + typed, area.y + 1));
        }
    }

    fn render_board(&mut self, f: &mut Frame, area: Rect, palette: &Palette) {
        let constraints = [Constraint::Percentage(25); 4];
        let columns_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (i, &column_area) in columns_layout.iter().enumerate() {
            self.render_column(f, column_area, i, palette);
        }
    }

    fn render_column(&mut self, f: &mut Frame, area: Rect, column_index: usize, palette: &Palette) {
        let is_selected = column_index == self.selected_column;
        let accent = COLUMN_ACCENTS[column_index];

        let border_style = if is_selected {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.base_fg)
        };

        let (icon, title) = Self::column_labels()[column_index];
        let count = self.columns[column_index].len();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{icon} {title} ({count})"))
            .border_style(border_style);

        let inner = block.inner(area);
        f.render_widget(block, area);

        let cards = &self.columns[column_index];
        if cards.is_empty() {
            return;
        }

        let available_height = inner.height as usize;
        let visible_cards = available_height / CARD_HEIGHT;

        // Keep the selected card visible
        let scroll_offset = if is_selected && visible_cards > 0 {
            let start_visible = self.column_scroll_offsets[column_index];
            let end_visible = start_visible + visible_cards;

            if self.selected_card < start_visible {
                self.column_scroll_offsets[column_index] = self.selected_card;
                self.selected_card
            } else if self.selected_card >= end_visible {
                let new_offset = self.selected_card - visible_cards + 1;
                self.column_scroll_offsets[column_index] = new_offset;
                new_offset
            } else {
                start_visible
            }
        } else {
            self.column_scroll_offsets[column_index]
        };

        let mut current_y = 0;
        for (card_index, &task_id) in cards.iter().enumerate().skip(scroll_offset) {
            if current_y + CARD_HEIGHT > available_height {
                break;
            }
            if let Some(task) = self.store.get(task_id) {
                let is_this_card_selected = is_selected && card_index == self.selected_card;
                let card_area = Rect {
                    x: inner.x,
                    y: inner.y + current_y as u16,
                    width: inner.width,
                    height: CARD_HEIGHT as u16,
                };

                let style = if is_this_card_selected {
                    Style::default()
                        .bg(accent)
                        .fg(palette.selected_fg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().bg(palette.card_bg).fg(palette.base_fg)
                };

                let width = card_area.width.saturating_sub(2) as usize;
                let card_text = vec![
                    Line::from(truncate(&task.title, width)),
                    Line::from(format!(
                        "#{}  {}",
                        short_id(task.id),
                        format_created(task)
                    )),
                ];

                let card = Paragraph::new(card_text)
                    .block(Block::default().borders(Borders::ALL))
                    .style(style);
                f.render_widget(card, card_area);

                current_y += CARD_HEIGHT;
            }
        }
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let status_text = if let Some((msg, _)) = &self.notice {
            msg.clone()
        } else {
            "n: New | ←/→/↑/↓: Navigate | Ctrl+←/→: Move | f: Freeze | x: Delete | t: Theme | h: Help | q: Quit"
                .to_string()
        };

        let accent = COLUMN_ACCENTS[self.selected_column];
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(accent).fg(palette.selected_fg))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    fn column_labels() -> [(&'static str, &'static str); 4] {
        [
            ("☐", "To Do"),
            ("▶", "In Progress"),
            ("✔", "Done"),
            ("❄", "Frozen"),
        ]
    }

    /// Main event loop.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.expire_notice();
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}
