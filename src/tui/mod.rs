//! Ratatui-based terminal UI.
//!
//! Left: a form with the six policyholder features and the latest prediction.
//! Right: the record table. Every mutation re-renders the full table, so rows
//! are addressed by their current position.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Row, Table, TableState},
};

use crate::app::Session;
use crate::domain::{PolicyTier, SessionConfig, Verdict, gender_label, policy_label};
use crate::error::{AppError, CoreError};
use crate::io::FeatureInput;
use crate::report::{TABLE_HEADERS, format_verdict, table_cells};

/// Form rows: (field name, label).
const FORM_FIELDS: [(&str, &str); 6] = [
    ("age", "Age"),
    ("gender", "Gender"),
    ("policy", "Policy"),
    ("vehicle_age", "Vehicle Age"),
    ("previous_claims", "Previous Claims"),
    ("annual_premium", "Annual Premium"),
];

/// Start the TUI.
pub fn run(config: SessionConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(&config);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Form,
    Table,
}

struct App {
    session: Session,
    form: FeatureInput,
    selected_field: usize,
    selected_row: Option<usize>,
    focus: Focus,
    prediction: Option<f64>,
    status: String,
}

impl App {
    fn new(config: &SessionConfig) -> Self {
        let form = FeatureInput {
            gender: "0".to_string(),
            policy: PolicyTier::Basic.code().to_string(),
            ..FeatureInput::default()
        };
        Self {
            session: Session::new(config),
            form,
            selected_field: 0,
            selected_row: None,
            focus: Focus::Form,
            prediction: None,
            status: "Fill in the form, then p to predict or a to add.".to_string(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Apply one key press. Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Form => Focus::Table,
                    Focus::Table => Focus::Form,
                };
                if self.focus == Focus::Table && self.selected_row.is_none() && self.session.count() > 0 {
                    self.selected_row = Some(0);
                }
            }
            KeyCode::Char('p') | KeyCode::Enter => self.predict(),
            KeyCode::Char('a') => self.add(),
            KeyCode::Char('e') => self.export(),
            _ => match self.focus {
                Focus::Form => self.handle_form_key(code),
                Focus::Table => self.handle_table_key(code),
            },
        }
        false
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        let field = FORM_FIELDS[self.selected_field].0;
        match code {
            KeyCode::Up => self.selected_field = self.selected_field.saturating_sub(1),
            KeyCode::Down => self.selected_field = (self.selected_field + 1).min(FORM_FIELDS.len() - 1),
            KeyCode::Left | KeyCode::Right => self.cycle_field(field, code == KeyCode::Right),
            KeyCode::Backspace => {
                if let Some(value) = self.text_field_mut(field) {
                    value.pop();
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                if let Some(value) = self.text_field_mut(field) {
                    value.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_table_key(&mut self, code: KeyCode) {
        let count = self.session.count();
        match code {
            KeyCode::Up => {
                self.selected_row = self.selected_row.map(|i| i.saturating_sub(1));
            }
            KeyCode::Down if count > 0 => {
                self.selected_row = Some(self.selected_row.map_or(0, |i| (i + 1).min(count - 1)));
            }
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            _ => {}
        }
    }

    /// Categorical fields cycle through their codes instead of taking text.
    fn cycle_field(&mut self, field: &str, forward: bool) {
        match field {
            "gender" => {
                let next = if self.form.gender == "1" { "0" } else { "1" };
                self.form.gender = next.to_string();
            }
            "policy" => {
                let current = self
                    .form
                    .policy
                    .parse::<u8>()
                    .ok()
                    .and_then(PolicyTier::from_code)
                    .unwrap_or(PolicyTier::Basic);
                let next = if forward { current.next() } else { current.prev() };
                self.form.policy = next.code().to_string();
            }
            _ => {}
        }
    }

    fn text_field_mut(&mut self, field: &str) -> Option<&mut String> {
        if matches!(field, "gender" | "policy") {
            return None;
        }
        self.form.field_mut(field)
    }

    fn predict(&mut self) {
        match self.session.predict_input(&self.form) {
            Ok(pred) => {
                self.prediction = Some(pred.probability);
                self.status = format!("score {:.4}", pred.score);
            }
            Err(err) => self.report_error(err),
        }
    }

    fn add(&mut self) {
        match self.session.add_input(&self.form) {
            Ok(probability) => {
                self.prediction = Some(probability);
                self.status = format!("Added row {}.", self.session.count());
            }
            Err(err) => self.report_error(err),
        }
    }

    fn delete_selected(&mut self) {
        let Some(index) = self.selected_row else {
            self.status = "No row selected.".to_string();
            return;
        };
        match self.session.delete(index) {
            Ok(_) => {
                let count = self.session.count();
                self.selected_row = if count == 0 { None } else { Some(index.min(count - 1)) };
                self.status = format!("Deleted row {}.", index + 1);
            }
            Err(err) => self.report_error(err),
        }
    }

    fn export(&mut self) {
        let path = self.session.export_path().to_path_buf();
        self.status = match self.session.export() {
            Ok(rows) => format!("Wrote {rows} rows to {}", path.display()),
            Err(err) => err.to_string(),
        };
    }

    fn report_error(&mut self, err: CoreError) {
        tracing::debug!(%err, "action rejected");
        self.status = err.to_string();
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled("claims", Style::default().fg(Color::Cyan)),
            Span::raw(" | insurance claim probability"),
            Span::styled(
                format!(" | rows: {} | export: {}", self.session.count(), self.session.export_path().display()),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(36), Constraint::Min(0)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(0)])
            .split(columns[0]);

        self.draw_form(frame, left[0]);
        self.draw_prediction(frame, left[1]);
        self.draw_table(frame, columns[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = FORM_FIELDS
            .iter()
            .map(|(name, label)| ListItem::new(format!("{label}: {}", self.form_value_label(name))))
            .collect();

        let border = if self.focus == Focus::Form { Color::Cyan } else { Color::Gray };
        let list = List::new(items)
            .block(
                Block::default()
                    .title("Policyholder")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            )
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn form_value_label(&self, field: &str) -> String {
        let raw = self.form.field(field).unwrap_or("");
        match field {
            "gender" => raw.parse::<u8>().map_or("?".to_string(), |c| gender_label(c).to_string()),
            "policy" => raw.parse::<u8>().map_or("?".to_string(), |c| policy_label(c).to_string()),
            _ => raw.to_string(),
        }
    }

    fn draw_prediction(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Prediction").borders(Borders::ALL);
        let text = match self.prediction {
            Some(p) => {
                let color = match Verdict::from_probability(p) {
                    Verdict::Likely => Color::Green,
                    Verdict::Unlikely => Color::Red,
                };
                Text::from(Line::from(Span::styled(
                    format_verdict(p),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )))
            }
            None => Text::from(Line::from(Span::styled("-", Style::default().fg(Color::Gray)))),
        };
        frame.render_widget(Paragraph::new(text).block(block), area);
    }

    fn draw_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let header = Row::new(TABLE_HEADERS).style(Style::default().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = self
            .session
            .records()
            .iter()
            .enumerate()
            .map(|(i, r)| Row::new(table_cells(i, r)))
            .collect();
        let widths = [
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(7),
        ];

        let border = if self.focus == Focus::Table { Color::Cyan } else { Color::Gray };
        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .title("Records")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            )
            .row_highlight_style(Style::default().fg(Color::Black).bg(Color::White));

        let mut state = TableState::default().with_selected(self.selected_row);
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = match self.focus {
            Focus::Form => "↑/↓ field  ←/→ cycle  p predict  a add  e export  Tab table  q quit",
            Focus::Table => "↑/↓ row  d delete  e export  Tab form  q quit",
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::FEATURE_FIELDS;

    fn app() -> App {
        App::new(&SessionConfig::default())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    /// Fill the form with the reference policyholder.
    fn fill(app: &mut App) {
        type_text(app, "30");
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Right); // gender -> M
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Right); // policy -> Premium
        app.handle_key(KeyCode::Down);
        type_text(app, "5");
        app.handle_key(KeyCode::Down);
        type_text(app, "2");
        app.handle_key(KeyCode::Down);
        type_text(app, "10000");
    }

    #[test]
    fn form_keys_edit_fields() {
        let mut app = app();
        fill(&mut app);
        assert_eq!(app.form.age, "30");
        assert_eq!(app.form.gender, "1");
        assert_eq!(app.form.policy, "1");
        assert_eq!(app.form.annual_premium, "10000");
        assert!(FEATURE_FIELDS.iter().all(|f| !app.form.field(f).unwrap().is_empty()));

        app.handle_key(KeyCode::Backspace);
        assert_eq!(app.form.annual_premium, "1000");
    }

    #[test]
    fn predict_then_add_fills_the_table() {
        let mut app = app();
        fill(&mut app);

        app.handle_key(KeyCode::Char('p'));
        let p = app.prediction.unwrap();
        assert!((p - 0.7109).abs() < 1e-4);
        assert_eq!(app.session.count(), 0);

        app.handle_key(KeyCode::Char('a'));
        assert_eq!(app.session.count(), 1);
        assert_eq!(app.status, "Added row 1.");
    }

    #[test]
    fn invalid_form_reports_validation_error() {
        let mut app = app();
        app.handle_key(KeyCode::Char('a'));
        assert_eq!(app.session.count(), 0);
        assert!(app.status.contains("age"), "status: {}", app.status);
    }

    #[test]
    fn delete_selected_row_from_table() {
        let mut app = app();
        fill(&mut app);
        app.handle_key(KeyCode::Char('a'));
        app.handle_key(KeyCode::Char('a'));

        app.handle_key(KeyCode::Tab);
        assert_eq!(app.selected_row, Some(0));
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Char('d'));
        assert_eq!(app.session.count(), 1);
        assert_eq!(app.selected_row, Some(0));

        app.handle_key(KeyCode::Delete);
        assert_eq!(app.session.count(), 0);
        assert_eq!(app.selected_row, None);

        app.handle_key(KeyCode::Char('d'));
        assert_eq!(app.status, "No row selected.");
    }

    #[test]
    fn exporting_empty_table_says_no_data() {
        let mut app = app();
        app.handle_key(KeyCode::Char('e'));
        assert_eq!(app.status, "No data!");
    }

    #[test]
    fn policy_cycles_backwards() {
        let mut app = app();
        app.selected_field = 2;
        app.handle_key(KeyCode::Left);
        assert_eq!(app.form.policy, "2");
        assert_eq!(app.form_value_label("policy"), "Gold");
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.handle_key(KeyCode::Esc));
        assert!(!app.handle_key(KeyCode::Up));
    }
}
