// ABOUTME: Full-screen selection list drawn with ratatui on top of crossterm
// ABOUTME: Owns the terminal until the user commits an entry or cancels

use crate::error::WandError;
use crate::style;
use crate::ui::{ChoiceList, KeyOutcome, Picker};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};
use std::io::{self, Stdout, stdout};

type Tui = Terminal<CrosstermBackend<Stdout>>;

const HELP: &str = "↑/↓ move • enter select • / filter • q quit";

#[derive(Default)]
pub struct InteractivePicker;

impl InteractivePicker {
    pub fn new() -> Self {
        Self
    }
}

impl Picker for InteractivePicker {
    fn pick(&mut self, title: &str, options: &[String]) -> Result<Option<usize>, WandError> {
        let mut list = ChoiceList::new(title, options.to_vec());

        let mut tui = init().map_err(WandError::Terminal)?;
        let outcome = run(&mut tui, &mut list);
        // Restore even when the loop failed, then report the first error.
        let restored = restore();

        let outcome = outcome.map_err(WandError::Terminal)?;
        restored.map_err(WandError::Terminal)?;
        Ok(outcome)
    }
}

fn init() -> io::Result<Tui> {
    execute!(stdout(), EnterAlternateScreen)?;
    undo_on_error(
        || {
            enable_raw_mode()?;
            Terminal::new(CrosstermBackend::new(stdout()))
        },
        restore,
    )
}

/// Runs `undo` when `setup` fails; the setup error is the one reported.
fn undo_on_error<T>(
    setup: impl FnOnce() -> io::Result<T>,
    undo: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    setup().inspect_err(|e| {
        tracing::debug!("Terminal setup failed: {}", e);
        if let Err(undo_err) = undo() {
            tracing::debug!("Failed to restore terminal: {}", undo_err);
        }
    })
}

fn restore() -> io::Result<()> {
    // Leave the alternate screen even if raw mode could not be switched off.
    let raw = disable_raw_mode();
    execute!(stdout(), LeaveAlternateScreen)?;
    raw
}

fn run(tui: &mut Tui, list: &mut ChoiceList) -> io::Result<Option<usize>> {
    loop {
        tui.draw(|frame| render(frame, list))?;

        if let Event::Key(key) = event::read()? {
            match list.handle_key(key) {
                KeyOutcome::Pending => {}
                KeyOutcome::Selected(index) => return Ok(Some(index)),
                KeyOutcome::Cancelled => return Ok(None),
            }
        }
    }
}

fn render(frame: &mut Frame, list: &ChoiceList) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.size());

    let (r, g, b) = style::ACCENT_RGB;
    let accent = Color::Rgb(r, g, b);

    let items: Vec<ListItem> = list
        .visible_labels()
        .map(|label| ListItem::new(label.to_string()))
        .collect();
    let widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(list.title.as_str()),
        )
        .highlight_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(list.cursor());
    frame.render_stateful_widget(widget, chunks[0], &mut state);

    let footer = if list.filter.is_filtering() {
        format!("/{}", list.filter.query)
    } else {
        HELP.to_string()
    };
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );
}
