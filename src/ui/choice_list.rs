// ABOUTME: Cursor, filter, and key handling for the interactive selection list
// ABOUTME: Kept free of terminal I/O so navigation and commit rules are unit-testable

use crate::fuzzy::SearchEngine;
use crate::ui::SearchInput;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Pending,
    /// Index into the original option list.
    Selected(usize),
    Cancelled,
}

pub struct ChoiceList {
    pub title: String,
    pub filter: SearchInput,
    labels: Vec<String>,
    visible: Vec<usize>,
    selected_index: usize,
}

impl ChoiceList {
    pub fn new(title: &str, labels: Vec<String>) -> Self {
        let visible = (0..labels.len()).collect();
        Self {
            title: title.to_string(),
            filter: SearchInput::default(),
            labels,
            visible,
            selected_index: 0,
        }
    }

    pub fn visible_labels(&self) -> impl Iterator<Item = &str> {
        self.visible.iter().map(|&i| self.labels[i].as_str())
    }

    /// Cursor position within the visible rows.
    pub fn cursor(&self) -> Option<usize> {
        (!self.visible.is_empty()).then_some(self.selected_index)
    }

    pub fn selected(&self) -> Option<usize> {
        self.visible.get(self.selected_index).copied()
    }

    pub fn select_next(&mut self) {
        if !self.visible.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.visible.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.visible.is_empty() {
            self.selected_index = if self.selected_index == 0 {
                self.visible.len() - 1
            } else {
                self.selected_index - 1
            };
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.visible.len().saturating_sub(1);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.kind != KeyEventKind::Press {
            return KeyOutcome::Pending;
        }

        let ctrl_c =
            key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        // `q` cancels in every state, filter mode included.
        if ctrl_c || key.code == KeyCode::Char('q') {
            return KeyOutcome::Cancelled;
        }

        match key.code {
            KeyCode::Enter => return self.commit(),
            KeyCode::Up => self.select_previous(),
            KeyCode::Down => self.select_next(),
            KeyCode::Home => self.select_first(),
            KeyCode::End => self.select_last(),
            KeyCode::Esc => {
                if self.filter.is_filtering() {
                    self.filter.clear();
                    self.refilter();
                }
            }
            _ if self.filter.is_active => self.handle_filter_key(key),
            KeyCode::Char('k') => self.select_previous(),
            KeyCode::Char('j') => self.select_next(),
            KeyCode::Char('/') => self.filter.activate(),
            _ => {}
        }

        KeyOutcome::Pending
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Backspace => {
                self.filter.handle_backspace();
                self.refilter();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter.handle_input(c);
                self.refilter();
            }
            _ => {}
        }
    }

    fn commit(&self) -> KeyOutcome {
        match self.selected() {
            Some(index) => KeyOutcome::Selected(index),
            None => KeyOutcome::Pending,
        }
    }

    fn refilter(&mut self) {
        self.visible = SearchEngine::new(&self.labels).search(&self.filter.query, false);
        self.selected_index = 0;
    }
}
