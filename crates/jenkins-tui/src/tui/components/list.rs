//! Selectable, filterable list shared by the job list and the build list

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, List, ListItem, ListState},
    Frame,
};

use crate::tui::keymap::Motion;

/// A row that can be filtered and described
pub trait ListEntry {
    /// Text the filter matches against
    fn filter_key(&self) -> String;

    /// Secondary text shown next to the key
    fn detail_line(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterState {
    #[default]
    Off,
    /// Query is being typed
    Typing,
    /// Query committed with Enter
    Applied,
}

/// Controls the app needs from whichever list is active
pub trait ListControl {
    fn apply(&mut self, motion: Motion);
    fn start_filter(&mut self);
    fn push_filter(&mut self, c: char);
    fn pop_filter(&mut self);
    fn commit_filter(&mut self);
    fn clear_filter(&mut self);
    fn is_typing(&self) -> bool;
    fn has_filter(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct SelectableList<T> {
    items: Vec<T>,
    query: String,
    filter_state: FilterState,
    /// Index into the visible (filtered) items
    cursor: usize,
    page_size: usize,
}

impl<T> Default for SelectableList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            query: String::new(),
            filter_state: FilterState::Off,
            cursor: 0,
            page_size: 10,
        }
    }
}

impl<T: ListEntry> SelectableList<T> {
    /// Replace the items, keeping the selection on the same key when it
    /// survives the update
    pub fn with_items(mut self, items: Vec<T>) -> Self {
        let previous = self.selected().map(ListEntry::filter_key);
        self.items = items;
        self.reselect(previous.as_deref());
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn visible(&self) -> Vec<&T> {
        let needle = self.query.to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                needle.is_empty() || item.filter_key().to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Selected item; `None` when the list is empty or nothing matches
    pub fn selected(&self) -> Option<&T> {
        self.visible().get(self.cursor).copied()
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub const fn filter_state(&self) -> FilterState {
        self.filter_state
    }

    pub fn set_page_size(&mut self, rows: usize) {
        self.page_size = rows.max(1);
    }

    /// Title suffix such as `(3/10) /dep_`
    pub fn summary(&self) -> String {
        let counts = format!("({}/{})", self.visible().len(), self.items.len());
        match self.filter_state {
            FilterState::Off => counts,
            FilterState::Typing => format!("{counts} /{}_", self.query),
            FilterState::Applied => format!("{counts} /{}", self.query),
        }
    }

    fn reselect(&mut self, key: Option<&str>) {
        let visible = self.visible();
        let position = key.and_then(|key| visible.iter().position(|item| item.filter_key() == key));
        let len = visible.len();
        self.cursor = position.unwrap_or_else(|| self.cursor.min(len.saturating_sub(1)));
    }

    /// Render visible rows with the cursor highlighted
    pub fn render<'a>(
        &'a self,
        frame: &mut Frame,
        area: Rect,
        block: Block<'a>,
        row: impl Fn(&'a T) -> ListItem<'a>,
    ) {
        let visible = self.visible();
        let items: Vec<ListItem> = visible.iter().map(|item| row(item)).collect();
        let selected = (!items.is_empty()).then_some(self.cursor);

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default().with_selected(selected);
        frame.render_stateful_widget(list, area, &mut state);
    }
}

impl<T: ListEntry> ListControl for SelectableList<T> {
    fn apply(&mut self, motion: Motion) {
        let last = self.visible().len().saturating_sub(1);
        self.cursor = match motion {
            Motion::Up => self.cursor.saturating_sub(1),
            Motion::Down => self.cursor.saturating_add(1).min(last),
            Motion::PageUp => self.cursor.saturating_sub(self.page_size),
            Motion::PageDown => self.cursor.saturating_add(self.page_size).min(last),
            Motion::Home => 0,
            Motion::End => last,
        };
    }

    fn start_filter(&mut self) {
        self.filter_state = FilterState::Typing;
    }

    fn push_filter(&mut self, c: char) {
        self.query.push(c);
        self.cursor = 0;
    }

    fn pop_filter(&mut self) {
        self.query.pop();
        self.cursor = 0;
    }

    fn commit_filter(&mut self) {
        self.filter_state = if self.query.is_empty() {
            FilterState::Off
        } else {
            FilterState::Applied
        };
    }

    fn clear_filter(&mut self) {
        let previous = self.selected().map(ListEntry::filter_key);
        self.query.clear();
        self.filter_state = FilterState::Off;
        self.reselect(previous.as_deref());
    }

    fn is_typing(&self) -> bool {
        self.filter_state == FilterState::Typing
    }

    fn has_filter(&self) -> bool {
        self.filter_state != FilterState::Off
    }
}
