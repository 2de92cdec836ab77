//! Local mirror of the server collection plus the active filter.
//!
//! The server is the single source of truth: `items` is only ever replaced
//! wholesale, never patched.

use crate::filter::Filter;
use crate::types::{Todo, TodoId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    items: Vec<Todo>,
    filter: Filter,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn replace_items(&mut self, items: Vec<Todo>) {
        self.items = items;
    }

    pub fn clear_items(&mut self) {
        self.items.clear();
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.items.iter().find(|t| &t.id == id)
    }

    /// Items passing the active filter, in server order.
    pub fn visible(&self) -> impl Iterator<Item = &Todo> + '_ {
        let filter = self.filter;
        self.items.iter().filter(move |t| filter.matches(t))
    }

    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|t| !t.done).count()
    }
}
