//! Row cursor for the chain table
//!
//! Wraps a ratatui [`TableState`]. A newly loaded table (other side, expiration or ticker) puts
//! the cursor on the ATM row, or the first row, and centres it on the next render.

use ratatui::widgets::TableState;
use screener_chain::{ChainTable, ContractType};

/// Identity of a rendered table: side, expiration, first contract and row count
type TableKey = (ContractType, String, String, usize);

#[derive(Debug, Default)]
pub struct ChainCursor {
    state: TableState,
    key: Option<TableKey>,
    len: usize,
    /// Rows visible at the last render
    page: usize,
    recentre: bool,
}

impl ChainCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt `table`, resetting the cursor when it differs from the last one seen
    pub fn sync(&mut self, table: &ChainTable) {
        let key = (
            table.side,
            table.expiration.clone(),
            table
                .rows
                .first()
                .map(|row| row.contract_name.clone())
                .unwrap_or_default(),
            table.rows.len(),
        );
        if self.key.as_ref() == Some(&key) {
            return;
        }

        self.key = Some(key);
        self.len = table.rows.len();
        self.state = TableState::default();
        if self.len > 0 {
            self.state.select(Some(table.atm_index.unwrap_or(0).min(self.len - 1)));
        }
        self.recentre = true;
    }

    /// Fit the viewport to `visible_rows`, centring the cursor after a reset
    pub fn fit(&mut self, visible_rows: usize) {
        self.page = visible_rows;
        if !self.recentre || visible_rows == 0 {
            return;
        }
        self.recentre = false;

        let selected = self.selected().unwrap_or(0);
        let max_offset = self.len.saturating_sub(visible_rows);
        *self.state.offset_mut() = selected.saturating_sub(visible_rows / 2).min(max_offset);
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn offset(&self) -> usize {
        self.state.offset()
    }

    pub fn state_mut(&mut self) -> &mut TableState {
        &mut self.state
    }

    /// Move the cursor by `delta` rows, clamped to the table
    pub fn scroll(&mut self, delta: isize) {
        if self.len == 0 {
            return;
        }
        let current = self.selected().unwrap_or(0);
        let target = current.saturating_add_signed(delta).min(self.len - 1);
        self.state.select(Some(target));
    }

    pub fn page_down(&mut self) {
        self.scroll(self.page.max(1) as isize);
    }

    pub fn page_up(&mut self) {
        self.scroll(-(self.page.max(1) as isize));
    }

    pub fn scroll_to_start(&mut self) {
        if self.len > 0 {
            self.state.select(Some(0));
        }
    }

    pub fn scroll_to_end(&mut self) {
        if self.len > 0 {
            self.state.select(Some(self.len - 1));
        }
    }
}
