//! Tiling of card rectangles on a page and pagination of a card collection.

use super::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;
use std::ops::Range;

/// Cards per row
pub const GRID_COLUMNS: usize = 3;
/// Rows per page
pub const GRID_ROWS: usize = 3;
/// Cards per page
pub const CARDS_PER_PAGE: usize = GRID_COLUMNS * GRID_ROWS;

/// A 3x3 grid of card cells inside the page margins. Each cell is an equal
/// share of the content area; the card drawn in it is the cell shrunk by
/// `spacing` and centred, leaving a gutter between neighbouring cards.
#[derive(Debug, Clone, PartialEq)]
pub struct CardGrid {
    page_size: PageSize,
    margins: Margins,
    spacing: Pt,
}

impl CardGrid {
    pub fn new(page_size: PageSize, margins: Margins, spacing: Pt) -> CardGrid {
        CardGrid {
            page_size,
            margins,
            spacing,
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Size of one grid cell, gutter included
    pub fn cell_size(&self) -> (Pt, Pt) {
        (
            self.margins.inner_width(self.page_size.0) / GRID_COLUMNS as f32,
            self.margins.inner_height(self.page_size.1) / GRID_ROWS as f32,
        )
    }

    /// Size of the card drawn in each cell
    pub fn card_size(&self) -> (Pt, Pt) {
        let (width, height) = self.cell_size();
        (width - self.spacing, height - self.spacing)
    }

    /// Rectangle of the card in the given slot (0-based, row-major from the
    /// top-left of the page), or [None] if the slot is outside the grid
    pub fn card_rect(&self, slot: usize) -> Option<Rect> {
        if slot >= CARDS_PER_PAGE {
            return None;
        }
        let row = slot / GRID_COLUMNS;
        let col = slot % GRID_COLUMNS;
        let (cell_width, cell_height) = self.cell_size();
        let (card_width, card_height) = self.card_size();

        let x = self.margins.left + cell_width * col as f32 + self.spacing / 2.0;
        let y = self.page_size.1 - self.margins.top - cell_height * (row + 1) as f32
            + self.spacing / 2.0;
        Some(Rect::from_origin(x, y, card_width, card_height))
    }
}

/// One page worth of cards: the indices of the items it shows, in slot order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlots {
    pub page_index: usize,
    pub items: Range<usize>,
}

impl PageSlots {
    /// Number of filled cells on the page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of cells left blank on the page
    pub fn blank_cells(&self) -> usize {
        CARDS_PER_PAGE - self.len()
    }

    /// `(slot, item index)` pairs for the filled cells
    pub fn slots(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.items.clone().enumerate()
    }
}

/// Number of pages needed for `item_count` cards
pub fn page_count(item_count: usize) -> usize {
    item_count.div_ceil(CARDS_PER_PAGE)
}

/// Split `item_count` cards into pages of nine
pub fn paginate(item_count: usize) -> Vec<PageSlots> {
    (0..page_count(item_count))
        .map(|page_index| {
            let start = page_index * CARDS_PER_PAGE;
            let end = (start + CARDS_PER_PAGE).min(item_count);
            PageSlots {
                page_index,
                items: start..end,
            }
        })
        .collect()
}
