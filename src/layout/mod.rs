//! Placement of cards on pages and of text on cards.
//!
//! Everything in here is pure geometry: nothing touches a [Document](crate::Document).
//!
//! - [wrap] breaks text into lines against a character budget
//! - [CardGrid] and [paginate] decide where each card goes on which page
//! - [plan_card] turns one question into drawing instructions for one card
//!
//! # Example
//!
//! ```
//! use trivia_cards::layout::{paginate, wrap, CardGrid, Margins};
//! use trivia_cards::{pagesize, Mm};
//!
//! let grid = CardGrid::new(pagesize::A4, Margins::all(Mm(10.0)), Mm(2.0).into());
//! let pages = paginate(10);
//! assert_eq!(pages.len(), 2);
//! assert!(grid.card_rect(pages[1].slots().count() - 1).is_some());
//!
//! let lines: Vec<String> = wrap("What is the smallest unit of Bitcoin?", 30).lines().collect();
//! assert_eq!(lines, vec!["What is the smallest unit of", "Bitcoin?"]);
//! ```

mod card;
mod grid;
mod margins;
mod wrap;

pub use card::*;
pub use grid::*;
pub use margins::*;
pub use wrap::*;
