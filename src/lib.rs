//! Printable trivia card decks.
//!
//! Questions are read from a JSON array, laid out nine to a page on a 3x3
//! grid of cards, and written as PDF using the base-14 Helvetica fonts. An
//! optional answer sheet lists every question with its correct answer.
//!
//! ```no_run
//! use trivia_cards::{load_questions, render_deck, Config};
//!
//! let questions = load_questions("questions.json").expect("readable questions");
//! let deck = render_deck(&questions, &Config::default(), None).expect("a deck");
//! deck.save("cards.pdf").expect("writable output");
//! ```

mod answer_sheet;
pub use answer_sheet::*;

mod batch;
pub use batch::*;

mod colour;
pub use colour::*;

mod config;
pub use config::*;

pub(crate) mod content;

mod deck;
pub use deck::*;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Card tiling, text wrapping and the per-card layout planner
pub mod layout;

mod page;
pub use page::*;

/// Standard paper sizes
pub mod pagesize;

mod question;
pub use question::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod theme;
pub use theme::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
