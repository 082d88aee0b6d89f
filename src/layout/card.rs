//! Layout of a single trivia card.
//!
//! Planning is pure arithmetic: [plan_card] turns a question and the card
//! size into a list of [DrawOp]s in card-local coordinates (origin at the
//! lower-left corner of the card). Nothing is drawn here; the deck renderer
//! translates the plan onto a page.
//!
//! ```text
//! +---------------------------+  <- header band (height / 10), difficulty colour
//! |        DIFFICULTY     [L] |
//! +---------------------------+
//! |    question, centred,     |  <- min(height / 3, lines * 12 + 10)
//! |    bold, wrapped          |
//! |   ---------------------   |  <- separator
//! | A. option                 |
//! | [B] correct option        |
//! | C. option that wraps onto |
//! |    a second line          |
//! +---------------------------+
//! |         category          |  <- footer band (height / 10), category colour
//! +---------------------------+
//! ```

use super::wrap::{count_lines, wrap};
use crate::colour::{colours, Colour};
use crate::error::LayoutError;
use crate::font::BuiltinFont;
use crate::page::SpanFont;
use crate::question::{Question, MAX_OPTIONS};
use crate::rect::Rect;
use crate::theme::Theme;
use crate::units::Pt;
use serde::Deserialize;

const BORDER_RADIUS: Pt = Pt(5.0);
const LOGO_SIZE: Pt = Pt(15.0);
const LOGO_INSET: Pt = Pt(5.0);
const QUESTION_TOP_GAP: Pt = Pt(15.0);
const QUESTION_PADDING: Pt = Pt(10.0);
const SEPARATOR_GAP: Pt = Pt(10.0);
const SEPARATOR_INSET: Pt = Pt(15.0);
const OPTIONS_TOP_GAP: Pt = Pt(15.0);
const OPTION_PREFIX_X: Pt = Pt(10.0);
const OPTION_TEXT_X: Pt = Pt(25.0);
const OPTION_MIN_SPACING: Pt = Pt(5.0);
const OPTION_EXTRA_PADDING: Pt = Pt(2.0);
const OPTION_LINE_GAP: Pt = Pt(2.0);
const OPTION_LEADING: f32 = 1.2;
const OPTION_LETTERS: [char; MAX_OPTIONS] = ['A', 'B', 'C', 'D'];
const DIFFICULTY_LABEL_SIZE: Pt = Pt(10.0);
const CATEGORY_LABEL_SIZE: Pt = Pt(7.0);
const LOGO_FALLBACK_SIZE: Pt = Pt(14.0);
/// Horizontal room kept free on either side of centred text
const TEXT_INSET: Pt = Pt(5.0);

/// Smallest card that can hold the fixed furniture (bands, logo, prefixes)
const MIN_CARD_WIDTH: Pt = Pt(60.0);
const MIN_CARD_HEIGHT: Pt = Pt(80.0);

/// Tunable text metrics of a card
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardStyle {
    /// Character budget per question line
    pub question_max_chars: usize,
    pub question_font_size: f32,
    /// Baseline-to-baseline distance of question lines
    pub question_line_advance: f32,
    /// Character budget used to estimate option heights; option text itself
    /// wraps two characters shorter to leave room for the letter prefix
    pub option_max_chars: usize,
    pub option_font_size: f32,
    /// Option size used when the options do not fit at `option_font_size`
    pub option_font_size_reduced: f32,
    /// Drawn in the logo corner when no logo image is available
    pub logo_fallback_text: String,
}

impl Default for CardStyle {
    fn default() -> Self {
        CardStyle {
            question_max_chars: 30,
            question_font_size: 11.0,
            question_line_advance: 12.0,
            option_max_chars: 30,
            option_font_size: 9.0,
            option_font_size_reduced: 8.0,
            logo_fallback_text: "BTC".to_string(),
        }
    }
}

/// One drawing instruction, in card-local coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        colour: Colour,
    },
    Border {
        rect: Rect,
        radius: Pt,
    },
    Rule {
        from: (Pt, Pt),
        to: (Pt, Pt),
        colour: Colour,
    },
    Text {
        text: String,
        font: SpanFont,
        coords: (Pt, Pt),
    },
    Logo {
        rect: Rect,
    },
}

/// Where the options ended up and how they were sized
#[derive(Debug, Clone, PartialEq)]
pub struct OptionsLayout {
    pub font_size: Pt,
    /// Whether the options had to drop to the reduced font size
    pub reduced: bool,
    /// Baseline of the first line of each option that was drawn
    pub baselines: Vec<Pt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardPlan {
    pub width: Pt,
    pub height: Pt,
    pub ops: Vec<DrawOp>,
    pub header_height: Pt,
    pub footer_height: Pt,
    pub question_height: Pt,
    pub separator_y: Pt,
    pub options: OptionsLayout,
    /// Index of the option drawn with the emphasised marker
    pub marked_option: Option<usize>,
    /// Lines of question or option text dropped because they would not fit
    pub dropped_lines: usize,
}

impl CardPlan {
    pub fn bounds(&self) -> Rect {
        Rect::from_origin(Pt(0.0), Pt(0.0), self.width, self.height)
    }

    /// All the text the card shows, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Estimated height of an option block: `lines * font_size * 1.2`, counting
/// at least one line so an empty option still reserves its prefix row
pub fn estimate_option_height(text: &str, max_chars: usize, font_size: Pt) -> Pt {
    let lines = count_lines(text, max_chars).max(1);
    font_size * (lines as f32 * OPTION_LEADING)
}

fn options_height(options: &[String], max_chars: usize, font_size: Pt) -> Pt {
    options
        .iter()
        .map(|option| estimate_option_height(option, max_chars, font_size))
        .sum()
}

struct Planner<'a> {
    width: Pt,
    height: Pt,
    ops: Vec<DrawOp>,
    style: &'a CardStyle,
    dropped_lines: usize,
}

impl Planner<'_> {
    fn text(&mut self, text: String, font: BuiltinFont, size: Pt, x: Pt, y: Pt) {
        if text.is_empty() {
            return;
        }
        self.ops.push(DrawOp::Text {
            text,
            font: SpanFont { font, size },
            coords: (x, y),
        });
    }

    fn centred_text(&mut self, text: &str, font: BuiltinFont, size: Pt, y: Pt) {
        let text = font.truncate_to_fit(text, size, self.width - TEXT_INSET * 2.0);
        let x = (self.width - font.width_of_text(&text, size)) / 2.0;
        self.text(text, font, size, x, y);
    }

    fn bands(&mut self, question: &Question, theme: &Theme, header: Pt, footer: Pt) {
        self.ops.push(DrawOp::FillRect {
            rect: Rect {
                x1: Pt(0.0),
                y1: self.height - header,
                x2: self.width,
                y2: self.height,
            },
            colour: theme.difficulty_colour(&question.difficulty),
        });
        self.ops.push(DrawOp::FillRect {
            rect: Rect::from_origin(Pt(0.0), Pt(0.0), self.width, footer),
            colour: theme.category_colour(&question.category),
        });
        // the border goes on top of the coloured bands
        self.ops.push(DrawOp::Border {
            rect: Rect::from_origin(Pt(0.0), Pt(0.0), self.width, self.height),
            radius: BORDER_RADIUS,
        });
    }

    fn logo(&mut self, has_logo: bool) {
        if has_logo {
            self.ops.push(DrawOp::Logo {
                rect: Rect::from_origin(
                    self.width - LOGO_SIZE - LOGO_INSET,
                    self.height - LOGO_SIZE - LOGO_INSET,
                    LOGO_SIZE,
                    LOGO_SIZE,
                ),
            });
        } else {
            let font = BuiltinFont::HelveticaBold;
            let text = font.truncate_to_fit(
                &self.style.logo_fallback_text,
                LOGO_FALLBACK_SIZE,
                self.width / 3.0,
            );
            let x = self.width - LOGO_INSET - font.width_of_text(&text, LOGO_FALLBACK_SIZE);
            let y = self.height - LOGO_SIZE;
            self.text(text, font, LOGO_FALLBACK_SIZE, x, y);
        }
    }

    /// Lays out the question block and returns its occupied height
    fn question(&mut self, text: &str, header: Pt) -> Pt {
        let font = BuiltinFont::HelveticaBold;
        let size = Pt(self.style.question_font_size);
        let advance = Pt(self.style.question_line_advance);

        let lines: Vec<String> = wrap(text, self.style.question_max_chars).lines().collect();
        let height = (self.height / 3.0).min(advance * lines.len() as f32 + QUESTION_PADDING);
        let separator_y = self.height - header - height - SEPARATOR_GAP;

        for (i, line) in lines.iter().enumerate() {
            let y = self.height - header - QUESTION_TOP_GAP - advance * i as f32;
            if y + font.descent(size) <= separator_y {
                self.dropped_lines += lines.len() - i;
                break;
            }
            let size = font.size_to_fit(line, size, self.width - TEXT_INSET * 2.0);
            self.centred_text(line, font, size, y);
        }

        height
    }

    fn options(
        &mut self,
        question: &Question,
        separator_y: Pt,
        footer: Pt,
    ) -> (OptionsLayout, Option<usize>) {
        // a card only has letters for the first few options
        let options = &question.options[..question.options.len().min(OPTION_LETTERS.len())];
        let max_chars = self.style.option_max_chars;
        let mut size = Pt(self.style.option_font_size);
        let mut reduced = false;
        let mut marked = None;
        let mut baselines = Vec::new();

        if options.is_empty() {
            return (
                OptionsLayout {
                    font_size: size,
                    reduced,
                    baselines,
                },
                marked,
            );
        }

        let available = separator_y - footer - SEPARATOR_GAP;
        let spacing = OPTION_MIN_SPACING * (options.len() - 1) as f32;
        if options_height(options, max_chars, size) + spacing > available {
            // one step down, no further retries
            size = Pt(self.style.option_font_size_reduced);
            reduced = true;
        }

        let line_advance = size + OPTION_LINE_GAP;
        let lowest_baseline = footer - BuiltinFont::Helvetica.descent(size) + OPTION_LINE_GAP;
        let text_width = self.width - OPTION_TEXT_X - TEXT_INSET;
        let mut cursor = separator_y - OPTIONS_TOP_GAP;

        for (i, (option, letter)) in options.iter().zip(OPTION_LETTERS).enumerate() {
            let lines: Vec<String> = wrap(option, max_chars.saturating_sub(2)).lines().collect();

            if cursor < lowest_baseline {
                self.dropped_lines += lines.len().max(1);
                cursor = cursor - line_advance;
                continue;
            }

            let (prefix, prefix_font) = if question.answer == Some(i) {
                marked = Some(i);
                (format!("[{letter}]"), BuiltinFont::HelveticaBold)
            } else {
                (format!("{letter}."), BuiltinFont::Helvetica)
            };
            self.text(prefix, prefix_font, size, OPTION_PREFIX_X, cursor);
            baselines.push(cursor);

            for (j, line) in lines.iter().enumerate() {
                let y = cursor - line_advance * j as f32;
                if y < lowest_baseline {
                    self.dropped_lines += lines.len() - j;
                    break;
                }
                let font = BuiltinFont::Helvetica;
                let line_size = font.size_to_fit(line, size, text_width);
                self.text(line.clone(), font, line_size, OPTION_TEXT_X, y);
            }

            let block = (line_advance * lines.len() as f32).max(size + OPTION_MIN_SPACING);
            cursor = cursor - (block + OPTION_MIN_SPACING + OPTION_EXTRA_PADDING);
        }

        (
            OptionsLayout {
                font_size: size,
                reduced,
                baselines,
            },
            marked,
        )
    }
}

/// Plan the drawing of one card of the given size.
///
/// `has_logo` selects between placing the logo image and drawing the
/// fallback text in its corner.
pub fn plan_card(
    width: Pt,
    height: Pt,
    question: &Question,
    theme: &Theme,
    style: &CardStyle,
    has_logo: bool,
) -> Result<CardPlan, LayoutError> {
    if !(width.0.is_finite() && height.0.is_finite())
        || width < MIN_CARD_WIDTH
        || height < MIN_CARD_HEIGHT
    {
        return Err(LayoutError::CardTooSmall {
            width: width.0,
            height: height.0,
        });
    }

    let header = height / 10.0;
    let footer = height / 10.0;

    let mut planner = Planner {
        width,
        height,
        ops: Vec::new(),
        style,
        dropped_lines: 0,
    };

    planner.bands(question, theme, header, footer);
    planner.logo(has_logo);

    let label = theme.difficulty_label(&question.difficulty);
    planner.centred_text(
        &label,
        BuiltinFont::HelveticaBold,
        DIFFICULTY_LABEL_SIZE,
        height - header / 2.0 - Pt(4.0),
    );
    planner.centred_text(
        &question.category,
        BuiltinFont::Helvetica,
        CATEGORY_LABEL_SIZE,
        footer / 2.0 - Pt(3.0),
    );

    let question_height = planner.question(&question.text, header);
    let separator_y = height - header - question_height - SEPARATOR_GAP;
    planner.ops.push(DrawOp::Rule {
        from: (SEPARATOR_INSET, separator_y),
        to: (width - SEPARATOR_INSET, separator_y),
        colour: colours::LIGHT_GREY,
    });

    let (options, marked_option) = planner.options(question, separator_y, footer);

    Ok(CardPlan {
        width,
        height,
        ops: planner.ops,
        header_height: header,
        footer_height: footer,
        question_height,
        separator_y,
        options,
        marked_option,
        dropped_lines: planner.dropped_lines,
    })
}
