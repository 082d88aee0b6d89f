//! Rendering of a question collection into a printable card deck.

use crate::colour::colours;
use crate::config::Config;
use crate::document::Document;
use crate::image::Image;
use crate::info::Info;
use crate::layout::{paginate, plan_card, DrawOp, Margins};
use crate::page::{ImageLayout, Page, SpanLayout};
use crate::question::Question;
use crate::rect::Rect;
use crate::units::{Mm, Pt};
use crate::CardError;
use std::path::Path;

const BORDER_WIDTH: Pt = Pt(1.0);
const RULE_WIDTH: Pt = Pt(1.0);

/// Load the card logo, falling back to none (and thus the fallback text)
/// when the file is missing or cannot be decoded
pub fn load_logo(path: Option<&Path>) -> Option<Image> {
    let path = path?;
    if !path.is_file() {
        log::warn!("logo {:?} not found, using fallback text", path);
        return None;
    }
    match Image::new_from_disk(path) {
        Ok(image) => {
            log::debug!("loaded {}x{} logo from {:?}", image.width, image.height, path);
            Some(image)
        }
        Err(e) => {
            log::warn!("failed to load logo {:?}: {}; using fallback text", path, e);
            None
        }
    }
}

/// The largest rectangle with the image's aspect ratio centred in `rect`
fn fit_image(rect: Rect, aspect_ratio: f32) -> Rect {
    let (width, height) = (rect.width(), rect.height());
    let (fit_width, fit_height) = if aspect_ratio >= 1.0 {
        (width, width / aspect_ratio)
    } else {
        (height * aspect_ratio, height)
    };
    Rect::from_origin(
        rect.x1 + (width - fit_width) / 2.0,
        rect.y1 + (height - fit_height) / 2.0,
        fit_width,
        fit_height,
    )
}

fn draw_card(page: &mut Page, ops: Vec<DrawOp>, origin: (Pt, Pt), logo_aspect: Option<f32>) {
    let (dx, dy) = origin;
    for op in ops {
        match op {
            DrawOp::FillRect { rect, colour } => page.fill_rect(rect.translated(dx, dy), colour),
            DrawOp::Border { rect, radius } => {
                page.stroke_round_rect(rect.translated(dx, dy), radius, colours::BLACK, BORDER_WIDTH)
            }
            DrawOp::Rule { from, to, colour } => page.stroke_line(
                (from.0 + dx, from.1 + dy),
                (to.0 + dx, to.1 + dy),
                colour,
                RULE_WIDTH,
            ),
            DrawOp::Text { text, font, coords } => page.add_span(SpanLayout {
                text,
                font,
                colour: colours::BLACK,
                coords: (coords.0 + dx, coords.1 + dy),
            }),
            DrawOp::Logo { rect } => {
                if let Some(aspect_ratio) = logo_aspect {
                    page.add_image(ImageLayout {
                        image_index: 0,
                        position: fit_image(rect.translated(dx, dy), aspect_ratio),
                    });
                }
            }
        }
    }
}

/// Lay out every question on a 3x3 grid of cards, nine to a page.
///
/// A card that cannot be laid out is reported and its cell left blank; the
/// rest of the deck is still produced.
pub fn render_deck(
    questions: &[Question],
    config: &Config,
    logo: Option<Image>,
) -> Result<Document, CardError> {
    let grid = config.grid()?;
    let (card_width, card_height) = grid.card_size();

    let mut doc = Document::default();
    doc.set_info(
        Info::titled(&config.title, config.author.as_deref())
            .with_subject(format!("{} trivia cards", questions.len())),
    );

    let logo_aspect = logo.map(|image| {
        let aspect_ratio = image.aspect_ratio();
        doc.add_image(image);
        aspect_ratio
    });

    for page_slots in paginate(questions.len()) {
        let mut page = Page::new(grid.page_size(), Some(Margins::all(Mm(config.margin_mm))));

        for (slot, item) in page_slots.slots() {
            let Some(rect) = grid.card_rect(slot) else {
                continue;
            };
            let question = &questions[item];
            let plan = match plan_card(
                card_width,
                card_height,
                question,
                &config.theme,
                &config.card,
                logo_aspect.is_some(),
            ) {
                Ok(plan) => plan,
                Err(e) => {
                    log::error!("card {}: {}; leaving its cell blank", item + 1, e);
                    continue;
                }
            };
            if plan.dropped_lines > 0 {
                log::warn!(
                    "card {}: {} line(s) did not fit and were left out",
                    item + 1,
                    plan.dropped_lines
                );
            }
            draw_card(&mut page, plan.ops, (rect.x1, rect.y1), logo_aspect);
        }

        log::debug!(
            "page {}: {} card(s), {} blank cell(s)",
            page_slots.page_index + 1,
            page_slots.len(),
            page_slots.blank_cells()
        );
        doc.add_page(page);
    }

    Ok(doc)
}
