//! Content stream rendering: turns the drawing primitives held by a page
//! into low-level PDF operators.

use crate::colour::Colour;
use crate::font::encode_win_ansi;
use crate::page::{PageContents, SpanFont, SpanLayout};
use crate::rect::Rect;
use crate::units::Pt;
use std::io::Write;

/// Control point offset for approximating a quarter circle with a cubic Bézier
const KAPPA: f32 = 0.552_284_8;

#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(contents: &[PageContents]) -> Result<Vec<u8>, std::io::Error> {
    if contents.is_empty() {
        return Ok(Vec::default());
    }

    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => {
                render_text_spans(&mut content, spans)?;
            }
            PageContents::FillRect { rect, colour } => {
                write!(&mut content, "q\n")?;
                write_fill_colour(&mut content, *colour)?;
                write!(
                    &mut content,
                    "{} {} {} {} re f\n",
                    *rect.x1,
                    *rect.y1,
                    *rect.width(),
                    *rect.height()
                )?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::StrokeRoundRect {
                rect,
                radius,
                colour,
                line_width,
            } => {
                write!(&mut content, "q\n")?;
                write_stroke_colour(&mut content, *colour)?;
                write!(&mut content, "{} w\n", **line_width)?;
                write_round_rect_path(&mut content, rect, *radius)?;
                write!(&mut content, "S\n")?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::Line {
                from,
                to,
                colour,
                line_width,
            } => {
                write!(&mut content, "q\n")?;
                write_stroke_colour(&mut content, *colour)?;
                write!(&mut content, "{} w\n", **line_width)?;
                write!(&mut content, "{} {} m\n", *from.0, *from.1)?;
                write!(&mut content, "{} {} l\n", *to.0, *to.1)?;
                write!(&mut content, "S\n")?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::Image(image) => {
                write!(&mut content, "q\n")?;
                write!(
                    &mut content,
                    "{} 0 0 {} {} {} cm\n",
                    *image.position.width(),
                    *image.position.height(),
                    *image.position.x1,
                    *image.position.y1
                )?;
                write!(&mut content, "/I{} Do\n", image.image_index)?;
                write!(&mut content, "Q\n")?;
            }
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(content: &mut Vec<u8>, spans: &[SpanLayout]) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;

    write!(
        content,
        "/F{} {} Tf\n",
        current_font.font.index(),
        *current_font.size
    )?;
    write_fill_colour(content, current_colour)?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write!(
                content,
                "/F{} {} Tf\n",
                current_font.font.index(),
                *current_font.size
            )?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write_fill_colour(content, current_colour)?;
        }

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", *span.coords.0, *span.coords.1)?;
        write!(content, "<")?;
        for byte in encode_win_ansi(&span.text) {
            write!(content, "{byte:02x}")?;
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

/// Rounded rectangle path, counter-clockwise from the bottom edge
#[allow(clippy::write_with_newline)]
fn write_round_rect_path(content: &mut Vec<u8>, rect: &Rect, radius: Pt) -> Result<(), std::io::Error> {
    let r = radius
        .min(rect.width() / 2.0)
        .min(rect.height() / 2.0)
        .max(Pt(0.0))
        .0;
    let (x1, y1, x2, y2) = (rect.x1.0, rect.y1.0, rect.x2.0, rect.y2.0);
    let k = r * KAPPA;

    write!(content, "{} {} m\n", x1 + r, y1)?;
    write!(content, "{} {} l\n", x2 - r, y1)?;
    write!(content, "{} {} {} {} {} {} c\n", x2 - r + k, y1, x2, y1 + r - k, x2, y1 + r)?;
    write!(content, "{} {} l\n", x2, y2 - r)?;
    write!(content, "{} {} {} {} {} {} c\n", x2, y2 - r + k, x2 - r + k, y2, x2 - r, y2)?;
    write!(content, "{} {} l\n", x1 + r, y2)?;
    write!(content, "{} {} {} {} {} {} c\n", x1 + r - k, y2, x1, y2 - r + k, x1, y2 - r)?;
    write!(content, "{} {} l\n", x1, y1 + r)?;
    write!(content, "{} {} {} {} {} {} c\n", x1, y1 + r - k, x1 + r - k, y1, x1 + r, y1)?;
    write!(content, "h\n")
}

#[allow(clippy::write_with_newline)]
fn write_fill_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}

#[allow(clippy::write_with_newline)]
fn write_stroke_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} RG\n"),
        Colour::Grey { g } => write!(content, "{g} G\n"),
    }
}
