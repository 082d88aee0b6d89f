//! The companion answer sheet: every question with its correct answer, grouped
//! by difficulty.

use crate::colour::colours;
use crate::config::Config;
use crate::document::Document;
use crate::font::BuiltinFont;
use crate::info::Info;
use crate::layout::{wrap, Margins};
use crate::page::{Page, SpanFont, SpanLayout};
use crate::pagesize::{self, PageSize};
use crate::question::Question;
use crate::theme::Theme;
use crate::units::{Mm, Pt};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Printed in place of the answer when a record has no valid answer index
pub const NO_ANSWER: &str = "(no answer)";

const PAGE_SIZE: PageSize = pagesize::A4;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnswerSheetStyle {
    pub title: String,
    pub margin_mm: f32,
    /// Character budget per body line
    pub max_chars: usize,
    pub title_font_size: f32,
    pub heading_font_size: f32,
    pub body_font_size: f32,
    /// How far "Answer:" lines are indented
    pub answer_indent: f32,
}

impl Default for AnswerSheetStyle {
    fn default() -> Self {
        AnswerSheetStyle {
            title: "Bitcoin Trivia - Answer Sheet".to_string(),
            margin_mm: 20.0,
            max_chars: 90,
            title_font_size: 18.0,
            heading_font_size: 14.0,
            body_font_size: 10.0,
            answer_indent: 20.0,
        }
    }
}

/// "BITCOINER" -> "Bitcoiner"
fn title_case(label: &str) -> String {
    label
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Questions grouped by their printed difficulty label, groups in
/// alphabetical order of the label, questions in input order within a group
pub fn group_by_difficulty<'q>(
    questions: &'q [Question],
    theme: &Theme,
) -> Vec<(String, Vec<&'q Question>)> {
    let mut groups: BTreeMap<String, Vec<&Question>> = BTreeMap::new();
    for question in questions.iter() {
        groups
            .entry(theme.difficulty_label(&question.difficulty))
            .or_default()
            .push(question);
    }
    groups.into_iter().collect()
}

/// Top-down writer that starts a new page whenever the next line would
/// cross the bottom margin
struct SheetWriter<'a> {
    doc: &'a mut Document,
    margins: Margins,
    page: Page,
    cursor: Pt,
    pages_written: usize,
}

impl<'a> SheetWriter<'a> {
    fn new(doc: &'a mut Document, margins: Margins) -> Self {
        let page = Page::new(PAGE_SIZE, Some(margins.clone()));
        let cursor = page.content_box.y2;
        SheetWriter {
            doc,
            margins,
            page,
            cursor,
            pages_written: 0,
        }
    }

    fn break_page(&mut self) {
        let next = Page::new(PAGE_SIZE, Some(self.margins.clone()));
        self.cursor = next.content_box.y2;
        let full = std::mem::replace(&mut self.page, next);
        self.doc.add_page(full);
        self.pages_written += 1;
    }

    fn skip(&mut self, space: Pt) {
        self.cursor = (self.cursor - space).max(self.page.content_box.y1);
    }

    fn line(&mut self, text: String, font: BuiltinFont, size: Pt, x: Pt) {
        let advance = size * 1.2;
        if self.cursor - advance < self.page.content_box.y1 {
            self.break_page();
        }
        self.cursor = self.cursor - advance;
        // the character budget does not bound the width of wide glyphs
        let size = font.size_to_fit(&text, size, self.page.content_box.x2 - x);
        self.page.add_span(SpanLayout {
            text,
            font: SpanFont { font, size },
            colour: colours::BLACK,
            coords: (x, self.cursor),
        });
    }

    fn paragraph(&mut self, text: &str, max_chars: usize, size: Pt, x: Pt) {
        for line in wrap(text, max_chars) {
            self.line(line, BuiltinFont::Helvetica, size, x);
        }
    }

    fn finish(mut self) -> usize {
        if !self.page.contents.is_empty() {
            self.break_page();
        }
        self.pages_written
    }
}

/// Lay out the answer sheet: a title, then per difficulty a heading and the
/// numbered questions each followed by an indented answer line
pub fn render_answer_sheet(questions: &[Question], config: &Config) -> Document {
    let style = &config.answer_sheet;
    let margins = Margins::all(Mm(style.margin_mm));
    let left = margins.left;
    let centre = PAGE_SIZE.0 / 2.0;
    let body = Pt(style.body_font_size);
    let heading = Pt(style.heading_font_size);

    let mut doc = Document::default();
    doc.set_info(
        Info::titled(&style.title, config.author.as_deref())
            .with_subject(format!("answers to {} trivia cards", questions.len())),
    );

    let mut sheet = SheetWriter::new(&mut doc, margins);

    let title_size = Pt(style.title_font_size);
    let title_font = BuiltinFont::HelveticaBold;
    let title_x = centre - title_font.width_of_text(&style.title, title_size) / 2.0;
    sheet.line(style.title.clone(), title_font, title_size, title_x.max(left));
    sheet.skip(Mm(5.0).into());

    for (label, group) in group_by_difficulty(questions, &config.theme) {
        sheet.line(
            format!("Difficulty: {}", title_case(&label)),
            BuiltinFont::HelveticaBold,
            heading,
            left,
        );
        sheet.skip(Mm(3.0).into());

        for (i, question) in group.iter().enumerate() {
            sheet.paragraph(
                &format!("{}. {}", i + 1, question.text),
                style.max_chars,
                body,
                left,
            );
            sheet.skip(Pt(6.0));
            let answer = question.correct_option().unwrap_or(NO_ANSWER);
            sheet.paragraph(
                &format!("Answer: {answer}"),
                style.max_chars.saturating_sub(4),
                body,
                left + Pt(style.answer_indent),
            );
            sheet.skip(Pt(12.0));
        }
        sheet.skip(Mm(5.0).into());
    }

    let pages = sheet.finish();
    log::debug!("answer sheet: {} page(s)", pages);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, difficulty: &str, answer: Option<usize>) -> Question {
        Question {
            text: text.to_string(),
            options: vec!["right".into(), "wrong".into()],
            answer,
            difficulty: difficulty.to_string(),
            category: "History".to_string(),
        }
    }

    fn texts(doc: &Document) -> Vec<String> {
        (0..doc.page_count())
            .filter_map(|i| doc.page_at(i))
            .flat_map(|page| page.spans().map(|s| s.text.clone()).collect::<Vec<_>>())
            .collect()
    }

    #[test]
    fn groups_follow_the_printed_label_alphabetically() {
        let questions = vec![
            question("s1", "satoshi", Some(0)),
            question("c1", "curious", Some(0)),
            question("b1", "bitcoiner", Some(0)),
            question("c2", "curious", Some(1)),
        ];
        let groups = group_by_difficulty(&questions, &Theme::default());
        let labels: Vec<&str> = groups.iter().map(|(l, _)| l.as_str()).collect();
        // curious -> BITCOINER, bitcoiner -> CYPHERPUNK
        assert_eq!(labels, vec!["BITCOINER", "CYPHERPUNK", "SATOSHI"]);
        let first: Vec<&str> = groups[0].1.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(first, vec!["c1", "c2"]);
    }

    #[test]
    fn sheet_lists_questions_and_answers() {
        let questions = vec![
            question("What is a satoshi?", "curious", Some(0)),
            question("Who wrote the whitepaper?", "curious", None),
        ];
        let doc = render_answer_sheet(&questions, &Config::default());
        let texts = texts(&doc);
        assert_eq!(texts[0], "Bitcoin Trivia - Answer Sheet");
        assert_eq!(texts[1], "Difficulty: Bitcoiner");
        assert_eq!(texts[2], "1. What is a satoshi?");
        assert_eq!(texts[3], "Answer: right");
        assert_eq!(texts[4], "2. Who wrote the whitepaper?");
        assert_eq!(texts[5], format!("Answer: {NO_ANSWER}"));
    }

    #[test]
    fn long_sheets_paginate_within_the_margins() {
        let mut questions: Vec<Question> = (0..120)
            .map(|i| question(&format!("Question {i} {}", "lorem ipsum ".repeat(12)), "satoshi", Some(0)))
            .collect();
        questions.push(question(
            "WHAT IS THE NAME OF THE PSEUDONYMOUS CREATOR WHO PUBLISHED THE BITCOIN WHITEPAPER IN 2008?",
            "satoshi",
            Some(0),
        ));
        questions.push(question(&"W".repeat(200), "satoshi", Some(0)));
        let doc = render_answer_sheet(&questions, &Config::default());
        assert!(doc.page_count() > 1);
        for i in 0..doc.page_count() {
            let page = doc.page_at(i).unwrap();
            for span in page.spans() {
                assert!(span.coords.1 >= page.content_box.y1);
                assert!(span.coords.1 <= page.content_box.y2);
                let right = span.coords.0 + span.font.font.width_of_text(&span.text, span.font.size);
                assert!(right <= page.content_box.x2 + Pt(0.01), "{:?} ends at {:?}", span.text, right);
                assert!(span.coords.0 >= page.content_box.x1);
            }
        }
    }

    #[test]
    fn empty_collection_still_has_a_title_page() {
        let doc = render_answer_sheet(&[], &Config::default());
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn labels_are_title_cased() {
        assert_eq!(title_case("CYPHERPUNK"), "Cypherpunk");
        assert_eq!(title_case("BIG BRAIN"), "Big Brain");
    }
}
