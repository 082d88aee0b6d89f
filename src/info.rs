use crate::refs::{ObjectRefs, RefType};
use chrono::{DateTime, Datelike, Local, Offset, TimeZone, Timelike};
use pdf_writer::{Date, Pdf, TextStr};

/// Metadata written to the PDF info dictionary of a generated deck or answer sheet
#[derive(Default, Debug, Clone)]
pub struct Info {
    pub title: Option<String>,
    pub author: Option<String>,
    /// What the document holds, e.g. "27 trivia cards"
    pub subject: Option<String>,
}

impl Info {
    /// Metadata for a document with the given title and an optional author
    pub fn titled<S: ToString>(title: S, author: Option<&str>) -> Info {
        Info {
            title: Some(title.to_string()),
            author: author.map(str::to_string),
            subject: None,
        }
    }

    pub fn with_subject<S: ToString>(mut self, subject: S) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectRefs, writer: &mut Pdf) {
        let id = refs.alloc(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject));
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));
        info.creation_date(pdf_date(&Local::now()));
    }
}

/// A timestamp as a PDF date, keeping its UTC offset
fn pdf_date<Tz: TimeZone>(at: &DateTime<Tz>) -> Date {
    let offset_minutes = at.offset().fix().local_minus_utc() / 60;
    Date::new(at.year() as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
        .utc_offset_hour((offset_minutes / 60) as i8)
        .utc_offset_minute((offset_minutes % 60).unsigned_abs() as u8)
}
