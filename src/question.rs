//! Question records: reading the JSON collection and normalising each record
//! into something every card can be drawn from.
//!
//! A record with missing or malformed fields is never rejected. Each problem
//! is reported as a [RecordIssue] and replaced with a placeholder so one bad
//! record costs at most one card's content, never the batch.

use crate::CardError;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// The most options a card has room for
pub const MAX_OPTIONS: usize = 4;
/// Drawn in place of a missing question
pub const MISSING_QUESTION: &str = "Missing question";
/// Used when a record has no difficulty tag
pub const DEFAULT_DIFFICULTY: &str = "curious";
/// Used when a record has no category
pub const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    /// 0-based index into `options`; only ever `Some` when it is in range
    pub answer: Option<usize>,
    pub difficulty: String,
    pub category: String,
}

impl Question {
    /// The text of the correct option, if the record names a valid one
    pub fn correct_option(&self) -> Option<&str> {
        self.answer
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }
}

/// Something wrong with a single record, reported once and then papered over
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordIssue {
    #[error("record is not a question object: {0}")]
    Malformed(String),
    #[error("missing question text")]
    MissingQuestion,
    #[error("missing answer options")]
    MissingOptions,
    #[error("option {0} is not text")]
    NonTextOption(usize),
    #[error("{0} options given, only the first {max} fit on a card", max = MAX_OPTIONS)]
    TooManyOptions(usize),
    #[error("missing answer index")]
    MissingAnswer,
    #[error("answer index {0} is out of range")]
    AnswerOutOfRange(i64),
    #[error("answer {0} is not an integer index")]
    AnswerNotAnIndex(String),
    #[error("missing difficulty, using {default:?}", default = DEFAULT_DIFFICULTY)]
    MissingDifficulty,
    #[error("missing category")]
    MissingCategory,
}

#[derive(Debug, Default, Deserialize)]
struct RawQuestion {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    options: Option<Vec<Value>>,
    #[serde(default)]
    answer: Option<Value>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

/// Make text drawable with the base-14 fonts: the bitcoin sign has no glyph
/// there, so it is spelled out
pub fn printable(text: &str) -> String {
    text.trim().replace('\u{20BF}', "BTC")
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| printable(&t)).filter(|t| !t.is_empty())
}

/// Normalise a single JSON record, collecting whatever had to be patched up
pub fn normalise_record(record: Value) -> (Question, Vec<RecordIssue>) {
    let mut issues = Vec::new();

    let raw = match serde_json::from_value::<RawQuestion>(record) {
        Ok(raw) => raw,
        Err(error) => {
            issues.push(RecordIssue::Malformed(error.to_string()));
            RawQuestion::default()
        }
    };

    let text = non_blank(raw.question).unwrap_or_else(|| {
        issues.push(RecordIssue::MissingQuestion);
        MISSING_QUESTION.to_string()
    });

    let mut options: Vec<String> = Vec::new();
    match raw.options {
        None => issues.push(RecordIssue::MissingOptions),
        Some(values) if values.is_empty() => issues.push(RecordIssue::MissingOptions),
        Some(values) => {
            if values.len() > MAX_OPTIONS {
                issues.push(RecordIssue::TooManyOptions(values.len()));
            }
            for (i, value) in values.into_iter().take(MAX_OPTIONS).enumerate() {
                let option = match value {
                    Value::String(s) => printable(&s),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => {
                        issues.push(RecordIssue::NonTextOption(i));
                        String::new()
                    }
                };
                options.push(option);
            }
        }
    }

    let answer = match raw.answer {
        None | Some(Value::Null) => {
            if !options.is_empty() {
                issues.push(RecordIssue::MissingAnswer);
            }
            None
        }
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) if i >= 0 && (i as usize) < options.len() => Some(i as usize),
            Some(i) => {
                issues.push(RecordIssue::AnswerOutOfRange(i));
                None
            }
            None => {
                issues.push(RecordIssue::AnswerNotAnIndex(n.to_string()));
                None
            }
        },
        Some(other) => {
            issues.push(RecordIssue::AnswerNotAnIndex(other.to_string()));
            None
        }
    };

    let difficulty = non_blank(raw.difficulty).unwrap_or_else(|| {
        issues.push(RecordIssue::MissingDifficulty);
        DEFAULT_DIFFICULTY.to_string()
    });

    let category = non_blank(raw.category).unwrap_or_else(|| {
        issues.push(RecordIssue::MissingCategory);
        UNKNOWN_CATEGORY.to_string()
    });

    (
        Question {
            text,
            options,
            answer,
            difficulty,
            category,
        },
        issues,
    )
}

/// Parse a JSON array of question records. Only a document that is not an
/// array at all is an error; individual records are normalised and their
/// issues logged against their position in the array.
pub fn parse_questions(json: &str) -> Result<Vec<Question>, serde_json::Error> {
    let records: Vec<Value> = serde_json::from_str(json)?;
    Ok(records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let (question, issues) = normalise_record(record);
            for issue in issues.iter() {
                log::warn!("record {}: {}", index + 1, issue);
            }
            question
        })
        .collect())
}

/// Read and parse the question collection at `path`
pub fn load_questions<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, CardError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(CardError::InputMissing(path.to_path_buf()));
    }

    let json = std::fs::read_to_string(path).map_err(|source| CardError::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let questions = parse_questions(&json).map_err(|source| CardError::InputUnparseable {
        path: path.to_path_buf(),
        source,
    })?;

    if questions.is_empty() {
        return Err(CardError::EmptyCollection(path.to_path_buf()));
    }
    log::debug!("loaded {} questions from {:?}", questions.len(), path);
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn well_formed_record_has_no_issues() {
        let (question, issues) = normalise_record(json!({
            "question": "What is the smallest unit of Bitcoin?",
            "options": ["Satoshi", "Bit", "Millibit", "Block"],
            "answer": 0,
            "difficulty": "curious",
            "category": "Technology and Security",
        }));
        assert!(issues.is_empty(), "{issues:?}");
        assert_eq!(question.correct_option(), Some("Satoshi"));
        assert_eq!(question.options.len(), 4);
    }

    #[test]
    fn out_of_range_answer_marks_nothing() {
        let (question, issues) = normalise_record(json!({
            "question": "Q?",
            "options": ["a", "b"],
            "answer": 7,
            "difficulty": "satoshi",
            "category": "x",
        }));
        assert_eq!(question.answer, None);
        assert_eq!(issues, vec![RecordIssue::AnswerOutOfRange(7)]);

        let (question, _) = normalise_record(json!({
            "question": "Q?", "options": ["a"], "answer": -1,
            "difficulty": "satoshi", "category": "x",
        }));
        assert_eq!(question.answer, None);
    }

    #[test]
    fn missing_fields_become_placeholders() {
        let (question, issues) = normalise_record(json!({}));
        assert_eq!(question.text, MISSING_QUESTION);
        assert!(question.options.is_empty());
        assert_eq!(question.answer, None);
        assert_eq!(question.difficulty, DEFAULT_DIFFICULTY);
        assert_eq!(question.category, UNKNOWN_CATEGORY);
        assert_eq!(
            issues,
            vec![
                RecordIssue::MissingQuestion,
                RecordIssue::MissingOptions,
                RecordIssue::MissingDifficulty,
                RecordIssue::MissingCategory,
            ]
        );
    }

    #[test]
    fn non_object_record_is_a_placeholder_card() {
        let (question, issues) = normalise_record(json!("just a string"));
        assert_eq!(question.text, MISSING_QUESTION);
        assert!(matches!(issues[0], RecordIssue::Malformed(_)));
    }

    #[test]
    fn extra_options_are_dropped() {
        let (question, issues) = normalise_record(json!({
            "question": "Q?", "options": ["a", "b", "c", "d", "e"], "answer": 4,
            "difficulty": "curious", "category": "x",
        }));
        assert_eq!(question.options, vec!["a", "b", "c", "d"]);
        assert_eq!(question.answer, None);
        assert!(issues.contains(&RecordIssue::TooManyOptions(5)));
        assert!(issues.contains(&RecordIssue::AnswerOutOfRange(4)));
    }

    #[test]
    fn bitcoin_sign_is_spelled_out() {
        assert_eq!(printable(" 1 \u{20BF} = 100M sats "), "1 BTC = 100M sats");
    }

    #[test]
    fn collection_must_be_an_array() {
        assert!(parse_questions(r#"{"question": "Q?"}"#).is_err());
        assert_eq!(parse_questions("[]").unwrap(), vec![]);
        let questions = parse_questions(r#"[{"question": "Q?"}, 42]"#).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].text, MISSING_QUESTION);
    }
}
