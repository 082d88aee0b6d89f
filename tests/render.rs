use std::path::{Path, PathBuf};
use trivia_cards::layout::CARDS_PER_PAGE;
use trivia_cards::{load_questions, render_deck, run_job, CardError, Config, Job, PageContents};

fn record(i: usize) -> String {
    format!(
        r#"{{"question": "Question {i}: how many sats make one ₿?",
            "options": ["100", "1000", "100 million", "21 million"],
            "answer": 2,
            "difficulty": "bitcoiner",
            "category": "Technologie und Sicherheit"}}"#
    )
}

fn write_collection(dir: &Path, name: &str, count: usize) -> PathBuf {
    let records: Vec<String> = (0..count).map(record).collect();
    let path = dir.join(name);
    std::fs::write(&path, format!("[{}]", records.join(","))).unwrap();
    path
}

fn config() -> Config {
    Config {
        logo: None,
        ..Config::default()
    }
}

fn job(input: PathBuf, output: PathBuf, answers: bool) -> Job {
    Job {
        input,
        output,
        answers,
    }
}

fn pdf_text(path: &Path) -> String {
    String::from_utf8_lossy(&std::fs::read(path).unwrap()).into_owned()
}

#[test]
fn twenty_seven_questions_make_three_full_pages() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_collection(dir.path(), "en.json", 27);
    let output = dir.path().join("cards.pdf");

    let report = run_job(&job(input, output.clone(), false), &config(), None).unwrap();
    assert_eq!(report.cards, 27);
    assert_eq!(report.pages, 3);
    assert_eq!(report.answers, None);

    let pdf = pdf_text(&output);
    assert!(pdf.starts_with("%PDF-"));
    assert!(pdf.contains("/Count 3"));
    assert!(pdf.contains("/Title (Bitcoin Trivia)"));
}

#[test]
fn ten_questions_spill_onto_a_second_page() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_collection(dir.path(), "en.json", 10);
    let questions = load_questions(&input).unwrap();

    let deck = render_deck(&questions, &config(), None).unwrap();
    assert_eq!(deck.page_count(), 2);
    let borders = |i: usize| {
        deck.page_at(i)
            .unwrap()
            .contents
            .iter()
            .filter(|c| matches!(c, PageContents::StrokeRoundRect { .. }))
            .count()
    };
    assert_eq!(borders(0), CARDS_PER_PAGE);
    assert_eq!(borders(1), 1);
}

#[test]
fn cards_show_labels_prefixes_and_spelled_out_currency() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_collection(dir.path(), "de.json", 1);
    let questions = load_questions(&input).unwrap();
    let deck = render_deck(&questions, &config(), None).unwrap();
    let texts: Vec<String> = deck
        .page_at(0)
        .unwrap()
        .spans()
        .map(|s| s.text.clone())
        .collect();

    assert!(texts.iter().any(|t| t == "CYPHERPUNK"));
    assert!(texts.iter().any(|t| t == "Technologie und Sicherheit"));
    assert!(texts.iter().any(|t| t == "[C]"));
    assert!(texts.iter().any(|t| t == "A."));
    assert!(texts.iter().any(|t| t.contains("BTC")));
    assert!(!texts.iter().any(|t| t.contains('\u{20BF}')));
}

#[test]
fn answer_sheet_is_written_next_to_the_deck() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_collection(dir.path(), "en.json", 12);
    let output = dir.path().join("deck.pdf");

    let report = run_job(&job(input, output, true), &config(), None).unwrap();
    let answers = report.answers.unwrap();
    assert_eq!(answers, dir.path().join("deck_answers.pdf"));
    let pdf = pdf_text(&answers);
    assert!(pdf.starts_with("%PDF-"));
    assert!(pdf.contains("/Title (Bitcoin Trivia - Answer Sheet)"));
}

#[test]
fn missing_input_is_reported_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("cards.pdf");
    let result = run_job(
        &job(dir.path().join("nope.json"), output.clone(), false),
        &config(),
        None,
    );
    assert!(matches!(result, Err(CardError::InputMissing(_))));
    assert!(!output.exists());
}

#[test]
fn empty_and_unparseable_collections_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    let empty = dir.path().join("empty.json");
    std::fs::write(&empty, "[]").unwrap();
    assert!(matches!(
        load_questions(&empty),
        Err(CardError::EmptyCollection(_))
    ));

    let object = dir.path().join("object.json");
    std::fs::write(&object, r#"{"question": "not in a list"}"#).unwrap();
    assert!(matches!(
        load_questions(&object),
        Err(CardError::InputUnparseable { .. })
    ));
}

#[test]
fn malformed_records_still_become_cards() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("mixed.json");
    std::fs::write(
        &input,
        format!(
            r#"[{}, {{"options": ["a"]}}, "junk", {{"question": "Q?", "options": [], "answer": 3}}]"#,
            record(0)
        ),
    )
    .unwrap();
    let output = dir.path().join("mixed.pdf");

    let report = run_job(&job(input, output.clone(), true), &config(), None).unwrap();
    assert_eq!(report.cards, 4);
    assert_eq!(report.pages, 1);
    assert!(output.is_file());
}

#[test]
fn demo_collection_renders_with_demo_config() {
    let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    let config = Config::load_from(demos.join("config.json")).unwrap();
    assert_eq!(config.author.as_deref(), Some("Trivia Night"));

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("demo.pdf");
    let report = run_job(
        &job(demos.join("questions.json"), output.clone(), true),
        &config,
        None,
    )
    .unwrap();
    assert_eq!(report.cards, 5);
    assert_eq!(report.pages, 1);

    let pdf = pdf_text(&output);
    assert!(pdf.contains("/Author (Trivia Night)"));
    assert!(dir.path().join("demo_answers.pdf").is_file());
}
