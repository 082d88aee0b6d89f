//! Turning input files into output files: naming, the single-input job and
//! language batches.

use crate::answer_sheet::render_answer_sheet;
use crate::config::Config;
use crate::deck::render_deck;
use crate::image::Image;
use crate::question::load_questions;
use crate::CardError;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Output file used when none is given
pub const DEFAULT_OUTPUT: &str = "bitcoin_trivia_cards.pdf";

/// `dir/stem.ext` -> `dir/stem{suffix}.ext`, `.pdf` when there was no extension
fn with_stem_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "pdf".to_string());
    path.with_file_name(format!("{stem}{suffix}.{extension}"))
}

/// Where the answer sheet for the deck at `output` goes
pub fn answers_path(output: &Path) -> PathBuf {
    with_stem_suffix(output, "_answers")
}

/// `output` with `_YYYYMMDD_HHMMSS` appended to its stem
pub fn timestamped(output: &Path, at: NaiveDateTime) -> PathBuf {
    with_stem_suffix(output, &at.format("_%Y%m%d_%H%M%S").to_string())
}

/// The deck file for one language of a batch
pub fn language_output(output: &Path, language: &str) -> PathBuf {
    with_stem_suffix(output, &format!("_{language}"))
}

/// Every `*.json` file in `dir` keyed by its stem, which names the language
pub fn language_inputs(dir: &Path) -> Result<Vec<(String, PathBuf)>, CardError> {
    let mut inputs = BTreeMap::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().map_or(true, |e| e != "json") {
            continue;
        }
        if let Some(language) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) {
            inputs.entry(language).or_insert(path);
        }
    }
    Ok(inputs.into_iter().collect())
}

/// One input file and what to make of it
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Also write the answer sheet next to `output`
    pub answers: bool,
}

/// What a finished [Job] produced
#[derive(Debug, Clone, PartialEq)]
pub struct JobReport {
    pub cards: usize,
    pub pages: usize,
    pub output: PathBuf,
    pub answers: Option<PathBuf>,
}

/// Read the input, render the deck (and the answer sheet if asked to) and
/// write them out
pub fn run_job(job: &Job, config: &Config, logo: Option<&Image>) -> Result<JobReport, CardError> {
    let questions = load_questions(&job.input)?;

    let deck = render_deck(&questions, config, logo.cloned())?;
    let pages = deck.page_count();
    deck.save(&job.output)?;
    log::info!(
        "wrote {} cards on {} page(s) to {:?}",
        questions.len(),
        pages,
        job.output
    );

    let answers = if job.answers {
        let path = answers_path(&job.output);
        render_answer_sheet(&questions, config).save(&path)?;
        log::info!("wrote answer sheet to {:?}", path);
        Some(path)
    } else {
        None
    };

    Ok(JobReport {
        cards: questions.len(),
        pages,
        output: job.output.clone(),
        answers,
    })
}

/// Run every job, reporting failures and carrying on with the rest.
/// Returns how many succeeded.
pub fn run_batch(jobs: &[Job], config: &Config, logo: Option<&Image>) -> usize {
    let mut succeeded = 0;
    for job in jobs.iter() {
        match run_job(job, config, logo) {
            Ok(_) => succeeded += 1,
            Err(e) => log::error!("{:?}: {}", job.input, e),
        }
    }
    log::info!("{} of {} input(s) processed", succeeded, jobs.len());
    succeeded
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn answer_sheet_sits_next_to_the_deck() {
        assert_eq!(
            answers_path(Path::new("out/cards.pdf")),
            PathBuf::from("out/cards_answers.pdf")
        );
        assert_eq!(answers_path(Path::new("cards")), PathBuf::from("cards_answers.pdf"));
    }

    #[test]
    fn timestamp_goes_before_the_extension() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 1)
            .unwrap();
        assert_eq!(
            timestamped(Path::new(DEFAULT_OUTPUT), at),
            PathBuf::from("bitcoin_trivia_cards_20240309_070501.pdf")
        );
    }

    #[test]
    fn languages_are_found_by_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["en.json", "de.json", "notes.txt"] {
            std::fs::write(dir.path().join(name), "[]").unwrap();
        }
        std::fs::create_dir(dir.path().join("fr.json")).unwrap();

        let inputs = language_inputs(dir.path()).unwrap();
        let languages: Vec<&str> = inputs.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(languages, vec!["de", "en"]);
        assert_eq!(
            language_output(Path::new(DEFAULT_OUTPUT), "de"),
            PathBuf::from("bitcoin_trivia_cards_de.pdf")
        );
    }

    #[test]
    fn a_failing_job_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("en.json");
        std::fs::write(
            &good,
            r#"[{"question": "Q?", "options": ["a", "b"], "answer": 1,
                 "difficulty": "curious", "category": "x"}]"#,
        )
        .unwrap();

        let jobs = vec![
            Job {
                input: dir.path().join("missing.json"),
                output: dir.path().join("missing.pdf"),
                answers: false,
            },
            Job {
                input: good,
                output: dir.path().join("en.pdf"),
                answers: true,
            },
        ];
        let config = Config {
            logo: None,
            ..Config::default()
        };
        assert_eq!(run_batch(&jobs, &config, None), 1);
        assert!(dir.path().join("en.pdf").is_file());
        assert!(dir.path().join("en_answers.pdf").is_file());
        assert!(!dir.path().join("missing.pdf").exists());
    }
}
