use crate::answer_sheet::AnswerSheetStyle;
use crate::layout::{CardGrid, CardStyle, Margins};
use crate::pagesize::{self, PageSize};
use crate::theme::Theme;
use crate::units::{Mm, Pt};
use crate::CardError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Logo looked for when neither the config file nor the command line names one
pub const DEFAULT_LOGO: &str = "tools/BitcoinTriviaV3_copy.png";

/// Everything that shapes the generated documents. Every field has a
/// default, so a config file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Paper size name, see [pagesize::by_name]
    pub page_size: String,
    pub margin_mm: f32,
    /// Gutter between neighbouring cards
    pub spacing_mm: f32,
    pub card: CardStyle,
    pub theme: Theme,
    /// Logo placed on every card; `None` always uses the fallback text
    pub logo: Option<PathBuf>,
    /// Title of the card deck written to the document info
    pub title: String,
    pub author: Option<String>,
    pub answer_sheet: AnswerSheetStyle,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            page_size: "A4".to_string(),
            margin_mm: 10.0,
            spacing_mm: 2.0,
            card: CardStyle::default(),
            theme: Theme::default(),
            logo: Some(PathBuf::from(DEFAULT_LOGO)),
            title: "Bitcoin Trivia".to_string(),
            author: None,
            answer_sheet: AnswerSheetStyle::default(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Config, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Config, CardError> {
        let path = path.as_ref();
        let config_error = |reason: String| CardError::Config {
            path: path.to_path_buf(),
            reason,
        };

        let contents = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let config = Config::from_json(&contents).map_err(|e| config_error(e.to_string()))?;
        log::debug!("loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn page_size(&self) -> Result<PageSize, CardError> {
        pagesize::by_name(&self.page_size)
            .ok_or_else(|| CardError::UnknownPageSize(self.page_size.clone()))
    }

    /// The card grid for the configured paper, margin and spacing
    pub fn grid(&self) -> Result<CardGrid, CardError> {
        let spacing: Pt = Mm(self.spacing_mm).into();
        Ok(CardGrid::new(
            self.page_size()?,
            Margins::all(Mm(self.margin_mm)),
            spacing,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::Colour;
    use std::io::Write;

    #[test]
    fn empty_file_means_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.grid().unwrap().page_size(), pagesize::A4);
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config = Config::from_json(
            r#"{
                "page_size": "letter",
                "card": { "option_font_size": 10 },
                "theme": { "difficulty_colours": { "BITCOINER": 0.9 } },
                "logo": null
            }"#,
        )
        .unwrap();
        assert_eq!(config.grid().unwrap().page_size(), pagesize::LETTER);
        assert_eq!(config.card.option_font_size, 10.0);
        assert_eq!(config.card.option_font_size_reduced, 8.0);
        assert_eq!(config.theme.difficulty_colour("curious"), Colour::new_grey(0.9));
        assert_eq!(config.logo, None);
    }

    #[test]
    fn typos_are_rejected() {
        assert!(Config::from_json(r#"{ "margin": 5 }"#).is_err());
    }

    #[test]
    fn unknown_page_size_is_an_error() {
        let config = Config {
            page_size: "napkin".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.grid(), Err(CardError::UnknownPageSize(name)) if name == "napkin"));
    }

    #[test]
    fn load_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.json");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{{ \"margin_mm\": 12.5 }}").unwrap();

        assert_eq!(Config::load_from(&path).unwrap().margin_mm, 12.5);

        let missing = dir.path().join("missing.json");
        match Config::load_from(&missing) {
            Err(CardError::Config { path, .. }) => assert_eq!(path, missing),
            other => panic!("unexpected {other:?}"),
        }
    }
}
