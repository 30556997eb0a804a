use crate::model::Question;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Survey simulation configuration.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Question set asked to every respondent.
    pub survey: SurveyConfig,
    /// Respondent sampling parameters.
    pub sampling: SamplingConfig,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// Questions in the order they are asked.
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Number of consenting respondents collected per simulation pass.
    pub n_consenting: usize,
    /// Seed of the random number generator (OS entropy if absent).
    pub seed: Option<u64>,
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// The file must be TOML-encoded and contain a serialized [`Config`].
    /// Performs validation on all parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let questions = &self.survey.questions;
        check_num(questions.len(), 0..=1000).context("invalid number of questions")?;
        for (index, question) in questions.iter().enumerate() {
            if question.text().trim().is_empty() {
                bail!("question {index} must have a non-empty text");
            }
        }

        check_num(self.sampling.n_consenting, 0..=100_000)
            .context("invalid number of consenting respondents")?;

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
