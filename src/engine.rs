use crate::config::Config;
use crate::model::Response;
use crate::survey::SurveyRun;
use anyhow::{Context, Result};
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use rmp_serde::{decode, encode};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// Survey simulation engine.
///
/// Holds the configuration, the survey run, and the random number generator
/// shared by every draw, and provides methods to run, save, and load
/// simulations.
#[derive(Serialize, Deserialize)]
pub struct Engine {
    cfg: Config,
    run: SurveyRun,
    rng: ChaCha12Rng,
}

impl Engine {
    /// Create a new `Engine` whose run asks the configured questions.
    ///
    /// With a configured seed, each `run_idx` draws from its own stream of
    /// the seeded generator.
    pub fn new(cfg: Config, run_idx: usize) -> Result<Self> {
        let rng = match cfg.sampling.seed {
            Some(seed) => {
                let mut rng = ChaCha12Rng::seed_from_u64(seed);
                rng.set_stream(run_idx as u64);
                rng
            }
            None => ChaCha12Rng::try_from_os_rng()?,
        };

        let mut run = SurveyRun::new();
        for question in cfg.survey.questions.iter().cloned() {
            let (kind, text) = question.into_parts();
            run.add_question(kind, text);
        }

        Ok(Self { cfg, run, rng })
    }

    pub fn cfg(&self) -> &Config {
        &self.cfg
    }

    pub fn run(&self) -> &SurveyRun {
        &self.run
    }

    /// Perform one simulation pass and return the respondents it created.
    pub fn run_pass(&mut self) -> &[Response] {
        let n_consenting = self.cfg.sampling.n_consenting;
        let n_created = self.run.run_simulation(n_consenting, &mut self.rng);

        let participants = self.run.all_participants();
        log::info!(
            "asked {n_created} respondents, {n_consenting} consented ({} in total)",
            participants.len()
        );

        &participants[participants.len() - n_created..]
    }

    /// Perform one simulation pass and save its respondents to a binary file.
    pub fn perform_simulation<P: AsRef<Path>>(&mut self, file: P) -> Result<()> {
        let file = file.as_ref();
        let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
        let mut writer = BufWriter::new(file);

        let respondents = self.run_pass();
        encode::write(&mut writer, respondents).context("failed to serialize respondents")?;

        writer.flush().context("failed to flush writer stream")?;

        Ok(())
    }

    /// Save a checkpoint of the entire engine state.
    ///
    /// Can be used to resume the simulation later.
    pub fn save_checkpoint<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let file = file.as_ref();
        let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
        let mut writer = BufWriter::new(file);
        encode::write(&mut writer, &self).context("failed to serialize engine")?;
        writer.flush().context("failed to flush writer stream")?;
        Ok(())
    }

    /// Load a previously saved engine checkpoint.
    pub fn load_checkpoint<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let file = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
        let mut reader = BufReader::new(file);
        let engine = decode::from_read(&mut reader).context("failed to deserialize engine")?;
        Ok(engine)
    }

    /// Write every participant's answers in human-readable form.
    pub fn write_report<W: Write>(&self, writer: &mut W) -> Result<()> {
        for participant in self.run.all_participants() {
            writeln!(writer, "Participant: {}:", participant.id())?;
            if !participant.has_answered() {
                writeln!(writer, "\tNo responses")?;
                continue;
            }
            for (index, question) in self.run.questions().iter().enumerate() {
                writeln!(writer, "\t{} : {}", question.text(), participant.answer(index))?;
            }
        }
        Ok(())
    }
}
