use crate::model::{NO_ANSWER, Question, QuestionKind, Response};
use crate::stats::{Accumulator, Tally};
use anyhow::{Context, Result};
use rmp_serde::decode;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

pub trait Obs {
    fn update(&mut self, response: &Response);
    fn report(&self) -> serde_json::Value;
}

/// Fraction of respondents who consented.
pub struct ConsentRate {
    acc: Accumulator,
}

impl ConsentRate {
    pub fn new() -> Self {
        Self {
            acc: Accumulator::new(),
        }
    }
}

impl Obs for ConsentRate {
    fn update(&mut self, response: &Response) {
        self.acc.add(if response.has_answered() { 1.0 } else { 0.0 });
    }

    fn report(&self) -> serde_json::Value {
        serde_json::json!({ "consent_rate": self.acc.report() })
    }
}

/// Fraction of consenting respondents who answered each question.
pub struct AnswerRate {
    acc_vec: Vec<Accumulator>,
}

impl AnswerRate {
    pub fn new(questions: &[Question]) -> Self {
        let mut acc_vec = Vec::new();
        acc_vec.resize_with(questions.len(), Accumulator::new);
        Self { acc_vec }
    }
}

impl Obs for AnswerRate {
    fn update(&mut self, response: &Response) {
        if !response.has_answered() {
            return;
        }
        for (index, acc) in self.acc_vec.iter_mut().enumerate() {
            let answered = response.answer(index) != NO_ANSWER;
            acc.add(if answered { 1.0 } else { 0.0 });
        }
    }

    fn report(&self) -> serde_json::Value {
        let reports: Vec<_> = self.acc_vec.iter().map(|acc| acc.report()).collect();
        serde_json::json!({ "answer_rate": reports })
    }
}

/// Counts of every answer given to each question by consenting respondents.
pub struct AnswerTally {
    tally_vec: Vec<Tally>,
}

impl AnswerTally {
    pub fn new(questions: &[Question]) -> Self {
        let mut tally_vec = Vec::new();
        tally_vec.resize_with(questions.len(), Tally::new);
        Self { tally_vec }
    }
}

impl Obs for AnswerTally {
    fn update(&mut self, response: &Response) {
        if !response.has_answered() {
            return;
        }
        for (index, tally) in self.tally_vec.iter_mut().enumerate() {
            tally.add(response.answer(index));
        }
    }

    fn report(&self) -> serde_json::Value {
        let reports: Vec<_> = self.tally_vec.iter().map(|tally| tally.report()).collect();
        serde_json::json!({ "answer_tally": reports })
    }
}

/// Statistics of the values recorded for each number question.
pub struct NumberAnswers {
    acc_vec: Vec<(usize, Accumulator)>,
}

impl NumberAnswers {
    pub fn new(questions: &[Question]) -> Self {
        let acc_vec = questions
            .iter()
            .enumerate()
            .filter(|(_, question)| question.kind() == QuestionKind::Number)
            .map(|(index, _)| (index, Accumulator::new()))
            .collect();
        Self { acc_vec }
    }
}

impl Obs for NumberAnswers {
    fn update(&mut self, response: &Response) {
        for (index, acc) in &mut self.acc_vec {
            if let Ok(val) = response.answer(*index).parse::<f64>() {
                acc.add(val);
            }
        }
    }

    fn report(&self) -> serde_json::Value {
        let reports: Vec<_> = self
            .acc_vec
            .iter()
            .map(|(index, acc)| serde_json::json!({ "question": index, "stats": acc.report() }))
            .collect();
        serde_json::json!({ "number_answers": reports })
    }
}

pub struct Analyzer {
    obs_ptr_vec: Vec<Box<dyn Obs>>,
}

impl Analyzer {
    pub fn new(questions: &[Question]) -> Self {
        let obs_ptr_vec: Vec<Box<dyn Obs>> = vec![
            Box::new(ConsentRate::new()),
            Box::new(AnswerRate::new(questions)),
            Box::new(AnswerTally::new(questions)),
            Box::new(NumberAnswers::new(questions)),
        ];
        Self { obs_ptr_vec }
    }

    pub fn add_responses(&mut self, responses: &[Response]) {
        for response in responses {
            for obs in &mut self.obs_ptr_vec {
                obs.update(response);
            }
        }
    }

    pub fn add_file<P: AsRef<Path>>(&mut self, file: P) -> Result<()> {
        let file = file.as_ref();
        let file = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
        let mut reader = BufReader::new(file);

        let responses: Vec<Response> =
            decode::from_read(&mut reader).context("failed to deserialize respondents")?;
        self.add_responses(&responses);

        Ok(())
    }

    pub fn report(&self) -> Vec<serde_json::Value> {
        self.obs_ptr_vec.iter().map(|obs| obs.report()).collect()
    }

    pub fn save_results<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let file = file.as_ref();
        let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, &self.report())
            .context("failed to serialize results")?;
        writer.flush().context("failed to flush writer stream")?;

        Ok(())
    }
}
