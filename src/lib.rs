//! Stochastic survey simulation.
//!
//! A [`survey::SurveyRun`] asks freshly generated respondents a fixed set of
//! questions until enough of them consent. The [`manager::Manager`] stores
//! runs on disk, resumes them, and analyzes the collected responses.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod manager;
pub mod model;
pub mod stats;
pub mod survey;
