//! Evaluate command - batch evaluation of a JSON case file

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde::Deserialize;
use tracing::info;

use crate::domain::evaluation::EvaluationInput;

#[derive(Args, Clone)]
pub struct EvaluateArgs {
    /// JSON file holding an array of cases, or `{"cases": [...]}`
    pub file: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CaseFile {
    Cases { cases: Vec<EvaluationInput> },
    List(Vec<EvaluationInput>),
}

impl CaseFile {
    fn into_cases(self) -> Vec<EvaluationInput> {
        match self {
            Self::Cases { cases } | Self::List(cases) => cases,
        }
    }
}

pub async fn run(args: EvaluateArgs) -> anyhow::Result<()> {
    let mut config = super::bootstrap();
    config.evaluation.enabled = false;

    let state = crate::create_app_state_with_config(&config).await?;

    let cases = read_cases(&args.file).await?;
    info!(cases = cases.len(), file = %args.file.display(), "Running batch evaluation");

    let result = state.pipeline.evaluate_batch(cases).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

async fn read_cases(path: &Path) -> anyhow::Result<Vec<EvaluationInput>> {
    let input = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    parse_cases(&input).with_context(|| format!("Invalid case file {}", path.display()))
}

fn parse_cases(input: &str) -> Result<Vec<EvaluationInput>, serde_json::Error> {
    serde_json::from_str::<CaseFile>(input).map(CaseFile::into_cases)
}
