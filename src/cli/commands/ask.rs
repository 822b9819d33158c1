//! Ask command implementation.
//!
//! One-shot question answered in-process, without a running service.

use crate::answer::{AnswerService, Role, Turn};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(
    question: &str,
    model: Option<String>,
    top_k: Option<usize>,
    mut settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Answer, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'profchat doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    if let Some(model) = model {
        settings.generation.model = model;
    }

    let mut service = AnswerService::from_settings(&settings)?;
    if let Some(top_k) = top_k {
        service = service.with_top_k(top_k);
    }

    let turns = vec![Turn::new(Role::User, question)];

    let spinner = Output::spinner("Searching reviews...");

    match service.answer(&turns).await {
        Ok(answer) => {
            spinner.finish_and_clear();
            println!("\n{}\n", answer);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
