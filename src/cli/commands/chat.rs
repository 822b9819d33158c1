//! Interactive chat command.
//!
//! Drives the conversation state machine from stdin against a running
//! answer service.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::client::{AnswerClient, Conversation};
use crate::config::Settings;
use crate::error::Result;
use console::style;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tracing::debug;

/// Run the interactive chat command.
pub async fn run_chat(server: Option<String>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Chat, &settings) {
        Output::error(&format!("{}", e));
        return Err(e);
    }

    let server_url = server.unwrap_or_else(|| settings.client.server_url.clone());
    let client = AnswerClient::new(
        &server_url,
        Duration::from_secs(settings.client.request_timeout_seconds),
    );

    if client.health().await.is_err() {
        Output::error(&format!("Answer service not reachable at {}", server_url));
        Output::info("Start it with: profchat serve");
    }

    let mut conversation = Conversation::new();

    println!("\n{}", style("Profchat").bold().cyan());
    println!("{}\n", style("Type your questions, or 'exit' to quit.").dim());

    if let Some(greeting) = conversation.turns().first() {
        println!("{} {}\n", style("Profchat:").cyan().bold(), greeting.content);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        // Blank input (or a submit while busy) appends nothing and sends nothing.
        let Some(payload) = conversation.submit(input) else {
            continue;
        };

        debug!("Sending {} turns to {}", payload.len(), server_url);

        let spinner = Output::spinner("Thinking...");
        match client.send(&payload).await {
            Ok(answer) => {
                spinner.finish_and_clear();
                conversation.settle(answer);
            }
            Err(e) => {
                spinner.finish_and_clear();
                debug!("Send failed: {}", e);
                conversation.fail();
            }
        }

        if let Some(reply) = conversation.turns().last() {
            println!("\n{} {}\n", style("Profchat:").cyan().bold(), reply.content);
        }
    }

    Ok(())
}
