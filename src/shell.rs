//! Interactive terminal loop
//!
//! Reads customer lines, hands them to the agent one at a time, and prints
//! the replies. The loop ends on `quit`, end of input, or an interrupt.

use crate::agent::RetailAgent;
use std::future::Future;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

pub const FAREWELL: &str = "Thank you for shopping with us! Goodbye!";

const GENERIC_ERROR: &str = "An error occurred. Please try again.";
const QUIT_COMMAND: &str = "quit";
const MAX_CONSECUTIVE_READ_ERRORS: u32 = 5;

/// Why the shell stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExit {
    Quit,
    EndOfInput,
    Interrupted,
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Failed to write to terminal: {0}")]
    Output(#[source] std::io::Error),
    #[error("Giving up after {attempts} consecutive input errors: {source}")]
    Input {
        attempts: u32,
        #[source]
        source: std::io::Error,
    },
}

pub struct Shell<'a, R, W> {
    agent: &'a RetailAgent,
    input: Lines<R>,
    output: W,
}

impl<'a, R, W> Shell<'a, R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(agent: &'a RetailAgent, input: R, output: W) -> Self {
        Self {
            agent,
            input: input.lines(),
            output,
        }
    }

    /// Run until the customer leaves. `interrupt` resolving ends the session
    /// immediately, even while a reply is pending.
    pub async fn run<F>(mut self, interrupt: F) -> Result<ShellExit, ShellError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(interrupt);

        self.print_banner().await?;
        let mut session = self.agent.start_session();
        let mut read_errors = 0;

        loop {
            self.write("\nYou: ").await?;

            let read = tokio::select! {
                biased;
                () = &mut interrupt => None,
                line = self.input.next_line() => Some(line),
            };
            let Some(read) = read else {
                return self.interrupted().await;
            };

            let line = match read {
                Ok(Some(line)) => {
                    read_errors = 0;
                    line
                }
                Ok(None) => {
                    self.write(&format!("\n{FAREWELL}\n")).await?;
                    return Ok(ShellExit::EndOfInput);
                }
                Err(e) => {
                    read_errors += 1;
                    tracing::error!(error = %e, attempt = read_errors, "Error during conversation");
                    self.write(&format!("{GENERIC_ERROR}\n")).await?;
                    if read_errors >= MAX_CONSECUTIVE_READ_ERRORS {
                        return Err(ShellError::Input {
                            attempts: read_errors,
                            source: e,
                        });
                    }
                    continue;
                }
            };

            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            if text.eq_ignore_ascii_case(QUIT_COMMAND) {
                self.write(&format!("\n{FAREWELL}\n")).await?;
                return Ok(ShellExit::Quit);
            }

            let agent = self.agent;
            let outcome = tokio::select! {
                biased;
                () = &mut interrupt => None,
                outcome = agent.chat(&mut session, text) => Some(outcome),
            };
            let Some(outcome) = outcome else {
                return self.interrupted().await;
            };

            self.write(&format!("\nAssistant: {}\n", outcome.reply))
                .await?;
        }
    }

    async fn print_banner(&mut self) -> Result<(), ShellError> {
        let products = self.agent.catalog().keys().collect::<Vec<_>>().join(", ");
        let banner = format!(
            "\n=== Welcome to the Electronics Store Assistant ===\n\
             Available products: {products}\n\
             Type '{QUIT_COMMAND}' to end the conversation\n\
             ================================================\n"
        );
        self.write(&banner).await
    }

    async fn interrupted(&mut self) -> Result<ShellExit, ShellError> {
        tracing::info!("Interrupted, ending session");
        self.write(&format!("\n\n{FAREWELL}\n")).await?;
        Ok(ShellExit::Interrupted)
    }

    async fn write(&mut self, text: &str) -> Result<(), ShellError> {
        self.output
            .write_all(text.as_bytes())
            .await
            .map_err(ShellError::Output)?;
        self.output.flush().await.map_err(ShellError::Output)
    }
}
