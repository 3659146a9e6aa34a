//! The interactive read-send-print loop.


use std::io::{self, Write};
use std::pin::pin;

use llama_chat_model::{ModelProvider, ModelProviderError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::select;

use crate::transcript::{Transcript, Turn};

type Callback = Box<dyn Fn() + Send + Sync + 'static>;

const FAREWELL: &str = "Goodbye!";

/// Why [`ChatLoop::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Exit {
    /// The operator typed `quit` or `exit`.
    Quit,
    /// The input stream was closed.
    EndOfInput,
    /// The interrupt future completed.
    Interrupted,
}

/// A chat loop builder.
///
/// See [`ChatLoop`].
pub struct ChatLoopBuilder<P> {
    provider: P,
    model: Option<String>,
    on_request_sent: Option<Callback>,
    on_idle: Option<Callback>,
}

impl<P: ModelProvider> ChatLoopBuilder<P> {
    /// Creates a builder with a specified model provider.
    pub fn with_model_provider(provider: P) -> Self {
        Self {
            provider,
            model: None,
            on_request_sent: None,
            on_idle: None,
        }
    }

    /// Sets the model identifier sent with every request.
    ///
    /// Without it, the provider picks its own configured model.
    #[inline]
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Attaches a callback to be invoked right after a request is sent.
    #[inline]
    pub fn on_request_sent(
        mut self,
        on_request_sent: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_request_sent = Some(Box::new(on_request_sent));
        self
    }

    /// Attaches a callback to be invoked when a request has settled, either
    /// with a reply, an error, or an interrupt.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Builds a new chat loop with an empty transcript.
    pub fn build(self) -> ChatLoop<P> {
        ChatLoop {
            provider: self.provider,
            model: self.model,
            on_request_sent: self.on_request_sent,
            on_idle: self.on_idle,
            transcript: Transcript::default(),
        }
    }
}

/// A single conversation with a model, driven line by line.
///
/// Each line read from the input becomes a user turn, and the whole
/// transcript is sent to the provider. Replies are printed and recorded as
/// assistant turns. A failed request is reported and the loop carries on,
/// the unanswered user turn stays in the transcript.
pub struct ChatLoop<P> {
    provider: P,
    model: Option<String>,
    on_request_sent: Option<Callback>,
    on_idle: Option<Callback>,
    transcript: Transcript,
}

impl<P: ModelProvider> ChatLoop<P> {
    /// Returns the conversation so far.
    #[inline]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Runs the loop until the operator quits, the input ends or
    /// `interrupt` completes.
    ///
    /// Only failures writing to `output` are returned as errors. Errors
    /// from the provider are printed and never end the loop.
    pub async fn run<R, W, I>(
        &mut self,
        mut input: R,
        output: &mut W,
        interrupt: I,
    ) -> io::Result<Exit>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
        I: Future<Output = ()>,
    {
        let mut interrupt = pin!(interrupt);

        writeln!(
            output,
            "Chatting with {}. Type 'quit' or 'exit' to end the conversation.",
            self.model.as_deref().unwrap_or("the assistant")
        )?;

        loop {
            write!(output, "You: ")?;
            output.flush()?;

            let line = select! {
                line = read_line(&mut input) => line,
                _ = &mut interrupt => {
                    writeln!(output)?;
                    return farewell(output, Exit::Interrupted);
                }
            };
            let Some(line) = line else {
                writeln!(output)?;
                return farewell(output, Exit::EndOfInput);
            };
            if is_quit_command(&line) {
                return farewell(output, Exit::Quit);
            }

            self.transcript.push(Turn::user(line));
            let req = self.transcript.to_request(self.model.clone());
            trace!("sending request: {req:?}");
            let resp_fut = self.provider.send_request(&req);
            notify(&self.on_request_sent);

            let resp_or_err = select! {
                resp_or_err = resp_fut => resp_or_err,
                _ = &mut interrupt => {
                    notify(&self.on_idle);
                    debug!("interrupted while awaiting a reply");
                    writeln!(output)?;
                    return farewell(output, Exit::Interrupted);
                }
            };
            notify(&self.on_idle);

            match resp_or_err {
                Ok(resp) => {
                    debug!(
                        "got reply {:?} ({:?})",
                        resp.id, resp.finish_reason
                    );
                    writeln!(output, "AI: {}", resp.content)?;
                    self.transcript.push(Turn::assistant(resp.content));
                }
                Err(err) => {
                    warn!("request failed ({:?}): {err}", err.kind());
                    writeln!(output, "An error occurred: {err}")?;
                }
            }
        }
    }
}

#[inline]
fn notify(callback: &Option<Callback>) {
    if let Some(callback) = callback {
        callback();
    }
}

fn farewell<W: Write>(output: &mut W, exit: Exit) -> io::Result<Exit> {
    info!("chat loop finished: {exit:?}");
    writeln!(output, "{FAREWELL}")?;
    output.flush()?;
    Ok(exit)
}

fn is_quit_command(line: &str) -> bool {
    matches!(line.to_lowercase().as_str(), "quit" | "exit")
}

/// Reads one line without its terminator. `None` means the input has
/// ended, read errors are treated the same way.
async fn read_line<R: AsyncBufRead + Unpin>(input: &mut R) -> Option<String> {
    let mut line = String::new();

    match input.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            if line.ends_with('\n') {
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
