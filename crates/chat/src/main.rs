//! Chat with a hosted model from the terminal.

#[macro_use]
extern crate tracing;

mod settings;

use std::env;
use std::future::pending;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use llama_chat::ChatLoopBuilder;
use llama_chat_openai_model::OpenAIProvider;
use tokio::io::{self, BufReader};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let dotenv = dotenvy::dotenv_iter()
        .map(settings::collect_dotenv)
        .unwrap_or_default();
    // Variables already set in the environment take precedence.
    let get = settings::layered(|name| env::var(name).ok(), &dotenv);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::ERROR.into())
                .parse_lossy(get(settings::LOG_FILTER_VAR).unwrap_or_default()),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!("loaded {} variable(s) from .env", dotenv.len());

    let Some(config) = settings::config_from_env(&get) else {
        eprintln!(
            "{} environment variable is not set",
            settings::API_KEY_VAR
        );
        return;
    };
    info!("using {config:?}");

    let model = config.model().to_owned();
    let model_provider = OpenAIProvider::new(config);

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .map(|style| style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"))
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let progress_bar = Arc::new(Mutex::new(None::<ProgressBar>));

    let mut chat = ChatLoopBuilder::with_model_provider(model_provider)
        .with_model(model)
        .on_request_sent({
            let progress_bar = Arc::clone(&progress_bar);
            move || {
                let bar = ProgressBar::new_spinner();
                bar.set_style(progress_style.clone());
                bar.set_message("Thinking...");
                bar.enable_steady_tick(Duration::from_millis(100));
                *progress_bar.lock().unwrap_or_else(PoisonError::into_inner) =
                    Some(bar);
            }
        })
        .on_idle({
            let progress_bar = Arc::clone(&progress_bar);
            move || {
                // Clear the spinner before anything else is printed.
                let bar = progress_bar
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .take();
                if let Some(bar) = bar {
                    bar.finish_and_clear();
                }
            }
        })
        .build();

    let interrupt = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("unable to listen for interrupts: {err}");
            pending::<()>().await;
        }
    };

    let input = BufReader::new(io::stdin());
    let mut output = std::io::stdout();
    match chat.run(input, &mut output, interrupt).await {
        Ok(exit) => {
            debug!(
                "exiting after {} turn(s): {exit:?}",
                chat.transcript().len()
            );
        }
        Err(err) => {
            error!("failed to write to stdout: {err}");
        }
    }
}
