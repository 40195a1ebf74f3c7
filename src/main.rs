mod answer;
mod config;
mod markdown;
mod openai;
mod search;
mod session;

pub const USER_AGENT: &str = concat!("skattefraga/", env!("CARGO_PKG_VERSION"));

use std::io;
use std::time::Duration;

use clap::{Parser, Subcommand};
use reqwest::Client;
use tracing::info;

use answer::{Composer, PromptStyle};
use config::Config;
use openai::OpenAiClient;
use search::TavilyClient;
use session::{ConsoleSink, OutputSink, Pipeline, TranscriptSink};

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Global HTTP client timeout; long reports take a while to generate.
const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Answer Swedish tax and accounting questions from official sources.
#[derive(Parser)]
#[command(name = "skattefraga", version, about)]
struct Cli {
    /// Completion model (overrides OPENAI_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive loop: one question per line, `exit` to quit
    Chat {
        #[arg(long, value_enum, default_value_t = PromptStyle::Brief)]
        style: PromptStyle,
        /// Redraw the whole conversation after every answer
        #[arg(long)]
        transcript: bool,
    },
    /// Answer a single question and exit
    Ask {
        /// The question, e.g. "Vad är moms?"
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
        #[arg(long, value_enum, default_value_t = PromptStyle::Report)]
        style: PromptStyle,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skattefraga=info".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::from_env().inspect_err(|e| tracing::error!("{e}"))?;
    if let Some(model) = cli.model {
        config.model = model;
    }

    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()?;
    let tavily = TavilyClient::from_config(http.clone(), &config);
    let openai = OpenAiClient::from_config(http, &config);
    info!(model = %openai.model(), "clients ready");

    match cli.command {
        Command::Chat { style, transcript } => {
            let pipeline = Pipeline::new(&tavily, Composer::new(&openai, style));
            let stdin = io::stdin().lock();
            let mut stdout = io::stdout();
            if transcript {
                let mut sink = TranscriptSink::new(io::stdout());
                session::run_chat(&pipeline, stdin, &mut stdout, &mut sink).await?;
            } else {
                let mut sink = ConsoleSink::new(io::stdout());
                session::run_chat(&pipeline, stdin, &mut stdout, &mut sink).await?;
            }
        }
        Command::Ask { question, style } => {
            let question = question.join(" ");
            let pipeline = Pipeline::new(&tavily, Composer::new(&openai, style));
            let answer = pipeline.ask(&question).await;
            ConsoleSink::new(io::stdout()).show(&question, &answer)?;
        }
    }

    Ok(())
}
