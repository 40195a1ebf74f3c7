//! Question pipeline and the interactive loop driving it.

pub(crate) mod sink;

use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

pub use sink::{ConsoleSink, OutputSink, TranscriptSink};

use crate::answer::{Answer, Composer};
use crate::openai::Completion;
use crate::search::WebSearch;

pub const EXIT_COMMAND: &str = "exit";
const GREETING: &str = "You can now chat with the agent. Type 'exit' to end the conversation.";
const PROMPT: &str = "\nYou: ";

/// Search followed by answer composition, using clients built once at startup.
pub struct Pipeline<'a, S, C> {
    search: &'a S,
    composer: Composer<'a, C>,
}

impl<'a, S: WebSearch, C: Completion> Pipeline<'a, S, C> {
    pub fn new(search: &'a S, composer: Composer<'a, C>) -> Self {
        Self { search, composer }
    }

    pub async fn ask(&self, question: &str) -> Answer {
        info!(chars = question.chars().count(), style = ?self.composer.style(), "question received");
        debug!(%question, "question");

        let search = self.search.search(question).await;
        if search.is_error() {
            warn!("search failed, composing answer from the error payload");
        } else {
            info!(results = search.results().len(), "search complete");
        }

        self.composer.compose(question, &search).await
    }
}

/// Read one question per line until `exit` or end of input, showing each answer on `sink`.
///
/// Returns the number of questions answered.
pub async fn run_chat<S, C, R, W, K>(
    pipeline: &Pipeline<'_, S, C>,
    mut input: R,
    prompt_out: &mut W,
    sink: &mut K,
) -> io::Result<usize>
where
    S: WebSearch,
    C: Completion,
    R: BufRead,
    W: Write,
    K: OutputSink,
{
    writeln!(prompt_out, "{GREETING}")?;

    let mut answered = 0;
    let mut line = String::new();
    loop {
        write!(prompt_out, "{PROMPT}")?;
        prompt_out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.eq_ignore_ascii_case(EXIT_COMMAND) {
            break;
        }
        if question.is_empty() {
            continue;
        }

        let answer = pipeline.ask(question).await;
        sink.show(question, &answer)?;
        answered += 1;
    }

    info!(answered, "chat ended");
    Ok(answered)
}
