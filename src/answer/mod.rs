//! Answer composition: prompt construction, completion call, and the trailing source list.

pub(crate) mod prompt;

use std::collections::HashSet;
use std::fmt;

use tracing::{info, warn};

pub use prompt::PromptStyle;

use crate::openai::Completion;
use crate::search::SearchResponse;

/// Prefix of the answer text when the completion call fails.
pub const ANSWER_ERROR_PREFIX: &str = "Fel vid generering av svar";
pub const MAX_SOURCES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<String>,
    pub style: PromptStyle,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)?;
        if !self.sources.is_empty() {
            write!(f, "\n\n{}\n{}", self.style.source_heading(), self.sources.join("\n"))?;
        }
        Ok(())
    }
}

pub struct Composer<'a, C> {
    completion: &'a C,
    style: PromptStyle,
}

impl<'a, C: Completion> Composer<'a, C> {
    pub fn new(completion: &'a C, style: PromptStyle) -> Self {
        Self { completion, style }
    }

    pub fn style(&self) -> PromptStyle {
        self.style
    }

    /// Ask the model to answer `question` from `search`.
    ///
    /// An error-shaped `search` is still embedded in the prompt. Completion
    /// failures become the answer text, prefixed with [`ANSWER_ERROR_PREFIX`].
    pub async fn compose(&self, question: &str, search: &SearchResponse) -> Answer {
        let prompt = self.style.build(question, &search.to_payload());

        match self.completion.complete(&prompt).await {
            Ok(text) => {
                let sources = source_urls(search);
                info!(sources = sources.len(), "answer composed");
                Answer {
                    text,
                    sources,
                    style: self.style,
                }
            }
            Err(e) => {
                warn!(error = %e, "answer generation failed");
                Answer {
                    text: format!("{ANSWER_ERROR_PREFIX}: {e}"),
                    sources: Vec::new(),
                    style: self.style,
                }
            }
        }
    }
}

/// Up to [`MAX_SOURCES`] distinct absolute http(s) URLs, in result order.
pub fn source_urls(search: &SearchResponse) -> Vec<String> {
    let mut seen = HashSet::new();
    search
        .results()
        .iter()
        .map(|r| r.url.as_str())
        .filter(|u| is_web_url(u) && seen.insert(*u))
        .take(MAX_SOURCES)
        .map(str::to_string)
        .collect()
}

fn is_web_url(raw: &str) -> bool {
    (raw.starts_with("http://") || raw.starts_with("https://"))
        && url::Url::parse(raw).is_ok_and(|u| u.has_host())
}
