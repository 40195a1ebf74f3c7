use std::io::{self, Write};

use crate::answer::Answer;
use crate::markdown::sanitize_heading;

/// Destination for answers produced by the pipeline.
pub trait OutputSink {
    fn show(&mut self, question: &str, answer: &Answer) -> io::Result<()>;
}

/// Prints each answer as it arrives.
pub struct ConsoleSink<W> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for ConsoleSink<W> {
    fn show(&mut self, _question: &str, answer: &Answer) -> io::Result<()> {
        writeln!(self.out, "\nAI: {answer}")?;
        self.out.flush()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub question: String,
    pub answer: String,
}

/// Keeps the whole conversation and redraws it as a Markdown chat log on every turn.
pub struct TranscriptSink<W> {
    out: W,
    history: Vec<Turn>,
}

impl<W: Write> TranscriptSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn render(&self) -> String {
        let mut output = String::from("# Fråga om Redovisning\n\n");
        for turn in &self.history {
            output.push_str(&format!("### Du: {}\n\n", sanitize_heading(&turn.question)));
            output.push_str(&turn.answer);
            output.push_str("\n\n---\n\n");
        }
        output
    }
}

impl<W: Write> OutputSink for TranscriptSink<W> {
    fn show(&mut self, question: &str, answer: &Answer) -> io::Result<()> {
        self.history.push(Turn {
            question: question.to_string(),
            answer: answer.to_string(),
        });
        let rendered = self.render();
        self.out.write_all(rendered.as_bytes())?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::PromptStyle;

    fn answer(text: &str, sources: &[&str]) -> Answer {
        Answer {
            text: text.into(),
            sources: sources.iter().map(|s| s.to_string()).collect(),
            style: PromptStyle::Brief,
        }
    }

    #[test]
    fn console_prefixes_answer() {
        let mut sink = ConsoleSink::new(Vec::new());
        sink.show("Vad är moms?", &answer("Moms är en skatt.", &["https://www.skatteverket.se"]))
            .unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            out,
            "\nAI: Moms är en skatt.\n\nKällor:\nhttps://www.skatteverket.se\n"
        );
    }

    #[test]
    fn transcript_accumulates_turns_in_order() {
        let mut sink = TranscriptSink::new(Vec::new());
        sink.show("Vad är moms?", &answer("Svar ett", &[])).unwrap();
        sink.show("Och F-skatt?", &answer("Svar två", &[])).unwrap();

        assert_eq!(sink.history().len(), 2);
        assert_eq!(sink.history()[0].question, "Vad är moms?");
        assert_eq!(sink.history()[1].answer, "Svar två");

        let latest = sink.render();
        let first = latest.find("### Du: Vad är moms?").unwrap();
        let second = latest.find("### Du: Och F-skatt?").unwrap();
        assert!(first < second);
    }

    #[test]
    fn transcript_redraws_full_history_each_turn() {
        let mut sink = TranscriptSink::new(Vec::new());
        sink.show("första", &answer("A", &[])).unwrap();
        sink.show("andra", &answer("B", &[])).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out.matches("### Du: första").count(), 2);
        assert_eq!(out.matches("### Du: andra").count(), 1);
    }

    #[test]
    fn transcript_heading_survives_multiline_question() {
        let mut sink = TranscriptSink::new(Vec::new());
        sink.show("rad ett\nrad två", &answer("A", &[])).unwrap();
        assert!(sink.render().contains("### Du: rad ett rad två\n"));
    }
}
