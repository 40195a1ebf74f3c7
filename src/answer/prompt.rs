use clap::ValueEnum;

/// Prompt wording and source heading for a composed answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PromptStyle {
    /// Long structured markdown report with APA citations.
    #[default]
    Report,
    /// Detailed answer in Swedish, sources only in the trailing list.
    Brief,
}

impl PromptStyle {
    pub fn build(self, question: &str, search_payload: &str) -> String {
        match self {
            PromptStyle::Report => format!(
                "\"Sökresultat:\n{search_payload}\n\" \
                 Using the above information, answer the following question or topic: \"{question}\" \
                 in a detailed report. The report should focus on the answer to the question, \
                 should be well structured, informative, in depth, with facts and numbers if available, \
                 a minimum of 1000 words and with markdown syntax and APA format. \
                 Write all the valid, correct page source URLs at the end of the report in APA format. \
                 You should write your report only based on the given information and nothing else."
            ),
            PromptStyle::Brief => format!(
                "Fråga: {question}\n\
                 Sökresultat:\n{search_payload}\n\n\
                 Baserat på sökresultaten, ge ett detaljerat svar om ämnet på svenska \
                 utan att inkludera källor."
            ),
        }
    }

    pub fn source_heading(self) -> &'static str {
        match self {
            PromptStyle::Report => "Källor för Mer Information:",
            PromptStyle::Brief => "Källor:",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{"error": "Error fetching search results: timeout"}"#;

    #[test]
    fn report_embeds_question_and_payload() {
        let prompt = PromptStyle::Report.build("Vad är moms?", PAYLOAD);
        assert!(prompt.contains("\"Vad är moms?\""));
        assert!(prompt.contains(PAYLOAD));
        assert!(prompt.contains("1000 words"));
        assert!(prompt.contains("APA"));
    }

    #[test]
    fn brief_is_swedish_and_embeds_question_and_payload() {
        let prompt = PromptStyle::Brief.build("Vad är moms?", PAYLOAD);
        assert!(prompt.starts_with("Fråga: Vad är moms?\nSökresultat:\n"));
        assert!(prompt.contains(PAYLOAD));
        assert!(prompt.ends_with("utan att inkludera källor."));
    }

    #[test]
    fn question_is_embedded_verbatim() {
        let question = "Hur \"bokför\" jag\nen faktura?";
        for style in [PromptStyle::Report, PromptStyle::Brief] {
            assert!(style.build(question, "{}").contains(question));
        }
    }
}
