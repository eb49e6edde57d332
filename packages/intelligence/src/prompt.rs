//! Handlebars prompts for the summarize and question-answering chains.

use handlebars::{Handlebars, no_escape};
use serde::Serialize;

use crate::error::{IntelligenceError, Result};

const SUMMARIZE: &str = "summarize";
const QUESTION_ANSWER: &str = "question_answer";

const SUMMARIZE_TEMPLATE: &str = "Provide a summary for the following text:\n{{text}}";

const QUESTION_ANSWER_TEMPLATE: &str = "Use the following pieces of context to answer the question at the end. \
If you don't know the answer, just say that you don't know, don't try to make up an answer.\n\n\
{{context}}\n\n\
Question: {{question}}\n\
Helpful Answer:";

#[derive(Serialize)]
struct SummarizeInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct QuestionAnswerInput<'a> {
    context: &'a str,
    question: &'a str,
}

/// Registered prompt templates. Rendering is strict and never HTML-escapes.
pub struct Prompts {
    engine: Handlebars<'static>,
}

impl Prompts {
    pub fn new() -> Result<Self> {
        let mut engine = Handlebars::new();
        engine.set_strict_mode(true);
        engine.register_escape_fn(no_escape);
        engine
            .register_template_string(SUMMARIZE, SUMMARIZE_TEMPLATE)
            .map_err(template_error)?;
        engine
            .register_template_string(QUESTION_ANSWER, QUESTION_ANSWER_TEMPLATE)
            .map_err(template_error)?;
        Ok(Self { engine })
    }

    pub fn summarize(&self, text: &str) -> Result<String> {
        self.render(SUMMARIZE, &SummarizeInput { text })
    }

    /// Stuff prompt: retrieved `context` followed by the user's question.
    pub fn question_answer(&self, context: &str, question: &str) -> Result<String> {
        self.render(QUESTION_ANSWER, &QuestionAnswerInput { context, question })
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.engine.render(name, data).map_err(template_error)
    }
}

fn template_error(err: impl std::fmt::Display) -> IntelligenceError {
    IntelligenceError::Template(err.to_string())
}
