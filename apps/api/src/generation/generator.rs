//! Interview question generation: orchestrates indexing and the LLM query.
//!
//! Flow: wrap texts as documents → build one index per document →
//!       bind both indices to one query engine → run the question prompt.
//!
//! Everything built here lives for one call. Nothing is cached between requests.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::build_question_prompt;
use crate::generation::query_engine::QueryEngine;
use crate::indexing::{Document, DocumentKind, Embedder, VectorIndex};
use crate::llm_client::{strip_json_fences, ChatModel};

/// The model's answer, typed by a fixed content-negotiation rule.
///
/// Rule: if the output (minus an optional code fence) parses as a non-empty
/// JSON array of strings it is a `List`; anything else is kept verbatim as
/// `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum GeneratedQuestions {
    List(Vec<String>),
    Text(String),
}

impl GeneratedQuestions {
    pub fn from_model_output(raw: String) -> Self {
        match serde_json::from_str::<Vec<String>>(strip_json_fences(&raw)) {
            Ok(questions) if !questions.is_empty() => GeneratedQuestions::List(questions),
            _ => GeneratedQuestions::Text(raw),
        }
    }

    /// Display and download form: list items separated by a blank line.
    pub fn render(&self) -> String {
        match self {
            GeneratedQuestions::List(questions) => questions.join("\n\n"),
            GeneratedQuestions::Text(text) => text.clone(),
        }
    }
}

/// Generates interview questions for one candidate from both extracted texts.
///
/// Both the job description and the resume are indexed and bound to the same
/// query engine, so the single LLM call sees both documents.
pub async fn generate_interview_questions(
    candidate_name: &str,
    job_description: &str,
    resume_text: &str,
    embedder: &dyn Embedder,
    llm: &dyn ChatModel,
) -> Result<GeneratedQuestions, AppError> {
    let job_doc = Document::new(DocumentKind::JobDescription, job_description);
    let resume_doc = Document::new(DocumentKind::Resume, resume_text);

    let job_index = VectorIndex::from_document(job_doc, embedder).await?;
    let resume_index = VectorIndex::from_document(resume_doc, embedder).await?;

    let engine = QueryEngine::new(embedder, llm)
        .with_index(&job_index)
        .with_index(&resume_index);

    let prompt = build_question_prompt(candidate_name);
    let raw = engine.query(&prompt).await?;

    let questions = GeneratedQuestions::from_model_output(raw);
    match &questions {
        GeneratedQuestions::List(items) => {
            info!("Generated {} interview questions as a list", items.len())
        }
        GeneratedQuestions::Text(text) => info!(
            "Generated interview questions as text ({} chars)",
            text.chars().count()
        ),
    }
    Ok(questions)
}
