//! Query engine: binds vector indices to a chat model and answers one query.
//!
//! Retrieval runs per bound index; the retrieved documents are rendered into
//! the QA template under a header naming their source, and the whole thing is
//! sent as a single completion request.

use tracing::{debug, info};

use crate::errors::AppError;
use crate::indexing::{Embedder, ScoredNode, VectorIndex};
use crate::llm_client::prompts::{render_qa_prompt, QUERY_ENGINE_SYSTEM};
use crate::llm_client::ChatModel;

pub const DEFAULT_SIMILARITY_TOP_K: usize = 2;

pub struct QueryEngine<'a> {
    indices: Vec<&'a VectorIndex>,
    embedder: &'a dyn Embedder,
    llm: &'a dyn ChatModel,
    similarity_top_k: usize,
}

impl<'a> QueryEngine<'a> {
    pub fn new(embedder: &'a dyn Embedder, llm: &'a dyn ChatModel) -> Self {
        Self {
            indices: Vec::new(),
            embedder,
            llm,
            similarity_top_k: DEFAULT_SIMILARITY_TOP_K,
        }
    }

    pub fn with_index(mut self, index: &'a VectorIndex) -> Self {
        self.indices.push(index);
        self
    }

    /// Builds the full prompt for `query` without calling the model.
    pub async fn build_prompt(&self, query: &str) -> Result<String, AppError> {
        let mut retrieved = Vec::new();
        for index in &self.indices {
            let hits = index
                .retrieve(query, self.similarity_top_k, self.embedder)
                .await?;
            for hit in &hits {
                debug!(
                    "Retrieved {} node {} of {} (score: {:?})",
                    hit.node.document.kind.label(),
                    hit.node.document.id,
                    index.nodes().len(),
                    hit.score
                );
            }
            retrieved.extend(hits);
        }
        Ok(render_qa_prompt(&render_context(&retrieved), query))
    }

    /// Answers `query` and returns the model's text verbatim.
    pub async fn query(&self, query: &str) -> Result<String, AppError> {
        let prompt = self.build_prompt(query).await?;
        let answer = self.llm.complete(&prompt, QUERY_ENGINE_SYSTEM).await?;
        info!(
            "Query answered by {} over {} index(es): {} chars",
            self.llm.model_id(),
            self.indices.len(),
            answer.chars().count()
        );
        Ok(answer)
    }
}

fn render_context(nodes: &[ScoredNode<'_>]) -> String {
    nodes
        .iter()
        .map(|hit| {
            format!(
                "[{}]\n{}",
                hit.node.document.kind.label(),
                hit.node.document.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
