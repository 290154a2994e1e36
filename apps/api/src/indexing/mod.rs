//! Semantic indexing: wraps extracted text as a document and builds a minimal
//! in-memory vector index over it.
//!
//! Indices are request-scoped: built per generation call and dropped with it.
//! No chunking is applied; one document produces one node.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

pub mod embedder;

pub use embedder::HuggingFaceEmbedder;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("expected {expected} embeddings, got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("embedding dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("embedding service returned an empty vector")]
    Empty,
}

/// Text-to-vector model. Implemented by the hosted provider and by test mocks.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds each input, returning one vector per input in the same order.
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    fn model_id(&self) -> &str;
}

/// Which upload a document came from. Carried as metadata into the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    JobDescription,
    Resume,
}

impl DocumentKind {
    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::JobDescription => "Job Description",
            DocumentKind::Resume => "Resume",
        }
    }
}

/// Extracted text tagged for indexing. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub kind: DocumentKind,
    pub text: String,
}

impl Document {
    pub fn new(kind: DocumentKind, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            text: text.into(),
        }
    }
}

/// A document paired with its embedding.
#[derive(Debug, Clone)]
pub struct IndexedNode {
    pub document: Document,
    pub embedding: Vec<f32>,
}

/// A retrieved node with its similarity to the query, when one was computed.
#[derive(Debug, Clone, Copy)]
pub struct ScoredNode<'a> {
    pub node: &'a IndexedNode,
    pub score: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct VectorIndex {
    nodes: Vec<IndexedNode>,
}

impl VectorIndex {
    /// Builds an index over exactly one document with a single embedding call.
    pub async fn from_document(
        document: Document,
        embedder: &dyn Embedder,
    ) -> Result<Self, EmbeddingError> {
        let mut vectors = embedder.embed(std::slice::from_ref(&document.text)).await?;
        if vectors.len() != 1 {
            return Err(EmbeddingError::CountMismatch {
                expected: 1,
                actual: vectors.len(),
            });
        }
        let embedding = vectors.remove(0);
        if embedding.is_empty() {
            return Err(EmbeddingError::Empty);
        }

        info!(
            "Indexed {} ({} chars, dim {}) with {}",
            document.kind.label(),
            document.text.chars().count(),
            embedding.len(),
            embedder.model_id()
        );

        Ok(Self {
            nodes: vec![IndexedNode {
                document,
                embedding,
            }],
        })
    }

    pub fn nodes(&self) -> &[IndexedNode] {
        &self.nodes
    }

    /// Returns up to `top_k` nodes for `query`.
    ///
    /// When the index holds no more than `top_k` nodes every node is returned
    /// in insertion order and the query is never embedded.
    pub async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
        embedder: &dyn Embedder,
    ) -> Result<Vec<ScoredNode<'_>>, EmbeddingError> {
        if self.nodes.len() <= top_k {
            return Ok(self
                .nodes
                .iter()
                .map(|node| ScoredNode { node, score: None })
                .collect());
        }

        let query_embedding = embedder
            .embed(&[query.to_string()])
            .await?
            .pop()
            .ok_or(EmbeddingError::Empty)?;

        let mut scored = self
            .nodes
            .iter()
            .map(|node| {
                cosine_similarity(&query_embedding, &node.embedding)
                    .map(|score| ScoredNode {
                        node,
                        score: Some(score),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        Ok(scored)
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, EmbeddingError> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / (norm_a * norm_b))
}

#[cfg(test)]
impl VectorIndex {
    pub fn from_nodes(nodes: Vec<IndexedNode>) -> Self {
        Self { nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockEmbedder;

    #[tokio::test]
    async fn test_index_holds_exactly_one_node() {
        let embedder = MockEmbedder::default();
        let doc = Document::new(DocumentKind::JobDescription, "Python backend engineer");
        let index = VectorIndex::from_document(doc.clone(), &embedder)
            .await
            .unwrap();

        assert_eq!(index.nodes().len(), 1);
        assert_eq!(index.nodes()[0].document, doc);
        assert_eq!(embedder.calls(), 1);
    }

    #[tokio::test]
    async fn test_single_document_retrieval_skips_query_embedding() {
        let embedder = MockEmbedder::default();
        let doc = Document::new(DocumentKind::Resume, "Built 5 REST APIs");
        let index = VectorIndex::from_document(doc, &embedder).await.unwrap();

        let hits = index.retrieve("anything", 2, &embedder).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].score.is_none());
        assert_eq!(embedder.calls(), 1, "query must not be embedded");
    }

    #[tokio::test]
    async fn test_retrieval_ranks_by_similarity_when_over_top_k() {
        let embedder = MockEmbedder::default();
        let node = |text: &str, embedding: Vec<f32>| IndexedNode {
            document: Document::new(DocumentKind::JobDescription, text),
            embedding,
        };
        // MockEmbedder maps every query to the unit vector on the first axis.
        let index = VectorIndex::from_nodes(vec![
            node("far", vec![0.0, 1.0, 0.0]),
            node("near", vec![1.0, 0.1, 0.0]),
            node("middle", vec![1.0, 1.0, 0.0]),
        ]);

        let hits = index.retrieve("query", 2, &embedder).await.unwrap();
        let texts: Vec<_> = hits.iter().map(|h| h.node.document.text.as_str()).collect();
        assert_eq!(texts, vec!["near", "middle"]);
    }

    #[tokio::test]
    async fn test_embedding_failure_propagates() {
        let embedder = MockEmbedder::failing();
        let doc = Document::new(DocumentKind::JobDescription, "text");
        let result = VectorIndex::from_document(doc, &embedder).await;
        assert!(matches!(result, Err(EmbeddingError::Api { status: 503, .. })));
    }

    #[test]
    fn test_cosine_similarity_identical_vectors() {
        let score = cosine_similarity(&[0.3, 0.4], &[0.3, 0.4]).unwrap();
        assert!((score - 1.0).abs() < 1e-6, "Score was {score}");
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_similarity_dimension_mismatch() {
        let result = cosine_similarity(&[1.0], &[1.0, 2.0]);
        assert!(matches!(
            result,
            Err(EmbeddingError::DimensionMismatch { left: 1, right: 2 })
        ));
    }
}
