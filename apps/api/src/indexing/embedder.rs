//! Hosted embedding model behind the Hugging Face feature-extraction endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Embedder, EmbeddingError};
use crate::config::Config;

#[derive(Debug, Serialize)]
struct FeatureExtractionRequest<'a> {
    inputs: &'a [String],
    options: RequestOptions,
}

#[derive(Debug, Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct HfError {
    error: String,
}

#[derive(Clone)]
pub struct HuggingFaceEmbedder {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl HuggingFaceEmbedder {
    pub fn new(config: &Config) -> Result<Self, EmbeddingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key: config.huggingface_api_key.clone(),
            endpoint: model_endpoint(&config.hf_inference_url, &config.embedding_model),
            model: config.embedding_model.clone(),
        })
    }
}

#[async_trait]
impl Embedder for HuggingFaceEmbedder {
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let body = FeatureExtractionRequest {
            inputs,
            options: RequestOptions {
                wait_for_model: true,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<HfError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw = response.text().await?;
        let vectors: Vec<Vec<f32>> = serde_json::from_str(&raw)?;
        if vectors.len() != inputs.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: inputs.len(),
                actual: vectors.len(),
            });
        }

        debug!(
            "Embedded {} input(s) with {} (dim {})",
            inputs.len(),
            self.model,
            vectors.first().map(Vec::len).unwrap_or(0)
        );
        Ok(vectors)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

fn model_endpoint(base: &str, model: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), model.trim_start_matches('/'))
}
