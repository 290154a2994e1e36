// Question Generator: prompt construction, per-request indexing, the LLM query,
// and the downloadable result.
// All LLM calls go through llm_client. No direct provider calls here.

pub mod download;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod query_engine;
