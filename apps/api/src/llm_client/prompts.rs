// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt sent with every query-engine call.
pub const QUERY_ENGINE_SYSTEM: &str = "You are an expert Q&A system that is trusted around the world. \
    Always answer the query using the provided context information, and not prior knowledge. \
    Never directly reference the given context in your answer. \
    Avoid statements like 'Based on the context, ...' or 'The context information ...'.";

/// Answer-synthesis template used by the query engine.
/// Replace: {context_str}, {query_str}
pub const QA_PROMPT_TEMPLATE: &str = "Context information is below.
---------------------
{context_str}
---------------------
Given the context information and not prior knowledge, answer the query.
Query: {query_str}
Answer: ";

pub fn render_qa_prompt(context: &str, query: &str) -> String {
    fill_slots(
        QA_PROMPT_TEMPLATE,
        &[("{context_str}", context), ("{query_str}", query)],
    )
}

/// Substitutes each slot in one left-to-right pass over `template`.
/// Inserted values are never rescanned, so they may contain slot names.
fn fill_slots(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    loop {
        let next = slots
            .iter()
            .filter_map(|(slot, value)| rest.find(slot).map(|pos| (pos, *slot, *value)))
            .min_by_key(|(pos, _, _)| *pos);
        match next {
            Some((pos, slot, value)) => {
                out.push_str(&rest[..pos]);
                out.push_str(value);
                rest = &rest[pos + slot.len()..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}
