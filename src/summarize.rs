//! Summarization of retrieved responses through the text-generation
//! provider.

use crate::providers::{InferenceParams, TextGenerator};
use crate::stores::ScoredResponse;
use crate::types::RespondexError;

/// Render retrieved responses into the fixed summarization prompt.
///
/// Snippets are newline-joined in retrieval order; scores are not rendered.
fn render_prompt(snippets: &[ScoredResponse]) -> String {
    let joined = snippets
        .iter()
        .map(|snippet| snippet.response.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "The following is the result of a similarity search over stored responses:\n\n\
         {joined}\n\n\
         Summarize the above list of responses."
    )
}

/// Summarize a set of retrieved responses with one generation request.
pub async fn summarize<G>(
    generator: &G,
    snippets: &[ScoredResponse],
    params: &InferenceParams,
) -> Result<String, RespondexError>
where
    G: TextGenerator,
{
    let prompt = render_prompt(snippets);
    generator.generate(&prompt, params).await
}
