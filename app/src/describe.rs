//! Company description enrichment.

use prospector_llm::{CompletionRequest, LlmProvider};
use tracing::{debug, error};

/// Ask `provider` for a short description of `company`, seeded with the
/// search snippet.
///
/// Returns `snippet` unchanged when no provider is configured, the request
/// fails, or the reply is blank.
pub async fn describe_company(
    provider: Option<&dyn LlmProvider>,
    company: &str,
    snippet: &str,
) -> String {
    let Some(provider) = provider else {
        return snippet.to_string();
    };

    let request = CompletionRequest::new(format!(
        "Provide a professional, concise description for {company}. Initial context: {snippet}"
    ))
    .with_max_tokens(150);

    match provider.complete(request).await {
        Ok(response) => {
            let description = response.content.trim();
            if description.is_empty() {
                debug!("Empty description for {}, keeping snippet", company);
                snippet.to_string()
            } else {
                description.to_string()
            }
        }
        Err(e) => {
            error!("AI description generation error: {}", e);
            snippet.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_provider_keeps_snippet() {
        assert_eq!(
            describe_company(None, "Acme", "Robots for everyone").await,
            "Robots for everyone"
        );
    }
}
