use crate::advisor::prompts::EXPLANATION_PROMPT;
use crate::errors::AppError;
use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::Oracle;

/// Returns the oracle's explanation of why `career_path` suits `interests`, verbatim
/// apart from surrounding whitespace. Length is requested in the prompt, not enforced.
pub async fn explain_career(
    oracle: &dyn Oracle,
    career_path: &str,
    interests: &[String],
) -> Result<String, AppError> {
    let prompt = explanation_prompt(career_path, interests);
    let explanation = oracle.complete_prompt(PLAIN_TEXT_SYSTEM, &prompt).await?;
    Ok(explanation.trim().to_string())
}

/// Fills the template in one pass; substituted values are never rescanned.
fn explanation_prompt(career_path: &str, interests: &[String]) -> String {
    let interests = interests.join(", ");
    match EXPLANATION_PROMPT.split_once("{career_path}") {
        Some((head, tail)) => format!(
            "{}{career_path}{}",
            head.replace("{interests}", &interests),
            tail.replace("{interests}", &interests)
        ),
        None => EXPLANATION_PROMPT.replace("{interests}", &interests),
    }
}
