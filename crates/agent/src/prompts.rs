//! Default system prompts

/// Critic reply that ends the loop. Case-sensitive substring match.
pub const STOP_MARKER: &str = "<OK>";

pub const GENERATION_SYSTEM_PROMPT: &str = r#"You are an expert writer and problem solver.
Your task is to produce the best possible response to the user's request.
If the user gives you a critique of your previous attempt, rewrite your response
so that every point of the critique is addressed. Reply with the revised response
only, without commentary about the changes."#;

pub const REFLECTION_SYSTEM_PROMPT: &str = r#"You are a demanding reviewer.
You will be shown a response written for a user. Critique it thoroughly:
point out errors, gaps, unclear passages and anything that does not follow
the request, and give concrete recommendations for improving it.
If the response is already excellent and there is nothing left to improve,
reply with exactly <OK> and nothing else."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflection_prompt_names_stop_marker() {
        assert!(REFLECTION_SYSTEM_PROMPT.contains(STOP_MARKER));
    }

    #[test]
    fn test_generation_prompt_has_no_stop_marker() {
        assert!(!GENERATION_SYSTEM_PROMPT.contains(STOP_MARKER));
    }
}
