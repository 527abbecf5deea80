// Prompts for the optional polish step. Numbers are the one thing the model
// must never change; `interview::polish` rejects any rewrite that adds one.

/// System prompt shared by every polish call.
pub const POLISH_SYSTEM: &str = "You are an interview coach who edits spoken answers. \
    Return only the rewritten answer as plain prose. \
    Do NOT add headings, bullet points, quotes or commentary. \
    Do NOT invent facts, employers, numbers, percentages or dates. \
    Keep every number exactly as written.";

/// Prompt for polishing a templated sample answer.
pub fn sample_answer_prompt(question: &str, answer: &str) -> String {
    format!(
        "Interview question: {question}\n\n\
         Draft answer:\n{answer}\n\n\
         Polish this interview answer to be professional and concise (at most 120 words). \
         Preserve facts and do not add new numeric identifiers."
    )
}

/// Prompt for polishing the coach's STAR rewrite. Bracketed placeholders stay.
pub fn coach_rewrite_prompt(rewrite: &str) -> String {
    format!(
        "Polish the following interview answer to be concise and professional while \
         preserving metrics and tools. Keep any [bracketed] placeholders as they are.\n\n{rewrite}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_answer_prompt_embeds_question_and_draft() {
        let prompt = sample_answer_prompt("Why this role?", "Because I like Rust.");
        assert!(prompt.contains("Interview question: Why this role?"));
        assert!(prompt.contains("Because I like Rust."));
        assert!(prompt.contains("do not add new numeric identifiers"));
    }

    #[test]
    fn test_coach_prompt_keeps_placeholders_instruction() {
        let prompt = coach_rewrite_prompt("Situation: [context].");
        assert!(prompt.ends_with("Situation: [context]."));
        assert!(prompt.contains("[bracketed] placeholders"));
    }
}
