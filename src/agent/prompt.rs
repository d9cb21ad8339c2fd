//! Prompt construction for the two inference calls the agent makes

/// Prompt asking for a review of `code` written in `language`.
///
/// `context`, when present and non-empty, goes before the code block.
pub fn review_prompt(code: &str, language: &str, context: Option<&str>) -> String {
    let mut prompt = format!(
        "You are an expert code reviewer. Review the following {language} code and provide feedback on:\n\
         1. Bugs and potential errors\n\
         2. Performance issues\n\
         3. Best practice violations\n\
         4. Security concerns\n\n"
    );

    if let Some(context) = context.filter(|c| !c.is_empty()) {
        prompt.push_str("Context: ");
        prompt.push_str(context);
        prompt.push_str("\n\n");
    }

    prompt.push_str(&format!("```{language}\n{code}\n```\n\n"));
    prompt.push_str("Be specific and concise. Reference the relevant lines where possible.");
    prompt
}

/// Prompt asking for recurring anti-patterns across past feedback
pub fn suggestion_prompt(corpus: &str) -> String {
    format!(
        "Below is feedback from several past code reviews:\n\n\
         {corpus}\n\n\
         Identify 3-5 recurring anti-patterns across these reviews. \
         For each one, name the pattern, explain why it is a problem, \
         and give a concrete fix."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_prompt_embeds_code_and_language() {
        let prompt = review_prompt("def f(x): return x==x", "Python", None);
        assert!(prompt.contains("```Python\ndef f(x): return x==x\n```"));
        assert!(prompt.contains("Bugs"));
        assert!(prompt.contains("Performance"));
        assert!(prompt.contains("Best practice"));
        assert!(prompt.contains("Security"));
        assert!(!prompt.contains("Context:"));
    }

    #[test]
    fn test_context_precedes_code_block() {
        let prompt = review_prompt("fn main() {}", "Rust", Some("entry point of a CLI"));
        let context_at = prompt.find("Context: entry point of a CLI").unwrap();
        let code_at = prompt.find("```Rust").unwrap();
        assert!(context_at < code_at);
    }

    #[test]
    fn test_empty_context_is_omitted() {
        let prompt = review_prompt("x", "Go", Some(""));
        assert!(!prompt.contains("Context:"));
    }

    #[test]
    fn test_code_is_embedded_verbatim() {
        let code = "let s = \"```\";\n\tlet t = '{}';";
        assert!(review_prompt(code, "Rust", None).contains(code));
    }

    #[test]
    fn test_suggestion_prompt() {
        let prompt = suggestion_prompt("first\n\nsecond");
        assert!(prompt.contains("first\n\nsecond"));
        assert!(prompt.contains("3-5 recurring anti-patterns"));
    }
}
