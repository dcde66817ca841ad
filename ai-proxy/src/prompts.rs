//! Prompt templates for the three coding-help operations

pub fn explain_error(error_message: &str, code: &str) -> String {
    format!(
        "You are a helpful coding assistant. A user encountered this error:\n\n\
         Error: {error_message}\n\n\
         Code:\n{code}\n\n\
         Please provide a clear, concise explanation of what this error means and suggest how \
         to fix it. Keep your response under 100 words and focus on practical solutions. \
         Assume the user is learning: give small hints rather than corrected code, and never \
         include any code in the answer."
    )
}

pub fn answer_question(question: &str, code: Option<&str>) -> String {
    let context = match code {
        Some(code) if !code.is_empty() => format!("Code context:\n{code}"),
        _ => String::new(),
    };

    format!(
        "You are a helpful coding assistant. A user is asking:\n\n\
         Question: {question}\n\n\
         {context}\n\n\
         Please provide a helpful, accurate answer. Keep your response concise and practical."
    )
}

pub fn improve_code(code: &str, language: &str) -> String {
    format!(
        "You are a coding expert. Please analyze this {language} code and suggest improvements:\n\n\
         Code:\n{code}\n\n\
         Provide specific suggestions with explanations. Focus on practical improvements."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_error_embeds_inputs() {
        let prompt = explain_error("NameError: name 'x' is not defined", "print(x)");
        assert!(prompt.contains("Error: NameError: name 'x' is not defined"));
        assert!(prompt.contains("Code:\nprint(x)"));
        assert!(prompt.contains("under 100 words"));
    }

    #[test]
    fn test_answer_question_context_is_optional() {
        let with_code = answer_question("What does this do?", Some("x = 1"));
        assert!(with_code.contains("Question: What does this do?"));
        assert!(with_code.contains("Code context:\nx = 1"));

        let without_code = answer_question("What is a closure?", None);
        assert!(!without_code.contains("Code context"));

        let empty_code = answer_question("What is a closure?", Some(""));
        assert!(!empty_code.contains("Code context"));
    }

    #[test]
    fn test_improve_code_names_language() {
        let prompt = improve_code("fn main() {}", "rust");
        assert!(prompt.contains("analyze this rust code"));
        assert!(prompt.contains("Code:\nfn main() {}"));
    }
}
