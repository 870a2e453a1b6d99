// Prompt templates sent to the generative API.
// The quiz format here is the contract `quiz::parser` tolerates; change both together.

/// Multiple-choice quiz prompt. Placeholders: `{course_name}`, `{difficulty}`, `{num_questions}`.
pub const QUIZ_PROMPT_TEMPLATE: &str = "\
Generate a multiple-choice quiz for the course \"{course_name}\" \
at {difficulty} level with {num_questions} questions.

Format each question as follows:
Question: [question text]
Options:
A) [option text]
B) [option text]
C) [option text]
D) [option text]
Correct Answer: [A/B/C/D]
Explanation: [explanation text]

Ensure the response is structured and clear.";

/// Renders the quiz prompt for one request.
pub fn render_quiz_prompt(course_name: &str, difficulty: &str, num_questions: u8) -> String {
    QUIZ_PROMPT_TEMPLATE
        .replace("{course_name}", course_name)
        .replace("{difficulty}", difficulty)
        .replace("{num_questions}", &num_questions.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_quiz_prompt_fills_placeholders() {
        let prompt = render_quiz_prompt("Machine Learning Fundamentals", "advanced", 10);
        assert!(prompt.contains("\"Machine Learning Fundamentals\""));
        assert!(prompt.contains("at advanced level with 10 questions"));
        assert!(prompt.contains("Correct Answer: [A/B/C/D]"));
        assert!(!prompt.contains('{'));
    }
}
