pub const QUESTION_GENERATOR_SYSTEM_PROMPT: &str = "You write practice questions for the South Carolina DMV beginner's permit knowledge test. Every question must be answerable from the South Carolina Driver's Manual. Respond with JSON only. Do not add prose, markdown or commentary.";

/// `{count}` is replaced with the number of questions requested.
pub const QUESTION_GENERATOR_USER_PROMPT: &str = "Generate {count} distinct multiple-choice questions about the South Carolina DMV permit test.

Respond as a strict JSON array. Each element is an object with exactly these fields:
- \"question\": the question text
- \"choices\": a list of 3 or 4 answer strings, without letter prefixes
- \"answer\": the letter of the correct choice (\"A\", \"B\", \"C\" or \"D\")

Exactly one choice per question is correct.";

pub fn question_generator_user_prompt(count: usize) -> String {
    QUESTION_GENERATOR_USER_PROMPT.replace("{count}", &count.to_string())
}
