//! Prompt template shared by every crew.

/// Separator placed between earlier task outputs in the context block.
pub const CONTEXT_SEPARATOR: &str = "\n\n----------\n\n";

/// Render the agent persona.
pub fn system_prompt(role: &str, goal: &str, backstory: &str) -> String {
    format!(
        "You are {}. {}\nYour personal goal is: {}",
        role.trim(),
        backstory.trim(),
        goal.trim()
    )
}

/// Render a task, appending the outputs of earlier tasks as context.
pub fn task_prompt(description: &str, expected_output: &str, context: &[&str]) -> String {
    let mut prompt = format!(
        "{}\n\nThis is the expected criteria for your final answer: {}\n\
         you MUST return the actual complete content as the final answer, not a summary.",
        description.trim(),
        expected_output.trim()
    );

    if !context.is_empty() {
        prompt.push_str("\n\nThis is the context you're working with:\n");
        prompt.push_str(&context.join(CONTEXT_SEPARATOR));
    }

    prompt
}
