/// Fixed system instruction sent with every request.
pub const COMMIT_SYSTEM_PROMPT: &str = "You are a commit message generator that creates messages in the conventional commit format. \
You always follow the format: <type>(<ticket>): <title>\n<optional body>. \
Types are limited to: feat, fix, docs, style, refactor, test, chore. \
Keep the title concise and descriptive. \
When a body is needed, write it as a list of bullet points.";

/// Builds the user prompt from the ticket id, the diff and recent commit
/// subjects.
///
/// Pure and deterministic; empty `diff` or `history` still produce a
/// well-formed prompt.
///
/// # Example
/// ```
/// use commitly::llm::prompt::build_commit_prompt;
///
/// let prompt = build_commit_prompt("PROJ-123", "+added line", "fix: previous");
/// assert!(prompt.contains("feat(PROJ-123):"));
/// assert!(prompt.contains("+added line"));
/// ```
pub fn build_commit_prompt(ticket: &str, diff: &str, history: &str) -> String {
    format!(
        "Generate a commit message for Jira ticket '{ticket}' following this exact format:\n\
         <type>({ticket}): <title>\n\n\
         Changes:\n\
         - <first change>\n\
         - <second change>\n\
         - <additional changes if needed>\n\n\
         Where:\n\
         - <type> should be one of: feat, fix, docs, style, refactor, test, chore\n\
         - ({ticket}) is the Jira ticket number\n\
         - <title> is a concise description\n\
         - Changes section should list the main modifications as bullet points\n\n\
         For example: feat({ticket}): add user login endpoint\n\n\
         The diff of changes is:\n{diff}\n\n\
         The history of previous commit messages is:\n{history}\n\n\
         Provide a commit message that follows this format strictly, with bullet points for changes."
    )
}
