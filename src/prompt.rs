use serde::Serialize;

pub const SYSTEM_PROMPT: &str = "You are a helpful and knowledgeable assistant that analyzes the contents of a website, \
and provides a short, snarky, humorous summary, ignoring text that might be navigation related. \
Respond in markdown. Do not wrap the markdown in a code block - respond just with the markdown.";

pub const USER_PROMPT_PREFIX: &str = "Here are the contents of a website. \
Provide a short summary of this website. \
If it includes news or announcements, then summarize these too.\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Build the two-message prompt: system persona, then the page text wrapped in
/// the user instruction. The page text is passed through unbounded.
pub fn build_messages(page_text: &str) -> Vec<Message> {
    vec![
        Message {
            role: Role::System,
            content: SYSTEM_PROMPT.to_string(),
        },
        Message {
            role: Role::User,
            content: format!("{USER_PROMPT_PREFIX}{page_text}"),
        },
    ]
}

/// Single-string form for backends without role-tagged input. Same content,
/// same order, joined by a blank line.
pub fn flatten(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
