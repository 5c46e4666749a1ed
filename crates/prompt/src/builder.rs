//! Prompt assembly: context augmentation and message sequencing.

use crate::types::ConversationTurn;
use guichet_core::{AppError, AppResult};
use guichet_llm::ChatMessage;
use handlebars::Handlebars;
use std::collections::HashMap;

/// Minimum trimmed context length (in characters) for the context to be
/// embedded into the prompt. Shorter contexts carry too little signal
/// and the raw question is used instead.
pub const CONTEXT_MIN_CHARS: usize = 50;

/// Default number of trailing history turns kept in the message sequence.
pub const HISTORY_WINDOW: usize = 6;

/// Template for the context-augmented user prompt. The context is
/// embedded before the question with an explicit instruction to answer
/// naturally from both the supplied excerpts and general knowledge.
const AUGMENTED_TEMPLATE: &str = "\
Contexte pertinent de la base de connaissances:
{{context}}

Question de l'utilisateur: {{question}}

Réponds de manière naturelle et conversationnelle en utilisant les informations \
ci-dessus et tes connaissances sur l'administration marocaine.";

/// Build the user prompt, augmenting the question with retrieved context
/// when the context is substantial enough.
pub fn build_user_prompt(context: &str, question: &str) -> AppResult<String> {
    if context.trim().chars().count() <= CONTEXT_MIN_CHARS {
        tracing::debug!("Context below threshold, using raw question");
        return Ok(question.to_string());
    }

    let mut variables = HashMap::new();
    variables.insert("context".to_string(), context.to_string());
    variables.insert("question".to_string(), question.to_string());

    render_template(AUGMENTED_TEMPLATE, &variables)
}

/// Assemble the message sequence for a chat completion:
/// one system message, then up to the last `window` history turns in
/// original order, then one user message. [`HISTORY_WINDOW`] is the
/// default window.
pub fn assemble_messages(
    system: &str,
    history: &[ConversationTurn],
    user_prompt: &str,
    window: usize,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len().min(window) + 2);
    messages.push(ChatMessage::system(system));

    let start = history.len().saturating_sub(window);
    for turn in &history[start..] {
        messages.push(turn.into());
    }

    messages.push(ChatMessage::user(user_prompt));
    messages
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Other(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Other(format!("Failed to render template: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use guichet_llm::ChatRole;

    #[test]
    fn test_short_context_uses_raw_question() {
        let prompt = build_user_prompt("   bref   ", "Comment obtenir un passeport ?").unwrap();
        assert_eq!(prompt, "Comment obtenir un passeport ?");
    }

    #[test]
    fn test_long_context_is_embedded_before_question() {
        let context = "Pour obtenir un passeport marocain, vous devez remplir le formulaire \
                       de demande et fournir une copie de la carte d'identité nationale.";
        let prompt = build_user_prompt(context, "Comment obtenir un passeport ?").unwrap();

        assert!(prompt.starts_with("Contexte pertinent"));
        assert!(prompt.contains(context));
        let context_pos = prompt.find("formulaire").unwrap();
        let question_pos = prompt.find("Comment obtenir un passeport ?").unwrap();
        assert!(context_pos < question_pos);
    }

    #[test]
    fn test_assemble_messages_windows_history() {
        let history: Vec<ConversationTurn> = (0..10)
            .map(|i| {
                if i % 2 == 0 {
                    ConversationTurn::user(format!("question {}", i))
                } else {
                    ConversationTurn::assistant(format!("réponse {}", i))
                }
            })
            .collect();

        let messages = assemble_messages("système", &history, "question finale", HISTORY_WINDOW);

        // system + 6 history turns + user prompt
        assert_eq!(messages.len(), 8);
        assert_eq!(messages[0].role, ChatRole::System);
        // Only the last 6 turns survive, in original order
        assert_eq!(messages[1].content, "question 4");
        assert_eq!(messages[2].content, "réponse 5");
        assert_eq!(messages[6].content, "réponse 9");
        assert_eq!(messages[7].role, ChatRole::User);
        assert_eq!(messages[7].content, "question finale");
    }

    #[test]
    fn test_assemble_messages_short_history() {
        let history = vec![ConversationTurn::user("salut")];
        let messages = assemble_messages("système", &history, "question", HISTORY_WINDOW);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].content, "salut");
    }

    #[test]
    fn test_assemble_messages_custom_window() {
        let history: Vec<ConversationTurn> = (0..5)
            .map(|i| ConversationTurn::user(format!("tour {}", i)))
            .collect();

        let messages = assemble_messages("système", &history, "question", 2);

        // system + 2 windowed turns + user prompt
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1].content, "tour 3");
        assert_eq!(messages[2].content, "tour 4");
    }
}
