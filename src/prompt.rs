//! Prompt construction
//!
//! Every turn sends a single user message that carries the instructions, the
//! full catalog, a window of prior conversation, and the new customer
//! message. The catalog is always sent whole regardless of what was asked.

use crate::catalog::Catalog;
use crate::conversation::{transcript, Message};

/// Persona and formatting instructions that open every prompt
const INSTRUCTIONS: &str = "You are a helpful retail assistant for an electronics store. \
Help customers with product information, availability, and general inquiries. \
Be concise but friendly. When mentioning prices, always include the currency symbol ($).";

/// Build the prompt for one turn.
///
/// `history` is the already-windowed prior conversation, not including
/// `user_message`. Output depends only on the arguments.
pub fn build_prompt(catalog: &Catalog, history: &[Message], user_message: &str) -> String {
    let catalog_json = catalog.to_prompt_json();
    let conversation = transcript(history);

    format!(
        "{INSTRUCTIONS}\n\n\
         Available Products:\n{catalog_json}\n\n\
         Previous Conversation:\n{conversation}\n\n\
         Current Customer Message:\n{user_message}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Availability, Product};
    use rust_decimal::Decimal;

    #[test]
    fn test_prompt_sections_in_order() {
        let catalog = Catalog::electronics_store();
        let history = vec![
            Message::user("Hi"),
            Message::assistant("Hello! How can I help?"),
        ];
        let prompt = build_prompt(&catalog, &history, "What laptops do you have?");

        let instructions = prompt.find("You are a helpful retail assistant").unwrap();
        let products = prompt.find("Available Products:\n{").unwrap();
        let previous = prompt
            .find("Previous Conversation:\nCustomer: Hi\nAssistant: Hello! How can I help?")
            .unwrap();
        let current = prompt
            .find("Current Customer Message:\nWhat laptops do you have?")
            .unwrap();

        assert!(instructions < products && products < previous && previous < current);
        assert!(prompt.ends_with("What laptops do you have?"));
        assert!(prompt.contains("currency symbol ($)"));
        assert!(prompt.contains("Be concise but friendly."));
    }

    #[test]
    fn test_prompt_embeds_whole_catalog() {
        let catalog = Catalog::electronics_store();
        let prompt = build_prompt(&catalog, &[], "Do you have cameras?");
        assert!(prompt.contains(&catalog.to_prompt_json()));
        for product in catalog.iter() {
            assert!(prompt.contains(&product.name), "missing {}", product.name);
        }
    }

    #[test]
    fn test_empty_history_leaves_section_blank() {
        let prompt = build_prompt(&Catalog::electronics_store(), &[], "hello");
        assert!(prompt.contains("Previous Conversation:\n\n\nCurrent Customer Message:\nhello"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let catalog = Catalog::new(vec![Product::new(
            "kettle",
            "BoilMaster",
            Decimal::new(2_950, 2),
            "1.7L",
            Availability::OutOfStock,
            "Kitchen",
        )])
        .unwrap();
        let history = vec![Message::user("a"), Message::assistant("b")];

        let first = build_prompt(&catalog, &history, "c");
        let second = build_prompt(&catalog, &history, "c");
        assert_eq!(first, second);
        assert!(first.contains("\"price\": 29.5"));
        assert!(first.contains("\"availability\": \"Out of Stock\""));
    }
}
