//! Prompt templates sent to the generative-language service.

/// Shown in the tutor prompt when a card has no answer yet.
const MISSING_ANSWER: &str = "(answer not provided yet)";

/// Build the card generation prompt. Asks for the numbered
/// `Question:` / `Answer:` layout the parser expects first.
pub fn generation_prompt(topic: &str, count: usize) -> String {
    format!(
        r#"Generate exactly {count} educational flashcards about "{topic}".

For each flashcard, provide:
- A clear, concise question on the front
- A detailed, accurate answer on the back

Format your response EXACTLY as follows (this format is critical):

1. Question: [question text]
Answer: [answer text]

2. Question: [question text]
Answer: [answer text]

3. Question: [question text]
Answer: [answer text]

Continue this pattern for all {count} cards. Make sure:
- Each card is numbered (1, 2, 3, etc.)
- Each question starts with "Question:"
- Each answer starts with "Answer:"
- Questions are diverse and cover different aspects of {topic}
- Answers are concise but informative (2-3 sentences maximum)
- Use clear, educational language appropriate for learning"#
    )
}

/// Build the single-turn tutor prompt for one card.
pub fn tutor_prompt(question: &str, answer: &str, user_message: &str) -> String {
    let answer = if answer.trim().is_empty() {
        MISSING_ANSWER
    } else {
        answer
    };

    format!(
        r#"You are a friendly tutor helping a student understand this flashcard.

Flashcard:
Question: {question}
Answer: {answer}

Student just asked:
"{user_message}"

Respond with a **short** explanation:
- At most 3 short bullet points OR 3 short sentences.
- Use simple language.
- Give a tiny numeric example if it helps.
- Do NOT restate the entire course; stay focused on this specific concept."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_prompt_embeds_topic_and_count() {
        let prompt = generation_prompt("photosynthesis", 7);
        assert!(prompt.starts_with("Generate exactly 7 educational flashcards about \"photosynthesis\"."));
        assert!(prompt.contains("Continue this pattern for all 7 cards."));
        assert!(prompt.contains("1. Question: [question text]\nAnswer: [answer text]"));
    }

    #[test]
    fn tutor_prompt_marks_missing_answer() {
        let prompt = tutor_prompt("What is 2+2?", "  ", "why four?");
        assert!(prompt.contains("Answer: (answer not provided yet)"));
        assert!(prompt.contains("\"why four?\""));
        assert!(prompt.contains("At most 3 short bullet points"));
    }
}
