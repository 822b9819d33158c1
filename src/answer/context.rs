//! Retrieved-review formatting for the augmented prompt.

use crate::index::ReviewMatch;

/// Format retrieved matches as fixed-layout text blocks for the prompt.
///
/// Matches keep the index's ordering. Zero matches produce an empty string,
/// so the augmented message degrades to the bare question.
pub fn format_matches_for_prompt(matches: &[ReviewMatch]) -> String {
    let mut result = String::new();
    for m in matches {
        result.push_str(&format!(
            "\n\nReturned Results:\nProfessor: {}\nReview: {}\nSubject: {}\nStars: {}\n",
            m.id, m.review, m.subject, m.stars
        ));
    }
    result
}

/// Build the augmented final message: the question with all retrieved
/// review blocks appended.
pub fn augment_question(question: &str, matches: &[ReviewMatch]) -> String {
    format!("{}{}", question, format_matches_for_prompt(matches))
}
