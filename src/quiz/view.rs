use teloxide::utils::html;

use super::progress::QuizProgress;
use super::Quiz;
use crate::i18n::Translations;

pub const OPTION_LETTERS: [&str; 4] = ["A", "B", "C", "D"];

pub fn option_from_letter(text: &str) -> Option<usize> {
    let text = text.trim();
    OPTION_LETTERS
        .iter()
        .position(|letter| letter.eq_ignore_ascii_case(text))
}

/// The question card: position, question, lettered options and, once revealed, the verdict.
pub fn render_question(quiz: &Quiz, progress: &QuizProgress, t: &Translations) -> Option<String> {
    let question = progress.current_question(quiz)?;
    let revealed = progress.is_revealed(question.id);
    let chosen = progress.selected.get(&question.id).copied();

    let mut text = format!(
        "{} {} {} {}\n\n{}\n",
        t.question,
        progress.current + 1,
        t.of,
        quiz.len(),
        html::bold(&html::escape(&question.text)),
    );

    for (idx, option) in question.options.iter().enumerate() {
        let marker = match (revealed, question.is_correct(idx), chosen == Some(idx)) {
            (true, true, _) => "✅",
            (true, false, true) => "❌",
            _ => "▫️",
        };
        text.push_str(&format!(
            "\n{} {}. {}",
            marker,
            OPTION_LETTERS[idx],
            html::escape(option)
        ));
    }

    if revealed {
        let verdict = if chosen.is_some_and(|c| question.is_correct(c)) {
            t.correct
        } else {
            t.incorrect
        };
        text.push_str(&format!(
            "\n\n{}\n{}: {}",
            html::bold(verdict),
            html::italic(t.explanation),
            html::escape(&question.explanation)
        ));
        text.push_str(&format!(
            "\n\n{}: {}%",
            t.current_accuracy,
            progress.accuracy_percent(quiz)
        ));
    }

    Some(text)
}
