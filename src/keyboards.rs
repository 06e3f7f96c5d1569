use teloxide::types::{KeyboardButton, KeyboardMarkup};

use crate::i18n::{Language, Translations};
use crate::quiz::view::OPTION_LETTERS;
use crate::session::{Study, Tab};
use crate::studio::ContentType;

fn row(labels: &[&str]) -> Vec<KeyboardButton> {
    labels.iter().map(|label| KeyboardButton::new(*label)).collect()
}

fn language_row() -> Vec<KeyboardButton> {
    Language::ALL
        .iter()
        .map(|lang| KeyboardButton::new(lang.native_name()))
        .collect()
}

pub fn quiz_tab_label(t: &Translations, questions: usize) -> String {
    format!("{} ({})", t.quiz, questions)
}

pub fn languages() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![language_row()])
}

pub fn upload(t: &Translations) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        language_row(),
        row(&[t.formal, t.friendly]),
        row(&[t.generator]),
    ])
}

/// Answer and navigation rows only appear while questions are still open.
pub fn dashboard(t: &Translations, study: &Study) -> KeyboardMarkup {
    let tabs = vec![
        KeyboardButton::new(t.summary),
        KeyboardButton::new(quiz_tab_label(t, study.quiz.len())),
    ];
    let mut rows = Vec::new();

    if study.tab == Tab::Quiz && study.progress.is_answering() {
        rows.push(row(&OPTION_LETTERS));
        let forward = if study.progress.is_last(&study.quiz) {
            t.finish_quiz
        } else {
            t.next
        };
        rows.push(row(&[t.previous, forward]));
        rows.push(row(&[t.generate_more]));
    }

    rows.push(tabs);
    rows.push(row(&[t.upload_new, t.generator]));
    KeyboardMarkup::new(rows)
}

pub fn studio(ui_language: Language) -> KeyboardMarkup {
    let t = ui_language.t();
    let mut rows: Vec<Vec<KeyboardButton>> = ContentType::ALL
        .chunks(2)
        .map(|pair| pair.iter().map(|kind| KeyboardButton::new(kind.label(ui_language))).collect())
        .collect();
    rows.push(language_row());
    rows.push(row(&[t.close]));
    KeyboardMarkup::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::progress::{QuizProgress, QuizView};
    use crate::quiz::{question, Quiz};
    use crate::summary::SummaryData;
    use crate::upload::UploadedFile;

    fn labels(markup: &KeyboardMarkup) -> Vec<Vec<String>> {
        markup
            .keyboard
            .iter()
            .map(|row| row.iter().map(|button| button.text.clone()).collect())
            .collect()
    }

    fn study(questions: usize, tab: Tab) -> Study {
        let quiz = Quiz::from_generated(Quiz::new(
            (0..questions).map(|i| question(&format!("q{i}"), 0)).collect(),
        ));
        Study {
            file: UploadedFile::new("notes.txt", Some("text/plain"), b"cells").unwrap(),
            summary: SummaryData::default(),
            quiz,
            progress: QuizProgress::default(),
            tab,
        }
    }

    #[test]
    fn language_buttons_use_native_names() {
        assert_eq!(labels(&languages()), vec![vec!["English", "العربية"]]);
    }

    #[test]
    fn upload_offers_languages_tone_and_writer() {
        let t = Language::En.t();
        let rows = labels(&upload(t));
        assert_eq!(rows[0], vec!["English", "العربية"]);
        assert_eq!(rows[1], vec![t.formal, t.friendly]);
        assert_eq!(rows[2], vec![t.generator]);
    }

    #[test]
    fn summary_tab_shows_only_tabs_and_actions() {
        let t = Language::En.t();
        let rows = labels(&dashboard(t, &study(3, Tab::Summary)));
        assert_eq!(rows, vec![
            vec![t.summary.to_string(), "Quiz (3)".to_string()],
            vec![t.upload_new.to_string(), t.generator.to_string()],
        ]);
    }

    #[test]
    fn quiz_tab_adds_answers_and_navigation() {
        let t = Language::En.t();
        let rows = labels(&dashboard(t, &study(2, Tab::Quiz)));
        assert_eq!(rows[0], vec!["A", "B", "C", "D"]);
        assert_eq!(rows[1], vec![t.previous, t.next]);
        assert_eq!(rows[2], vec![t.generate_more]);
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn last_question_offers_finish() {
        let t = Language::En.t();
        let rows = labels(&dashboard(t, &study(1, Tab::Quiz)));
        assert_eq!(rows[1], vec![t.previous, t.finish_quiz]);
    }

    #[test]
    fn finished_quiz_hides_answer_controls() {
        let t = Language::En.t();
        let mut finished = study(2, Tab::Quiz);
        finished.progress.view = QuizView::Certificate;

        let rows = labels(&dashboard(t, &finished));
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().flatten().all(|label| label != t.generate_more && label != "A"));
    }

    #[test]
    fn studio_pairs_types_then_languages_then_close() {
        let t = Language::Ar.t();
        let rows = labels(&studio(Language::Ar));
        let type_rows = ContentType::ALL.len().div_ceil(2);
        assert_eq!(rows.len(), type_rows + 2);
        assert_eq!(rows[0][0], ContentType::ALL[0].label(Language::Ar));
        assert_eq!(rows[type_rows], vec!["English", "العربية"]);
        assert_eq!(rows[type_rows + 1], vec![t.close]);
    }
}
