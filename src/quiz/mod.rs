pub mod progress;
pub mod view;

use std::collections::BTreeMap;

pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    pub explanation: String,
}

impl Question {
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_option_index
    }

    fn is_well_formed(&self) -> bool {
        !self.text.trim().is_empty()
            && self.options.len() == OPTIONS_PER_QUESTION
            && self.correct_option_index < OPTIONS_PER_QUESTION
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "GeneratedQuiz")]
pub struct Quiz {
    pub questions: Vec<Question>,
}

/// Quiz as the model returns it. Numbers are read signed so that one bad
/// entry is dropped on its own instead of failing the whole batch.
#[derive(serde::Deserialize)]
struct GeneratedQuiz {
    #[serde(default)]
    questions: Vec<GeneratedQuestion>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedQuestion {
    #[serde(default)]
    id: i64,
    text: String,
    options: Vec<String>,
    correct_option_index: i64,
    #[serde(default)]
    explanation: String,
}

impl From<GeneratedQuiz> for Quiz {
    fn from(generated: GeneratedQuiz) -> Self {
        let questions = generated
            .questions
            .into_iter()
            .filter_map(|q| {
                let Ok(correct_option_index) = usize::try_from(q.correct_option_index) else {
                    log::warn!(
                        "Dropping generated question with answer index {}: {:?}",
                        q.correct_option_index,
                        q.text
                    );
                    return None;
                };
                Some(Question {
                    // renumbered on append
                    id: u32::try_from(q.id).unwrap_or(0),
                    text: q.text,
                    options: q.options,
                    correct_option_index,
                    explanation: q.explanation,
                })
            })
            .collect();
        Quiz::new(questions)
    }
}

impl Quiz {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Takes a freshly generated batch and numbers it from 1.
    /// The service's own ids are not trusted to be unique.
    pub fn from_generated(batch: Quiz) -> Self {
        let mut quiz = Quiz::new(Vec::with_capacity(batch.questions.len()));
        quiz.append_batch(batch);
        quiz
    }

    /// Appends the usable questions of `batch`, continuing the id sequence after the last question.
    /// Returns how many were appended.
    pub fn append_batch(&mut self, batch: Quiz) -> usize {
        let last_id = self.questions.last().map(|q| q.id).unwrap_or(0);
        let before = self.questions.len();

        let usable = batch.questions.into_iter().filter(|q| {
            let ok = q.is_well_formed();
            if !ok {
                log::warn!("Dropping malformed generated question: {:?}", q.text);
            }
            ok
        });

        for (i, mut question) in usable.enumerate() {
            question.id = last_id + i as u32 + 1;
            self.questions.push(question);
        }

        self.questions.len() - before
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question_texts(&self) -> Vec<String> {
        self.questions.iter().map(|q| q.text.clone()).collect()
    }

    pub fn correct_count(&self, selected: &BTreeMap<u32, usize>) -> usize {
        self.questions
            .iter()
            .filter(|q| selected.get(&q.id).is_some_and(|choice| q.is_correct(*choice)))
            .count()
    }

    /// Whole percent of all questions answered correctly; unanswered ones count as wrong.
    pub fn score_percent(&self, selected: &BTreeMap<u32, usize>) -> u32 {
        percent(self.correct_count(selected), self.questions.len())
    }
}

pub(crate) fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

#[cfg(test)]
pub(crate) fn question(text: &str, correct: usize) -> Question {
    Question {
        id: 0,
        text: text.to_string(),
        options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        correct_option_index: correct,
        explanation: format!("because {text}"),
    }
}
