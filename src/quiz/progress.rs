use std::collections::{BTreeMap, BTreeSet};

use super::{percent, Question, Quiz, OPTIONS_PER_QUESTION};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum QuizView {
    #[default]
    Questions,
    NameInput,
    Certificate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Revealed { correct: bool },
    AlreadyAnswered,
    InvalidOption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved(usize),
    NotAnswered,
    Finished,
    /// The walk already ended; the student is past the last question.
    Closed,
}

/// Where the student is in the quiz and what they have answered, keyed by question id.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct QuizProgress {
    pub current: usize,
    pub selected: BTreeMap<u32, usize>,
    pub revealed: BTreeSet<u32>,
    pub view: QuizView,
    pub student_name: Option<String>,
}

impl QuizProgress {
    pub fn current_question<'a>(&self, quiz: &'a Quiz) -> Option<&'a Question> {
        quiz.questions.get(self.current)
    }

    /// True while the student is still walking through the questions.
    pub fn is_answering(&self) -> bool {
        self.view == QuizView::Questions
    }

    pub fn is_revealed(&self, id: u32) -> bool {
        self.revealed.contains(&id)
    }

    /// Answers the current question. Once a question is revealed its answer can't change.
    pub fn select(&mut self, quiz: &Quiz, option: usize) -> Selection {
        let Some(question) = self.current_question(quiz) else {
            return Selection::InvalidOption;
        };
        if self.is_revealed(question.id) {
            return Selection::AlreadyAnswered;
        }
        if option >= OPTIONS_PER_QUESTION {
            return Selection::InvalidOption;
        }

        self.selected.insert(question.id, option);
        self.revealed.insert(question.id);
        Selection::Revealed {
            correct: question.is_correct(option),
        }
    }

    pub fn next(&mut self, quiz: &Quiz) -> Step {
        if !self.is_answering() {
            return Step::Closed;
        }
        let Some(question) = self.current_question(quiz) else {
            return Step::NotAnswered;
        };
        if !self.selected.contains_key(&question.id) {
            return Step::NotAnswered;
        }

        if self.current + 1 < quiz.len() {
            self.current += 1;
            Step::Moved(self.current)
        } else {
            self.view = QuizView::NameInput;
            Step::Finished
        }
    }

    pub fn previous(&mut self) -> bool {
        if !self.is_answering() || self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn submit_name(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.student_name = Some(name.to_string());
        self.view = QuizView::Certificate;
        true
    }

    pub fn is_last(&self, quiz: &Quiz) -> bool {
        self.current + 1 >= quiz.len()
    }

    pub fn score_percent(&self, quiz: &Quiz) -> u32 {
        quiz.score_percent(&self.selected)
    }

    /// Share of the answered questions that were right so far.
    pub fn accuracy_percent(&self, quiz: &Quiz) -> u32 {
        percent(quiz.correct_count(&self.selected), self.selected.len())
    }
}
