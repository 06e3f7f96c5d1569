use crate::error::StudyError;
use crate::i18n::Language;
use crate::quiz::progress::QuizProgress;
use crate::quiz::Quiz;
use crate::studio::StudioDraft;
use crate::summary::SummaryData;
use crate::upload::UploadedFile;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Screen {
    #[default]
    LanguageSelect,
    Upload,
    Processing,
    Dashboard,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Tab {
    #[default]
    Summary,
    Quiz,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Tone {
    #[default]
    Formal,
    Friendly,
}

/// Everything generated from one document. Summary and quiz only ever exist together.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Study {
    pub file: UploadedFile,
    pub summary: SummaryData,
    pub quiz: Quiz,
    pub progress: QuizProgress,
    pub tab: Tab,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub screen: Screen,
    pub ui_language: Language,
    pub content_language: Language,
    pub tone: Tone,
    pub pending: Option<UploadedFile>,
    pub study: Option<Study>,
    pub studio: Option<StudioDraft>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The content language follows the UI language until changed separately.
    pub fn select_language(&mut self, language: Language) {
        self.ui_language = language;
        self.content_language = language;
        self.screen = Screen::Upload;
    }

    pub fn set_content_language(&mut self, language: Language) {
        self.content_language = language;
    }

    pub fn set_tone(&mut self, tone: Tone) {
        self.tone = tone;
    }

    pub fn begin_processing(&mut self, file: UploadedFile) -> Result<(), StudyError> {
        if self.screen != Screen::Upload {
            return Err(StudyError::NothingToProcess);
        }
        self.pending = Some(file);
        self.screen = Screen::Processing;
        Ok(())
    }

    /// Moves to the dashboard only with a usable summary and quiz; otherwise back to upload.
    pub fn finish_processing(&mut self, summary: SummaryData, quiz: Quiz) -> Result<(), StudyError> {
        let Some(file) = self.pending.take() else {
            self.screen = Screen::Upload;
            return Err(StudyError::NothingToProcess);
        };

        let quiz = Quiz::from_generated(quiz);
        let empty = if summary.is_empty() {
            Some("summary")
        } else if quiz.is_empty() {
            Some("quiz")
        } else {
            None
        };
        if let Some(what) = empty {
            self.screen = Screen::Upload;
            return Err(StudyError::EmptyResult(what));
        }

        self.study = Some(Study {
            file,
            summary,
            quiz,
            progress: QuizProgress::default(),
            tab: Tab::Summary,
        });
        self.screen = Screen::Dashboard;
        Ok(())
    }

    pub fn fail_processing(&mut self) {
        self.pending = None;
        self.screen = Screen::Upload;
    }

    /// Appends a generated batch. An empty batch is an error and leaves the quiz as it was.
    pub fn append_questions(&mut self, batch: Quiz) -> Result<usize, StudyError> {
        let study = self.study.as_mut().ok_or(StudyError::NoStudyLoaded)?;
        match study.quiz.append_batch(batch) {
            0 => Err(StudyError::EmptyResult("quiz batch")),
            added => Ok(added),
        }
    }

    pub fn upload_new(&mut self) {
        self.pending = None;
        self.study = None;
        self.screen = Screen::Upload;
    }

    pub fn open_studio(&mut self) {
        if self.screen == Screen::LanguageSelect {
            return;
        }
        if self.studio.is_none() {
            self.studio = Some(StudioDraft::new(self.ui_language));
        }
    }

    pub fn close_studio(&mut self) {
        self.studio = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::question;
    use crate::summary::SummarySection;

    fn file() -> UploadedFile {
        UploadedFile::new("notes.txt", Some("text/plain"), b"cells").unwrap()
    }

    fn summary() -> SummaryData {
        SummaryData {
            title: "Cells".into(),
            sections: vec![SummarySection {
                heading: "Basics".into(),
                points: vec!["Cells are small".into()],
            }],
        }
    }

    fn processing_session() -> Session {
        let mut session = Session::new();
        session.select_language(Language::Ar);
        session.begin_processing(file()).unwrap();
        session
    }

    #[test]
    fn language_choice_sets_both_languages() {
        let mut session = Session::new();
        assert_eq!(session.screen, Screen::LanguageSelect);
        session.select_language(Language::Ar);
        assert_eq!(session.screen, Screen::Upload);
        assert_eq!(session.ui_language, Language::Ar);
        assert_eq!(session.content_language, Language::Ar);

        session.set_content_language(Language::En);
        assert_eq!(session.ui_language, Language::Ar);
        assert_eq!(session.content_language, Language::En);
    }

    #[test]
    fn processing_starts_only_from_upload() {
        let mut session = Session::new();
        assert!(session.begin_processing(file()).is_err());
        assert_eq!(session.screen, Screen::LanguageSelect);
    }

    #[test]
    fn successful_generation_reaches_the_dashboard() {
        let mut session = processing_session();
        session
            .finish_processing(summary(), Quiz::new(vec![question("q1", 0)]))
            .unwrap();

        assert_eq!(session.screen, Screen::Dashboard);
        let study = session.study.as_ref().unwrap();
        assert_eq!(study.tab, Tab::Summary);
        assert_eq!(study.quiz.questions[0].id, 1);
        assert!(session.pending.is_none());
    }

    #[test]
    fn empty_results_never_reach_the_dashboard() {
        let mut session = processing_session();
        let err = session.finish_processing(summary(), Quiz::default()).unwrap_err();
        assert!(matches!(err, StudyError::EmptyResult("quiz")));
        assert_eq!(session.screen, Screen::Upload);
        assert!(session.study.is_none());

        let mut session = processing_session();
        let err = session
            .finish_processing(SummaryData::default(), Quiz::new(vec![question("q1", 0)]))
            .unwrap_err();
        assert!(matches!(err, StudyError::EmptyResult("summary")));
        assert_eq!(session.screen, Screen::Upload);
        assert!(session.study.is_none());
    }

    #[test]
    fn failure_returns_to_upload() {
        let mut session = processing_session();
        session.fail_processing();
        assert_eq!(session.screen, Screen::Upload);
        assert!(session.pending.is_none());
        assert!(session.begin_processing(file()).is_ok());
    }

    #[test]
    fn failed_batch_leaves_quiz_untouched() {
        let mut session = processing_session();
        session
            .finish_processing(summary(), Quiz::new(vec![question("q1", 0)]))
            .unwrap();
        let before = session.study.as_ref().unwrap().quiz.clone();

        let mut broken = question("broken", 0);
        broken.options.clear();
        assert!(session.append_questions(Quiz::new(vec![broken])).is_err());
        assert_eq!(session.study.as_ref().unwrap().quiz, before);

        assert_eq!(session.append_questions(Quiz::new(vec![question("q2", 1)])).unwrap(), 1);
        let ids: Vec<u32> = session.study.as_ref().unwrap().quiz.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn batches_need_loaded_material() {
        let mut session = Session::new();
        assert!(matches!(
            session.append_questions(Quiz::new(vec![question("q", 0)])),
            Err(StudyError::NoStudyLoaded)
        ));
    }

    #[test]
    fn upload_new_drops_everything_generated() {
        let mut session = processing_session();
        session
            .finish_processing(summary(), Quiz::new(vec![question("q1", 0)]))
            .unwrap();
        session.set_tone(Tone::Friendly);

        session.upload_new();
        assert_eq!(session.screen, Screen::Upload);
        assert!(session.study.is_none());
        assert_eq!(session.tone, Tone::Friendly);
    }

    #[test]
    fn studio_opens_after_language_selection() {
        let mut session = Session::new();
        session.open_studio();
        assert!(session.studio.is_none());

        session.select_language(Language::Ar);
        session.open_studio();
        assert_eq!(session.studio.as_ref().map(|s| s.output_language), Some(Language::Ar));
        session.close_studio();
        assert!(session.studio.is_none());
        assert_eq!(session.screen, Screen::Upload);
    }
}
