use crate::i18n::Language;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ContentType {
    #[default]
    ResearchPaper,
    Article,
    Conversation,
    Summary,
    CreativeWriting,
    BusinessEmail,
    StudyPlan,
}

impl ContentType {
    pub const ALL: [ContentType; 7] = [
        ContentType::ResearchPaper,
        ContentType::Article,
        ContentType::Conversation,
        ContentType::Summary,
        ContentType::CreativeWriting,
        ContentType::BusinessEmail,
        ContentType::StudyPlan,
    ];

    /// English name handed to the writer prompt regardless of UI language.
    pub fn prompt_name(&self) -> &'static str {
        match self {
            ContentType::ResearchPaper => "Research Paper",
            ContentType::Article => "Article",
            ContentType::Conversation => "Conversation",
            ContentType::Summary => "Summary",
            ContentType::CreativeWriting => "Creative Writing",
            ContentType::BusinessEmail => "Business Email",
            ContentType::StudyPlan => "Study Plan",
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.prompt_name(),
            Language::Ar => match self {
                ContentType::ResearchPaper => "ورقة بحثية",
                ContentType::Article => "مقال",
                ContentType::Conversation => "محادثة",
                ContentType::Summary => "ملخص",
                ContentType::CreativeWriting => "كتابة إبداعية",
                ContentType::BusinessEmail => "بريد إلكتروني رسمي",
                ContentType::StudyPlan => "خطة دراسية",
            },
        }
    }

    pub fn from_label(text: &str, language: Language) -> Option<ContentType> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label(language) == text.trim())
    }
}

/// The content studio overlay's choices.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StudioDraft {
    pub content_type: ContentType,
    pub output_language: Language,
}

impl StudioDraft {
    pub fn new(ui_language: Language) -> Self {
        Self {
            content_type: ContentType::default(),
            output_language: ui_language,
        }
    }
}

pub fn export_file_name(content_type: ContentType, millis: i64) -> String {
    let kind = content_type.prompt_name().split_whitespace().collect::<Vec<_>>().join("_");
    format!("AVB_{}_{}.txt", kind, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_resolve_in_their_own_language_only() {
        assert_eq!(
            ContentType::from_label("مقال", Language::Ar),
            Some(ContentType::Article)
        );
        assert_eq!(ContentType::from_label("Article", Language::Ar), None);
        assert_eq!(
            ContentType::from_label("Study Plan", Language::En),
            Some(ContentType::StudyPlan)
        );
    }

    #[test]
    fn every_type_round_trips_through_its_label() {
        for lang in Language::ALL {
            for kind in ContentType::ALL {
                assert_eq!(ContentType::from_label(kind.label(lang), lang), Some(kind));
            }
        }
    }

    #[test]
    fn draft_defaults_follow_the_ui_language() {
        let draft = StudioDraft::new(Language::Ar);
        assert_eq!(draft.content_type, ContentType::ResearchPaper);
        assert_eq!(draft.output_language, Language::Ar);
    }

    #[test]
    fn export_names_use_underscores() {
        assert_eq!(
            export_file_name(ContentType::BusinessEmail, 1700000000000),
            "AVB_Business_Email_1700000000000.txt"
        );
    }
}
