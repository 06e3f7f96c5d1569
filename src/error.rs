use crate::i18n::Translations;

#[derive(Debug, thiserror::Error)]
pub enum StudyError {
    #[error("unsupported file type {mime:?} for {name:?}")]
    UnsupportedFileType { name: String, mime: Option<String> },

    #[error("file {name:?} is {size} bytes, the limit is {limit}")]
    FileTooLarge { name: String, size: u64, limit: u64 },

    #[error("request to the generation service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generation service answered {status}: {message}")]
    Api { status: u16, message: String },

    #[error("generation service returned no text")]
    EmptyResponse,

    #[error("generation service returned malformed JSON: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("generated {0} is empty")]
    EmptyResult(&'static str),

    #[error("no document is being processed")]
    NothingToProcess,

    #[error("no study material is loaded")]
    NoStudyLoaded,
}

impl StudyError {
    /// Only the file-type rejection gets its own message, everything else is a processing failure.
    pub fn user_message(&self, t: &Translations) -> &'static str {
        match self {
            StudyError::UnsupportedFileType { .. } => t.file_error,
            _ => t.error,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    #[test]
    fn file_type_errors_get_the_file_message() {
        let t = Language::En.t();
        let err = StudyError::UnsupportedFileType {
            name: "photo.png".to_string(),
            mime: Some("image/png".to_string()),
        };
        assert_eq!(err.user_message(t), t.file_error);
    }

    #[test]
    fn everything_else_is_a_processing_failure() {
        let t = Language::Ar.t();
        assert_eq!(StudyError::EmptyResponse.user_message(t), t.error);
        assert_eq!(StudyError::EmptyResult("quiz").user_message(t), t.error);
        let api = StudyError::Api {
            status: 429,
            message: "quota".to_string(),
        };
        assert_eq!(api.user_message(t), t.error);
    }
}
