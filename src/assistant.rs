use serde_json::json;

use crate::error::StudyError;
use crate::gemini::{GeminiClient, Part};
use crate::i18n::Language;
use crate::quiz::Quiz;
use crate::session::Tone;
use crate::studio::ContentType;
use crate::summary::SummaryData;
use crate::upload::UploadedFile;

const SUMMARY_TEMPERATURE: f32 = 0.3;
const QUIZ_TEMPERATURE: f32 = 0.4;
const CONTENT_TEMPERATURE: f32 = 0.7;
const EXCLUDE_LIMIT: usize = 1000;

/// Builds the study prompts and hands them to the generation service.
pub struct StudyHelper {
    gemini: GeminiClient,
}

impl StudyHelper {
    pub fn new(gemini: GeminiClient) -> Self {
        Self { gemini }
    }

    pub async fn summarize(
        &self,
        file: &UploadedFile,
        language: Language,
        tone: Tone,
    ) -> Result<SummaryData, StudyError> {
        log::info!("Generating {:?} summary of {:?} in {}", tone, file.name, language.name());
        let parts = vec![
            Part::inline_data(&file.mime_type, &file.data),
            Part::text(summary_prompt(language, tone)),
        ];
        self.gemini
            .generate_json(parts, summary_schema(), SUMMARY_TEMPERATURE)
            .await
    }

    pub async fn generate_quiz(
        &self,
        file: &UploadedFile,
        language: Language,
        count: usize,
        exclude: &[String],
    ) -> Result<Quiz, StudyError> {
        log::info!(
            "Generating {} questions for {:?} in {} ({} to avoid)",
            count,
            file.name,
            language.name(),
            exclude.len()
        );
        let parts = vec![
            Part::inline_data(&file.mime_type, &file.data),
            Part::text(quiz_prompt(language, count, exclude)),
        ];
        self.gemini
            .generate_json(parts, quiz_schema(), QUIZ_TEMPERATURE)
            .await
    }

    pub async fn generate_content(
        &self,
        topic: &str,
        content_type: ContentType,
        language: Language,
    ) -> Result<String, StudyError> {
        log::info!("Writing a {} in {}", content_type.prompt_name(), language.name());
        self.gemini
            .generate_text(content_prompt(topic, content_type, language), CONTENT_TEMPERATURE)
            .await
    }
}

fn tone_instruction(tone: Tone) -> &'static str {
    match tone {
        Tone::Formal => "Ensure the tone is professional, academic, and structured like a textbook.",
        Tone::Friendly => "Ensure the tone is friendly, casual, and easy to understand, as if explaining to a friend, while keeping all key information.",
    }
}

pub fn summary_prompt(language: Language, tone: Tone) -> String {
    format!(
        "Analyze this document and provide a comprehensive, structured summary in {}. \
         Break it down into logical sections with key bullet points. {}",
        language.name(),
        tone_instruction(tone)
    )
}

pub fn quiz_prompt(language: Language, count: usize, exclude: &[String]) -> String {
    let mut prompt = format!(
        "Generate a challenging multiple-choice quiz based on the document in {}.\n\
         Create exactly {} unique questions.\n\
         Each question must have 4 options and one clear correct answer.\n",
        language.name(),
        count
    );
    if !exclude.is_empty() {
        let joined: String = exclude.join("; ").chars().take(EXCLUDE_LIMIT).collect();
        prompt.push_str(&format!("Do NOT repeat these questions: {}...", joined));
    }
    prompt
}

pub fn content_prompt(topic: &str, content_type: ContentType, language: Language) -> String {
    let target = match language {
        Language::Ar => "Arabic",
        Language::En => "Standard English",
    };
    format!(
        "Act as a world-class professional writer and subject matter expert.\n\n\
         Task: Write a {} about the following topic: \"{}\".\n\
         Target Language: {}.\n\n\
         Requirements:\n\
         1. Use professional formatting (headings, bullet points where appropriate).\n\
         2. Tone should be sophisticated, authoritative, and engaging.\n\
         3. If it is a Research Paper, include an abstract and hypothetical references.\n\
         4. If it is a Conversation, format it as a dialogue.\n\
         5. Ensure the content is extensive, well-structured, and uses high-quality vocabulary.\n\
         6. Do not include Markdown code blocks, just return the formatted text directly.",
        content_type.prompt_name(),
        topic.trim(),
        target
    )
}

pub fn summary_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {"type": "STRING", "description": "A concise title for the summary"},
            "sections": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "heading": {"type": "STRING", "description": "Section heading"},
                        "points": {
                            "type": "ARRAY",
                            "items": {"type": "STRING"},
                            "description": "Key points as bullet strings"
                        }
                    },
                    "required": ["heading", "points"]
                }
            }
        },
        "required": ["title", "sections"]
    })
}

pub fn quiz_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "questions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": {"type": "INTEGER"},
                        "text": {"type": "STRING", "description": "The question text"},
                        "options": {
                            "type": "ARRAY",
                            "items": {"type": "STRING"},
                            "description": "4 distinct options"
                        },
                        "correctOptionIndex": {
                            "type": "INTEGER",
                            "description": "Index of the correct option (0-3)"
                        },
                        "explanation": {
                            "type": "STRING",
                            "description": "Why the answer is correct"
                        }
                    },
                    "required": ["id", "text", "options", "correctOptionIndex", "explanation"]
                }
            }
        },
        "required": ["questions"]
    })
}
