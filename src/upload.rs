use base64::Engine;

use crate::error::StudyError;

pub const PDF: &str = "application/pdf";
pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TEXT: &str = "text/plain";

pub const ACCEPTED_MIME_TYPES: [&str; 3] = [PDF, DOCX, TEXT];

/// A document held in memory for the lifetime of the session, ready to be inlined into a request.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    /// Base64 payload.
    pub data: String,
}

impl UploadedFile {
    pub fn new(name: &str, mime_type: Option<&str>, bytes: &[u8]) -> Result<Self, StudyError> {
        let mime_type = resolve_mime_type(name, mime_type)?;
        Ok(Self {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        })
    }
}

/// Telegram clients are not consistent about document MIME types,
/// so a known extension is enough when the declared type is off.
pub fn resolve_mime_type(name: &str, mime_type: Option<&str>) -> Result<&'static str, StudyError> {
    let declared = mime_type.map(|m| m.trim().to_ascii_lowercase());
    if let Some(accepted) = declared
        .as_deref()
        .and_then(|m| ACCEPTED_MIME_TYPES.into_iter().find(|a| *a == m))
    {
        return Ok(accepted);
    }

    let lower = name.to_ascii_lowercase();
    let by_extension = match lower.rsplit_once('.') {
        Some((_, "pdf")) => Some(PDF),
        Some((_, "docx")) => Some(DOCX),
        Some((_, "txt")) => Some(TEXT),
        _ => None,
    };

    by_extension.ok_or_else(|| StudyError::UnsupportedFileType {
        name: name.to_string(),
        mime: mime_type.map(str::to_string),
    })
}

pub fn check_size(name: &str, size: u64, limit: u64) -> Result<(), StudyError> {
    if size > limit {
        return Err(StudyError::FileTooLarge {
            name: name.to_string(),
            size,
            limit,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_types_are_accepted() {
        assert_eq!(resolve_mime_type("notes", Some("application/pdf")).unwrap(), PDF);
        assert_eq!(resolve_mime_type("notes", Some(DOCX)).unwrap(), DOCX);
        assert_eq!(resolve_mime_type("notes", Some("Text/Plain")).unwrap(), TEXT);
    }

    #[test]
    fn extension_rescues_a_generic_type() {
        assert_eq!(
            resolve_mime_type("lecture.TXT", Some("application/octet-stream")).unwrap(),
            TEXT
        );
        assert_eq!(resolve_mime_type("lecture.docx", None).unwrap(), DOCX);
        assert_eq!(resolve_mime_type("lecture.pdf", Some("")).unwrap(), PDF);
    }

    #[test]
    fn everything_else_is_rejected() {
        for (name, mime) in [
            ("photo.png", Some("image/png")),
            ("slides.pptx", None),
            ("old.doc", Some("application/msword")),
            ("txt", None),
        ] {
            let err = resolve_mime_type(name, mime).unwrap_err();
            assert!(matches!(err, StudyError::UnsupportedFileType { .. }), "{name}");
        }
    }

    #[test]
    fn new_encodes_the_payload() {
        let file = UploadedFile::new("a.txt", None, b"hello").unwrap();
        assert_eq!(file.mime_type, TEXT);
        assert_eq!(file.data, "aGVsbG8=");
        assert_eq!(file.name, "a.txt");
    }

    #[test]
    fn unreadable_upload_explains_the_file_types() {
        let t = crate::i18n::Language::Ar.t();
        let err = UploadedFile::new("slides.pptx", Some("application/zip"), b"PK").unwrap_err();
        assert_eq!(err.user_message(t), t.file_error);
    }

    #[test]
    fn size_limit() {
        assert!(check_size("a.pdf", 10, 10).is_ok());
        assert!(matches!(
            check_size("a.pdf", 11, 10),
            Err(StudyError::FileTooLarge { size: 11, limit: 10, .. })
        ));
    }
}
