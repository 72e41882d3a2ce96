//! Note catalog entities, uploads and list filters.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Content type stored when an upload part does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Content types that are handed to the OCR engine.
pub const OCR_CONTENT_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Free-text metadata submitted alongside an uploaded file.
///
/// Absent fields are stored as `null` in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteMetadata {
    /// Short headline shown in listings.
    pub title: Option<String>,
    /// Free-form summary of the note.
    pub description: Option<String>,
    /// Course subject, for example `Calculus`.
    pub subject: Option<String>,
    /// Uploader's email address, stored as `uploaded_by`.
    pub uploaded_by: Option<String>,
    /// Term label, for example `Fall 2024`.
    pub semester: Option<String>,
    /// Course code, for example `MATH 201`.
    pub class_code: Option<String>,
    /// Instructor name.
    pub professor: Option<String>,
    /// Owning department.
    pub department: Option<String>,
}

/// A file received from a client, held in memory for the upload pipeline.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    original_name: Option<String>,
    content_type: String,
    bytes: Vec<u8>,
}

impl UploadedFile {
    /// Wrap upload bytes. A missing content type falls back to
    /// [`DEFAULT_CONTENT_TYPE`].
    pub fn new(
        original_name: Option<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            original_name,
            content_type: content_type.unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_owned()),
            bytes,
        }
    }

    /// File name reported by the client, if any.
    pub fn original_name(&self) -> Option<&str> {
        self.original_name.as_deref()
    }

    /// Declared MIME type.
    pub fn content_type(&self) -> &str {
        self.content_type.as_str()
    }

    /// Raw file contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether the file should be sent for text recognition.
    pub fn is_ocr_eligible(&self) -> bool {
        OCR_CONTENT_TYPES.contains(&self.content_type.as_str())
    }
}

impl std::fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedFile")
            .field("original_name", &self.original_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Storage key for an uploaded file: a random UUID plus the original
/// extension.
///
/// ## Invariants
/// - The extension, when present, is ASCII alphanumeric. Any other suffix is
///   dropped and the name is the bare UUID.
///
/// # Examples
/// ```
/// use backend::domain::ObjectName;
///
/// let name = ObjectName::generate(Some("lecture 3.PNG"));
/// assert!(name.as_ref().ends_with(".PNG"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectName(String);

impl ObjectName {
    /// Generate a fresh name for a file originally called `original_name`.
    pub fn generate(original_name: Option<&str>) -> Self {
        Self::with_id(Uuid::new_v4(), original_name)
    }

    fn with_id(id: Uuid, original_name: Option<&str>) -> Self {
        let extension = original_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.bytes().all(|b| b.is_ascii_alphanumeric()));
        match extension {
            Some(ext) => Self(format!("{id}.{ext}")),
            None => Self(id.to_string()),
        }
    }
}

impl AsRef<str> for ObjectName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for ObjectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Catalog row awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    /// See [`NoteMetadata::title`].
    pub title: Option<String>,
    /// See [`NoteMetadata::description`].
    pub description: Option<String>,
    /// See [`NoteMetadata::subject`].
    pub subject: Option<String>,
    /// Public URL of the stored object.
    pub file_url: String,
    /// See [`NoteMetadata::uploaded_by`].
    pub uploaded_by: Option<String>,
    /// See [`NoteMetadata::semester`].
    pub semester: Option<String>,
    /// See [`NoteMetadata::class_code`].
    pub class_code: Option<String>,
    /// See [`NoteMetadata::professor`].
    pub professor: Option<String>,
    /// See [`NoteMetadata::department`].
    pub department: Option<String>,
    /// Recognised text, empty when OCR was skipped or failed.
    pub ocr_text: String,
}

/// Hosted PDF referenced by the connectivity probe row.
pub const DIAGNOSTIC_FILE_URL: &str = "https://www.see.leeds.ac.uk/geo-maths/basic_maths.pdf";

impl NewNote {
    /// Combine upload metadata with the stored file's URL and OCR output.
    pub fn from_upload(metadata: NoteMetadata, file_url: String, ocr_text: String) -> Self {
        let NoteMetadata {
            title,
            description,
            subject,
            uploaded_by,
            semester,
            class_code,
            professor,
            department,
        } = metadata;
        Self {
            title,
            description,
            subject,
            file_url,
            uploaded_by,
            semester,
            class_code,
            professor,
            department,
            ocr_text,
        }
    }

    /// Fixed row written by the catalog connectivity probe.
    pub fn diagnostic() -> Self {
        Self::from_upload(
            NoteMetadata {
                title: Some("Test Note".to_owned()),
                description: Some("Testing database access".to_owned()),
                subject: Some("Debug".to_owned()),
                uploaded_by: Some("test@spelman.edu".to_owned()),
                ..NoteMetadata::default()
            },
            DIAGNOSTIC_FILE_URL.to_owned(),
            String::new(),
        )
    }
}

/// A stored catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub file_url: String,
    #[serde(default)]
    pub uploaded_by: Option<String>,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub class_code: Option<String>,
    #[serde(default)]
    pub professor: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub ocr_text: String,
    pub timestamp: DateTime<Utc>,
}

impl Note {
    /// Materialise a catalog row from an insert request.
    pub fn from_new(id: i64, note: NewNote, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            title: note.title,
            description: note.description,
            subject: note.subject,
            file_url: note.file_url,
            uploaded_by: note.uploaded_by,
            semester: note.semester,
            class_code: note.class_code,
            professor: note.professor,
            department: note.department,
            ocr_text: note.ocr_text,
            timestamp,
        }
    }
}

/// Optional predicates applied when listing notes.
///
/// `semester` and `department` match exactly. `professor` and `class_code`
/// match as case-insensitive substrings. Blank values are dropped on
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    semester: Option<String>,
    department: Option<String>,
    professor: Option<String>,
    class_code: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

impl NoteFilter {
    /// Build a filter, discarding blank values.
    pub fn new(
        semester: Option<String>,
        department: Option<String>,
        professor: Option<String>,
        class_code: Option<String>,
    ) -> Self {
        Self {
            semester: non_blank(semester),
            department: non_blank(department),
            professor: non_blank(professor),
            class_code: non_blank(class_code),
        }
    }

    /// Exact-match semester filter.
    pub fn semester(&self) -> Option<&str> {
        self.semester.as_deref()
    }

    /// Exact-match department filter.
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    /// Case-insensitive substring filter on the professor.
    pub fn professor(&self) -> Option<&str> {
        self.professor.as_deref()
    }

    /// Case-insensitive substring filter on the class code.
    pub fn class_code(&self) -> Option<&str> {
        self.class_code.as_deref()
    }

    /// Whether the filter constrains nothing.
    pub fn is_empty(&self) -> bool {
        self.semester.is_none()
            && self.department.is_none()
            && self.professor.is_none()
            && self.class_code.is_none()
    }

    /// Evaluate the filter against a note in memory.
    ///
    /// Adapters that query a remote catalog translate the filter instead;
    /// this is the reference behaviour they must agree with.
    pub fn matches(&self, note: &Note) -> bool {
        let exact = |want: Option<&str>, have: Option<&str>| want.is_none_or(|w| have == Some(w));
        exact(self.semester(), note.semester.as_deref())
            && exact(self.department(), note.department.as_deref())
            && self
                .professor()
                .is_none_or(|p| contains_ignore_case(note.professor.as_deref(), p))
            && self
                .class_code()
                .is_none_or(|c| contains_ignore_case(note.class_code.as_deref(), c))
    }
}
