//! Domain primitives, services and ports.
//!
//! Purpose: Define the strongly typed values that flow between the HTTP layer
//! and the collaborators, and the services that orchestrate them. Nothing in
//! this module knows about actix, reqwest or the OCR binary.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - InstitutionalEmail, Registration, LoginCredentials, VerificationCode:
//!   validated account inputs.
//! - Note, NewNote, NoteFilter, ObjectName, UploadedFile: catalog values.
//! - AccountService, NoteService: driving port implementations.

pub mod account_service;
pub mod auth;
pub mod email;
pub mod error;
pub mod note;
pub mod note_service;
pub mod ports;
pub mod trace_id;

pub use self::account_service::{
    AccountService, INVALID_CREDENTIALS_MESSAGE, INVALID_VERIFICATION_CODE_MESSAGE,
};
pub use self::auth::{
    IdentityUser, LoginCredentials, LoginValidationError, Registration, SignupVerification,
    VERIFICATION_CODE_LEN, VerificationCode, VerificationCodeError,
};
pub use self::email::{ALLOWED_EMAIL_DOMAINS, EmailValidationError, InstitutionalEmail};
pub use self::error::{Error, ErrorCode, ErrorValidationError, UNSPECIFIED_SERVICE_MESSAGE};
pub use self::note::{
    DEFAULT_CONTENT_TYPE, DIAGNOSTIC_FILE_URL, NewNote, Note, NoteFilter, NoteMetadata,
    OCR_CONTENT_TYPES, ObjectName, UploadedFile,
};
pub use self::note_service::NoteService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
