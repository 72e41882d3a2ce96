//! Recording collaborator doubles for integration tests.
//!
//! Unlike the `Fixture*` adapters, these keep state: accounts signed up,
//! objects stored and catalog rows inserted, so a test can drive the HTTP
//! surface end to end and then inspect what reached each collaborator.
//! Compiled only with the `test-support` feature.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::domain::ports::{
    IdentityProvider, IdentityProviderError, NoteRepository, NoteRepositoryError, ObjectStorage,
    ObjectStorageError, OcrEngine, OcrEngineError,
};
use crate::domain::{
    IdentityUser, LoginCredentials, NewNote, Note, NoteFilter, ObjectName, Registration,
    SignupVerification,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Message returned for unknown credentials, matching the hosted provider.
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid login credentials";
/// Message returned for a wrong verification code.
pub const INVALID_CODE_MESSAGE: &str = "Token has expired or is invalid";

/// Account captured by [`RecordingIdentityProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRecord {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Default)]
struct IdentityState {
    sign_ups: Vec<SignUpRecord>,
    passwords: BTreeMap<String, String>,
    verified: Vec<String>,
    sign_up_failure: Option<String>,
    expected_code: Option<String>,
}

/// Identity provider that keeps accounts in memory.
///
/// Signed-up accounts can log in immediately with the same password.
#[derive(Debug, Default)]
pub struct RecordingIdentityProvider {
    state: Mutex<IdentityState>,
}

impl RecordingIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent sign-up fail with `message`.
    pub fn reject_sign_ups(&self, message: impl Into<String>) {
        lock(&self.state).sign_up_failure = Some(message.into());
    }

    /// Accept only `code` during verification.
    pub fn expect_code(&self, code: impl Into<String>) {
        lock(&self.state).expected_code = Some(code.into());
    }

    pub fn sign_ups(&self) -> Vec<SignUpRecord> {
        lock(&self.state).sign_ups.clone()
    }

    pub fn verified_emails(&self) -> Vec<String> {
        lock(&self.state).verified.clone()
    }
}

#[async_trait]
impl IdentityProvider for RecordingIdentityProvider {
    async fn sign_up(&self, registration: &Registration) -> Result<(), IdentityProviderError> {
        let mut state = lock(&self.state);
        if let Some(message) = &state.sign_up_failure {
            return Err(IdentityProviderError::rejected(message.clone()));
        }
        let email = registration.email().as_ref().to_owned();
        state.sign_ups.push(SignUpRecord {
            name: registration.name().to_owned(),
            email: email.clone(),
        });
        state
            .passwords
            .insert(email, registration.password().to_owned());
        Ok(())
    }

    async fn sign_in_with_password(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<IdentityUser, IdentityProviderError> {
        let state = lock(&self.state);
        let known = state
            .passwords
            .get(credentials.email())
            .is_some_and(|password| password == credentials.password());
        if !known {
            return Err(IdentityProviderError::rejected(INVALID_LOGIN_MESSAGE));
        }
        let name = state
            .sign_ups
            .iter()
            .find(|record| record.email == credentials.email())
            .map(|record| record.name.clone())
            .unwrap_or_default();
        Ok(IdentityUser {
            id: format!("user-{}", credentials.email()),
            email: credentials.email().to_owned(),
            user_metadata: json!({ "name": name }),
            email_confirmed_at: None,
            created_at: None,
        })
    }

    async fn verify_signup_code(
        &self,
        verification: &SignupVerification,
    ) -> Result<(), IdentityProviderError> {
        let mut state = lock(&self.state);
        let accepted = state
            .expected_code
            .as_deref()
            .is_none_or(|code| code == verification.code.expose());
        if !accepted {
            return Err(IdentityProviderError::rejected(INVALID_CODE_MESSAGE));
        }
        state.verified.push(verification.email.clone());
        Ok(())
    }
}

/// Object captured by [`RecordingObjectStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Storage that keeps uploaded objects in memory.
#[derive(Debug)]
pub struct RecordingObjectStorage {
    base_url: String,
    objects: Mutex<BTreeMap<String, StoredObject>>,
    failure: Mutex<Option<String>>,
}

impl Default for RecordingObjectStorage {
    fn default() -> Self {
        Self::new("https://storage.test/public/notes")
    }
}

impl RecordingObjectStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: Mutex::new(BTreeMap::new()),
            failure: Mutex::new(None),
        }
    }

    /// Make every subsequent upload fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *lock(&self.failure) = Some(message.into());
    }

    pub fn objects(&self) -> BTreeMap<String, StoredObject> {
        lock(&self.objects).clone()
    }
}

#[async_trait]
impl ObjectStorage for RecordingObjectStorage {
    async fn upload(
        &self,
        name: &ObjectName,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<(), ObjectStorageError> {
        if let Some(message) = lock(&self.failure).clone() {
            return Err(ObjectStorageError::rejected(message));
        }
        let mut objects = lock(&self.objects);
        if objects.contains_key(name.as_ref()) {
            return Err(ObjectStorageError::rejected("The resource already exists"));
        }
        objects.insert(
            name.to_string(),
            StoredObject {
                content_type: content_type.to_owned(),
                bytes: bytes.to_vec(),
            },
        );
        Ok(())
    }

    fn public_url(&self, name: &ObjectName) -> String {
        format!("{}/{name}", self.base_url)
    }
}

/// OCR double returning a fixed result and counting calls.
#[derive(Debug)]
pub struct ScriptedOcrEngine {
    result: Result<String, OcrEngineError>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedOcrEngine {
    /// Recognise `text` in every image.
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            result: Ok(text.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail every recognition with `error`.
    pub fn failing(error: OcrEngineError) -> Self {
        Self {
            result: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Content types of the images passed in, in call order.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl OcrEngine for ScriptedOcrEngine {
    async fn recognize(&self, _image: &[u8], content_type: &str) -> Result<String, OcrEngineError> {
        lock(&self.calls).push(content_type.to_owned());
        self.result.clone()
    }
}

#[derive(Debug, Default)]
struct CatalogState {
    rows: Vec<Note>,
    next_id: i64,
    failure: Option<String>,
}

/// Catalog that keeps rows in memory and filters them with
/// [`NoteFilter::matches`].
#[derive(Debug, Default)]
pub struct InMemoryNoteRepository {
    state: Mutex<CatalogState>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        lock(&self.state).failure = Some(message.into());
    }

    /// Rows in insertion order.
    pub fn rows(&self) -> Vec<Note> {
        lock(&self.state).rows.clone()
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn insert(&self, note: &NewNote) -> Result<Note, NoteRepositoryError> {
        let mut state = lock(&self.state);
        if let Some(message) = &state.failure {
            return Err(NoteRepositoryError::rejected(message.clone()));
        }
        state.next_id += 1;
        let stored = Note::from_new(state.next_id, note.clone(), Utc::now());
        state.rows.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self, filter: &NoteFilter) -> Result<Vec<Note>, NoteRepositoryError> {
        let state = lock(&self.state);
        if let Some(message) = &state.failure {
            return Err(NoteRepositoryError::rejected(message.clone()));
        }
        let mut rows: Vec<Note> = state
            .rows
            .iter()
            .filter(|note| filter.matches(note))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(rows)
    }
}
