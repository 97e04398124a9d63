//! In-memory platform backend.

use chrono::Utc;
use gatherly_platform::{
    Account, Accounts, Collection, Collections, Document, FileBuckets, OAuthProvider, Permission,
    PlatformError, Result, Session, StoredFile, Token, unique_id, urls,
};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

/// Operations a scripted failure can be armed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOp {
    /// Fail the next file upload.
    CreateFile,
    /// Fail the next file deletion.
    DeleteFile,
    /// Fail the next collection creation.
    CreateCollection,
    /// Fail the next attribute definition.
    CreateAttribute,
    /// Fail the next document write.
    CreateDocument,
    /// Fail the next document deletion.
    DeleteDocument,
}

/// An attribute definition recorded by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    /// Attribute key.
    pub key: String,
    /// Maximum string size.
    pub size: u32,
    /// Whether the attribute is required.
    pub required: bool,
    /// Default value, if any.
    pub default: Option<String>,
}

/// A provisioned collection together with its recorded schema.
#[derive(Debug, Clone)]
pub struct CollectionRecord {
    /// The collection resource as the platform would return it.
    pub collection: Collection,
    /// Attributes defined so far, in definition order.
    pub attributes: Vec<AttributeSpec>,
}

struct StoredAccount {
    account: Account,
    password: String,
}

struct ArmedFailure {
    op: FailOp,
    skip: u32,
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, StoredAccount>,
    emails: HashMap<String, String>,
    sessions: HashMap<String, Session>,
    collections: HashMap<String, CollectionRecord>,
    documents: HashMap<String, BTreeMap<String, Document>>,
    files: HashMap<(String, String), StoredFile>,
    active_user: Option<String>,
    failures: Vec<ArmedFailure>,
}

/// In-memory implementation of the platform service traits.
///
/// Clones share state, so a client-scoped handle and an admin-scoped handle
/// in a test observe the same platform, the way two REST backends against
/// one deployment would.
#[derive(Clone)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
    endpoint: String,
    project_id: String,
}

impl MemoryBackend {
    /// Endpoint baked into URLs derived by the mock.
    pub const ENDPOINT: &'static str = "http://platform.test/v1";

    /// Project id baked into URLs derived by the mock.
    pub const PROJECT_ID: &'static str = "test-project";

    /// Create an empty in-memory platform.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            endpoint: Self::ENDPOINT.to_string(),
            project_id: Self::PROJECT_ID.to_string(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| PlatformError::Internal("state lock poisoned".to_string()))
    }

    fn take_failure(state: &mut State, op: FailOp) -> Result<()> {
        if let Some(index) = state.failures.iter().position(|armed| armed.op == op) {
            if state.failures[index].skip == 0 {
                state.failures.remove(index);
                return Err(PlatformError::Api {
                    status: 503,
                    message: format!("injected failure for {op:?}"),
                });
            }
            state.failures[index].skip -= 1;
        }
        Ok(())
    }

    /// Arm a one-shot failure for the next matching operation.
    pub fn fail_next(&self, op: FailOp) {
        self.fail_after(op, 0);
    }

    /// Arm a one-shot failure that lets `skip` matching operations pass
    /// first.
    ///
    /// `fail_after(op, 1)` fails the *second* occurrence of `op`.
    pub fn fail_after(&self, op: FailOp, skip: u32) {
        if let Ok(mut state) = self.lock() {
            state.failures.push(ArmedFailure { op, skip });
        }
    }

    /// Register an account and mark it as the active (signed-in) identity.
    ///
    /// Shortcut for tests that need `get_account` to succeed without
    /// running a full credential flow.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing lock is poisoned.
    pub fn force_login(&self, account: Account) -> Result<()> {
        let mut state = self.lock()?;
        state.emails.insert(account.email.clone(), account.id.clone());
        state.active_user = Some(account.id.clone());
        state.accounts.insert(
            account.id.clone(),
            StoredAccount {
                account,
                password: String::new(),
            },
        );
        Ok(())
    }

    /// The provisioned collection under `collection_id`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing lock is poisoned.
    pub fn collection(&self, collection_id: &str) -> Result<Option<CollectionRecord>> {
        Ok(self.lock()?.collections.get(collection_id).cloned())
    }

    /// All documents currently stored in `collection_id`, in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing lock is poisoned.
    pub fn documents_in(&self, collection_id: &str) -> Result<Vec<Document>> {
        Ok(self
            .lock()?
            .documents
            .get(collection_id)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    /// Number of documents stored in `collection_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing lock is poisoned.
    pub fn document_count(&self, collection_id: &str) -> Result<usize> {
        Ok(self
            .lock()?
            .documents
            .get(collection_id)
            .map_or(0, BTreeMap::len))
    }

    /// Number of files stored across all buckets.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing lock is poisoned.
    pub fn file_count(&self) -> Result<usize> {
        Ok(self.lock()?.files.len())
    }

    /// Number of collections provisioned through this backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing lock is poisoned.
    pub fn collection_count(&self) -> Result<usize> {
        Ok(self.lock()?.collections.len())
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Accounts for MemoryBackend {
    fn create_account(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> impl Future<Output = Result<Account>> + Send {
        let this = self.clone();
        let (user_id, email, password, name) = (
            user_id.to_string(),
            email.to_string(),
            password.to_string(),
            name.to_string(),
        );

        async move {
            let mut state = this.lock()?;
            if state.accounts.contains_key(&user_id) || state.emails.contains_key(&email) {
                return Err(PlatformError::Conflict {
                    message: "account already exists".to_string(),
                });
            }

            let account = Account {
                id: user_id.clone(),
                name,
                email: email.clone(),
                email_verification: false,
                registration: Some(Utc::now()),
            };
            state.emails.insert(email, user_id.clone());
            state.accounts.insert(
                user_id,
                StoredAccount {
                    account: account.clone(),
                    password,
                },
            );
            Ok(account)
        }
    }

    fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session>> + Send {
        let this = self.clone();
        let (email, password) = (email.to_string(), password.to_string());

        async move {
            let mut state = this.lock()?;
            let user_id = state
                .emails
                .get(&email)
                .cloned()
                .ok_or(PlatformError::Unauthorized)?;
            let stored = state
                .accounts
                .get(&user_id)
                .ok_or(PlatformError::Unauthorized)?;
            if stored.password != password {
                return Err(PlatformError::Unauthorized);
            }

            let session = Session {
                id: unique_id(),
                user_id: user_id.clone(),
                provider: "email".to_string(),
                expires_at: None,
            };
            state.active_user = Some(user_id);
            state.sessions.insert(session.id.clone(), session.clone());
            Ok(session)
        }
    }

    fn create_magic_url_token(
        &self,
        user_id: &str,
        email: &str,
        _redirect_url: &str,
    ) -> impl Future<Output = Result<Token>> + Send {
        let this = self.clone();
        let (user_id, email) = (user_id.to_string(), email.to_string());

        async move {
            let mut state = this.lock()?;
            // An existing account wins over the caller-supplied fresh id.
            let existing = state.emails.get(&email).cloned();
            let token_user = match existing {
                Some(found) => found,
                None => {
                    let account = Account {
                        id: user_id.clone(),
                        name: String::new(),
                        email: email.clone(),
                        email_verification: false,
                        registration: Some(Utc::now()),
                    };
                    state.emails.insert(email.clone(), user_id.clone());
                    state.accounts.insert(
                        user_id.clone(),
                        StoredAccount {
                            account,
                            password: String::new(),
                        },
                    );
                    user_id.clone()
                }
            };

            Ok(Token {
                id: unique_id(),
                user_id: token_user,
                expires_at: None,
            })
        }
    }

    fn oauth2_session_url(
        &self,
        provider: OAuthProvider,
        success_url: &str,
        failure_url: &str,
    ) -> Result<String> {
        Ok(urls::oauth2_session_url(
            &self.endpoint,
            &self.project_id,
            provider,
            success_url,
            failure_url,
        ))
    }

    fn get_account(&self) -> impl Future<Output = Result<Account>> + Send {
        let this = self.clone();

        async move {
            let state = this.lock()?;
            let user_id = state
                .active_user
                .clone()
                .ok_or(PlatformError::Unauthorized)?;
            state
                .accounts
                .get(&user_id)
                .map(|stored| stored.account.clone())
                .ok_or(PlatformError::Unauthorized)
        }
    }

    fn delete_session(&self, session_id: &str) -> impl Future<Output = Result<()>> + Send {
        let this = self.clone();
        let session_id = session_id.to_string();

        async move {
            let mut state = this.lock()?;
            let session = state
                .sessions
                .remove(&session_id)
                .ok_or(PlatformError::NotFound {
                    message: format!("session {session_id} not found"),
                })?;
            if state.active_user.as_deref() == Some(session.user_id.as_str()) {
                state.active_user = None;
            }
            Ok(())
        }
    }
}

impl Collections for MemoryBackend {
    fn create_collection(
        &self,
        collection_id: &str,
        name: &str,
        permissions: &[Permission],
    ) -> impl Future<Output = Result<Collection>> + Send {
        let this = self.clone();
        let (collection_id, name) = (collection_id.to_string(), name.to_string());
        let permissions: Vec<String> = permissions.iter().map(ToString::to_string).collect();

        async move {
            let mut state = this.lock()?;
            Self::take_failure(&mut state, FailOp::CreateCollection)?;

            if state.collections.contains_key(&collection_id) {
                return Err(PlatformError::Conflict {
                    message: format!("collection {collection_id} already exists"),
                });
            }

            let collection = Collection {
                id: collection_id.clone(),
                name,
                permissions,
            };
            state.collections.insert(
                collection_id.clone(),
                CollectionRecord {
                    collection: collection.clone(),
                    attributes: Vec::new(),
                },
            );
            state.documents.entry(collection_id).or_default();
            Ok(collection)
        }
    }

    fn create_string_attribute(
        &self,
        collection_id: &str,
        key: &str,
        size: u32,
        required: bool,
        default: Option<&str>,
    ) -> impl Future<Output = Result<()>> + Send {
        let this = self.clone();
        let (collection_id, key) = (collection_id.to_string(), key.to_string());
        let default = default.map(ToString::to_string);

        async move {
            let mut state = this.lock()?;
            Self::take_failure(&mut state, FailOp::CreateAttribute)?;

            let record =
                state
                    .collections
                    .get_mut(&collection_id)
                    .ok_or(PlatformError::NotFound {
                        message: format!("collection {collection_id} not found"),
                    })?;
            record.attributes.push(AttributeSpec {
                key,
                size,
                required,
                default,
            });
            Ok(())
        }
    }

    fn create_document(
        &self,
        collection_id: &str,
        document_id: &str,
        data: serde_json::Value,
    ) -> impl Future<Output = Result<Document>> + Send {
        let this = self.clone();
        let (collection_id, document_id) = (collection_id.to_string(), document_id.to_string());

        async move {
            let mut state = this.lock()?;
            Self::take_failure(&mut state, FailOp::CreateDocument)?;

            // Application collections (e.g. the events collection) exist in
            // the deployment without having been provisioned through this
            // backend, so a missing entry is created rather than rejected.
            let docs = state.documents.entry(collection_id.clone()).or_default();
            if docs.contains_key(&document_id) {
                return Err(PlatformError::Conflict {
                    message: format!("document {document_id} already exists"),
                });
            }

            let document = Document {
                id: document_id.clone(),
                collection_id,
                data,
            };
            docs.insert(document_id, document.clone());
            Ok(document)
        }
    }

    fn delete_document(
        &self,
        collection_id: &str,
        document_id: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        let this = self.clone();
        let (collection_id, document_id) = (collection_id.to_string(), document_id.to_string());

        async move {
            let mut state = this.lock()?;
            Self::take_failure(&mut state, FailOp::DeleteDocument)?;

            state
                .documents
                .get_mut(&collection_id)
                .and_then(|docs| docs.remove(&document_id))
                .map(|_| ())
                .ok_or(PlatformError::NotFound {
                    message: format!("document {document_id} not found"),
                })
        }
    }
}

impl FileBuckets for MemoryBackend {
    fn create_file(
        &self,
        bucket_id: &str,
        file_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<StoredFile>> + Send {
        let this = self.clone();
        let (bucket_id, file_id, file_name) = (
            bucket_id.to_string(),
            file_id.to_string(),
            file_name.to_string(),
        );

        async move {
            let mut state = this.lock()?;
            Self::take_failure(&mut state, FailOp::CreateFile)?;

            let storage_key = (bucket_id.clone(), file_id.clone());
            if state.files.contains_key(&storage_key) {
                return Err(PlatformError::Conflict {
                    message: format!("file {file_id} already exists"),
                });
            }

            let stored = StoredFile {
                id: file_id,
                bucket_id,
                name: file_name,
                size: bytes.len() as u64,
                mime_type: "application/octet-stream".to_string(),
            };
            state.files.insert(storage_key, stored.clone());
            Ok(stored)
        }
    }

    fn delete_file(&self, bucket_id: &str, file_id: &str) -> impl Future<Output = Result<()>> + Send {
        let this = self.clone();
        let storage_key = (bucket_id.to_string(), file_id.to_string());

        async move {
            let mut state = this.lock()?;
            Self::take_failure(&mut state, FailOp::DeleteFile)?;

            state
                .files
                .remove(&storage_key)
                .map(|_| ())
                .ok_or(PlatformError::NotFound {
                    message: format!("file {} not found", storage_key.1),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatherly_platform::Role;
    use serde_json::json;

    #[tokio::test]
    async fn email_flow_round_trips_through_account_state() {
        let backend = MemoryBackend::new();
        backend
            .create_account("u1", "ada@example.com", "pw", "Ada")
            .await
            .unwrap_or_else(|e| panic!("create_account: {e}"));

        assert!(
            backend
                .create_email_session("ada@example.com", "wrong")
                .await
                .is_err()
        );

        let session = backend
            .create_email_session("ada@example.com", "pw")
            .await
            .unwrap_or_else(|e| panic!("create_email_session: {e}"));
        assert_eq!(session.user_id, "u1");

        let account = backend
            .get_account()
            .await
            .unwrap_or_else(|e| panic!("get_account: {e}"));
        assert_eq!(account.email, "ada@example.com");

        backend
            .delete_session(&session.id)
            .await
            .unwrap_or_else(|e| panic!("delete_session: {e}"));
        assert!(backend.get_account().await.is_err());
    }

    #[tokio::test]
    async fn collections_record_permissions_and_attributes() {
        let backend = MemoryBackend::new();
        backend
            .create_collection("c1", "Test", &[Permission::read(Role::any())])
            .await
            .unwrap_or_else(|e| panic!("create_collection: {e}"));
        backend
            .create_string_attribute("c1", "name", 50, false, None)
            .await
            .unwrap_or_else(|e| panic!("create_string_attribute: {e}"));

        let record = backend
            .collection("c1")
            .unwrap_or_else(|e| panic!("collection: {e}"))
            .unwrap_or_else(|| panic!("collection c1 missing"));
        assert_eq!(record.collection.permissions, vec![r#"read("any")"#]);
        assert_eq!(record.attributes.len(), 1);
        assert_eq!(record.attributes[0].key, "name");
    }

    #[tokio::test]
    async fn armed_failures_fire_once() {
        let backend = MemoryBackend::new();
        backend.fail_next(FailOp::CreateDocument);

        assert!(
            backend
                .create_document("events", "d1", json!({}))
                .await
                .is_err()
        );
        assert!(
            backend
                .create_document("events", "d1", json!({}))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn fail_after_skips_the_given_number_of_calls() {
        let backend = MemoryBackend::new();
        backend.fail_after(FailOp::CreateDocument, 1);

        assert!(
            backend
                .create_document("events", "d1", json!({}))
                .await
                .is_ok()
        );
        assert!(
            backend
                .create_document("events", "d2", json!({}))
                .await
                .is_err()
        );
        assert!(
            backend
                .create_document("events", "d2", json!({}))
                .await
                .is_ok()
        );
    }
}
