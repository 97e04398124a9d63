//! The client session: auth operations and current-user state.

use crate::error::Result;
use crate::profile::ProfileStore;
use crate::state::CurrentUser;
use gatherly_admin::AdminProvisioner;
use gatherly_platform::{
    Account, Accounts, Collections, FileBuckets, OAuthProvider, PlatformConfig, Session, Token,
    unique_id,
};

/// Client-facing handle on the backing platform.
///
/// Generic over the platform services and the profile store so flows run
/// against [`gatherly_platform::RestBackend`] in production and the
/// in-memory backend in tests. The provisioner carries its own (privileged)
/// collections handle: creating sub-collections needs the server API key,
/// while the session's own handles act with the user's credentials.
pub struct ClientSession<A, C, F, P, AC>
where
    A: Accounts,
    C: Collections,
    F: FileBuckets,
    P: ProfileStore,
    AC: Collections,
{
    pub(crate) config: PlatformConfig,
    pub(crate) accounts: A,
    pub(crate) collections: C,
    pub(crate) files: F,
    pub(crate) profiles: P,
    pub(crate) provisioner: AdminProvisioner<AC>,
    pub(crate) current_user: Option<CurrentUser>,
}

impl<A, C, F, P, AC> ClientSession<A, C, F, P, AC>
where
    A: Accounts,
    C: Collections,
    F: FileBuckets,
    P: ProfileStore,
    AC: Collections,
{
    /// Create a session over the given service handles.
    #[must_use]
    pub const fn new(
        config: PlatformConfig,
        accounts: A,
        collections: C,
        files: F,
        profiles: P,
        provisioner: AdminProvisioner<AC>,
    ) -> Self {
        Self {
            config,
            accounts,
            collections,
            files,
            profiles,
            provisioner,
            current_user: None,
        }
    }

    /// The in-memory current-user snapshot, if one has been fetched.
    #[must_use]
    pub const fn current_user(&self) -> Option<&CurrentUser> {
        self.current_user.as_ref()
    }

    /// The platform configuration this session was built with.
    #[must_use]
    pub const fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// Hosted Google login URL.
    ///
    /// The browser is sent here; on success the platform redirects to the
    /// app's landing page, on failure back to the login page.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backend has no endpoint configured.
    pub fn google_login(&self) -> Result<String> {
        let url = self.accounts.oauth2_session_url(
            OAuthProvider::Google,
            &format!("{}/landing", self.config.app_url),
            &format!("{}/login", self.config.app_url),
        )?;
        Ok(url)
    }

    /// Hosted GitHub login URL.
    ///
    /// Success and failure land on the dedicated login result pages.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backend has no endpoint configured.
    pub fn github_login(&self) -> Result<String> {
        let url = self.accounts.oauth2_session_url(
            OAuthProvider::Github,
            &format!("{}/login/success", self.config.app_url),
            &format!("{}/login/failure", self.config.app_url),
        )?;
        Ok(url)
    }

    /// Create an account with email/password credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform rejects the signup (duplicate
    /// email, weak password) or the request fails.
    pub async fn email_sign_up(&self, name: &str, email: &str, password: &str) -> Result<Account> {
        let account = self
            .accounts
            .create_account(&unique_id(), email, password, name)
            .await?;
        tracing::info!(user_id = %account.id, "account created");
        Ok(account)
    }

    /// Sign in with email/password credentials.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Platform(PlatformError::Unauthorized)` on bad
    /// credentials.
    pub async fn email_login(&self, email: &str, password: &str) -> Result<Session> {
        let session = self.accounts.create_email_session(email, password).await?;
        tracing::info!(session_id = %session.id, "email session created");
        Ok(session)
    }

    /// Send a magic-link login email.
    ///
    /// The platform mails the link; the returned [`Token`] is a receipt.
    /// The link lands on the app's login success page.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be minted.
    pub async fn magic_url_login(&self, email: &str) -> Result<Token> {
        let token = self
            .accounts
            .create_magic_url_token(
                &unique_id(),
                email,
                &format!("{}/login/success", self.config.app_url),
            )
            .await?;
        tracing::info!(user_id = %token.user_id, "magic-url token minted");
        Ok(token)
    }

    /// Fetch the authenticated account and refresh session state.
    ///
    /// The snapshot is held in memory and mirrored into the profile store;
    /// both copies carry the same identity data.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Platform(PlatformError::Unauthorized)` when no
    /// session is active, or a profile-store error if the mirror cannot be
    /// written.
    pub async fn fetch_current_user(&mut self) -> Result<CurrentUser> {
        let account = self.accounts.get_account().await?;
        let user = CurrentUser::from_account(&account);
        self.profiles.save(&user)?;
        self.current_user = Some(user.clone());
        tracing::debug!(user_id = %user.user_id, "current user refreshed");
        Ok(user)
    }

    /// Sign out: delete the session and invalidate local state.
    ///
    /// Both the in-memory snapshot and the persisted mirror are cleared,
    /// so a subsequent event creation cannot attribute to a stale user.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform call or the mirror cleanup fails;
    /// the in-memory snapshot is cleared in either case.
    pub async fn sign_out(&mut self, session_id: &str) -> Result<()> {
        let deleted = self.accounts.delete_session(session_id).await;
        self.current_user = None;
        let cleared = self.profiles.clear();
        deleted?;
        cleared?;
        tracing::info!(session_id, "signed out; session state invalidated");
        Ok(())
    }

    /// Creator id for writes: the in-memory user, falling back to the
    /// persisted mirror.
    pub(crate) fn creator_id(&self) -> Option<String> {
        if let Some(user) = &self.current_user {
            return Some(user.user_id.clone());
        }
        match self.profiles.load() {
            Ok(Some(user)) => Some(user.user_id),
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(%error, "profile store read failed");
                None
            }
        }
    }
}
