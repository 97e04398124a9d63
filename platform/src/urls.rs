//! Derived URL formats.
//!
//! Stored links must keep matching the platform's viewer and hosted-login
//! endpoints, so the templates live here as pure functions instead of being
//! concatenated inline at call sites.

use crate::services::OAuthProvider;

/// Public viewer URL for a stored file.
///
/// This is the exact template the platform's viewer endpoint expects;
/// documents persist the result, so the format must not drift.
///
/// # Examples
///
/// ```
/// use gatherly_platform::file_view_url;
///
/// assert_eq!(
///     file_view_url("https://cloud.example.com/v1", "banners", "f123", "proj1"),
///     "https://cloud.example.com/v1/storage/buckets/banners/files/f123/view?project=proj1&mode=admin"
/// );
/// ```
#[must_use]
pub fn file_view_url(endpoint: &str, bucket_id: &str, file_id: &str, project_id: &str) -> String {
    format!("{endpoint}/storage/buckets/{bucket_id}/files/{file_id}/view?project={project_id}&mode=admin")
}

/// Hosted OAuth2 login URL.
///
/// The browser is redirected here; the platform completes the provider
/// handshake and lands on `success_url` or `failure_url`. Both targets are
/// query-encoded since they are full URLs themselves.
#[must_use]
pub fn oauth2_session_url(
    endpoint: &str,
    project_id: &str,
    provider: OAuthProvider,
    success_url: &str,
    failure_url: &str,
) -> String {
    format!(
        "{endpoint}/account/sessions/oauth2/{provider}?project={project_id}&success={success}&failure={failure}",
        provider = provider.slug(),
        success = urlencoding::encode(success_url),
        failure = urlencoding::encode(failure_url),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_url_matches_platform_template() {
        let url = file_view_url("https://cloud.example.com/v1", "bucket9", "file7", "projX");
        assert_eq!(
            url,
            "https://cloud.example.com/v1/storage/buckets/bucket9/files/file7/view?project=projX&mode=admin"
        );
    }

    #[test]
    fn test_oauth_url_encodes_redirect_targets() {
        let url = oauth2_session_url(
            "https://cloud.example.com/v1",
            "projX",
            OAuthProvider::Github,
            "https://app.example.com/login/success",
            "https://app.example.com/login/failure",
        );
        assert_eq!(
            url,
            "https://cloud.example.com/v1/account/sessions/oauth2/github?project=projX&success=https%3A%2F%2Fapp.example.com%2Flogin%2Fsuccess&failure=https%3A%2F%2Fapp.example.com%2Flogin%2Ffailure"
        );
    }
}
