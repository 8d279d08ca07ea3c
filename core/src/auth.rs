//! Login redirect target used when the flow server answers 401

pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Resolves `login_path` against `base_url`. Absolute URLs pass through;
/// an empty base yields a same-origin path.
pub fn login_url(base_url: &str, login_path: &str) -> String {
    if login_path.starts_with("http://") || login_path.starts_with("https://") {
        login_path.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            login_path.trim_start_matches('/')
        )
    }
}
