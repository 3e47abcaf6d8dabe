use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;

/// Name of the cookie carrying the signed identity token.
pub const AUTH_COOKIE: &str = "token";

/// Writes auth cookies with one fixed attribute set.
///
/// Every cookie is `HttpOnly`, `SameSite=Strict`, scoped to `/`, and lives
/// exactly as long as the token it carries. `Secure` comes from
/// configuration.
#[derive(Debug, Clone)]
pub struct CookieWriter {
    secure: bool,
    max_age: time::Duration,
}

impl CookieWriter {
    /// # Arguments
    /// * `secure` - Emit the `Secure` attribute
    /// * `max_age` - Cookie lifetime, normally the token lifetime
    pub fn new(secure: bool, max_age: chrono::Duration) -> Self {
        Self {
            secure,
            max_age: time::Duration::seconds(max_age.num_seconds()),
        }
    }

    /// Add `name=value` to the outgoing cookie jar.
    pub fn set(&self, jar: CookieJar, name: &str, value: String) -> CookieJar {
        let cookie = Cookie::build((name.to_string(), value))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .path("/")
            .max_age(self.max_age);

        jar.add(cookie)
    }
}
