/// Placeholder; the cookie is left untouched.
pub async fn sign_out() -> &'static str {
    "POST /api/auth/sign-out response"
}
