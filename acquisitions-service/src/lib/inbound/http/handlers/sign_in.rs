/// Placeholder until credential checks exist.
pub async fn sign_in() -> &'static str {
    "POST /api/auth/sign-in response"
}
