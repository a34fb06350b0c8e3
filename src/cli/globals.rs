use secrecy::SecretString;

/// Shared configuration handed to every handler via axum `Extension`.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub token_secret: SecretString,
    pub frontend_url: String,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(token_secret: SecretString, frontend_url: String) -> Self {
        Self {
            token_secret,
            frontend_url,
        }
    }
}
