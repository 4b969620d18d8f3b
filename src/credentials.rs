/// Access credentials the request signer works with.
#[derive(Debug, Clone)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
    session_token: Option<String>,
}

impl Credentials {
    pub fn new<T: Into<String>>(ak: T, sk: T, st: Option<String>) -> Self {
        Credentials {
            access_key: ak.into(),
            secret_key: sk.into(),
            session_token: st,
        }
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }
}
