//! Share link stubs.
//!
//! The generated links look like share URLs but nothing backs them.

use rand::Rng;

pub const DEFAULT_SHARE_BASE_URL: &str = "https://glicemia-app.com/share/";

/// Text shown alongside a link. Expiry is not enforced anywhere.
pub const LINK_EXPIRY_NOTICE: &str = "This link expires automatically in 24 hours.";

const TOKEN_LEN: usize = 13;
const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone)]
pub struct LinkGenerator {
    base_url: String,
}

impl LinkGenerator {
    /// A trailing `/` is added to `base_url` if missing.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a fresh link with a random base-36 token.
    pub fn generate_link(&self) -> String {
        format!("{}{}", self.base_url, generate_token())
    }
}

impl Default for LinkGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SHARE_BASE_URL)
    }
}

fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LEN)
        .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}
