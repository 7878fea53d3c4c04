//! HS256 encoding and decoding of [`Claims`].
//!
//! The codec checks structure and signature only. Expiry is left to
//! [`TokenValidator`](super::validator::TokenValidator) so access and refresh
//! tokens can apply their own policy without touching signing logic.

use std::collections::HashSet;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use super::claims::Claims;
use super::error::TokenError;
use crate::state::security_config::SecurityConfig;

#[derive(Clone)]
pub struct TokenCodec {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(security: &SecurityConfig) -> Self {
        // Pin the algorithm; expiry is checked by the validator, not here.
        let mut validation = Validation::new(security.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims = ["exp", "sub"]
            .into_iter()
            .map(String::from)
            .collect::<HashSet<_>>();

        Self {
            header: Header::new(security.algorithm),
            encoding_key: EncodingKey::from_secret(&security.jwt_secret),
            decoding_key: DecodingKey::from_secret(&security.jwt_secret),
            validation,
        }
    }

    /// Sign claims into an opaque bearer string.
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&self.header, claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Decode a bearer string and verify its signature.
    pub fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed(e.to_string()),
            })
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.header.alg)
            .finish_non_exhaustive()
    }
}
