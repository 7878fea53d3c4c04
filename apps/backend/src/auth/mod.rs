//! Token lifecycle: signing, issuing and validating access/refresh tokens,
//! plus password hashing for the credential flows.

pub mod claims;
pub mod codec;
pub mod error;
pub mod issuer;
pub mod password;
pub mod validator;

pub use claims::{Claims, Identity, TokenKind};
pub use codec::TokenCodec;
pub use error::TokenError;
pub use issuer::{TokenIssuer, TokenPair};
pub use validator::{TokenState, TokenValidator};
