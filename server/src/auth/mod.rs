mod extractor;
mod jwt;

pub use extractor::{AuthError, AuthUser, Caller};
pub use jwt::{verify_token, AuthMode, Claims, DEV_CALLER_ID};
