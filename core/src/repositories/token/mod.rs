//! Refresh token persistence port.

mod r#trait;
pub use r#trait::TokenRepository;

mod mock;
pub use mock::MockTokenRepository;
