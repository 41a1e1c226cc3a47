mod auth;
mod session_information;

// Re-export the domain boundary types and ports.
pub use auth::{AuthProvider, AuthProviderError, LoginRequest, RegisterRequest};
pub use session_information::SessionInformation;
