pub mod auth_flow;
pub mod session_store;

pub use auth_flow::{AuthFlowError, LoginUseCase, LogoutUseCase, RegisterUseCase};
pub use session_store::{IsLoggedStream, SessionStore, StoreSettings};
