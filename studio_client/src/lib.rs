pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use domain::SessionInformation;
pub use frameworks::runtime::run_with_config;
pub use use_cases::session_store::{IsLoggedStream, SessionStore, StoreSettings};
