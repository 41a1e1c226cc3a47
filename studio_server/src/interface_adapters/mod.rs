// Interface adapters: HTTP protocol, handlers, routing and storage adapters.

pub mod auth;
pub mod handlers;
pub mod memory;
pub mod postgres;
pub mod protocol;
pub mod routes;
pub mod state;
