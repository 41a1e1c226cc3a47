// Interface adapters: HTTP clients for the studio API.

pub mod clients;
pub mod protocol;
