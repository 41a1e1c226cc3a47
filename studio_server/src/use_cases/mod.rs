// Use cases: one struct per workflow, dependencies injected by the caller.

pub mod accounts;
pub mod login;
pub mod participation;
pub mod register;
pub mod sessions;
pub mod teachers;
pub mod verify_token;

#[cfg(test)]
pub(crate) mod test_support;
