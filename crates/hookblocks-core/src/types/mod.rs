//! Request-scoped types shared across the workspace.

pub mod actor;
pub mod request;

pub use actor::Actor;
pub use request::RequestKind;
