//! Session state and the global 401 handler

pub mod context;
pub mod error_handler;

pub use context::{
    SessionActions, SessionHandle, SessionProvider, SessionStore, use_session,
    use_session_actions,
};
