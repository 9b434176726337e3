// Session authentication
// Session model, store contract and the validation gate

pub mod gate;
pub mod session;

pub use gate::{validate_session, SessionRejection};
pub use session::{Session, SessionStore, SessionStoreError, SessionStoreRef, SESSION_COOKIE};
