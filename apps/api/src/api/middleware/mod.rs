// Request extractors that run before handlers

pub mod session;

pub use session::ActiveSession;
