//! Session bookkeeping

mod service;

pub use service::SessionService;
