//! easyBell provider for callstat
//!
//! easyBell does not offer a documented API. This crate talks to the call
//! log endpoints used by the customer portal: a cookie-authenticated
//! [`Session`], the page decoder, and the paginated [`CallLogReader`].

pub mod reader;
pub mod session;
pub mod wire;

pub use reader::CallLogReader;
pub use session::{DEFAULT_BASE_URL, Session, SessionConfig};
