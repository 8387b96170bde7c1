//! Portal session management: login and authenticated page fetches.

mod portal;

pub use portal::PortalSession;
