//! Presentation Layer
//!
//! HTTP handlers, DTOs and router. Authentication reuses the bearer
//! extractor from the auth crate.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::{LibraryAppState, LibraryRepository};
pub use router::{library_router, library_router_generic};
