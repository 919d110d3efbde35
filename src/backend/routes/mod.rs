//! Routes Module
//!
//! Route configuration for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs    - Module exports
//! └── router.rs - Router assembly
//! ```

/// Router assembly
pub mod router;

pub use router::create_router;
