//! Server Module
//!
//! This module contains all server-side code for initializing and
//! configuring the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports and documentation
//! ├── state.rs  - AppState and FromRef implementations
//! ├── config.rs - Configuration loading (database, port)
//! └── init.rs   - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **State Creation**: Creates the message store and stream registry
//! 2. **Configuration Loading**: Loads the optional database pool
//! 3. **State Restoration**: Restores message history when persisted
//! 4. **Router Creation**: Configures all routes

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use state::AppState;
pub use init::create_app;
