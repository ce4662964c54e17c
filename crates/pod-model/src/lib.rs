//! # Pod Model Crate
//!
//! Domain types for the pod swipe deck and decoding of the pod server's
//! responses.
//!
//! ## Main Components
//!
//! - **types**: `Pod`, `Location`, `Coordinate`, `GeoPoint`
//! - **parser**: Decode `getPods` / `getUserInterests` bodies
//! - **error**: Error types for decoding
//!
//! ## Example Usage
//!
//! ```ignore
//! use pod_model::parser::parse_pod_list;
//!
//! let pods = parse_pod_list(&body)?;
//! for pod in &pods {
//!     println!("{} [{}]", pod.name, pod.tags.join(", "));
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;

// Re-export commonly used types for convenience
pub use error::{PodModelError, Result};
pub use types::{
    // Type aliases
    PodId,
    Tag,
    // Core types
    Coordinate,
    GeoPoint,
    Location,
    Pod,
};
