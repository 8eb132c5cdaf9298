//! Platform-independent logic for the header visualizations: the Lorenz
//! trajectory integrator, curve resampling and tube sweeping, the floating
//! symbol field with its proximity graph, gesture handling, and the
//! per-frame scene drivers. No DOM or GPU types appear here; the web crate
//! feeds this state into its rendering backend.

pub mod attractor;
pub mod constants;
pub mod curve;
pub mod error;
pub mod gesture;
pub mod scene;
pub mod symbols;
pub mod tube;

pub use attractor::*;
pub use constants::initial_state_vec3;
pub use curve::*;
pub use error::*;
pub use gesture::*;
pub use scene::*;
pub use symbols::*;
pub use tube::*;
