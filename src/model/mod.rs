//! Pure data structures (records and DTOs) managed by the actors.

pub mod client;
pub mod component;
pub mod content;
pub mod identity;
pub mod ids;
pub mod staff;
pub mod tenant;

pub use client::*;
pub use component::*;
pub use content::*;
pub use identity::*;
pub use ids::*;
pub use staff::*;
pub use tenant::*;
