//! Hollow Lights: a carried lamp that burns fuel, a darkness layer with a soft
//! hole around the player, and a sanity meter that suffers when the hole gets small.
//!
//! The core is [`light::LightSanityState`] (fuel, focus, sanity and the radius they
//! produce) and [`mask::VisionMaskRenderer`] (the per-frame occlusion buffer).
//! [`session::Session`] ties them to the player, the fuel cans and the
//! low-sanity shake, one `tick` per frame.

pub mod config;
pub mod draw;
pub mod error;
pub mod fx;
pub mod gamma;
pub mod light;
pub mod mask;
pub mod movement;
pub mod pickups;
pub mod scene;
pub mod session;
pub mod types;

pub use config::{GameConfig, LightConfig, MaskConfig, WorldConfig};
pub use error::Error;
pub use light::{Focus, FrameInput, LightReading, LightSanityState};
pub use mask::{OcclusionBuffer, VisionMaskRenderer};
pub use session::{FrameReport, Session};
pub use types::{FrameBuffer, Vec2};
