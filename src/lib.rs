//! Geometry and layout engine for technology radar charts.
//!
//! A radar has four quadrants, N rings and any number of blips. `layout`
//! turns that into pixel positions and SVG paths; `import` turns CSV into
//! new blips; `validate` and `ratelimit` back the edit and auth forms.
//! `wasm` exposes the lot to the browser as JSON-in, JSON-out functions.

pub mod import;
pub mod layout;
pub mod model;
pub mod offsets;
pub mod output;
pub mod ratelimit;
pub mod validate;
mod wasm;

pub use layout::{LayoutConfig, PointF, layout_radar};
pub use model::{Blip, Quadrant, RadarSnapshot, Ring};
pub use output::RadarOutput;
