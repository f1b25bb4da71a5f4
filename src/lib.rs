//! Software-rendered cockpit instrument panel.
//!
//! A [`Cockpit`] holds ten classic flight instruments over a windshield
//! backdrop. Gauges paint against the [`Surface`] trait; [`Canvas`] rasterizes
//! into an RGBA frame and [`Scene`] records commands for inspection.
//! [`CockpitWindow`] puts it all on screen with winit and pixels.
//!
//! ```no_run
//! use cockpit::{CockpitConfig, CockpitWindow, StateSnapshot};
//!
//! let window = CockpitWindow::new(CockpitConfig::default())?;
//! window.show(|elapsed| {
//!     Some(StateSnapshot {
//!         airspeed: Some(100.0 + elapsed.as_secs_f64()),
//!         ..Default::default()
//!     })
//! })?;
//! # Ok::<(), cockpit::CockpitError>(())
//! ```

// ============================================================================
// DRAWING
// ============================================================================

pub mod color;
pub mod geometry;
pub mod raster;
pub mod scene;
pub mod surface;

// ============================================================================
// PANEL
// ============================================================================

pub mod cockpit;
pub mod instrument;
pub mod snapshot;

// ============================================================================
// RUNTIME
// ============================================================================

pub mod config;
pub mod error;
pub mod font;
pub mod window;

pub use cockpit::Cockpit;
pub use color::Color;
pub use config::{CockpitConfig, LayoutConfig};
pub use error::CockpitError;
pub use instrument::{Gauge, Instrument, Mount};
pub use raster::Canvas;
pub use scene::Scene;
pub use snapshot::{Reading, StateSnapshot};
pub use surface::Surface;
pub use window::CockpitWindow;
