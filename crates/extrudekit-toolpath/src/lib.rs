//! # ExtrudeKit Toolpath
//!
//! Turns calibration shapes into extrusion G-code for a filament printer.
//!
//! ## Layers
//!
//! - **Machine state**: position, Z height and retraction flag of one session
//! - **Writer**: motion emitters (`move_z`, `move_xy`, `extrude`, retraction)
//!   appending to a single output buffer and advancing the state exactly once
//!   per command
//! - **Patterns**: line, plane (nested perimeters with 45° diagonal fill) and
//!   the reserved cube pattern
//! - **Frames**: printer start/end blocks wrapped around a generated body
//! - **Session**: resolves settings overrides, picks a pattern by mode and
//!   assembles the program

pub mod error;
pub mod frame;
pub mod patterns;
pub mod session;
pub mod state;
pub mod stats;
pub mod writer;

pub use error::{ToolpathError, ToolpathResult};
pub use frame::{BareFrame, PrusaMk3sFrame, ProgramFrame};
pub use patterns::{
    diagonal_fill::{fill_strokes, FillPhase, FillStroke},
    perimeter_box::{max_perimeters, perimeter_box, BoxReport, BoxSpec},
    PatternMode,
};
pub use session::{generate, generate_program, Session, SessionOutput};
pub use state::MachineState;
pub use stats::EmissionStats;
pub use writer::{ExtrudeOptions, FeedDirection, GcodeWriter};
