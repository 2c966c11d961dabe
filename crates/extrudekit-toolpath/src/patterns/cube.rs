//! Reserved cube pattern.

use crate::error::ToolpathResult;
use crate::writer::GcodeWriter;
use tracing::debug;

/// Produces no motion; the cube pattern is reserved.
pub fn generate(_writer: &mut GcodeWriter<'_>, iteration: u32) -> ToolpathResult<()> {
    debug!(iteration, "Cube pattern has no body");
    Ok(())
}
