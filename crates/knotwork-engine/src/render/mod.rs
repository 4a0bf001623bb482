//! GPU rendering subsystem.
//!
//! Renderers consume a `scene::DrawList` and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipelines, buffers, atlas).
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
