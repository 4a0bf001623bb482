//! Scene (draw stream) types.
//!
//! Commands are recorded in paint order; later commands cover earlier ones.
//! Renderers never reorder primitives.

mod cmd;
mod list;

pub use cmd::{CircleCmd, DrawCmd, LineCmd, RectCmd, TextCmd};
pub use list::DrawList;
