pub mod editor;
pub mod model;

pub use editor::{EditorConfig, ToolbarItem};
pub use model::{AdminModel, Command, Mode, Msg, PostForm, StoreOp};
