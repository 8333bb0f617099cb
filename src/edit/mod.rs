//! Remote image editing.

mod editor;
mod openai;

pub use editor::{EditRequest, EditResult, ImageEditor};
pub use openai::{OpenAiEditor, OpenAiEditorBuilder};
