//! pyscribe - the editing core of a small Python editor
//!
//! Two pieces do the work: an incremental, rule-based highlighter that
//! keeps triple-quoted strings correct across lines, and an edit assistant
//! that turns single keystrokes into atomic structural edits (pairing,
//! indentation on Enter and Backspace). Sessions tie a document to both and
//! to the file it came from; the workspace keeps the set of open sessions.

pub mod assist;
pub mod config;
pub mod document;
pub mod error;
pub mod input;
pub mod line;
pub mod render;
pub mod session;
pub mod syntax;
pub mod workspace;

pub use assist::{EditAssistant, Transform};
pub use config::Config;
pub use document::{Document, TextEdit};
pub use error::{EditorError, Result};
pub use input::{Key, KeyEvent, Modifiers};
pub use session::{DocumentSession, TextChange};
pub use workspace::{CloseDecision, CloseOutcome, Workspace};
