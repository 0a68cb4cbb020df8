//! Workspace - the ordered set of open sessions
//!
//! This is the tab model without any presentation: which sessions are
//! open, which one is active, and what closing a modified one requires.
//! Prompting the user is left to the caller, which passes the answer back
//! as a [`CloseDecision`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assist::EditAssistant;
use crate::config::Config;
use crate::error::{EditorError, Result};
use crate::input::KeyEvent;
use crate::session::DocumentSession;
use crate::syntax::{python_rules, Highlighter, RuleSet};

/// Caller's answer when closing a session with unsaved changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    Save,
    Discard,
    Cancel,
}

/// What happened on a close request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The session was removed
    Closed,
    /// The session has unsaved changes; ask and call again with a decision
    NeedsDecision,
    /// Saving was requested but the session has no path; save it as first
    NeedsPath,
    /// The caller cancelled; the session stays open
    Cancelled,
}

/// All open sessions plus the shared rule set and assistant
#[derive(Debug)]
pub struct Workspace {
    sessions: Vec<DocumentSession>,
    active: usize,
    rules: Arc<RuleSet>,
    assistant: EditAssistant,
    config: Config,
}

impl Workspace {
    /// Create a workspace with the Python rule set and one empty session.
    ///
    /// Fails if the rule set does not compile.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self::with_rules(config, Arc::new(python_rules()?)))
    }

    /// Create a workspace over an already compiled rule set
    pub fn with_rules(config: Config, rules: Arc<RuleSet>) -> Self {
        let mut workspace = Self {
            sessions: Vec::new(),
            active: 0,
            rules,
            assistant: EditAssistant::from_config(&config),
            config,
        };
        workspace.new_session();
        workspace
    }

    fn highlighter(&self) -> Highlighter {
        Highlighter::new(Arc::clone(&self.rules))
    }

    /// Append an empty, highlighted session and activate it
    pub fn new_session(&mut self) -> usize {
        let session = DocumentSession::new_empty().with_highlighter(self.highlighter());
        self.sessions.push(session);
        self.active = self.sessions.len() - 1;
        tracing::debug!(index = self.active, "new session");
        self.active
    }

    /// Open a file, or activate the session that already has it open
    pub fn open(&mut self, path: &Path) -> Result<usize> {
        let wanted = canonical(path);
        if let Some(index) = self
            .sessions
            .iter()
            .position(|s| s.path().map(canonical).as_ref() == Some(&wanted))
        {
            self.active = index;
            tracing::debug!(index, path = %path.display(), "focused open session");
            return Ok(index);
        }

        let mut session = DocumentSession::open(path)?;
        if self.config.highlights(path) {
            session.set_highlighter(Some(self.highlighter()));
        }
        self.sessions.push(session);
        self.active = self.sessions.len() - 1;
        Ok(self.active)
    }

    /// Number of open sessions (always at least one)
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Always false: closing the last session opens a fresh one
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Index of the active session
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The active session
    pub fn active(&self) -> &DocumentSession {
        &self.sessions[self.active]
    }

    /// The active session, mutably
    pub fn active_mut(&mut self) -> &mut DocumentSession {
        &mut self.sessions[self.active]
    }

    /// A session by index
    pub fn session(&self, index: usize) -> Result<&DocumentSession> {
        self.sessions.get(index).ok_or(EditorError::NoSuchSession(index))
    }

    /// A session by index, mutably
    pub fn session_mut(&mut self, index: usize) -> Result<&mut DocumentSession> {
        self.sessions
            .get_mut(index)
            .ok_or(EditorError::NoSuchSession(index))
    }

    /// The shared edit assistant
    pub fn assistant(&self) -> &EditAssistant {
        &self.assistant
    }

    /// Make a session active
    pub fn activate(&mut self, index: usize) -> Result<()> {
        if index >= self.sessions.len() {
            return Err(EditorError::NoSuchSession(index));
        }
        self.active = index;
        Ok(())
    }

    /// Activate the next session, wrapping around
    pub fn next(&mut self) {
        self.active = (self.active + 1) % self.sessions.len();
    }

    /// Activate the previous session, wrapping around
    pub fn previous(&mut self) {
        let len = self.sessions.len();
        self.active = (self.active + len - 1) % len;
    }

    /// Feed a key press to the active session
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        let session = &mut self.sessions[self.active];
        session.handle_key(event, &self.assistant)
    }

    /// Close a session.
    ///
    /// Unmodified sessions close at once. Modified ones need a decision.
    pub fn close(&mut self, index: usize, decision: Option<CloseDecision>) -> Result<CloseOutcome> {
        let session = self.session_mut(index)?;
        if session.is_modified() {
            match decision {
                None => return Ok(CloseOutcome::NeedsDecision),
                Some(CloseDecision::Cancel) => return Ok(CloseOutcome::Cancelled),
                Some(CloseDecision::Save) => {
                    if session.path().is_none() {
                        return Ok(CloseOutcome::NeedsPath);
                    }
                    session.save_in_place()?;
                }
                Some(CloseDecision::Discard) => {}
            }
        }

        self.sessions.remove(index);
        tracing::debug!(index, remaining = self.sessions.len(), "closed session");
        if self.sessions.is_empty() {
            self.new_session();
        } else if self.active > index || self.active >= self.sessions.len() {
            self.active -= 1;
        }
        Ok(CloseOutcome::Closed)
    }

    /// Titles of all sessions, in order
    pub fn titles(&self) -> Vec<String> {
        self.sessions
            .iter()
            .map(|s| s.title(&self.config.untitled_name))
            .collect()
    }
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyEvent};

    fn workspace() -> Workspace {
        Workspace::new(Config::default()).unwrap()
    }

    #[test]
    fn test_starts_with_one_untitled() {
        let ws = workspace();
        assert_eq!(ws.len(), 1);
        assert!(!ws.is_empty());
        assert_eq!(ws.titles(), vec!["untitled.py".to_string()]);
        assert!(ws.active().is_highlighted());
    }

    #[test]
    fn test_open_existing_path_focuses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.py");
        fs::write(&path, "x = 1\n").unwrap();

        let mut ws = workspace();
        let first = ws.open(&path).unwrap();
        ws.new_session();
        assert_eq!(ws.active_index(), 2);

        let again = ws.open(&dir.path().join(".").join("a.py")).unwrap();
        assert_eq!(again, first);
        assert_eq!(ws.active_index(), first);
        assert_eq!(ws.len(), 3);
    }

    #[test]
    fn test_highlighting_follows_extension() {
        let dir = tempfile::tempdir().unwrap();
        let py = dir.path().join("a.py");
        let txt = dir.path().join("notes.txt");
        fs::write(&py, "def f(): pass").unwrap();
        fs::write(&txt, "def f(): pass").unwrap();

        let mut ws = workspace();
        let i = ws.open(&py).unwrap();
        assert!(ws.session(i).unwrap().is_highlighted());
        let j = ws.open(&txt).unwrap();
        assert!(!ws.session(j).unwrap().is_highlighted());
    }

    #[test]
    fn test_next_previous_wrap() {
        let mut ws = workspace();
        ws.new_session();
        ws.new_session();
        assert_eq!(ws.active_index(), 2);
        ws.next();
        assert_eq!(ws.active_index(), 0);
        ws.previous();
        assert_eq!(ws.active_index(), 2);
        ws.previous();
        assert_eq!(ws.active_index(), 1);
    }

    #[test]
    fn test_close_modified_requires_decision() {
        let mut ws = workspace();
        ws.handle_key(KeyEvent::char('x'));
        assert_eq!(ws.titles(), vec!["untitled.py *".to_string()]);

        assert_eq!(ws.close(0, None).unwrap(), CloseOutcome::NeedsDecision);
        assert_eq!(ws.close(0, Some(CloseDecision::Cancel)).unwrap(), CloseOutcome::Cancelled);
        assert_eq!(ws.close(0, Some(CloseDecision::Save)).unwrap(), CloseOutcome::NeedsPath);
        assert_eq!(ws.active().current_text(), "x");

        assert_eq!(ws.close(0, Some(CloseDecision::Discard)).unwrap(), CloseOutcome::Closed);
        // Closing the last session leaves a fresh one
        assert_eq!(ws.len(), 1);
        assert_eq!(ws.active().current_text(), "");
    }

    #[test]
    fn test_close_with_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("b.py");
        fs::write(&path, "").unwrap();

        let mut ws = workspace();
        let index = ws.open(&path).unwrap();
        ws.handle_key(KeyEvent::plain(Key::Tab));
        assert_eq!(ws.close(index, Some(CloseDecision::Save)).unwrap(), CloseOutcome::Closed);
        assert_eq!(fs::read_to_string(&path).unwrap(), "    ");
        assert_eq!(ws.len(), 1);
    }

    #[test]
    fn test_close_adjusts_active() {
        let mut ws = workspace();
        ws.new_session();
        ws.new_session();
        ws.activate(2).unwrap();
        ws.close(0, None).unwrap();
        assert_eq!(ws.active_index(), 1);
        ws.close(1, None).unwrap();
        assert_eq!(ws.active_index(), 0);
    }

    #[test]
    fn test_no_such_session() {
        let mut ws = workspace();
        assert!(matches!(ws.activate(5), Err(EditorError::NoSuchSession(5))));
        assert!(matches!(ws.close(3, None), Err(EditorError::NoSuchSession(3))));
    }
}
