use crate::session::Session;

/// Events a collaborator can send to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Replace the document with freshly loaded text
    Load(String),
    /// Full editor text after an edit
    Edit(String),
    /// Expand or collapse an outline row
    ToggleSection(usize),
    /// The session's file changed on disk, reload it
    FileChanged,
    /// Clear the current notice
    DismissNotice,
}

/// Pure state transition: consume the session and a message, return the
/// next session.
///
/// `FileChanged` is the only message that touches the filesystem; a failed
/// read keeps the current document and sets an error notice.
pub fn update(mut session: Session, msg: Message) -> Session {
    match msg {
        Message::Load(text) | Message::Edit(text) => {
            session.load_markdown(&text);
        }
        Message::ToggleSection(id) => session.toggle_section(id),
        Message::FileChanged => {
            // Failures are already recorded as a notice.
            let _ = session.reload();
        }
        Message::DismissNotice => session.dismiss_notice(),
    }
    session
}
