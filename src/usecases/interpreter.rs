//! Command interpretation: maps one inbound message to note CRUD plus a reply.
//!
//! Classification priority: integer (delete selection) > command prefix >
//! free text (create note). Unrecognized commands produce no reply at all,
//! so the bot stays quiet when mentioned in unrelated bot commands.

use crate::domain::{DomainError, OutgoingMessage};
use crate::ports::NoteStorePort;
use crate::usecases::renderer;
use std::sync::Arc;
use tracing::debug;

const WELCOME_MESSAGE: &str = "Hello! I will remember what you say.\n\n\
Enter their number or type /del for deleting your notes.\n";

const HELP_MESSAGE: &str = "Enter text to create a new note.\n\
You will see a list of all the notes that you have created until now.\n\
Enter their number or type /del for deleting a specific note.\n";

const SELECT_PROMPT: &str = "Select a note to delete:\n";

/// What one message asks for, decided before touching the store.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Bare integer: the user picked a note id off the delete keyboard.
    DeleteSelection(i64),
    ShowDeleteKeyboard,
    Start,
    Help,
    /// Command-prefixed text outside the fixed set. Produces no reply.
    Ignored,
    CreateNote,
}

/// Parse the whole message as a note id. Empty or non-numeric text is not
/// an id and falls through to the other branches.
fn parse_as_id(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

fn classify(text: &str) -> Command {
    if let Some(id) = parse_as_id(text) {
        return Command::DeleteSelection(id);
    }
    if text.starts_with('/') || text.starts_with('@') {
        return match text {
            "/del" => Command::ShowDeleteKeyboard,
            "/start" => Command::Start,
            "/help" => Command::Help,
            _ => Command::Ignored,
        };
    }
    Command::CreateNote
}

/// Interprets inbound messages and applies their effects to the note store.
pub struct CommandInterpreter {
    store: Arc<dyn NoteStorePort>,
}

impl CommandInterpreter {
    pub fn new(store: Arc<dyn NoteStorePort>) -> Self {
        Self { store }
    }

    /// Handle one message from `owner`. Returns the reply to send, or None
    /// when the message is an unrecognized command (deliberately silent).
    ///
    /// Every reply ends with the owner's current note listing, re-fetched
    /// after the mutation so the rendered state matches the store.
    pub async fn handle_message(
        &self,
        owner: i64,
        text: &str,
    ) -> Result<Option<OutgoingMessage>, DomainError> {
        let notes = self.store.list(owner).await?;

        let mut preamble = String::new();
        let mut keyboard = None;

        match classify(text) {
            Command::DeleteSelection(id) => {
                if notes.iter().any(|n| n.id == id) {
                    self.store.delete(owner, id).await?;
                    debug!(owner, note_id = id, "note deleted");
                } else {
                    preamble = format!("Note {} not found.\n", id);
                }
            }
            Command::ShowDeleteKeyboard => {
                let ids: Vec<i64> = notes.iter().map(|n| n.id).collect();
                // Empty set: keep the (zero-row) keyboard but drop the prompt.
                if !ids.is_empty() {
                    preamble.push_str(SELECT_PROMPT);
                }
                keyboard = Some(renderer::build_keyboard(&ids));
            }
            Command::Start => preamble.push_str(WELCOME_MESSAGE),
            Command::Help => preamble.push_str(HELP_MESSAGE),
            Command::Ignored => {
                debug!(owner, "unrecognized command ignored");
                return Ok(None);
            }
            Command::CreateNote => {
                self.store.add(owner, text).await?;
                debug!(owner, "note created");
            }
        }

        let notes = self.store.list(owner).await?;
        Ok(Some(OutgoingMessage {
            chat_id: owner,
            text: renderer::render_note_list(&preamble, &notes),
            keyboard,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::MemoryNoteStore;

    fn interpreter() -> CommandInterpreter {
        CommandInterpreter::new(Arc::new(MemoryNoteStore::new()))
    }

    #[test]
    fn classify_integer_beats_everything() {
        assert_eq!(classify("3"), Command::DeleteSelection(3));
        assert_eq!(classify(" 42 "), Command::DeleteSelection(42));
        assert_eq!(classify("-1"), Command::DeleteSelection(-1));
    }

    #[test]
    fn classify_commands() {
        assert_eq!(classify("/del"), Command::ShowDeleteKeyboard);
        assert_eq!(classify("/start"), Command::Start);
        assert_eq!(classify("/help"), Command::Help);
        assert_eq!(classify("/unknown"), Command::Ignored);
        assert_eq!(classify("@otherbot hi"), Command::Ignored);
        // Prefix match is exact, so "/del " with arguments is not /del.
        assert_eq!(classify("/del 3"), Command::Ignored);
    }

    #[test]
    fn classify_free_text_creates_note() {
        assert_eq!(classify("hello"), Command::CreateNote);
        assert_eq!(classify("3 apples"), Command::CreateNote);
        // Empty and whitespace-only text must not parse as an id.
        assert_eq!(classify(""), Command::CreateNote);
        assert_eq!(classify("   "), Command::CreateNote);
    }

    #[tokio::test]
    async fn free_text_creates_exactly_one_note_and_lists_it() {
        let it = interpreter();
        let reply = it.handle_message(42, "hello").await.unwrap().unwrap();
        assert_eq!(reply.chat_id, 42);
        assert!(reply.text.contains("0: hello"));
        assert!(!reply.text.contains(renderer::NO_NOTES_MESSAGE));
        assert!(reply.keyboard.is_none());

        let notes = it.store.list(42).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "hello");
    }

    #[tokio::test]
    async fn integer_deletes_existing_note() {
        let it = interpreter();
        it.handle_message(1, "milk").await.unwrap();
        it.handle_message(1, "eggs").await.unwrap();

        let reply = it.handle_message(1, "0").await.unwrap().unwrap();
        assert!(!reply.text.contains("milk"));
        assert!(reply.text.contains("1: eggs"));
        assert_eq!(it.store.list(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_id_yields_not_found_and_unchanged_listing() {
        let it = interpreter();
        it.handle_message(1, "milk").await.unwrap();

        let reply = it.handle_message(1, "3").await.unwrap().unwrap();
        assert!(reply.text.starts_with("Note 3 not found.\n"));
        assert!(reply.text.contains("0: milk"));
        assert_eq!(it.store.list(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn del_with_notes_prompts_with_keyboard() {
        let it = interpreter();
        it.handle_message(1, "milk").await.unwrap();

        let reply = it.handle_message(1, "/del").await.unwrap().unwrap();
        assert!(reply.text.starts_with(SELECT_PROMPT));
        assert!(reply.text.contains("0: milk"));
        let kb = reply.keyboard.unwrap();
        assert_eq!(kb.keyboard, vec![vec!["0".to_string()]]);
    }

    #[tokio::test]
    async fn del_without_notes_suppresses_prompt_but_keeps_empty_keyboard() {
        let it = interpreter();
        let reply = it.handle_message(1, "/del").await.unwrap().unwrap();
        assert_eq!(reply.text, renderer::NO_NOTES_MESSAGE);
        let kb = reply.keyboard.unwrap();
        assert!(kb.keyboard.is_empty());
    }

    #[tokio::test]
    async fn start_and_help_do_not_mutate_store() {
        let it = interpreter();
        let start = it.handle_message(1, "/start").await.unwrap().unwrap();
        assert!(start.text.starts_with("Hello!"));
        assert!(start.keyboard.is_none());

        let help = it.handle_message(1, "/help").await.unwrap().unwrap();
        assert!(help.text.starts_with("Enter text to create a new note."));

        assert!(it.store.list(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unrecognized_command_is_silent() {
        let it = interpreter();
        assert!(it.handle_message(1, "/export").await.unwrap().is_none());
        assert!(it.store.list(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn whitespace_only_text_is_stored_verbatim() {
        let it = interpreter();
        it.handle_message(1, "   ").await.unwrap();
        let notes = it.store.list(1).await.unwrap();
        assert_eq!(notes[0].content, "   ");
    }

    #[tokio::test]
    async fn owners_never_see_each_others_notes() {
        let it = interpreter();
        it.handle_message(1, "mine").await.unwrap();
        let reply = it.handle_message(2, "/del").await.unwrap().unwrap();
        assert!(!reply.text.contains("mine"));
        assert!(reply.keyboard.unwrap().keyboard.is_empty());
    }
}
