//! Reply rendering: note listing and the quick-reply keyboard.
//!
//! Pure functions of their inputs; no store access.

use crate::domain::{Note, ReplyKeyboard};

/// Fallback body when a reply would otherwise be empty (no preamble, no notes).
pub const NO_NOTES_MESSAGE: &str = "There are no notes. Add one by sending a message.";

/// Build a keyboard with one single-button row per note id, collapsing after
/// the first selection. An empty id list yields a zero-row keyboard so the
/// client shows no options.
pub fn build_keyboard(note_ids: &[i64]) -> ReplyKeyboard {
    ReplyKeyboard {
        keyboard: note_ids.iter().map(|id| vec![id.to_string()]).collect(),
        one_time_keyboard: true,
    }
}

/// Append the owner's current notes to `preamble` as newline-joined
/// `id: content` lines. Substitutes the no-notes message when the combined
/// body would be empty.
pub fn render_note_list(preamble: &str, notes: &[Note]) -> String {
    let listing = notes
        .iter()
        .map(|n| format!("{}: {}", n.id, n.content))
        .collect::<Vec<_>>()
        .join("\n");
    let body = format!("{}{}", preamble, listing);
    if body.is_empty() {
        NO_NOTES_MESSAGE.to_string()
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: i64, content: &str) -> Note {
        Note {
            id,
            content: content.to_string(),
        }
    }

    #[test]
    fn keyboard_has_one_row_per_id() {
        let kb = build_keyboard(&[3, 7]);
        assert_eq!(kb.keyboard, vec![vec!["3".to_string()], vec!["7".to_string()]]);
        assert!(kb.one_time_keyboard);
    }

    #[test]
    fn empty_id_list_yields_zero_rows() {
        let kb = build_keyboard(&[]);
        assert!(kb.keyboard.is_empty());
        assert!(kb.one_time_keyboard);
    }

    #[test]
    fn keyboard_serializes_to_reply_markup_shape() {
        let kb = build_keyboard(&[1]);
        let json = serde_json::to_value(&kb).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"keyboard": [["1"]], "one_time_keyboard": true})
        );
    }

    #[test]
    fn renders_preamble_then_listing() {
        let notes = vec![note(0, "milk"), note(1, "eggs")];
        assert_eq!(
            render_note_list("Select a note to delete:\n", &notes),
            "Select a note to delete:\n0: milk\n1: eggs"
        );
    }

    #[test]
    fn empty_body_falls_back_to_no_notes_message() {
        assert_eq!(render_note_list("", &[]), NO_NOTES_MESSAGE);
    }

    #[test]
    fn preamble_alone_is_not_replaced() {
        assert_eq!(
            render_note_list("Note 3 not found.\n", &[]),
            "Note 3 not found.\n"
        );
    }
}
