use crate::models::language_models::EditorLanguage;

/// Locally displayed buffer and the language selector value. Mutated only
/// through the editor binding, never by the channel directly.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub code: String,
    pub language: EditorLanguage,
}
