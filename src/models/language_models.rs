use serde::{Deserialize, Serialize};

/// Closed set of languages the editor and the judge both understand.
/// An unrecognized marker never maps here; callers keep their prior
/// selection instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorLanguage {
    JavaScript,
    Python,
    Java,
    Cpp,
    Csharp,
}
