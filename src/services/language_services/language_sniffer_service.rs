pub use crate::models::language_models::EditorLanguage;

use once_cell::sync::Lazy;
use regex::Regex;

// Matches a marker line such as "// LANGUAGE: Python" or "# LANGUAGE: C++"
// anywhere in the buffer; the first match wins.
static LANGUAGE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*(?://|#)\s*LANGUAGE:\s*(\S+)")
        .expect("language marker pattern is valid")
});

/// Infers the intended language from the marker comment embedded in the
/// code text. Returns `None` when there is no marker or the marker names a
/// language outside the supported set; the caller keeps its current
/// selection in that case.
pub fn infer_language(code: &str) -> Option<EditorLanguage> {
    let captured = LANGUAGE_MARKER.captures(code)?;
    EditorLanguage::from_marker(&captured[1])
}

impl EditorLanguage {
    pub fn from_marker(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "javascript" => Some(EditorLanguage::JavaScript),
            "python" => Some(EditorLanguage::Python),
            "java" => Some(EditorLanguage::Java),
            "cpp" | "c++" => Some(EditorLanguage::Cpp),
            "csharp" | "c#" => Some(EditorLanguage::Csharp),
            _ => None,
        }
    }

    /// Identifier shared by the editor selector and the judge API.
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorLanguage::JavaScript => "javascript",
            EditorLanguage::Python => "python",
            EditorLanguage::Java => "java",
            EditorLanguage::Cpp => "cpp",
            EditorLanguage::Csharp => "csharp",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            EditorLanguage::JavaScript => "js",
            EditorLanguage::Python => "py",
            EditorLanguage::Java => "java",
            EditorLanguage::Cpp => "cpp",
            EditorLanguage::Csharp => "cs",
        }
    }

    /// Starter buffer shown on an explicit language switch. The first line
    /// is the marker for the language itself, so a template re-sniffs to
    /// its own language on every peer.
    pub fn template(&self) -> &'static str {
        match self {
            EditorLanguage::JavaScript => {
                "// LANGUAGE: JavaScript\n\nfunction solution(n) {\n    return n * n;\n}\n\nconsole.log(solution(5));\n"
            }
            EditorLanguage::Python => {
                "# LANGUAGE: Python\n\ndef solution(n):\n    return n * n\n\nprint(solution(5))\n"
            }
            EditorLanguage::Java => {
                "// LANGUAGE: Java\n\npublic class Solution {\n    public static int solution(int n) {\n        return n * n;\n    }\n\n    public static void main(String[] args) {\n        System.out.println(solution(5));\n    }\n}\n"
            }
            EditorLanguage::Cpp => {
                "// LANGUAGE: C++\n\n#include <iostream>\nusing namespace std;\n\nint solution(int n) {\n    return n * n;\n}\n\nint main() {\n    cout << solution(5) << endl;\n    return 0;\n}\n"
            }
            EditorLanguage::Csharp => {
                "// LANGUAGE: C#\n\nusing System;\n\npublic class Solution {\n    public static int Solve(int n) {\n        return n * n;\n    }\n\n    public static void Main() {\n        Console.WriteLine(Solve(5));\n    }\n}\n"
            }
        }
    }
}
