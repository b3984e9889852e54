use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct JudgeFile {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JudgeRequest {
    pub language: String,
    pub version: String,
    pub files: Vec<JudgeFile>,
    pub stdin: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JudgeRun {
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub memory: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JudgeResponse {
    pub run: JudgeRun,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub output: String,
}

/// Outcome of one test case. Held in view state only, never persisted.
#[derive(Debug, Clone)]
pub struct TestCaseResult {
    pub case_number: usize,
    pub input: String,
    pub expected_output: String,
    pub actual_output: String,
    pub passed: bool,
    pub execution_time: f64,
    pub memory_used: u64,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TestRunReport {
    pub results: Vec<TestCaseResult>,
    pub cancelled: bool,
}

#[derive(Debug)]
pub enum JudgeError {
    Http(reqwest::Error),
    BadResponse(String),
}
