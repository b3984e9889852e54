pub use crate::models::judge_models::{
    JudgeError, JudgeFile, JudgeRequest, JudgeResponse, JudgeRun, TestCase, TestCaseResult,
    TestRunReport,
};

use std::error::Error;
use std::fmt;
use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::models::config_models::JudgeConfig;
use crate::models::language_models::EditorLanguage;
use crate::utils::helper_utils::normalize_output;

/// Client for the external execution service. Runs the current buffer
/// against test cases one at a time, with a fixed courtesy delay between
/// submissions instead of a token bucket.
pub struct JudgeAdapter {
    client: reqwest::Client,
    config: JudgeConfig,
}

impl JudgeAdapter {
    pub fn new(config: JudgeConfig) -> Result<Self, JudgeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(JudgeError::Http)?;
        Ok(Self { client, config })
    }

    /// Submits every test case sequentially and aggregates pass/fail. One
    /// failing submission becomes a failed case, not an aborted batch, and
    /// the token is checked between iterations so a view teardown stops
    /// further submissions; already gathered results are returned as-is.
    pub async fn run_test_cases(
        &self,
        language: EditorLanguage,
        code: &str,
        cases: &[TestCase],
        cancel: &CancellationToken,
    ) -> TestRunReport {
        let mut results = Vec::with_capacity(cases.len());
        for (index, case) in cases.iter().enumerate() {
            if cancel.is_cancelled() {
                debug!(completed = results.len(), "test run cancelled");
                return TestRunReport {
                    results,
                    cancelled: true,
                };
            }
            let result = match self.submit(language, code, &case.input).await {
                Ok(run) => build_result(index + 1, case, run),
                Err(error) => {
                    warn!(case = index + 1, %error, "judge submission failed");
                    failed_result(index + 1, case, error)
                }
            };
            results.push(result);
            if index + 1 < cases.len() {
                sleep(Duration::from_millis(self.config.request_delay_ms)).await;
            }
        }
        TestRunReport {
            results,
            cancelled: false,
        }
    }

    async fn submit(
        &self,
        language: EditorLanguage,
        code: &str,
        stdin: &str,
    ) -> Result<JudgeRun, JudgeError> {
        let request = JudgeRequest {
            language: language.as_str().to_owned(),
            version: self.config.version.clone(),
            files: vec![JudgeFile {
                name: format!("main.{}", language.file_extension()),
                content: code.to_owned(),
            }],
            stdin: stdin.to_owned(),
        };
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(JudgeError::Http)?
            .error_for_status()
            .map_err(JudgeError::Http)?;
        let parsed: JudgeResponse = response
            .json()
            .await
            .map_err(|error| JudgeError::BadResponse(error.to_string()))?;
        Ok(parsed.run)
    }
}

fn build_result(case_number: usize, case: &TestCase, run: JudgeRun) -> TestCaseResult {
    let actual_output = normalize_output(&run.stdout);
    let expected_output = normalize_output(&case.output);
    let passed = actual_output == expected_output;
    TestCaseResult {
        case_number,
        input: case.input.clone(),
        expected_output,
        actual_output,
        passed,
        execution_time: run.time,
        memory_used: run.memory,
        error_message: if run.stderr.is_empty() {
            None
        } else {
            Some(run.stderr)
        },
    }
}

fn failed_result(case_number: usize, case: &TestCase, error: JudgeError) -> TestCaseResult {
    TestCaseResult {
        case_number,
        input: case.input.clone(),
        expected_output: normalize_output(&case.output),
        actual_output: String::new(),
        passed: false,
        execution_time: 0.0,
        memory_used: 0,
        error_message: Some(error.to_string()),
    }
}

impl TestRunReport {
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|result| result.passed).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn all_passed(&self) -> bool {
        !self.results.is_empty() && self.passed_count() == self.total()
    }
}

impl fmt::Display for JudgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JudgeError::Http(error) => write!(f, "judge request failed: {}", error),
            JudgeError::BadResponse(message) => {
                write!(f, "judge returned an unreadable response: {}", message)
            }
        }
    }
}

impl Error for JudgeError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(input: &str, output: &str) -> TestCase {
        TestCase {
            input: input.to_owned(),
            output: output.to_owned(),
        }
    }

    fn run(stdout: &str, stderr: &str) -> JudgeRun {
        JudgeRun {
            stdout: stdout.to_owned(),
            stderr: stderr.to_owned(),
            time: 0.01,
            memory: 1024,
        }
    }

    #[test]
    fn matching_output_passes_after_normalization() {
        let result = build_result(1, &case("5", "25"), run("25\n", ""));
        assert!(result.passed);
        assert_eq!(result.actual_output, "25\n");
        assert_eq!(result.expected_output, "25\n");
        assert!(result.error_message.is_none());
    }

    #[test]
    fn expected_without_newline_still_matches() {
        let result = build_result(1, &case("5", "25\n"), run("25", ""));
        assert!(result.passed);
    }

    #[test]
    fn mismatch_fails_and_keeps_both_outputs() {
        let result = build_result(2, &case("5", "25"), run("24\n", ""));
        assert!(!result.passed);
        assert_eq!(result.actual_output, "24\n");
        assert_eq!(result.expected_output, "25\n");
    }

    #[test]
    fn stderr_is_surfaced_as_error_message() {
        let result = build_result(1, &case("", ""), run("", "boom"));
        assert_eq!(result.error_message.as_deref(), Some("boom"));
    }

    #[test]
    fn failed_submission_reports_as_failed_case() {
        let result = failed_result(
            3,
            &case("1", "1"),
            JudgeError::BadResponse("no run field".to_owned()),
        );
        assert!(!result.passed);
        assert_eq!(result.case_number, 3);
        assert!(result.error_message.as_deref().unwrap().contains("no run field"));
    }

    #[test]
    fn report_counts_passes() {
        let report = TestRunReport {
            results: vec![
                build_result(1, &case("5", "25"), run("25", "")),
                build_result(2, &case("6", "36"), run("35", "")),
            ],
            cancelled: false,
        };
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.total(), 2);
        assert!(!report.all_passed());
    }

    #[test]
    fn judge_request_serializes_to_the_piston_shape() {
        let request = JudgeRequest {
            language: "cpp".to_owned(),
            version: "*".to_owned(),
            files: vec![JudgeFile {
                name: "main.cpp".to_owned(),
                content: "int main() {}".to_owned(),
            }],
            stdin: "5".to_owned(),
        };
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();
        assert_eq!(json["language"], "cpp");
        assert_eq!(json["version"], "*");
        assert_eq!(json["files"][0]["name"], "main.cpp");
        assert_eq!(json["stdin"], "5");
    }

    #[test]
    fn judge_response_tolerates_missing_metrics() {
        let parsed: JudgeResponse =
            serde_json::from_str(r#"{"run":{"stdout":"25\n","stderr":""}}"#).unwrap();
        assert_eq!(parsed.run.stdout, "25\n");
        assert_eq!(parsed.run.time, 0.0);
        assert_eq!(parsed.run.memory, 0);
    }

    #[tokio::test]
    async fn pre_cancelled_run_returns_immediately() {
        let adapter = JudgeAdapter::new(JudgeConfig {
            endpoint: "http://127.0.0.1:1/execute".to_owned(),
            version: "*".to_owned(),
            request_delay_ms: 0,
            request_timeout_ms: 1000,
        })
        .unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let report = adapter
            .run_test_cases(
                EditorLanguage::Python,
                "print(1)",
                &[case("", "1")],
                &cancel,
            )
            .await;
        assert!(report.cancelled);
        assert!(report.results.is_empty());
    }
}
