//! Simulated runner for interactive lessons.
//!
//! Nothing is executed. After a fixed delay the submitted text is checked
//! with a few string heuristics and a canned report is produced.

use std::time::Duration;

use serde::Serialize;

pub const STARTER_CODE: &str = "# Write your solution here
def solution():
    # Your code goes here
    pass

# Test your solution
solution()";

pub const CHALLENGE: &str =
    "Complete the function to solve the given problem. Make sure all test cases pass!";

pub const HINTS: [&str; 4] = [
    "Think about the problem step by step",
    "Consider edge cases in your solution",
    "Make sure your code handles all test cases",
    "Review the lesson content if you need a refresher",
];

const IMPLEMENTATION_MIN_CHARS: usize = 100;
const PLACEHOLDER: &str = "pass";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestResult {
    pub name: &'static str,
    pub passed: bool,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRun {
    pub results: Vec<TestResult>,
    pub output: String,
    pub all_passed: bool,
}

pub fn evaluate(code: &str) -> Vec<TestResult> {
    let no_placeholder = !code.contains(PLACEHOLDER);
    let implemented = code.chars().count() > IMPLEMENTATION_MIN_CHARS;
    let matches_expected = no_placeholder && implemented;

    vec![
        TestResult {
            name: "Syntax Check",
            passed: true,
            message: "Code syntax is valid",
        },
        TestResult {
            name: "Implementation Check",
            passed: implemented,
            message: if implemented {
                "Function is implemented"
            } else {
                "Function needs to be implemented"
            },
        },
        TestResult {
            name: "Test Case 1",
            passed: matches_expected,
            message: if matches_expected {
                "Expected output matches"
            } else {
                "Output does not match expected result"
            },
        },
    ]
}

pub fn all_passed(results: &[TestResult]) -> bool {
    !results.is_empty() && results.iter().all(|r| r.passed)
}

pub fn render_output(results: &[TestResult]) -> String {
    let passed = results.iter().filter(|r| r.passed).count();
    let lines = results
        .iter()
        .map(|r| format!("{} {}", if r.passed { "✓" } else { "✗" }, r.name))
        .collect::<Vec<_>>()
        .join("\n");
    let verdict = if passed == results.len() {
        "All tests passed! Great job!"
    } else {
        "Some tests failed. Keep trying!"
    };

    format!(
        "Running tests...\n{lines}\n\nTests passed: {passed}/{}\n\n{verdict}",
        results.len()
    )
}

#[derive(Debug, Clone)]
pub struct ExerciseRunner {
    delay: Duration,
}

impl ExerciseRunner {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn run(&self, code: &str) -> ExerciseRun {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let results = evaluate(code);
        let output = render_output(&results);
        let all_passed = all_passed(&results);
        tracing::debug!(chars = code.chars().count(), all_passed, "exercise evaluated");

        ExerciseRun {
            results,
            output,
            all_passed,
        }
    }
}
