//! Text rendering of the result pane.

use crate::session::{Outcome, SessionState};
use crate::types::SubmissionResult;

pub const RUNNING_INDICATOR: &str = "Running code...";

/// Render the result pane for a session state
pub fn render(state: &SessionState) -> String {
    if state.is_running() {
        return format!("Output: {}", RUNNING_INDICATOR);
    }

    match &state.outcome {
        None => "Output:".to_string(),
        Some(Outcome::Error(message)) => format!("Output: Error\n{}", message),
        Some(Outcome::Result(result)) => render_result(result),
    }
}

fn render_result(result: &SubmissionResult) -> String {
    let mut lines = vec![format!("Output: {}", result.status.description)];

    if let Some(time) = result.time.as_deref().filter(|t| !t.is_empty()) {
        lines.push(format!("Finished in {} ms", time));
    }

    push_section(&mut lines, None, result.stdout.as_deref());
    push_section(&mut lines, Some("stderr:"), result.stderr.as_deref());
    push_section(
        &mut lines,
        Some("Compile output:"),
        result.compile_output.as_deref(),
    );
    push_section(&mut lines, Some("Message:"), result.message.as_deref());

    lines.join("\n")
}

fn push_section(lines: &mut Vec<String>, label: Option<&str>, text: Option<&str>) {
    let Some(text) = text.map(|t| t.trim_end_matches(&['\n', '\r'][..])) else {
        return;
    };
    if text.is_empty() {
        return;
    }

    if let Some(label) = label {
        lines.push(label.to_string());
    }
    lines.push(text.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Phase;
    use crate::types::{SubmissionStatus, Token};

    fn displaying(outcome: Outcome) -> SessionState {
        SessionState {
            request_id: 1,
            phase: Phase::Displaying,
            outcome: Some(outcome),
        }
    }

    fn accepted() -> SubmissionResult {
        SubmissionResult {
            stdout: Some("Hello World!\n".to_string()),
            time: Some("0.01".to_string()),
            memory: Some(3320),
            token: "abc".to_string(),
            status: SubmissionStatus {
                id: 3,
                description: "Accepted".to_string(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_render_idle() {
        assert_eq!(render(&SessionState::default()), "Output:");
    }

    #[test]
    fn test_render_running_hides_previous_outcome() {
        let mut state = displaying(Outcome::Result(accepted()));
        state.phase = Phase::Submitting;
        assert_eq!(render(&state), "Output: Running code...");

        state.phase = Phase::AwaitingResult(Token::new("abc").unwrap());
        assert_eq!(render(&state), "Output: Running code...");
    }

    #[test]
    fn test_render_accepted_hello_world() {
        let rendered = render(&displaying(Outcome::Result(accepted())));
        assert_eq!(rendered, "Output: Accepted\nFinished in 0.01 ms\nHello World!");
    }

    #[test]
    fn test_render_idle_after_reset_keeps_outcome() {
        let mut state = displaying(Outcome::Result(accepted()));
        state.phase = Phase::Idle;
        assert!(render(&state).contains("Hello World!"));
    }

    #[test]
    fn test_render_without_time() {
        let result = SubmissionResult {
            status: SubmissionStatus {
                id: 1,
                description: "In Queue".to_string(),
            },
            ..Default::default()
        };
        assert_eq!(render(&displaying(Outcome::Result(result))), "Output: In Queue");
    }

    #[test]
    fn test_render_compilation_error() {
        let result = SubmissionResult {
            compile_output: Some("main.c:1: error: expected ';'\n".to_string()),
            stderr: Some(String::new()),
            message: Some("Exited with error status 1".to_string()),
            time: Some(String::new()),
            status: SubmissionStatus {
                id: 6,
                description: "Compilation Error".to_string(),
            },
            ..Default::default()
        };

        let rendered = render(&displaying(Outcome::Result(result)));
        assert_eq!(
            rendered,
            "Output: Compilation Error\nCompile output:\nmain.c:1: error: expected ';'\nMessage:\nExited with error status 1"
        );
    }

    #[test]
    fn test_render_stderr() {
        let result = SubmissionResult {
            stdout: Some("partial\n".to_string()),
            stderr: Some("boom\n".to_string()),
            time: Some("0.002".to_string()),
            status: SubmissionStatus {
                id: 11,
                description: "Runtime Error (NZEC)".to_string(),
            },
            ..Default::default()
        };

        let rendered = render(&displaying(Outcome::Result(result)));
        assert_eq!(
            rendered,
            "Output: Runtime Error (NZEC)\nFinished in 0.002 ms\npartial\nstderr:\nboom"
        );
    }

    #[test]
    fn test_render_error() {
        let state = displaying(Outcome::Error("Network error: connection refused".to_string()));
        assert_eq!(
            render(&state),
            "Output: Error\nNetwork error: connection refused"
        );
    }
}
