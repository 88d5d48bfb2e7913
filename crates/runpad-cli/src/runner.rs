use anyhow::{anyhow, Result};
use runpad_client::{render, Outcome, Session, SessionState, SubmissionDraft};
use std::io::Write;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Print the running indicator to `progress` whenever the session starts
/// working on a submission
fn watch_progress<W>(mut rx: watch::Receiver<SessionState>, mut progress: W) -> JoinHandle<W>
where
    W: Write + Send + 'static,
{
    tokio::spawn(async move {
        let mut announced = 0;
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            log::debug!("Submission {} is now {:?}", state.request_id, state.phase);
            if state.is_running() && announced != state.request_id {
                announced = state.request_id;
                if let Err(e) = writeln!(progress, "{}", render(&state)).and_then(|_| progress.flush()) {
                    log::debug!("Failed to write progress for submission {}: {}", state.request_id, e);
                }
            }
        }
        progress
    })
}

/// Run one submission, writing progress and the final result pane.
///
/// Returns the outcome so the caller can pick an exit status.
pub async fn run_submission<P, O>(
    session: &Session,
    draft: &SubmissionDraft,
    progress: P,
    output: &mut O,
) -> Result<Outcome>
where
    P: Write + Send + 'static,
    O: Write,
{
    let watcher = watch_progress(session.subscribe(), progress);
    let outcome = session.run(draft).await;
    watcher.abort();

    let outcome = outcome.ok_or_else(|| anyhow!("Submission was superseded by a newer one"))?;
    writeln!(output, "{}", render(&session.state()))?;
    session.reset();

    Ok(outcome)
}

pub fn print_languages<O: Write>(output: &mut O) -> Result<()> {
    for language in runpad_client::LANGUAGES {
        let marker = if language.id == runpad_client::DEFAULT_LANGUAGE_ID {
            " (default)"
        } else {
            ""
        };
        writeln!(output, "{:>4}  {}{}", language.id, language.name, marker)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use judge0_mock::{CreateBehavior, MockServer, ServiceFixture};
    use runpad_client::{ClientConfig, SubmissionClientFactory};
    use std::sync::Arc;

    fn session_for(address: String) -> Session {
        let client = SubmissionClientFactory::create_http_client(ClientConfig::new(address))
            .unwrap();
        Session::new(Arc::from(client))
    }

    #[tokio::test]
    async fn test_run_submission_prints_result() {
        let server = MockServer::new().start().await.unwrap();
        let session = session_for(server.address());

        let mut output = Vec::new();
        let outcome = run_submission(
            &session,
            &SubmissionDraft::default(),
            std::io::sink(),
            &mut output,
        )
        .await
        .unwrap();

        assert!(!outcome.is_error());
        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed, "Output: Accepted\nFinished in 0.01 ms\nHello World!\n");

        server.shutdown();
    }

    #[tokio::test]
    async fn test_run_submission_prints_error() {
        let fixture = ServiceFixture::create_test_fixture().with_create(CreateBehavior::Fail {
            status: 500,
            body: "boom".to_string(),
        });
        let server = MockServer::with_fixture(fixture).start().await.unwrap();
        let session = session_for(server.address());

        let mut output = Vec::new();
        let outcome = run_submission(
            &session,
            &SubmissionDraft::default(),
            std::io::sink(),
            &mut output,
        )
        .await
        .unwrap();

        assert!(outcome.is_error());
        let printed = String::from_utf8(output).unwrap();
        assert!(printed.starts_with("Output: Error\n"));
        assert!(printed.contains("boom"));

        server.shutdown();
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[tokio::test]
    async fn test_progress_write_failure_does_not_stop_submission() {
        let server = MockServer::new().start().await.unwrap();
        let session = session_for(server.address());

        let mut output = Vec::new();
        let outcome = run_submission(&session, &SubmissionDraft::default(), BrokenPipe, &mut output)
            .await
            .unwrap();

        assert!(!outcome.is_error());
        assert!(String::from_utf8(output).unwrap().contains("Hello World!"));

        server.shutdown();
    }

    #[test]
    fn test_print_languages_marks_default() {
        let mut output = Vec::new();
        print_languages(&mut output).unwrap();

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("  52  C (default)\n"));
        assert_eq!(printed.lines().count(), runpad_client::LANGUAGES.len());
    }
}
