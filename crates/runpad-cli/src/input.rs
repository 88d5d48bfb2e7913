use anyhow::{Context, Result};
use runpad_client::{SubmissionDraft, DEFAULT_SOURCE};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncReadExt;

/// Path that stands for standard input
pub const STDIN_PATH: &str = "-";

/// Read source code from a file, standard input (`-`), or fall back to the
/// built-in sample program
pub async fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        None => Ok(DEFAULT_SOURCE.to_string()),
        Some(path) if path == Path::new(STDIN_PATH) => {
            let mut source = String::new();
            tokio::io::stdin()
                .read_to_string(&mut source)
                .await
                .context("Failed to read source code from standard input")?;
            Ok(source)
        }
        Some(path) => fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read source file '{}'", path.display())),
    }
}

/// Program input given inline or from a file; empty when neither is set
pub async fn read_program_input(inline: Option<&str>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = inline {
        return Ok(text.to_string());
    }

    match file {
        Some(path) => fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read stdin file '{}'", path.display())),
        None => Ok(String::new()),
    }
}

pub async fn build_draft(
    file: Option<&Path>,
    language_id: i64,
    stdin: Option<&str>,
    stdin_file: Option<&Path>,
) -> Result<SubmissionDraft> {
    let source = read_source(file).await?;
    let stdin = read_program_input(stdin, stdin_file).await?;
    Ok(SubmissionDraft::new(source, language_id).with_stdin(stdin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_default_source() {
        let source = read_source(None).await.unwrap();
        assert_eq!(source, DEFAULT_SOURCE);
    }

    #[tokio::test]
    async fn test_draft_from_files() {
        let mut source = NamedTempFile::new().unwrap();
        write!(source, "print(input())").unwrap();
        let mut stdin = NamedTempFile::new().unwrap();
        writeln!(stdin, "42").unwrap();

        let draft = build_draft(Some(source.path()), 71, None, Some(stdin.path()))
            .await
            .unwrap();
        assert_eq!(draft.source, "print(input())");
        assert_eq!(draft.language_id, 71);
        assert_eq!(draft.stdin, "42\n");
    }

    #[tokio::test]
    async fn test_inline_stdin_wins() {
        let stdin = read_program_input(Some("inline"), Some(Path::new("/nonexistent")))
            .await
            .unwrap();
        assert_eq!(stdin, "inline");

        let stdin = read_program_input(None, None).await.unwrap();
        assert!(stdin.is_empty());
    }

    #[tokio::test]
    async fn test_missing_source_file() {
        let err = read_source(Some(Path::new("/nonexistent/main.c")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read source file"));
    }
}
