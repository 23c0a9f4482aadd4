//! Sequential invocation of the external `glo-annotate` tool.
//!
//! One child process runs per club index, ascending from 1, each writing
//! `<club>.glo` into the destination directory. The loop is synchronous and
//! blocking and stops at the first non-zero exit. The annotation logic
//! itself lives in the external executable; this module only sequences it.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Program name of the bundled annotator executable.
pub const ANNOTATOR_PROGRAM: &str = "glo-annotate";

/// Everything needed to start a run, resolved at trigger time.
#[derive(Clone, Debug)]
pub struct RunRequest {
    /// The `.glo` program to annotate.
    pub glo: PathBuf,
    /// The Audacity project supplying annotation input.
    pub audacity: PathBuf,
    /// Directory that receives one `<club>.glo` per club.
    pub destination: PathBuf,
    /// Number of clubs; always positive.
    pub clubs: u32,
}

/// Club count input that cannot start a run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClubCountError {
    /// The text does not parse as an integer.
    #[error("Club count `{0}` is not a number")]
    NotANumber(String),
    /// Parsed, but zero or negative.
    #[error("Club count must be positive")]
    NotPositive,
}

/// Parse the club count text field; only positive integers pass.
pub fn parse_club_count(text: &str) -> Result<u32, ClubCountError> {
    let trimmed = text.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| ClubCountError::NotANumber(trimmed.to_string()))?;
    if value <= 0 {
        return Err(ClubCountError::NotPositive);
    }
    u32::try_from(value).map_err(|_| ClubCountError::NotANumber(trimmed.to_string()))
}

/// Captured result of one annotator invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    /// Whether the child exited with status zero.
    pub success: bool,
    /// Combined stdout/stderr text; empty when the bytes were not UTF-8.
    pub text: String,
}

/// Seam for launching the annotator so the loop stays testable and a future
/// asynchronous runner would not change the loop itself.
pub trait CommandRunner {
    /// Run the program to completion and capture its output.
    fn run(&mut self, program: &Path, args: &[OsString]) -> io::Result<Invocation>;
}

/// Launches real child processes, blocking until each exits.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&mut self, program: &Path, args: &[OsString]) -> io::Result<Invocation> {
        let output = Command::new(program).args(args).output()?;
        let mut bytes = output.stdout;
        bytes.extend_from_slice(&output.stderr);
        // Exit status alone decides success; undecodable output degrades to "".
        let text = String::from_utf8(bytes).unwrap_or_default();
        Ok(Invocation {
            success: output.status.success(),
            text,
        })
    }
}

/// A run that did not finish all clubs.
#[derive(Debug, Error)]
pub enum RunError {
    /// The child process could not be started at all.
    #[error("Could not launch {program} for club {club}: {source}")]
    Launch {
        /// Annotator path that failed to spawn.
        program: PathBuf,
        /// 1-based club index being processed.
        club: u32,
        /// Underlying spawn error.
        source: io::Error,
    },
    /// The annotator exited non-zero for a club.
    #[error("Club {club} failed: {output}")]
    ClubFailed {
        /// 1-based club index that failed.
        club: u32,
        /// Combined stdout/stderr captured from the child.
        output: String,
    },
}

/// Resolve the annotator executable.
///
/// Prefers a copy shipped beside the current executable and falls back to
/// the bare program name so `PATH` resolution applies.
pub fn annotator_path() -> PathBuf {
    let bundled = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(ANNOTATOR_PROGRAM)));
    match bundled {
        Some(path) if path.is_file() => path,
        _ => PathBuf::from(ANNOTATOR_PROGRAM),
    }
}

/// Invoke the annotator once per club, in ascending order, never in parallel.
///
/// Stops at the first failure; clubs after a failing one never run and no
/// failed club is retried.
pub fn run_clubs<R: CommandRunner>(
    request: &RunRequest,
    annotator: &Path,
    runner: &mut R,
) -> Result<(), RunError> {
    for club in 1..=request.clubs {
        let output_path = request.destination.join(format!("{club}.glo"));
        let args = invocation_args(request, club, &output_path);
        tracing::info!("Annotating club {club} into {}", output_path.display());
        let invocation = runner
            .run(annotator, &args)
            .map_err(|source| RunError::Launch {
                program: annotator.to_path_buf(),
                club,
                source,
            })?;
        if !invocation.success {
            tracing::warn!("Annotator exited non-zero for club {club}");
            return Err(RunError::ClubFailed {
                club,
                output: invocation.text,
            });
        }
    }
    Ok(())
}

fn invocation_args(request: &RunRequest, club: u32, output_path: &Path) -> Vec<OsString> {
    vec![
        OsString::from("-audacity"),
        request.audacity.clone().into(),
        OsString::from("-input"),
        request.glo.clone().into(),
        OsString::from("-club"),
        OsString::from(club.to_string()),
        OsString::from("-output"),
        output_path.as_os_str().to_owned(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn club_count_accepts_positive_integers() {
        assert_eq!(parse_club_count("3"), Ok(3));
        assert_eq!(parse_club_count(" 12 "), Ok(12));
    }

    #[test]
    fn club_count_rejects_zero_and_negatives() {
        assert_eq!(parse_club_count("0"), Err(ClubCountError::NotPositive));
        assert_eq!(parse_club_count("-4"), Err(ClubCountError::NotPositive));
    }

    #[test]
    fn club_count_rejects_non_numeric_text() {
        assert_eq!(
            parse_club_count("three"),
            Err(ClubCountError::NotANumber("three".into()))
        );
        assert_eq!(
            parse_club_count(""),
            Err(ClubCountError::NotANumber(String::new()))
        );
    }

    #[test]
    fn invocation_args_follow_the_annotator_contract() {
        let request = RunRequest {
            glo: PathBuf::from("/shows/finale.glo"),
            audacity: PathBuf::from("/shows/finale.aup"),
            destination: PathBuf::from("/out"),
            clubs: 5,
        };
        let output = request.destination.join("2.glo");
        let args = invocation_args(&request, 2, &output);
        let rendered: Vec<&str> = args.iter().map(|a| a.to_str().unwrap()).collect();
        assert_eq!(
            rendered,
            [
                "-audacity",
                "/shows/finale.aup",
                "-input",
                "/shows/finale.glo",
                "-club",
                "2",
                "-output",
                "/out/2.glo",
            ]
        );
    }
}
