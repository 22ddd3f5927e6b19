//! Token compiler
//!
//! Turns the flat argument list into a [`JobSet`]. Plain tokens are channel or
//! profile identifiers; `bc <source> <album>... cb` brackets a list of album
//! slugs under one source.

use crate::types::JobSet;
use tracing::{debug, trace};

/// Token that opens an album group
pub const GROUP_OPEN: &str = "bc";

/// Token that closes an album group
pub const GROUP_CLOSE: &str = "cb";

/// Parser state while walking the token stream
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    /// Outside any group
    Normal,
    /// Just saw `bc`, the next token names the source
    AwaitingSource,
    /// Inside a group for the given source, tokens are album slugs
    WithSource(String),
}

/// Compile tokens into download jobs.
///
/// Never fails: duplicate identifiers are ignored (first wins), an empty group
/// yields no job and a group left open at end of input is closed implicitly.
pub fn compile<S: AsRef<str>>(tokens: &[S]) -> JobSet {
    let mut jobs = JobSet::default();

    let end = tokens.iter().fold(Mode::Normal, |mode, token| {
        let token = token.as_ref();
        trace!("token {:?} in {:?}", token, mode);
        step(&mut jobs, mode, token)
    });

    if let Mode::WithSource(source) = end {
        debug!("Group for '{}' left open at end of input, closing it", source);
    }

    debug!(
        "Compiled {} channel jobs and {} album groups",
        jobs.channel_jobs().len(),
        jobs.album_groups().len()
    );

    jobs
}

fn step(jobs: &mut JobSet, mode: Mode, token: &str) -> Mode {
    match mode {
        Mode::Normal if token == GROUP_OPEN => Mode::AwaitingSource,
        Mode::Normal => {
            if !jobs.insert_channel(token) {
                debug!("Ignoring duplicate identifier '{}'", token);
            }
            Mode::Normal
        }
        Mode::AwaitingSource if token == GROUP_CLOSE => {
            debug!("Ignoring empty album group");
            Mode::Normal
        }
        Mode::AwaitingSource => {
            jobs.open_group(token);
            Mode::WithSource(token.to_string())
        }
        Mode::WithSource(_) if token == GROUP_CLOSE => Mode::Normal,
        Mode::WithSource(source) => {
            jobs.push_album(&source, token);
            Mode::WithSource(source)
        }
    }
}
