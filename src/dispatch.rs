//! Runs units of work on the host or on an offload context.
//!
//! Nothing in this crate allocates or mutates shared state, so the same
//! code can run in either place. The offload context is a scoped worker
//! thread; [`dispatch()`] waits for it and hands back the result.

use std::ffi::{OsString};
use std::fmt;
use std::str::{FromStr};

use log::{debug, trace};

use super::{Error};

/// The environment variable read by [`Target::from_env()`].
pub const ENV_VAR: &str = "SUBMDSPAN_DISPATCH";

/// Where [`dispatch()`] runs a unit of work.
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Target {
    /// On the calling thread.
    #[default]
    Host,

    /// On a separate execution context.
    Offload,
}

impl Target {
    /// Reads [`ENV_VAR`]. Unset means [`Target::Host`].
    pub fn from_env() -> Result<Self, Error> {
        Self::from_var(std::env::var_os(ENV_VAR))
    }

    fn from_var(value: Option<OsString>) -> Result<Self, Error> {
        match value.map(OsString::into_string) {
            None => Ok(Target::Host),
            Some(Ok(s)) => s.parse(),
            Some(Err(s)) => Err(Error::UnknownTarget(s.to_string_lossy().into_owned())),
        }
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "host" => Ok(Target::Host),
            "offload" => Ok(Target::Offload),
            _ => Err(Error::UnknownTarget(s.to_owned())),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Target::Host => "host",
            Target::Offload => "offload",
        })
    }
}

/// Runs `work` on `target`, waits for it, and returns its result.
///
/// If `work` panics, so does `dispatch()`, with the same payload.
///
/// ```
/// use submdspan::dispatch::{Target, dispatch};
/// assert_eq!(dispatch(Target::Offload, || 6 * 7), 42);
/// ```
pub fn dispatch<R: Send>(target: Target, work: impl FnOnce() -> R + Send) -> R {
    debug!("Dispatching to {}", target);
    let result = match target {
        Target::Host => work(),
        Target::Offload => std::thread::scope(|scope| {
            match scope.spawn(work).join() {
                Ok(result) => result,
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }),
    };
    trace!("Finished on {}", target);
    result
}

// ----------------------------------------------------------------------------
