//! Fixed-point pass control.
//!
//! Each pass may discover new boundary resources, because including a module
//! can pull in further modules carrying their own build info. Convergence is
//! reached by re-running full passes until a pass produces no registry
//! change. A defensive pass cap turns a pathological non-converging graph
//! into a hard error instead of an endless loop.

use tracing::debug;

/// Default maximum number of additional passes before giving up.
pub const MAX_ADDITIONAL_PASSES: usize = 25;

/// Decides whether the pipeline must run another complete compilation pass.
#[derive(Debug)]
pub struct PassController {
    needs_additional_pass: bool,
    granted_passes: usize,
    max_passes: usize,
}

impl Default for PassController {
    fn default() -> Self {
        Self::new()
    }
}

impl PassController {
    pub fn new() -> Self {
        Self::with_max_passes(MAX_ADDITIONAL_PASSES)
    }

    pub fn with_max_passes(max_passes: usize) -> Self {
        Self {
            needs_additional_pass: false,
            granted_passes: 0,
            max_passes,
        }
    }

    /// Request another pass. Called by the resolution step when the registry
    /// changed during the current pass.
    pub fn request(&mut self) {
        self.needs_additional_pass = true;
    }

    /// Answer the pipeline's additional-pass query and reset the flag.
    ///
    /// Errors once the pass cap is exhausted: at that point the reference
    /// graph is not converging and the build must fail rather than loop.
    pub fn take(&mut self) -> crate::Result<bool> {
        let run_again = std::mem::take(&mut self.needs_additional_pass);
        if run_again {
            self.granted_passes += 1;
            debug!(pass = self.granted_passes, "additional pass requested");
            if self.granted_passes > self.max_passes {
                return Err(crate::Error::PassLimitExceeded(self.max_passes));
            }
        }
        Ok(run_again)
    }

    /// Number of additional passes granted so far.
    pub fn granted_passes(&self) -> usize {
        self.granted_passes
    }
}
