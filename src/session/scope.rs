//! Scoped planner-setting override
//!
//! `KnobOverride` resets the session's planner settings, disables the
//! requested knobs, and restores defaults when released or dropped. The
//! restore runs on every exit path: normal release, an early `?` return
//! while the override is held, or a failure partway through acquisition.

use std::collections::BTreeSet;

use super::errors::SessionResult;
use super::PlannerSession;
use crate::observability::{Event, Logger};

/// Guard holding a session with some strategies disabled
pub struct KnobOverride<'a, S: PlannerSession + ?Sized> {
    session: &'a mut S,
    disabled: Vec<&'static str>,
    released: bool,
}

impl<'a, S: PlannerSession + ?Sized> KnobOverride<'a, S> {
    /// Reset the session and disable every knob in `knobs`.
    pub fn acquire(session: &'a mut S, knobs: &BTreeSet<&'static str>) -> SessionResult<Self> {
        session.reset_knobs()?;

        // From here on the guard owns the session, so a failing
        // set_knob still restores defaults on drop.
        let mut guard = Self {
            session,
            disabled: Vec::with_capacity(knobs.len()),
            released: false,
        };
        for knob in knobs {
            guard.session.set_knob(knob, false)?;
            guard.disabled.push(*knob);
        }
        Ok(guard)
    }

    /// Knobs currently disabled by this override
    pub fn disabled(&self) -> &[&'static str] {
        &self.disabled
    }

    /// Borrow the overridden session
    pub fn session(&mut self) -> &mut S {
        &mut *self.session
    }

    /// Restore defaults and surface any restore failure
    pub fn release(mut self) -> SessionResult<()> {
        self.released = true;
        self.session.reset_knobs()
    }
}

impl<S: PlannerSession + ?Sized> Drop for KnobOverride<'_, S> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.session.reset_knobs() {
            let knobs = self.disabled.join(",");
            let reason = e.to_string();
            Logger::error(
                Event::KnobResetFailed.as_str(),
                &[("knobs", knobs.as_str()), ("reason", reason.as_str())],
            );
        }
    }
}
