//! Tampering scenarios.
//!
//! [`attempt_tamper`] runs the two write attempts a subject can make
//! against its own view: flipping one flag, or swapping in another
//! role's whole permission set. [`run_demo`] replays the canonical
//! three-user walkthrough on top of it.

use crate::builtin::{ADMIN, GUEST};
use crate::report::text_lines;
use rolebook_auth::{AuthError, BindMode, PermissionView, RoleRegistry};
use rolebook_types::Subject;

/// A single write attempt against a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tamper {
    /// Set one capability flag.
    SetFlag {
        /// Capability to write.
        capability: String,
        /// Value to write.
        value: bool,
    },
    /// Replace the view's permission set with another role's set.
    Reassign {
        /// Role whose set should be swapped in.
        role: String,
    },
}

/// Outcome of one [`Tamper`] attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TamperOutcome {
    /// The attempt.
    pub attempt: Tamper,
    /// `Err` carries the rejection; `Ok` would mean the write went through.
    pub result: Result<(), AuthError>,
}

/// Runs `attempts` against `view` in order.
///
/// # Errors
///
/// Returns [`AuthError::UnknownRole`] if a reassign names a role missing
/// from `registry`; no further attempts are made.
pub fn attempt_tamper(
    registry: &RoleRegistry,
    view: &PermissionView,
    attempts: &[Tamper],
) -> Result<Vec<TamperOutcome>, AuthError> {
    let mut outcomes = Vec::with_capacity(attempts.len());

    for attempt in attempts {
        let result = match attempt {
            Tamper::SetFlag { capability, value } => view.try_set_flag(capability, *value),
            Tamper::Reassign { role } => view.try_reassign(registry.lookup(role)?),
        };
        outcomes.push(TamperOutcome {
            attempt: attempt.clone(),
            result,
        });
    }

    Ok(outcomes)
}

/// One line of demo output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoLine {
    /// Regular report output.
    Out(String),
    /// A rejected write.
    Rejected(String),
}

/// Replays the admin/guest walkthrough.
///
/// Hazard is bound to `admin`, Kante and Baddie to `guest`. Baddie tries
/// to swap in the `admin` set and Kante tries to grant `del`; both are
/// rejected and the final reports match the initial ones.
///
/// # Errors
///
/// Returns [`AuthError::UnknownRole`] if `registry` lacks `admin` or `guest`.
pub fn run_demo(registry: &RoleRegistry, mode: BindMode) -> Result<Vec<DemoLine>, AuthError> {
    let hazard = PermissionView::bind_role(
        Subject::new("Hazard").with_attr("age", 18).with_attr("sex", "male"),
        registry.lookup_role(ADMIN)?,
        mode,
    );
    let kante = PermissionView::bind_role(
        Subject::new("Kante").with_attr("age", 26).with_attr("sex", "male"),
        registry.lookup_role(GUEST)?,
        mode,
    );
    let baddie = PermissionView::bind_role(
        Subject::new("Baddie").with_attr("age", 26).with_attr("sex", "male"),
        registry.lookup_role(GUEST)?,
        mode,
    );

    let mut lines = Vec::new();
    for view in [&hazard, &kante, &baddie] {
        lines.extend(text_lines(view).map(DemoLine::Out));
    }

    let attempts = [
        (
            &baddie,
            Tamper::Reassign {
                role: ADMIN.to_string(),
            },
        ),
        (
            &kante,
            Tamper::SetFlag {
                capability: "del".to_string(),
                value: true,
            },
        ),
    ];

    for (view, attempt) in attempts {
        for outcome in attempt_tamper(registry, view, std::slice::from_ref(&attempt))? {
            if let Err(err) = outcome.result {
                lines.push(DemoLine::Rejected(format!(
                    "user {} tamper rejected: {err}",
                    view.subject().name()
                )));
            }
        }
        lines.extend(text_lines(view).map(DemoLine::Out));
    }

    Ok(lines)
}
