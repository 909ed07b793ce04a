//! Contact status flags and the derived contact state

use serde::{Deserialize, Serialize};

use crate::channel::FieldStream;
use crate::error::FEAResult;

/// Derived contact state, recomputed from [`ContactStateFlags`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactState {
    /// Projection within the segment, surfaces apart
    Released,
    /// In contact, but the multiplier asks the constraint to open
    PendingRelease,
    InContact,
    /// Projection outside the segment
    OutOfBounds,
}

/// The five contact booleans
///
/// `in_contact` implies `in_bounds`, `was_in_contact` and not
/// `to_be_released`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactStateFlags {
    pub in_bounds: bool,
    pub was_in_contact: bool,
    pub should_be_released: bool,
    pub to_be_released: bool,
    pub in_contact: bool,
}

impl ContactStateFlags {
    /// Flags before the first step
    pub fn seeded(initially_in_contact: bool) -> Self {
        Self {
            in_bounds: true,
            was_in_contact: initially_in_contact,
            should_be_released: false,
            to_be_released: false,
            in_contact: initially_in_contact,
        }
    }

    /// Release request from the trial normal multiplier
    pub fn request_release(&mut self, lambda: f64, tensile_strength: f64, force_tol: f64) {
        self.should_be_released = lambda <= -(tensile_strength + force_tol);
    }

    /// Re-derive the contact status at a converged configuration
    pub fn evaluate(&mut self, xi: f64, gap: f64, gap_tol: f64) {
        self.in_bounds = xi > 0.0 && xi < 1.0;
        self.was_in_contact = gap < gap_tol;
        self.to_be_released = self.should_be_released || !self.in_bounds;
        self.in_contact = self.was_in_contact && !self.to_be_released && self.in_bounds;
    }

    pub fn state(&self) -> ContactState {
        if !self.in_bounds {
            ContactState::OutOfBounds
        } else if self.in_contact && self.should_be_released {
            ContactState::PendingRelease
        } else if self.in_contact {
            ContactState::InContact
        } else {
            ContactState::Released
        }
    }

    pub fn send_self(&self, stream: &mut FieldStream) {
        stream.push_flag(self.in_bounds);
        stream.push_flag(self.was_in_contact);
        stream.push_flag(self.should_be_released);
        stream.push_flag(self.to_be_released);
        stream.push_flag(self.in_contact);
    }

    pub fn recv_self(&mut self, stream: &mut FieldStream) -> FEAResult<()> {
        *self = Self {
            in_bounds: stream.pull_flag()?,
            was_in_contact: stream.pull_flag()?,
            should_be_released: stream.pull_flag()?,
            to_be_released: stream.pull_flag()?,
            in_contact: stream.pull_flag()?,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_flags() {
        let flags = ContactStateFlags::seeded(true);
        assert!(flags.in_contact);
        assert_eq!(flags.state(), ContactState::InContact);
        let flags = ContactStateFlags::seeded(false);
        assert_eq!(flags.state(), ContactState::Released);
    }

    #[test]
    fn test_closing_gap_enters_contact() {
        let mut flags = ContactStateFlags::seeded(false);
        flags.evaluate(0.4, 1e-12, 1e-10);
        assert!(flags.in_contact);
        flags.evaluate(0.4, 1e-3, 1e-10);
        assert!(!flags.in_contact);
    }

    #[test]
    fn test_release_request() {
        let mut flags = ContactStateFlags::seeded(true);
        flags.request_release(-2.0, 1.0, 1e-8);
        assert!(flags.should_be_released);
        assert_eq!(flags.state(), ContactState::PendingRelease);
        flags.evaluate(0.5, 0.0, 1e-10);
        assert!(flags.to_be_released);
        assert!(!flags.in_contact);
        assert_eq!(flags.state(), ContactState::Released);
    }

    #[test]
    fn test_out_of_bounds_never_in_contact() {
        for xi in [-0.2, 0.0, 1.0, 1.4] {
            let mut flags = ContactStateFlags::seeded(true);
            flags.evaluate(xi, -1e-3, 1e-10);
            assert!(!flags.in_contact);
            assert!(flags.to_be_released);
            assert_eq!(flags.state(), ContactState::OutOfBounds);
        }
    }

    #[test]
    fn test_invariant_holds_for_all_inputs() {
        for &release in &[false, true] {
            for &xi in &[-0.1, 0.5, 1.1] {
                for &gap in &[-1.0, 0.0, 1.0] {
                    let mut flags = ContactStateFlags::seeded(false);
                    flags.should_be_released = release;
                    flags.evaluate(xi, gap, 1e-10);
                    if flags.in_contact {
                        assert!(flags.in_bounds && flags.was_in_contact && !flags.to_be_released);
                    }
                }
            }
        }
    }

    #[test]
    fn test_truncated_stream_leaves_flags_unchanged() {
        let mut flags = ContactStateFlags::seeded(true);
        let mut stream = FieldStream::new();
        stream.push_flag(false);
        stream.push_flag(false);
        assert!(flags.recv_self(&mut stream).is_err());
        assert_eq!(flags, ContactStateFlags::seeded(true));
    }
}
