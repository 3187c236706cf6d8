//! Bounded busy-wait on a device status flag.

use embedded_hal::delay::DelayNs;

/// Result of probing a device's busy flag once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeStatus {
    Ready,
    Busy,
    /// The status could not be read from the bus.
    ProbeFailed,
}

impl ProbeStatus {
    /// A failed probe counts as busy, so a bus glitch keeps the loop polling
    /// instead of reporting a conversion as complete.
    pub fn is_busy(self) -> bool {
        match self {
            ProbeStatus::Ready => false,
            ProbeStatus::Busy | ProbeStatus::ProbeFailed => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum PollOutcome {
    Ready,
    TimedOut,
}

/// Delay between probes and the number of busy results tolerated at one
/// polling site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollBudget {
    pub delay_ms: u32,
    pub max_retries: u8,
}

impl PollBudget {
    pub const fn new(delay_ms: u32, max_retries: u8) -> Self {
        Self {
            delay_ms,
            max_retries,
        }
    }

    /// Longest time [`poll`] can block with this budget, in milliseconds.
    ///
    /// The loop times out on the busy result after `max_retries`, having
    /// slept once per busy result.
    pub const fn worst_case_ms(&self) -> u32 {
        self.delay_ms * (self.max_retries as u32 + 1)
    }

    pub fn poll(
        &self,
        delay: &mut impl DelayNs,
        status: impl FnMut() -> ProbeStatus,
    ) -> PollOutcome {
        poll(status, delay, self.delay_ms, self.max_retries)
    }
}

/// Probe `status` until it reports ready, sleeping `delay_ms` after every
/// busy result.
///
/// Returns [`PollOutcome::TimedOut`] once the number of busy results is
/// strictly greater than `max_retries`.
pub fn poll(
    mut status: impl FnMut() -> ProbeStatus,
    delay: &mut impl DelayNs,
    delay_ms: u32,
    max_retries: u8,
) -> PollOutcome {
    let mut retries: u32 = 0;
    loop {
        let probe = status();
        if !probe.is_busy() {
            return PollOutcome::Ready;
        }
        if probe == ProbeStatus::ProbeFailed {
            log::debug!("status probe failed, treating as busy");
        }

        delay.delay_ms(delay_ms);
        retries += 1;
        log::trace!("busy wait... {retries}");
        if retries > u32::from(max_retries) {
            return PollOutcome::TimedOut;
        }
    }
}
