//! `clock` defines the basic interface a monitored board provides to the
//! bus monitor. The monitor never touches the hardware directly. Instead it
//! updates `Signals` and asks the board to run a cycle which drives and
//! samples every line once.

use signals::Signals;

/// Clock defines the trait for a board the monitor can drive.
pub trait Clock {
    /// `tick` runs a single bus cycle. Any lines the monitor asked to drive
    /// in `signals` are placed on the bus and the observed address/data
    /// values are written back. If a step was requested and this cycle
    /// completed it `signals.step` is reset to `StepRequest::None`.
    fn tick(&mut self, signals: &mut Signals);

    /// `steppable` indicates whether the processor is currently in a state
    /// where single cycle/instruction stepping means anything.
    fn steppable(&self, signals: &Signals) -> bool;
}

/// Board pairs a `Clock` with the `Signals` it drives so both can be handed
/// around as one context.
#[derive(Debug, Default)]
pub struct Board<C: Clock> {
    /// The line state.
    pub signals: Signals,

    /// The clocking logic.
    pub clock: C,
}

impl<C: Clock> Board<C> {
    /// Create a new `Board` around the given clock with power on signals.
    pub fn new(clock: C) -> Self {
        Self {
            signals: Signals::default(),
            clock,
        }
    }

    /// Run one bus cycle.
    pub fn tick(&mut self) {
        self.clock.tick(&mut self.signals);
    }

    /// See `Clock::steppable`.
    pub fn steppable(&self) -> bool {
        self.clock.steppable(&self.signals)
    }
}
