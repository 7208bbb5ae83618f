//! Cycle accounting

use crate::bus::Bus;
use crate::device::Device;

/// Cycle cost of a single instruction step
pub type Cycles = u32;

impl<B: Bus> Device<B> {
    /// Step instructions until at least `budget` cycles have elapsed.
    /// Returns the cycles actually spent, which may overshoot by one
    /// instruction; useful for hosts that time-slice emulated cycles.
    pub fn run(&mut self, budget: Cycles) -> Cycles {
        let mut spent = 0;
        while spent < budget {
            spent += self.step();
        }
        spent
    }
}
