//! Stateful incremental IR emission: address allocation, label generation,
//! and the per-function register-usage reset.
//!
//! A stateful struct accumulating output incrementally rather than building
//! a tree and lowering it in one shot, adapted from a CFG/local-table
//! builder shape to the flat register/temp scheme this IR actually uses.

use crate::step::{Addr, Label, Step};
use tacc_util::{define_idx, IndexVec, Symbol};

define_idx!(StepId);

/// Non-semantic emitter knobs: the starting label and synthetic-temp
/// counters. Lets a host emitting several translation units into one
/// address space offset them so labels/temps don't collide; a single-unit
/// caller uses the defaults and sees spec-exact `L0, a0, ...` numbering.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmitterOptions {
    pub start_label: u32,
    pub start_temp: u32,
}

/// Accumulates [`Step`]s and owns the address/label counters the emitter
/// threads through a lowering pass. Steps are stored in an
/// [`IndexVec`]`<StepId, Step>` rather than a bare `Vec` so a future pass
/// keeping its own references to emitted steps
/// (e.g. a backpatcher) gets a collision-proof handle instead of a raw
/// `usize`; the externally observable artifact is still the plain `Vec<Step>`
/// [`Self::finish`] returns.
pub struct IrBuilder {
    steps: IndexVec<StepId, Step>,
    /// Free/used flag for `A, B, C`, in that order.
    reserved_used: [bool; 3],
    temp_count: u32,
    label_count: u32,
}

impl IrBuilder {
    pub fn new(options: EmitterOptions) -> Self {
        Self {
            steps: IndexVec::new(),
            reserved_used: [false; 3],
            temp_count: options.start_temp,
            label_count: options.start_label,
        }
    }

    /// Returns the first free reserved register, if any; otherwise
    /// allocates the next synthetic temporary. Marks the result used.
    pub fn allocate_addr(&mut self) -> Addr {
        for (i, used) in self.reserved_used.iter_mut().enumerate() {
            if !*used {
                *used = true;
                return [Addr::A, Addr::B, Addr::C][i];
            }
        }
        let addr = Addr::Temp(self.temp_count);
        self.temp_count += 1;
        addr
    }

    /// Releases `addr` so a later [`Self::allocate_addr`] call can reuse it.
    /// Synthetic temporaries are never reused (the counter only grows), and
    /// [`Addr::Ret`]/[`Addr::Global`] are never pooled, so freeing either is
    /// a no-op.
    pub fn free(&mut self, addr: Addr) {
        match addr {
            Addr::A => self.reserved_used[0] = false,
            Addr::B => self.reserved_used[1] = false,
            Addr::C => self.reserved_used[2] = false,
            Addr::Temp(_) | Addr::Ret | Addr::Global(_) => {}
        }
    }

    /// Resets the reserved-register usage table and synthetic-temp counter
    /// at function entry, so a fresh function starts with `A/B/C` free
    /// rather than inheriting whatever the previous function left used.
    /// The label counter is NOT reset: labels are never reused across
    /// functions.
    pub fn reset_function_registers(&mut self) {
        self.reserved_used = [false; 3];
        self.temp_count = 0;
    }

    /// Allocates the next synthetic label `L<N>`.
    pub fn generate_label(&mut self) -> Label {
        let label = Symbol::intern(&format!("L{}", self.label_count));
        self.label_count += 1;
        label
    }

    pub fn emit(&mut self, step: Step) -> StepId {
        self.steps.push(step)
    }

    pub fn finish(self) -> Vec<Step> {
        self.steps
            .into_iter_enumerated()
            .map(|(_, step)| step)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_reserved_registers_before_temporaries() {
        let mut b = IrBuilder::new(EmitterOptions::default());
        assert_eq!(b.allocate_addr(), Addr::A);
        assert_eq!(b.allocate_addr(), Addr::B);
        assert_eq!(b.allocate_addr(), Addr::C);
        assert_eq!(b.allocate_addr(), Addr::Temp(0));
        assert_eq!(b.allocate_addr(), Addr::Temp(1));
    }

    #[test]
    fn freeing_a_reserved_register_lets_it_be_reused() {
        let mut b = IrBuilder::new(EmitterOptions::default());
        let a = b.allocate_addr();
        let _c = b.allocate_addr();
        b.free(a);
        assert_eq!(b.allocate_addr(), Addr::A);
    }

    #[test]
    fn temporaries_are_never_reused() {
        let mut b = IrBuilder::new(EmitterOptions::default());
        let _ = b.allocate_addr();
        let _ = b.allocate_addr();
        let _ = b.allocate_addr();
        let t0 = b.allocate_addr();
        b.free(t0);
        assert_eq!(b.allocate_addr(), Addr::Temp(1));
    }

    #[test]
    fn reset_clears_registers_and_temp_counter_but_not_labels() {
        let mut b = IrBuilder::new(EmitterOptions::default());
        let _ = b.allocate_addr();
        let _ = b.allocate_addr();
        let _ = b.allocate_addr();
        let _ = b.allocate_addr(); // a0
        let l0 = b.generate_label();
        assert_eq!(l0.as_str(), "L0");

        b.reset_function_registers();
        assert_eq!(b.allocate_addr(), Addr::A);
        assert_eq!(b.allocate_addr(), Addr::B);
        assert_eq!(b.allocate_addr(), Addr::C);
        assert_eq!(b.allocate_addr(), Addr::Temp(0));

        let l1 = b.generate_label();
        assert_eq!(l1.as_str(), "L1");
    }

    #[test]
    fn labels_strictly_increase() {
        let mut b = IrBuilder::new(EmitterOptions::default());
        assert_eq!(b.generate_label().as_str(), "L0");
        assert_eq!(b.generate_label().as_str(), "L1");
        assert_eq!(b.generate_label().as_str(), "L2");
    }

    #[test]
    fn emit_returns_sequential_step_ids() {
        use tacc_util::Idx;
        let mut b = IrBuilder::new(EmitterOptions::default());
        let first = b.emit(Step::Return);
        let second = b.emit(Step::Return);
        assert_eq!(first.index() + 1, second.index());
    }

    #[test]
    fn start_offsets_are_honoured() {
        let mut b = IrBuilder::new(EmitterOptions {
            start_label: 10,
            start_temp: 3,
        });
        assert_eq!(b.generate_label().as_str(), "L10");
        let _ = b.allocate_addr();
        let _ = b.allocate_addr();
        let _ = b.allocate_addr();
        assert_eq!(b.allocate_addr(), Addr::Temp(3));
    }
}
