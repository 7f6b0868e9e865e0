use pipetrace_core::trace::{ControlSignals, CycleSnapshot, Encoding, Stage, Trace};

/// `addi x1, x0, 5`; any non-no-op encoding works for retirement.
pub const ADDI: u32 = 0x0050_0093;

pub struct SnapshotBuilder(CycleSnapshot);

impl SnapshotBuilder {
    pub fn new(cycle: u64) -> Self {
        Self(CycleSnapshot::zeroed(cycle))
    }

    pub fn pc(mut self, pc: u32) -> Self {
        self.0.pc = pc;
        self
    }

    pub fn reg(mut self, idx: usize, val: u32) -> Self {
        self.0.registers.set(idx, val);
        self
    }

    pub fn mem(mut self, addr: u32, val: u32) -> Self {
        let _ = self.0.memory.insert(addr, val);
        self
    }

    pub fn stage(mut self, stage: Stage, inst: u32) -> Self {
        self.0.pipeline.stage_mut(stage).instruction = Encoding(inst);
        self
    }

    /// Puts a real instruction in write-back.
    pub fn retire(self, inst: u32) -> Self {
        self.stage(Stage::Wb, inst)
    }

    pub fn control(mut self, ctrl: ControlSignals) -> Self {
        self.0.control_signals = ctrl;
        self
    }

    pub fn build(self) -> CycleSnapshot {
        self.0
    }
}

/// Wraps 0-based snapshots in a trace.
pub fn trace_of(snapshots: Vec<CycleSnapshot>) -> Trace {
    Trace::new(snapshots).unwrap()
}

/// A trace of `len` cycles in which every cycle changes something.
///
/// Cycle `i` has `pc = 4 * i`, `x1 = i`, `mem[4 * (i % 16)] = i + 1`, and retires an
/// instruction from cycle 4 on (the pipeline fill).
pub fn linear_trace(len: usize) -> Trace {
    let snapshots = (0..len)
        .map(|i| {
            let n = i as u32;
            let mut b = SnapshotBuilder::new(i as u64)
                .pc(n * 4)
                .reg(1, n)
                .mem(4 * (n % 16), n + 1)
                .stage(Stage::If, ADDI);
            if i >= 4 {
                b = b.retire(ADDI);
            }
            b.build()
        })
        .collect();
    trace_of(snapshots)
}

/// Five cycles; only index 3 has a real instruction in write-back. CPI 5.0, IPC 0.2 at the end.
pub fn fill_trace() -> Trace {
    trace_of(
        (0..5)
            .map(|i| {
                let b = SnapshotBuilder::new(i);
                let b = if i == 3 { b.retire(ADDI) } else { b };
                b.build()
            })
            .collect(),
    )
}
