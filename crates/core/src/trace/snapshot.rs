//! Per-cycle snapshot types.
//!
//! A snapshot is the ground truth for one cycle as reported by the external engine:
//! 1. **Architectural state:** Program counter, the 32-entry register file, and a sparse memory view.
//! 2. **Pipeline latches:** One record per stage; a missing stage reads as a bubble.
//! 3. **Control signals:** The decoded control lines of the cycle.
//!
//! The wire format is JSON. Encodings may arrive as hex text or as numbers, and the
//! engine latch names (`if_id`, `id_ex`, ...) are accepted as stage keys.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::constants::{DISPLAY_MEMORY_WORDS, NOP_ENCODING, REGISTER_COUNT, WORD_BYTES};
use crate::common::error::TraceError;

/// A 32-bit instruction encoding.
///
/// Serialized as eight upper-case hex digits; deserialized from either hex text
/// (with or without `0x`) or a JSON number.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "EncodingRepr", into = "String")]
pub struct Encoding(pub u32);

impl Encoding {
    /// The bubble encoding.
    pub const NOP: Self = Self(NOP_ENCODING);

    /// Returns `true` for the canonical no-op.
    #[inline]
    pub const fn is_nop(self) -> bool {
        self.0 == NOP_ENCODING
    }

    /// Parses hex text such as `"00500093"` or `"0x00500093"`.
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text
            .trim()
            .trim_start_matches("0x")
            .trim_start_matches("0X");
        if digits.is_empty() || digits.len() > 8 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self)
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Self::NOP
    }
}

impl fmt::Debug for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Encoding({:#010x})", self.0)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

impl From<Encoding> for String {
    fn from(value: Encoding) -> Self {
        value.to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EncodingRepr {
    Number(u32),
    Text(String),
}

impl TryFrom<EncodingRepr> for Encoding {
    type Error = String;

    fn try_from(repr: EncodingRepr) -> Result<Self, Self::Error> {
        match repr {
            EncodingRepr::Number(n) => Ok(Self(n)),
            EncodingRepr::Text(s) => {
                Self::parse_hex(&s).ok_or_else(|| format!("invalid instruction encoding `{s}`"))
            }
        }
    }
}

/// The 32 general-purpose registers of one cycle.
///
/// x0 is zero by convention only; the value is taken from the snapshot as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct RegisterFile([u32; REGISTER_COUNT]);

impl RegisterFile {
    /// Creates a register file from all 32 values.
    pub const fn new(values: [u32; REGISTER_COUNT]) -> Self {
        Self(values)
    }

    /// Reads a register, or `None` past x31.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<u32> {
        self.0.get(idx).copied()
    }

    /// Writes a register; indices past x31 are ignored.
    pub fn set(&mut self, idx: usize, val: u32) {
        if let Some(slot) = self.0.get_mut(idx) {
            *slot = val;
        }
    }

    /// All values in index order.
    pub const fn values(&self) -> &[u32; REGISTER_COUNT] {
        &self.0
    }

    /// Iterates `(index, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.0.iter().copied().enumerate()
    }
}

impl TryFrom<Vec<u32>> for RegisterFile {
    type Error = TraceError;

    /// Short arrays are zero-padded; more than 32 entries is an error.
    fn try_from(values: Vec<u32>) -> Result<Self, Self::Error> {
        if values.len() > REGISTER_COUNT {
            return Err(TraceError::TooManyRegisters {
                count: values.len(),
            });
        }
        let mut regs = [0; REGISTER_COUNT];
        regs[..values.len()].copy_from_slice(&values);
        Ok(Self(regs))
    }
}

impl From<RegisterFile> for Vec<u32> {
    fn from(value: RegisterFile) -> Self {
        value.0.to_vec()
    }
}

/// Sparse byte-addressed memory; absent addresses read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryView(BTreeMap<u32, u32>);

impl MemoryView {
    /// Creates an empty view.
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Effective value at `addr` (0 if absent).
    #[inline]
    pub fn read(&self, addr: u32) -> u32 {
        self.0.get(&addr).copied().unwrap_or(0)
    }

    /// Stores `val` at `addr`, returning the previous entry.
    pub fn insert(&mut self, addr: u32, val: u32) -> Option<u32> {
        self.0.insert(addr, val)
    }

    /// Iterates the present `(address, value)` entries in address order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.0.iter().map(|(&a, &v)| (a, v))
    }

    /// Iterates the present addresses in order.
    pub fn addresses(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.keys().copied()
    }

    /// Number of present entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no address is present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The display window: the lowest word-aligned addresses `0, 4, ..., 60` with their
    /// effective values.
    pub fn window(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..DISPLAY_MEMORY_WORDS as u32).map(move |i| {
            let addr = i * WORD_BYTES;
            (addr, self.read(addr))
        })
    }
}

impl FromIterator<(u32, u32)> for MemoryView {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Named pipeline stage.
///
/// Each stage also accepts its lowercase name and latch name on input (`mem_wb` for
/// `MEM`). A snapshot that names one stage twice, e.g. both `"MEM"` and `"mem_wb"`,
/// keeps the record that appears last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Instruction fetch (IF/ID latch).
    #[serde(rename = "IF", alias = "if", alias = "if_id")]
    If,
    /// Instruction decode (ID/EX latch).
    #[serde(rename = "ID", alias = "id", alias = "id_ex")]
    Id,
    /// Execute (EX/MEM latch).
    #[serde(rename = "EX", alias = "ex", alias = "ex_mem")]
    Ex,
    /// Memory access (MEM/WB latch).
    #[serde(rename = "MEM", alias = "mem", alias = "mem_wb")]
    Mem,
    /// Write-back.
    #[serde(rename = "WB", alias = "wb")]
    Wb,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Self; 5] = [Self::If, Self::Id, Self::Ex, Self::Mem, Self::Wb];

    /// Short upper-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::If => "IF",
            Self::Id => "ID",
            Self::Ex => "EX",
            Self::Mem => "MEM",
            Self::Wb => "WB",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Latch contents of one stage.
///
/// Fields beyond `pc`, `instruction`, `alu_result` and `result` are latch detail some
/// engines report; all default to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageState {
    /// Program counter of the instruction in this stage.
    pub pc: u32,
    /// Instruction encoding.
    pub instruction: Encoding,
    /// ALU output (EX/MEM).
    pub alu_result: u32,
    /// Value headed for write-back (MEM/WB).
    pub result: u32,
    /// Destination register.
    pub rd: u32,
    /// First source register.
    pub rs1: u32,
    /// Second source register.
    pub rs2: u32,
    /// Value read for `rs1`.
    pub rs1_val: u32,
    /// Value read for `rs2`.
    pub rs2_val: u32,
    /// Sign-extended immediate, as raw bits.
    pub imm: u32,
    /// ALU zero flag.
    pub zero_flag: u32,
}

/// Stage state used for any stage missing from a snapshot.
static BUBBLE: StageState = StageState::bubble();

impl StageState {
    /// A bubble: no-op encoding, all fields zero.
    pub const fn bubble() -> Self {
        Self {
            pc: 0,
            instruction: Encoding::NOP,
            alu_result: 0,
            result: 0,
            rd: 0,
            rs1: 0,
            rs2: 0,
            rs1_val: 0,
            rs2_val: 0,
            imm: 0,
            zero_flag: 0,
        }
    }

    /// Returns `true` when the stage holds the no-op encoding.
    pub const fn is_bubble(&self) -> bool {
        self.instruction.is_nop()
    }
}

impl Default for StageState {
    fn default() -> Self {
        Self::bubble()
    }
}

/// Stage records of one cycle, keyed by stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pipeline(BTreeMap<Stage, StageState>);

impl Pipeline {
    /// Creates a pipeline with every stage a bubble.
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// The record for `stage`, or a bubble when the engine omitted it.
    pub fn stage(&self, stage: Stage) -> &StageState {
        self.0.get(&stage).unwrap_or(&BUBBLE)
    }

    /// Mutable access to `stage`, inserting a bubble first if absent.
    pub fn stage_mut(&mut self, stage: Stage) -> &mut StageState {
        self.0.entry(stage).or_default()
    }

    /// Replaces the record for `stage`.
    pub fn set(&mut self, stage: Stage, state: StageState) {
        let _ = self.0.insert(stage, state);
    }

    /// Iterates every stage in pipeline order, substituting bubbles.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, &StageState)> + '_ {
        Stage::ALL.into_iter().map(|s| (s, self.stage(s)))
    }
}

/// Names of the control signals, in display order.
pub const SIGNAL_NAMES: [&str; 6] = [
    "regwrite", "memread", "memwrite", "branch", "alusrc", "memtoreg",
];

/// Control lines of one cycle. Signals the engine omits are deasserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSignals {
    /// Register write enable.
    #[serde(alias = "reg_write")]
    pub regwrite: bool,
    /// Memory read enable.
    #[serde(alias = "mem_read")]
    pub memread: bool,
    /// Memory write enable.
    #[serde(alias = "mem_write")]
    pub memwrite: bool,
    /// Branch taken.
    pub branch: bool,
    /// ALU second operand is the immediate.
    #[serde(alias = "alu_src")]
    pub alusrc: bool,
    /// Write-back value comes from memory.
    #[serde(alias = "mem_to_reg")]
    pub memtoreg: bool,
}

impl ControlSignals {
    /// `(name, asserted)` pairs in [`SIGNAL_NAMES`] order.
    pub const fn entries(&self) -> [(&'static str, bool); 6] {
        [
            (SIGNAL_NAMES[0], self.regwrite),
            (SIGNAL_NAMES[1], self.memread),
            (SIGNAL_NAMES[2], self.memwrite),
            (SIGNAL_NAMES[3], self.branch),
            (SIGNAL_NAMES[4], self.alusrc),
            (SIGNAL_NAMES[5], self.memtoreg),
        ]
    }
}

/// State of the whole machine at one cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleSnapshot {
    /// Logical cycle number; equals the snapshot's index within a [`super::Trace`].
    pub cycle: u64,
    /// Architectural program counter.
    #[serde(alias = "program_counter")]
    pub pc: u32,
    /// General-purpose registers.
    #[serde(default)]
    pub registers: RegisterFile,
    /// Data memory entries.
    #[serde(default)]
    pub memory: MemoryView,
    /// Stage latches.
    #[serde(default)]
    pub pipeline: Pipeline,
    /// Control lines.
    #[serde(default)]
    pub control_signals: ControlSignals,
}

impl CycleSnapshot {
    /// An all-zero snapshot with every stage a bubble.
    pub fn zeroed(cycle: u64) -> Self {
        Self {
            cycle,
            ..Self::default()
        }
    }

    /// Returns `true` when an instruction leaves write-back this cycle.
    #[inline]
    pub fn retires(&self) -> bool {
        !self.pipeline.stage(Stage::Wb).is_bubble()
    }
}
