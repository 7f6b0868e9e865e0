//! Testbench text log parser.
//!
//! Hardware-description testbenches dump one block of `KEY=VALUE` lines per clock:
//!
//! ```text
//! CYCLE 3: PC=0x0000000c
//! REG[1]=0x00000005 REG[2]=0x00000064
//! IF_ID_INSTR=0x00a00113 IF_ID_PC=0x00000008
//! EX_MEM_RD=0x01 EX_MEM_ZERO=0
//! CTRL_REGWRITE=1 CTRL_MEMREAD=0 CTRL_MEMWRITE=0
//! MEM[40]=0x0000007b
//! ```
//!
//! Register values carry over from one cycle to the next; memory, latches and control
//! lines describe only the cycle they appear in. Lines that do not start with a known
//! key are ignored, as are fields that precede the first `CYCLE` header (except
//! register updates, which seed the initial register file).
//!
//! A `REG[i]` line takes effect in the block that contains it. Readers that copy the
//! register file at each `CYCLE` header show the same update one cycle later.
//!
//! Values with undriven Verilog digits (`0xxxxxxxxx`, `z`) and registers past `x31`
//! are skipped. Malformed headers, indices and unknown latch fields are errors.

use tracing::{debug, warn};

use crate::common::constants::REGISTER_COUNT;
use crate::common::error::{LogParseError, TraceError};
use crate::trace::{CycleSnapshot, Encoding, RegisterFile, Stage, Trace};

/// Parses a complete log into a trace.
///
/// # Errors
///
/// Returns a [`LogParseError`] naming the first malformed line, or wrapping a trace
/// whose cycle numbers are neither 0- nor 1-based and contiguous.
pub fn parse_log(text: &str) -> Result<Trace, LogParseError> {
    let mut parser = LogParser::default();
    for (idx, line) in text.lines().enumerate() {
        parser.feed(idx + 1, line)?;
    }
    let headers = parser.headers.clone();
    Trace::from_engine(parser.finish()).map_err(|e| {
        let line = match e {
            TraceError::CycleMismatch { index, .. } => headers.get(index).copied().unwrap_or(0),
            TraceError::TooManyRegisters { .. } => 0,
        };
        LogParseError {
            line,
            message: e.to_string(),
        }
    })
}

#[derive(Default)]
struct LogParser {
    registers: RegisterFile,
    current: Option<CycleSnapshot>,
    done: Vec<CycleSnapshot>,
    /// Line number of each `CYCLE` header, by snapshot index.
    headers: Vec<usize>,
}

impl LogParser {
    fn feed(&mut self, line_no: usize, line: &str) -> Result<(), LogParseError> {
        let line = line.trim();
        let err = |message: String| LogParseError {
            line: line_no,
            message,
        };

        if let Some(rest) = line.strip_prefix("CYCLE") {
            return self.start_cycle(line_no, rest).map_err(err);
        }

        let Some(first) = line.split_whitespace().next() else {
            return Ok(());
        };
        let Some((key, _)) = first.split_once('=') else {
            return Ok(());
        };
        if !is_known_key(key) {
            debug!(line = line_no, key, "skipping unrecognised log line");
            return Ok(());
        }

        for token in line.split_whitespace() {
            let Some((key, value)) = token.split_once('=') else {
                return Err(err(format!("expected KEY=VALUE, found `{token}`")));
            };
            let Some(value) = parse_value(value) else {
                debug!(line = line_no, token, "skipping undriven or unreadable value");
                continue;
            };
            self.apply(line_no, key, value).map_err(err)?;
        }
        Ok(())
    }

    fn start_cycle(&mut self, line_no: usize, rest: &str) -> Result<(), String> {
        // rest: " 3: PC=0x0000000c"
        let (num, pc) = rest
            .split_once(':')
            .ok_or_else(|| format!("malformed cycle header `CYCLE{rest}`"))?;
        let cycle = num
            .trim()
            .parse::<u64>()
            .map_err(|_| format!("bad cycle number `{}`", num.trim()))?;
        let pc = pc
            .trim()
            .strip_prefix("PC=")
            .and_then(parse_value)
            .ok_or_else(|| format!("bad program counter in `CYCLE{rest}`"))?;

        if let Some(prev) = self.current.take() {
            self.done.push(prev);
        }
        self.headers.push(line_no);
        self.current = Some(CycleSnapshot {
            cycle,
            pc,
            registers: self.registers.clone(),
            ..CycleSnapshot::default()
        });
        Ok(())
    }

    fn apply(&mut self, line_no: usize, key: &str, value: u32) -> Result<(), String> {
        if let Some(idx) = indexed(key, "REG") {
            let idx = idx?;
            if idx as usize >= REGISTER_COUNT {
                warn!(line = line_no, index = idx, "ignoring register past x31");
                return Ok(());
            }
            self.registers.set(idx as usize, value);
            if let Some(cur) = self.current.as_mut() {
                cur.registers.set(idx as usize, value);
            }
            return Ok(());
        }

        let Some(cur) = self.current.as_mut() else {
            return Ok(());
        };

        if let Some(addr) = indexed(key, "MEM") {
            let addr = addr?;
            // Zero words are implicit.
            if value != 0 {
                let _ = cur.memory.insert(addr, value);
            }
            return Ok(());
        }

        let pipe = &mut cur.pipeline;
        let ctrl = &mut cur.control_signals;
        match key {
            "IF_ID_INSTR" => pipe.stage_mut(Stage::If).instruction = Encoding(value),
            "IF_ID_PC" => pipe.stage_mut(Stage::If).pc = value,
            "ID_EX_INSTR" => pipe.stage_mut(Stage::Id).instruction = Encoding(value),
            "ID_EX_PC" => pipe.stage_mut(Stage::Id).pc = value,
            "ID_EX_RS1" => pipe.stage_mut(Stage::Id).rs1 = value,
            "ID_EX_RS1_VAL" => pipe.stage_mut(Stage::Id).rs1_val = value,
            "ID_EX_RS2" => pipe.stage_mut(Stage::Id).rs2 = value,
            "ID_EX_RS2_VAL" => pipe.stage_mut(Stage::Id).rs2_val = value,
            "ID_EX_RD" => pipe.stage_mut(Stage::Id).rd = value,
            "ID_EX_IMM" => pipe.stage_mut(Stage::Id).imm = value,
            "EX_MEM_ALU" => pipe.stage_mut(Stage::Ex).alu_result = value,
            "EX_MEM_PC" => pipe.stage_mut(Stage::Ex).pc = value,
            "EX_MEM_RD" => pipe.stage_mut(Stage::Ex).rd = value,
            "EX_MEM_ZERO" => pipe.stage_mut(Stage::Ex).zero_flag = value,
            "MEM_WB_DATA" => pipe.stage_mut(Stage::Mem).result = value,
            "MEM_WB_PC" => pipe.stage_mut(Stage::Mem).pc = value,
            "MEM_WB_RD" => pipe.stage_mut(Stage::Mem).rd = value,
            "CTRL_REGWRITE" => ctrl.regwrite = value != 0,
            "CTRL_MEMREAD" => ctrl.memread = value != 0,
            "CTRL_MEMWRITE" => ctrl.memwrite = value != 0,
            "CTRL_BRANCH" => ctrl.branch = value != 0,
            "CTRL_ALUSRC" => ctrl.alusrc = value != 0,
            "CTRL_MEMTOREG" => ctrl.memtoreg = value != 0,
            other => return Err(format!("unknown field `{other}`")),
        }
        Ok(())
    }

    fn finish(mut self) -> Vec<CycleSnapshot> {
        if let Some(last) = self.current.take() {
            self.done.push(last);
        }
        self.done
    }
}

/// Keys a recognised line may start with.
fn is_known_key(key: &str) -> bool {
    key.starts_with("REG[")
        || key.starts_with("MEM[")
        || key.starts_with("IF_ID_")
        || key.starts_with("ID_EX_")
        || key.starts_with("EX_MEM_")
        || key.starts_with("MEM_WB_")
        || key.starts_with("CTRL_")
}

/// Parses `PREFIX[n]` into `n` (decimal). `None` if `key` has another prefix.
fn indexed(key: &str, prefix: &str) -> Option<Result<u32, String>> {
    let inner = key.strip_prefix(prefix)?.strip_prefix('[')?;
    Some(
        inner
            .strip_suffix(']')
            .and_then(|n| n.parse::<u32>().ok())
            .ok_or_else(|| format!("bad index in `{key}`")),
    )
}

/// `0x`-prefixed values are hex; anything else is decimal.
fn parse_value(text: &str) -> Option<u32> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}
