//! Source statistics gathered while assembling.
//!
//! Counters cover comment lines, instruction lines, distinct labels and
//! jumps. Label-taking jumps are classified once the whole source has been
//! seen: a jump whose target is defined above it is a back jump, one whose
//! target is defined below it is a forward jump, and one whose target is
//! never defined is a bad jump.

use std::collections::{BTreeMap, HashMap};

use ippcode_common::{Instruction, Opcode};

/// One record of a statistics report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stat {
    /// Instruction lines.
    Loc,
    /// Lines carrying a `#` comment.
    Comments,
    /// Distinct label names defined.
    Labels,
    /// CALL, RETURN and the JUMP family.
    Jumps,
    /// Jumps to a label defined further down.
    FwJumps,
    /// Jumps to a label defined further up.
    BackJumps,
    /// Jumps to a label that is never defined.
    BadJumps,
    /// The most frequent mnemonics, alphabetically, comma-separated.
    Frequent,
    /// A fixed string.
    Print(String),
    /// An empty record.
    Eol,
}

/// Counters collected over one source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    loc: usize,
    comments: usize,
    /// First definition of each label, as an instruction index.
    labels: HashMap<String, usize>,
    jumps: usize,
    /// Target and instruction index of every label-taking jump.
    targets: Vec<(String, usize)>,
    frequency: BTreeMap<&'static str, usize>,
}

impl Stats {
    pub(crate) fn record_comment(&mut self) {
        self.comments += 1;
    }

    pub(crate) fn record(&mut self, instr: &Instruction) {
        let index = self.loc;
        self.loc += 1;
        *self.frequency.entry(instr.opcode.mnemonic()).or_default() += 1;

        let target = || instr.arg(0).map(|arg| arg.text.clone()).unwrap_or_default();
        match instr.opcode {
            Opcode::Label => {
                self.labels.entry(target()).or_insert(index);
            }
            Opcode::Call | Opcode::Jump | Opcode::JumpIfEq | Opcode::JumpIfNeq => {
                self.jumps += 1;
                self.targets.push((target(), index));
            }
            Opcode::Return => self.jumps += 1,
            _ => {}
        }
    }

    pub fn loc(&self) -> usize {
        self.loc
    }

    pub fn comments(&self) -> usize {
        self.comments
    }

    pub fn labels(&self) -> usize {
        self.labels.len()
    }

    pub fn jumps(&self) -> usize {
        self.jumps
    }

    pub fn fwjumps(&self) -> usize {
        self.count_targets(|def, at| matches!(def, Some(def) if def > at))
    }

    pub fn backjumps(&self) -> usize {
        self.count_targets(|def, at| matches!(def, Some(def) if def < at))
    }

    pub fn badjumps(&self) -> usize {
        self.count_targets(|def, _| def.is_none())
    }

    fn count_targets(&self, pred: impl Fn(Option<usize>, usize) -> bool) -> usize {
        self.targets
            .iter()
            .filter(|(label, at)| pred(self.labels.get(label).copied(), *at))
            .count()
    }

    /// Mnemonics sharing the highest count, in alphabetical order.
    ///
    /// Empty when the source has no instructions.
    pub fn frequent(&self) -> Vec<&'static str> {
        let Some(&max) = self.frequency.values().max() else {
            return Vec::new();
        };
        self.frequency
            .iter()
            .filter(|&(_, &count)| count == max)
            .map(|(&mnemonic, _)| mnemonic)
            .collect()
    }

    /// The text of a single record, without its line terminator.
    pub fn render(&self, stat: &Stat) -> String {
        match stat {
            Stat::Loc => self.loc().to_string(),
            Stat::Comments => self.comments().to_string(),
            Stat::Labels => self.labels().to_string(),
            Stat::Jumps => self.jumps().to_string(),
            Stat::FwJumps => self.fwjumps().to_string(),
            Stat::BackJumps => self.backjumps().to_string(),
            Stat::BadJumps => self.badjumps().to_string(),
            Stat::Frequent => self.frequent().join(","),
            Stat::Print(text) => text.clone(),
            Stat::Eol => String::new(),
        }
    }

    /// Render `stats` one record per line.
    pub fn report(&self, stats: &[Stat]) -> String {
        stats
            .iter()
            .map(|stat| self.render(stat) + "\n")
            .collect()
    }
}
