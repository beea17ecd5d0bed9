//! Pipeline stage identifiers

use serde::{Deserialize, Serialize};

/// One step of a run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageId {
    // Foundation
    Numbering,
    CallGraph,
    ModifiesUses,

    // Intraprocedural
    Cfg,
    NextT,
    Affects,

    // Interprocedural (toggled)
    CfgBip,
    NextBipT,
    Explosion,
    AffectsBip,
}

impl StageId {
    /// Fixed execution order of a full run
    pub const ORDER: [StageId; 10] = [
        StageId::Numbering,
        StageId::CallGraph,
        StageId::ModifiesUses,
        StageId::Cfg,
        StageId::NextT,
        StageId::CfgBip,
        StageId::NextBipT,
        StageId::Affects,
        StageId::Explosion,
        StageId::AffectsBip,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Numbering => "numbering",
            Self::CallGraph => "call_graph",
            Self::ModifiesUses => "modifies_uses",
            Self::Cfg => "cfg",
            Self::NextT => "next_t",
            Self::Affects => "affects",
            Self::CfgBip => "cfg_bip",
            Self::NextBipT => "next_bip_t",
            Self::Explosion => "explosion",
            Self::AffectsBip => "affects_bip",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Numbering => "Index statement numbers, kinds and procedure ranges",
            Self::CallGraph => "Build Calls, reject recursion, close CallsT",
            Self::ModifiesUses => "Propagate Modifies/Uses callees first",
            Self::Cfg => "Build the intraprocedural CFG",
            Self::NextT => "Breadth-first NextT per statement",
            Self::Affects => "Affects and AffectsT over the CFG",
            Self::CfgBip => "Splice calls into callees (CFGBip)",
            Self::NextBipT => "Call-stack-aware NextBipT traversal",
            Self::Explosion => "Build one context-sensitive graph per root procedure",
            Self::AffectsBip => "AffectsBip and AffectsBipT over exploded graphs",
        }
    }
}
