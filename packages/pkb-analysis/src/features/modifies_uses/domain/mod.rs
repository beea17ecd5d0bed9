//! Modifies / Uses relations

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::shared::models::StmtIndex;

pub type VarSet = BTreeSet<String>;

static NO_VARS: VarSet = BTreeSet::new();

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiesUses {
    pub(crate) stmt_modifies: BTreeMap<StmtIndex, VarSet>,
    pub(crate) stmt_uses: BTreeMap<StmtIndex, VarSet>,
    pub(crate) proc_modifies: BTreeMap<String, VarSet>,
    pub(crate) proc_uses: BTreeMap<String, VarSet>,
}

impl ModifiesUses {
    pub fn modifies_stmt(&self, stmt: StmtIndex) -> &VarSet {
        self.stmt_modifies.get(&stmt).unwrap_or(&NO_VARS)
    }

    pub fn uses_stmt(&self, stmt: StmtIndex) -> &VarSet {
        self.stmt_uses.get(&stmt).unwrap_or(&NO_VARS)
    }

    pub fn modifies_proc(&self, procedure: &str) -> &VarSet {
        self.proc_modifies.get(procedure).unwrap_or(&NO_VARS)
    }

    pub fn uses_proc(&self, procedure: &str) -> &VarSet {
        self.proc_uses.get(procedure).unwrap_or(&NO_VARS)
    }

    pub fn stmt_modifies_pairs(&self) -> impl Iterator<Item = (StmtIndex, &str)> + '_ {
        flatten_stmt(&self.stmt_modifies)
    }

    pub fn stmt_uses_pairs(&self) -> impl Iterator<Item = (StmtIndex, &str)> + '_ {
        flatten_stmt(&self.stmt_uses)
    }

    pub fn proc_modifies_pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        flatten_proc(&self.proc_modifies)
    }

    pub fn proc_uses_pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        flatten_proc(&self.proc_uses)
    }
}

fn flatten_stmt(map: &BTreeMap<StmtIndex, VarSet>) -> impl Iterator<Item = (StmtIndex, &str)> + '_ {
    map.iter()
        .flat_map(|(&s, vars)| vars.iter().map(move |v| (s, v.as_str())))
}

fn flatten_proc(map: &BTreeMap<String, VarSet>) -> impl Iterator<Item = (&str, &str)> + '_ {
    map.iter()
        .flat_map(|(p, vars)| vars.iter().map(move |v| (p.as_str(), v.as_str())))
}
