//! Per-run pipeline state
//!
//! Holds every intermediate graph of one run. Nothing outlives the state
//! object: a new run starts from `PipelineState::new` (or `reset`), so
//! repeated runs over the same program give identical results.
//!
//! Stage methods read their inputs through `require`, which turns a missing
//! input into `NotYetConstructed` instead of a panic.

use tracing::debug;

use crate::features::affects::{self, AffectsBip};
use crate::features::call_graph::{self, CallGraph, CallsClosure, TopoOrder};
use crate::features::cfg_bip::{self, CfgBip, NextBipTraversal};
use crate::features::explosion::{self, ExplodedGraph};
use crate::features::flow_graph::{self, Cfg};
use crate::features::modifies_uses::{self, ModifiesUses};
use crate::pipeline::stages::StageId;
use crate::shared::models::{AnalysisError, Program, Result, StatementTable, SuccessorMap};

fn require<'a, T>(slot: &'a Option<T>, what: &str) -> Result<&'a T> {
    slot.as_ref()
        .ok_or_else(|| AnalysisError::not_yet_constructed(what))
}

#[derive(Debug)]
pub struct PipelineState<'p> {
    program: &'p Program,

    table: Option<StatementTable>,
    call_graph: Option<CallGraph>,
    topo: Option<TopoOrder>,
    calls_t: Option<CallsClosure>,
    modifies_uses: Option<ModifiesUses>,

    cfg: Option<Cfg>,
    next_t: Option<SuccessorMap>,
    affects: Option<SuccessorMap>,
    affects_t: Option<SuccessorMap>,

    cfg_bip: Option<CfgBip>,
    next_bip_t: Option<SuccessorMap>,
    exploded: Option<Vec<ExplodedGraph>>,
    affects_bip: Option<AffectsBip>,
    affects_bip_t: Option<SuccessorMap>,
}

impl<'p> PipelineState<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            table: None,
            call_graph: None,
            topo: None,
            calls_t: None,
            modifies_uses: None,
            cfg: None,
            next_t: None,
            affects: None,
            affects_t: None,
            cfg_bip: None,
            next_bip_t: None,
            exploded: None,
            affects_bip: None,
            affects_bip_t: None,
        }
    }

    /// Drop every intermediate result
    pub fn reset(&mut self) {
        *self = Self::new(self.program);
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Stages
    // ═══════════════════════════════════════════════════════════════════════

    pub fn number_statements(&mut self) -> Result<()> {
        let table = StatementTable::build(self.program)?;
        debug!(
            stage = StageId::Numbering.name(),
            statements = table.len(),
            procedures = table.procedures().len(),
            "stage done"
        );
        self.table = Some(table);
        Ok(())
    }

    /// Calls, the topological order (fails on recursion) and CallsT
    pub fn build_call_graph(&mut self) -> Result<()> {
        let table = require(&self.table, "statement table")?;
        let calls = call_graph::build_call_graph(table)?;
        let topo = call_graph::topological_order(&calls)?;
        let calls_t = call_graph::compute_calls_t(&calls, &topo);
        debug!(
            stage = StageId::CallGraph.name(),
            calls_t = calls_t.pair_count(),
            "stage done"
        );

        self.call_graph = Some(calls);
        self.topo = Some(topo);
        self.calls_t = Some(calls_t);
        Ok(())
    }

    pub fn compute_modifies_uses(&mut self) -> Result<()> {
        let topo = require(&self.topo, "call graph order")?;
        let relations = modifies_uses::compute_modifies_uses(self.program, topo)?;
        self.modifies_uses = Some(relations);
        Ok(())
    }

    pub fn build_cfg(&mut self) -> Result<()> {
        let table = require(&self.table, "statement table")?;
        let cfg = flow_graph::build_cfg(self.program, table);
        self.cfg = Some(cfg);
        Ok(())
    }

    pub fn compute_next_t(&mut self) -> Result<()> {
        let cfg = require(&self.cfg, "CFG")?;
        let next_t = flow_graph::compute_next_t(cfg);
        self.next_t = Some(next_t);
        Ok(())
    }

    pub fn build_cfg_bip(&mut self) -> Result<()> {
        let table = require(&self.table, "statement table")?;
        let cfg = require(&self.cfg, "CFG")?;
        let topo = require(&self.topo, "call graph order")?;
        let bip = cfg_bip::build_cfg_bip(table, cfg, topo)?;
        self.cfg_bip = Some(bip);
        Ok(())
    }

    pub fn compute_next_bip_t(&mut self) -> Result<()> {
        let table = require(&self.table, "statement table")?;
        let cfg = require(&self.cfg, "CFG")?;
        let bip = require(&self.cfg_bip, "CFGBip")?;
        let calls = require(&self.call_graph, "call graph")?;
        let topo = require(&self.topo, "call graph order")?;

        let traversal = NextBipTraversal::new(table, cfg, bip, calls, topo);
        let next_bip_t = cfg_bip::compute_next_bip_t(&traversal);
        self.next_bip_t = Some(next_bip_t);
        Ok(())
    }

    /// Affects and AffectsT
    pub fn compute_affects(&mut self) -> Result<()> {
        let table = require(&self.table, "statement table")?;
        let cfg = require(&self.cfg, "CFG")?;
        let mu = require(&self.modifies_uses, "Modifies/Uses")?;

        let direct = affects::compute_affects(table, cfg, mu);
        let transitive = affects::compute_transitive(&direct);
        self.affects = Some(direct);
        self.affects_t = Some(transitive);
        Ok(())
    }

    pub fn explode(&mut self) -> Result<()> {
        let table = require(&self.table, "statement table")?;
        let cfg = require(&self.cfg, "CFG")?;
        let calls = require(&self.call_graph, "call graph")?;
        let topo = require(&self.topo, "call graph order")?;
        let graphs = explosion::explode_program(table, cfg, calls, topo)?;
        self.exploded = Some(graphs);
        Ok(())
    }

    /// AffectsBip and AffectsBipT
    pub fn compute_affects_bip(&mut self) -> Result<()> {
        let table = require(&self.table, "statement table")?;
        let graphs = require(&self.exploded, "exploded graphs")?;

        let direct = affects::compute_affects_bip(table, graphs);
        let transitive = affects::compute_affects_bip_t(&direct);
        self.affects_bip = Some(direct);
        self.affects_bip_t = Some(transitive);
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════════

    pub fn table(&self) -> Result<&StatementTable> {
        require(&self.table, "statement table")
    }

    pub fn call_graph(&self) -> Result<&CallGraph> {
        require(&self.call_graph, "call graph")
    }

    pub fn topo_order(&self) -> Result<&TopoOrder> {
        require(&self.topo, "call graph order")
    }

    pub fn calls_t(&self) -> Result<&CallsClosure> {
        require(&self.calls_t, "CallsT")
    }

    pub fn modifies_uses(&self) -> Result<&ModifiesUses> {
        require(&self.modifies_uses, "Modifies/Uses")
    }

    pub fn cfg(&self) -> Result<&Cfg> {
        require(&self.cfg, "CFG")
    }

    pub fn next_t(&self) -> Result<&SuccessorMap> {
        require(&self.next_t, "NextT")
    }

    pub fn affects(&self) -> Result<&SuccessorMap> {
        require(&self.affects, "Affects")
    }

    pub fn affects_t(&self) -> Result<&SuccessorMap> {
        require(&self.affects_t, "AffectsT")
    }

    pub fn cfg_bip(&self) -> Result<&CfgBip> {
        require(&self.cfg_bip, "CFGBip")
    }

    pub fn next_bip_t(&self) -> Result<&SuccessorMap> {
        require(&self.next_bip_t, "NextBipT")
    }

    pub fn exploded(&self) -> Result<&[ExplodedGraph]> {
        require(&self.exploded, "exploded graphs").map(Vec::as_slice)
    }

    pub fn affects_bip(&self) -> Result<&AffectsBip> {
        require(&self.affects_bip, "AffectsBip")
    }

    pub fn affects_bip_t(&self) -> Result<&SuccessorMap> {
        require(&self.affects_bip_t, "AffectsBipT")
    }
}
