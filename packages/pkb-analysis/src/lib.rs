/*
 * pkb-analysis - SIMPLE program analysis engine
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Program model, statement table, statement graphs, errors
 * - features/    : Vertical slices (call graph → CFG → CFGBip → explosion → affects)
 * - config/      : Stage toggles, presets, YAML loading
 * - pipeline/    : Per-run state and orchestration
 *
 * Computes Next/NextT, NextBip/NextBipT, Affects/AffectsT,
 * AffectsBip/AffectsBipT, Calls/CallsT and Modifies/Uses for one program and
 * writes them to a `pkb_store::RelationStore`.
 */

#![allow(clippy::too_many_arguments)] // Stage builders take their inputs explicitly
#![allow(clippy::derivable_impls)] // Manual Default impls document the defaults

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Analysis features
pub mod features;

/// Configuration
pub mod config;

/// Pipeline orchestration
pub mod pipeline;

pub use config::{ConfigError, PipelineConfig, Preset, StageControl};
pub use pipeline::{run_pipeline, PipelineState, RunSummary, StageId};
pub use shared::models::{
    AnalysisError, ErrorKind, Procedure, Program, ProgramBuilder, Result, Stmt, StmtKind,
};
