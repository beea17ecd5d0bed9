mod builder;
mod closure;
mod toposort;

pub use builder::build_call_graph;
pub use closure::compute_calls_t;
pub use toposort::topological_order;
