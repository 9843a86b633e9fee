pub mod concurrent_map;

/// Traversal strategy for the operations that have a data-parallel
/// variant. Both strategies produce identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPolicy {
    Sequential,
    Parallel,
}
