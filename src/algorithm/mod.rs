/// Cooperative cancellation and timeouts
pub mod cancel;
/// Synthesis engine orchestrating the per-pixel fill
pub mod executor;
/// Best-match search over the source grid
pub mod search;
