//! Well-known control types.
//!
//! Remote and administrative callers address a control by `(type, id)` or
//! `(type, alias)`, so producers should pick types from a stable namespace. These
//! cover the usual parts of a stream-processing runtime; applications may add
//! their own.

/// A submitted job. Typically registered with the job name as alias, so a job
/// submitted as `PumpAnalytics` can be found without knowing its generated id.
pub const JOB: &str = "job";

/// A single processing stage inside a job.
pub const OPLET: &str = "oplet";

/// An application registered with a provider and available for submission.
pub const APPLICATION: &str = "application";

/// The execution provider hosting jobs.
pub const PROVIDER: &str = "provider";
