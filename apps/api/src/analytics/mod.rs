// Pure, synchronous labor-market analytics over in-memory careers.
// Nothing in here performs I/O; handlers fetch rows and pass slices in.

pub mod health;
pub mod insights;
pub mod salary;
pub mod validation;
