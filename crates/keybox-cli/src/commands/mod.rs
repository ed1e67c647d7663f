//! One module per command group.

pub(crate) mod boxes;
pub(crate) mod keys;
pub(crate) mod signing;
