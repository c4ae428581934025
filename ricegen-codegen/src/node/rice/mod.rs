//! Rice C++ text for each node kind.
//!
//! Every kind exposes `emit`, its own registration statement, and
//! `contribute`, the fragments it adds to its node during build.

pub(crate) mod class;
pub(crate) mod constructor;
pub(crate) mod enumeration;
pub(crate) mod extension;
pub(crate) mod method;
pub(crate) mod module;
pub(crate) mod naming;
