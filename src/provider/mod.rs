//! HTTP plumbing shared by remote providers.

pub mod http;
