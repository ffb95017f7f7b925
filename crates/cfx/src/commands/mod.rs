//! CLI command implementations.

pub(crate) mod extract;
pub(crate) mod spaces;

pub(crate) use extract::ExtractArgs;
pub(crate) use spaces::SpacesArgs;
