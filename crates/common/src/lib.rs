// quire-common: shared types and wire payloads for the Quire workspace

pub mod protocol;
pub mod types;
