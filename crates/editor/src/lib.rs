// quire-editor: tabbed session model and persistence bridge.
//
// The session model is pure in-memory state driven by UI events; the
// bridge mediates between it and the two stores (local disk handles,
// remote HTTP document store). Front ends sit on top of `Bridge` and
// render the `Notifier` stream however they like.

pub mod bridge;
pub mod config;
pub mod credentials;
pub mod local;
pub mod notify;
pub mod remote;
pub mod session;
