//! Request extractors whose rejections are `AppError`s (400, empty body) instead of axum's
//! plain-text rejections.

mod json;
mod path_id;

pub use json::JsonBody;
pub use path_id::PathId;
