pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod ordering;
pub mod storage;
pub mod store;
pub mod suggest;
pub mod validate;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::AppError;
pub use model::Task;
pub use store::TaskStore;
pub use suggest::SuggestionEngine;
