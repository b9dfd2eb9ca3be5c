pub mod batch;
pub mod lookup;
pub mod normalize;
pub mod proxy;
pub mod source;

pub use crate::domain::model::{LookupStatus, ResultItem, ResultLookup, Semester};
pub use crate::domain::ports::{ConfigProvider, ResultSource};
pub use crate::utils::error::Result;
