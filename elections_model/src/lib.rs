mod errors;
mod query;
pub mod types;
pub use self::errors::Error;
pub use self::query::{OfficeFilter, Projection, Query, QueryCommon, RaceSet, ResultQuery};
