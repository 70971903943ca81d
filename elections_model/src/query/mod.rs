mod common;
pub use self::common::{Query, QueryCommon};

mod projection;
pub use self::projection::Projection;

mod result;
pub use self::result::{OfficeFilter, RaceSet, ResultQuery};
