mod result;
pub use self::result::{Level, RawResult, ResultID, GOVERNOR, PRESIDENT, US_HOUSE, US_SENATE};

mod call;
pub use self::call::Call;

mod meta;
pub use self::meta::RaceMeta;

mod party;
pub use self::party::{Chamber, Party};
