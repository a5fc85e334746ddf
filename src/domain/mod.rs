pub mod bucket;
pub mod class;
pub mod common;
pub mod month;
pub mod student;

pub use bucket::{BucketSlot, MonthBucket};
pub use class::{ClassRecord, MonthWindow};
pub use common::{Clock, FixedClock, SystemClock};
pub use month::MonthTag;
pub use student::StudentRecord;
