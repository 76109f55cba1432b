mod key;
mod timestamp;

pub use key::{PivotKey, RecordKey};
pub use timestamp::Timestamp;
pub use ulid::Ulid;
