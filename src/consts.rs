/// Hundredths of a second in one second.
pub const HUNDREDTHS_PER_SECOND: u32 = 100;

/// Hundredths of a second in one minute.
pub const HUNDREDTHS_PER_MINUTE: u32 = 6_000;

/// Delimiter used by the encoded form of a record key.
pub const KEY_DELIMITER: char = '|';

/// Suffix token marking the tie slot in an encoded record key.
pub const TIE_TOKEN: &str = "tie";

/// Distance (meters) swum between two turns in a long-course pool.
pub const LONG_COURSE_LENGTH: u32 = 50;

/// Cache token returned by an empty record collection.
pub const EMPTY_CACHE_KEY: &str = "empty";
