mod state_serializer;

use crate::ClaimsCodec;

use chrono::{DateTime, Duration, Utc};

pub(crate) const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

pub(crate) fn test_codec() -> ClaimsCodec {
    ClaimsCodec::with_hs256(TEST_SECRET)
}

pub(crate) fn in_one_hour() -> DateTime<Utc> {
    Utc::now() + Duration::hours(1)
}
