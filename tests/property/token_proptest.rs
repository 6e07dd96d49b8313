//! Property tests for token expiry
//!
//! A token verifies at every instant before `iat + 3600` and fails at every
//! instant from then on.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;
use yourplaces::backend::auth::{TokenAuthenticator, TOKEN_TTL_SECS};
use yourplaces::backend::error::AuthFailure;
use yourplaces::backend::middleware::AuthenticatedUser;

proptest! {
    #[test]
    fn prop_token_valid_only_before_expiry(
        issued_secs in 1_600_000_000i64..1_900_000_000,
        offset in 0i64..(3 * TOKEN_TTL_SECS),
        email in "[a-z]{1,12}@[a-z]{1,8}\\.com",
    ) {
        let tokens = TokenAuthenticator::new(b"proptest-key");
        let user = AuthenticatedUser { user_id: Uuid::new_v4(), email };
        let issued = Utc.timestamp_opt(issued_secs, 0).unwrap();
        let token = tokens.issue_at(&user, issued).unwrap();

        let result = tokens.verify_at(&token, issued + Duration::seconds(offset));

        if offset < TOKEN_TTL_SECS {
            prop_assert_eq!(result.unwrap(), user);
        } else {
            prop_assert_eq!(result.unwrap_err().auth_failure(), Some(AuthFailure::ExpiredToken));
        }
    }
}
