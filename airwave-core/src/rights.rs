//! Rights ledger: license validity and showing consumption.
//!
//! Pure functions over [`ContentAsset`] data. The ledger holds no state of
//! its own; callers supply today's date from the injected clock and persist
//! any updated asset themselves.

use chrono::NaiveDate;

use crate::model::ContentAsset;

/// Reason an asset fails the usability check.
///
/// Each variant names the specific rule that failed so rejections can be
/// surfaced verbatim to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RightsViolation {
    /// Showing rights lapsed before today.
    #[error("showing rights expired on {expired_on}")]
    RightsExpired { expired_on: NaiveDate },

    /// The license has no permitted showings left.
    #[error("no remaining showings on the license")]
    NoShowingsRemaining,
}

/// Checks whether an asset may legally be aired today.
///
/// Usable iff the rights have not expired (absent expiration means
/// unexpired; an expiration equal to today is still valid) and at least one
/// showing remains. Comparison is on calendar dates: time of day never
/// affects expiration.
///
/// # Errors
///
/// - `RightsViolation::RightsExpired` - Expiration date lies before today
/// - `RightsViolation::NoShowingsRemaining` - Showing counter is zero
pub fn check_usable(asset: &ContentAsset, today: NaiveDate) -> Result<(), RightsViolation> {
    if let Some(expiration) = asset.rights_expiration {
        if expiration < today {
            return Err(RightsViolation::RightsExpired {
                expired_on: expiration,
            });
        }
    }
    if asset.remaining_showings == 0 {
        return Err(RightsViolation::NoShowingsRemaining);
    }
    Ok(())
}

/// Convenience predicate over [`check_usable`].
pub fn is_usable(asset: &ContentAsset, today: NaiveDate) -> bool {
    check_usable(asset, today).is_ok()
}

/// Consumes one showing, returning the updated asset.
///
/// Saturates at zero: consuming an asset that already has no showings left
/// returns it unchanged rather than underflowing. The normal path never
/// reaches that case, it guards against repeated transitions racing on the
/// same asset. The caller persists the returned value.
#[must_use]
pub fn consume(asset: &ContentAsset) -> ContentAsset {
    let mut updated = asset.clone();
    updated.remaining_showings = updated.remaining_showings.saturating_sub(1);
    updated
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    use super::*;
    use crate::model::{AssetId, GrantId};

    fn asset(expiration: Option<NaiveDate>, remaining_showings: u32) -> ContentAsset {
        ContentAsset {
            id: AssetId(1),
            title: "Stalker".to_string(),
            age_rating: "12+".to_string(),
            duration_minutes: 162,
            file_path: "/media/stalker.mkv".to_string(),
            purchase_date: None,
            rights_expiration: expiration,
            remaining_showings,
            added_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            grant_id: GrantId(1),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn usable_with_no_expiration_and_showings_left() {
        assert!(is_usable(&asset(None, 1), date(2024, 6, 1)));
    }

    #[test]
    fn expiration_today_is_still_valid() {
        let today = date(2024, 6, 1);
        assert!(is_usable(&asset(Some(today), 3), today));
    }

    #[test]
    fn expired_yesterday_names_the_date() {
        let today = date(2024, 6, 1);
        let result = check_usable(&asset(Some(date(2024, 5, 31)), 3), today);
        assert_eq!(
            result,
            Err(RightsViolation::RightsExpired {
                expired_on: date(2024, 5, 31)
            })
        );
    }

    #[test]
    fn zero_showings_rejected_even_if_unexpired() {
        let today = date(2024, 6, 1);
        assert_eq!(
            check_usable(&asset(None, 0), today),
            Err(RightsViolation::NoShowingsRemaining)
        );
    }

    #[test]
    fn expiration_check_runs_before_showing_count() {
        // Both rules fail; the expiration is reported.
        let today = date(2024, 6, 1);
        let result = check_usable(&asset(Some(date(2024, 1, 1)), 0), today);
        assert!(matches!(
            result,
            Err(RightsViolation::RightsExpired { .. })
        ));
    }

    #[test]
    fn consume_floors_at_zero() {
        let consumed = consume(&asset(None, 0));
        assert_eq!(consumed.remaining_showings, 0);
    }

    proptest! {
        #[test]
        fn usability_matches_its_definition(
            offset in -400i64..400,
            has_expiration in any::<bool>(),
            showings in 0u32..10,
        ) {
            let today = date(2024, 6, 1);
            let expiration =
                has_expiration.then(|| today + chrono::Duration::days(offset));
            let a = asset(expiration, showings);

            let expected = expiration.is_none_or(|e| e >= today) && showings > 0;
            prop_assert_eq!(is_usable(&a, today), expected);
        }

        #[test]
        fn consume_decrements_by_one_and_never_underflows(showings in 0u32..1000) {
            let a = asset(None, showings);
            let consumed = consume(&a);
            prop_assert_eq!(consumed.remaining_showings, showings.saturating_sub(1));
            // Everything but the counter is untouched.
            prop_assert_eq!(consumed.id, a.id);
            prop_assert_eq!(consumed.rights_expiration, a.rights_expiration);
        }
    }
}
