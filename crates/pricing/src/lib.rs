//! Pure pricing: (rooms, nights, package, participants) → total.
//!
//! No state, no IO, no floats. All amounts are minor-unit [`Money`] and the
//! room × nights × participants multiplications use checked integer
//! arithmetic, so the displayed total can never drift by sub-cents.

use staybook_catalog::{Package, Room};
use staybook_core::{CalendarDay, DomainError, DomainResult, Money};

/// Itemized total for display.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PriceBreakdown {
    /// Σ(room nightly price) × nights.
    pub room_total: Money,
    /// Package price × participants × nights (zero without a package).
    pub package_total: Money,
    pub total: Money,
}

/// Number of nights a [check-in, check-out] range represents.
///
/// Equal dates are a day-use event: allowed only with no rooms, and counted
/// as one night for package pricing. Room stays require at least one full
/// night.
pub fn stay_nights(
    check_in: CalendarDay,
    check_out: CalendarDay,
    has_rooms: bool,
) -> DomainResult<u32> {
    let days = check_in.days_until(check_out);
    if days < 0 {
        return Err(DomainError::validation("check-out is before check-in"));
    }
    if days == 0 && has_rooms {
        return Err(DomainError::invariant(
            "room stays require at least one full night",
        ));
    }
    Ok(days.max(1) as u32)
}

/// Compute the booking total.
///
/// `nights == 0` and `participants == 0` are rejected rather than silently
/// defaulted: callers validate and clamp before pricing, and this function
/// re-checks.
pub fn compute_total(
    rooms: &[Room],
    nights: u32,
    package: Option<&Package>,
    participants: u32,
) -> DomainResult<PriceBreakdown> {
    if nights == 0 {
        return Err(DomainError::validation("nights must be at least 1"));
    }
    if participants == 0 {
        return Err(DomainError::validation("participants must be at least 1"));
    }

    let nightly_sum = rooms
        .iter()
        .try_fold(Money::ZERO, |acc, room| acc.checked_add(room.nightly_price()))
        .ok_or_else(overflow)?;
    let room_total = nightly_sum.checked_mul(u64::from(nights)).ok_or_else(overflow)?;

    let package_total = match package {
        Some(pkg) => pkg
            .price_per_participant_night()
            .checked_mul(u64::from(participants))
            .and_then(|m| m.checked_mul(u64::from(nights)))
            .ok_or_else(overflow)?,
        None => Money::ZERO,
    };

    let total = room_total.checked_add(package_total).ok_or_else(overflow)?;
    Ok(PriceBreakdown {
        room_total,
        package_total,
        total,
    })
}

fn overflow() -> DomainError {
    DomainError::invariant("price computation overflowed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use staybook_core::{PackageId, RoomId};

    fn room(price_minor: u64) -> Room {
        Room::new(RoomId::new(), 2, Money::from_minor(price_minor), "room").unwrap()
    }

    fn package(price_minor: u64) -> Package {
        Package::new(PackageId::new(), Money::from_minor(price_minor), true, true, "pkg")
    }

    fn d(y: i32, m: u32, day: u32) -> CalendarDay {
        CalendarDay::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn one_room_two_nights_no_package() {
        // cart = [{price:1000}], nights=2, pkg=null, participants=2 → 2000
        let breakdown = compute_total(&[room(1000)], 2, None, 2).unwrap();
        assert_eq!(breakdown.room_total, Money::from_minor(2000));
        assert_eq!(breakdown.package_total, Money::ZERO);
        assert_eq!(breakdown.total, Money::from_minor(2000));
    }

    #[test]
    fn two_rooms_three_nights_with_package() {
        // (1000+1500)*3 + 200*4*3 = 7500 + 2400 = 9900
        let rooms = [room(1000), room(1500)];
        let pkg = package(200);
        let breakdown = compute_total(&rooms, 3, Some(&pkg), 4).unwrap();
        assert_eq!(breakdown.room_total, Money::from_minor(7500));
        assert_eq!(breakdown.package_total, Money::from_minor(2400));
        assert_eq!(breakdown.total, Money::from_minor(9900));
    }

    #[test]
    fn zero_nights_and_zero_participants_are_rejected() {
        assert!(matches!(
            compute_total(&[room(1000)], 0, None, 2),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            compute_total(&[room(1000)], 2, None, 0),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn overflow_is_an_invariant_error() {
        let rooms = [room(u64::MAX)];
        assert!(matches!(
            compute_total(&rooms, 2, None, 1),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn stay_nights_counts_day_difference() {
        assert_eq!(stay_nights(d(2025, 4, 1), d(2025, 4, 3), true).unwrap(), 2);
        assert_eq!(stay_nights(d(2025, 4, 1), d(2025, 4, 2), false).unwrap(), 1);
    }

    #[test]
    fn same_day_with_rooms_is_rejected() {
        assert!(matches!(
            stay_nights(d(2025, 4, 1), d(2025, 4, 1), true),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn same_day_without_rooms_counts_one_night() {
        // Day-use event: one "night" for package pricing only.
        assert_eq!(stay_nights(d(2025, 4, 1), d(2025, 4, 1), false).unwrap(), 1);
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(matches!(
            stay_nights(d(2025, 4, 3), d(2025, 4, 1), false),
            Err(DomainError::Validation(_))
        ));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: total is monotonic non-decreasing in nights.
            #[test]
            fn monotonic_in_nights(
                prices in prop::collection::vec(0u64..1_000_000, 0..5),
                pkg_price in 0u64..10_000,
                nights in 1u32..60,
                participants in 1u32..50,
            ) {
                let rooms: Vec<Room> = prices.iter().map(|p| room(*p)).collect();
                let pkg = package(pkg_price);
                let a = compute_total(&rooms, nights, Some(&pkg), participants).unwrap();
                let b = compute_total(&rooms, nights + 1, Some(&pkg), participants).unwrap();
                prop_assert!(b.total >= a.total);
            }

            /// Property: total is monotonic non-decreasing in participants.
            #[test]
            fn monotonic_in_participants(
                prices in prop::collection::vec(0u64..1_000_000, 0..5),
                pkg_price in 0u64..10_000,
                nights in 1u32..60,
                participants in 1u32..50,
            ) {
                let rooms: Vec<Room> = prices.iter().map(|p| room(*p)).collect();
                let pkg = package(pkg_price);
                let a = compute_total(&rooms, nights, Some(&pkg), participants).unwrap();
                let b = compute_total(&rooms, nights, Some(&pkg), participants + 1).unwrap();
                prop_assert!(b.total >= a.total);
            }

            /// Property: without a package, participants never change the total.
            #[test]
            fn participants_irrelevant_without_package(
                prices in prop::collection::vec(0u64..1_000_000, 0..5),
                nights in 1u32..60,
                p1 in 1u32..50,
                p2 in 1u32..50,
            ) {
                let rooms: Vec<Room> = prices.iter().map(|p| room(*p)).collect();
                let a = compute_total(&rooms, nights, None, p1).unwrap();
                let b = compute_total(&rooms, nights, None, p2).unwrap();
                prop_assert_eq!(a.total, b.total);
            }
        }
    }
}
