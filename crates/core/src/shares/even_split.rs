use rust_decimal::Decimal;

use crate::errors::AllocationError;
use crate::participants::Participant;

/// Splits 100% evenly in whole percents.
///
/// With `n` participants each gets `floor(100 / n)`, and the first
/// `100 mod n` (in input order) get one point more, so the set sums to
/// exactly 100. Locks are ignored: an even split resets every share.
pub fn even_split(
    participants: &[Participant],
) -> std::result::Result<Vec<Participant>, AllocationError> {
    if participants.is_empty() {
        return Err(AllocationError::EmptyParticipantSet);
    }
    let mut result = participants.to_vec();
    distribute_evenly(&mut result);
    Ok(result)
}

/// Caller guarantees `participants` is non-empty.
pub(crate) fn distribute_evenly(participants: &mut [Participant]) {
    let n = participants.len() as u64;
    let base = 100 / n;
    let remainder = (100 % n) as usize;
    for (index, participant) in participants.iter_mut().enumerate() {
        let points = if index < remainder { base + 1 } else { base };
        participant.percentage = Decimal::from(points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participants::total_percentage;
    use rust_decimal_macros::dec;

    fn people(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| Participant::with_id(format!("p{}", i), format!("Person {}", i)))
            .collect()
    }

    #[test]
    fn test_three_way_split() {
        let result = even_split(&people(3)).unwrap();
        let pcts: Vec<_> = result.iter().map(|p| p.percentage).collect();
        assert_eq!(pcts, vec![dec!(34), dec!(33), dec!(33)]);
    }

    #[test]
    fn test_divisible_split_has_no_extra_point() {
        let result = even_split(&people(4)).unwrap();
        assert!(result.iter().all(|p| p.percentage == dec!(25)));
    }

    #[test]
    fn test_sums_to_hundred_for_many_sizes() {
        for n in 1..=150 {
            let result = even_split(&people(n)).unwrap();
            assert_eq!(total_percentage(&result), dec!(100), "n = {}", n);
        }
    }

    #[test]
    fn test_more_than_hundred_participants() {
        let result = even_split(&people(120)).unwrap();
        assert!(result[..100].iter().all(|p| p.percentage == dec!(1)));
        assert!(result[100..].iter().all(|p| p.percentage == dec!(0)));
    }

    #[test]
    fn test_resets_locked_shares_and_keeps_other_fields() {
        let input = vec![
            Participant::with_id("a", "A")
                .with_percentage(dec!(80))
                .locked()
                .with_linked_identity("u-1"),
            Participant::with_id("b", "B").with_percentage(dec!(20)),
        ];
        let result = even_split(&input).unwrap();
        assert_eq!(result[0].percentage, dec!(50));
        assert!(result[0].locked);
        assert_eq!(result[0].linked_identity.as_deref(), Some("u-1"));
        assert_eq!(input[0].percentage, dec!(80));
    }

    #[test]
    fn test_empty_set_rejected() {
        assert_eq!(
            even_split(&[]).unwrap_err(),
            AllocationError::EmptyParticipantSet
        );
    }
}
