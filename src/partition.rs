//! Order-preserving partition used by grid gravity.

/// Moves every element for which `is_suffix` returns true to the back of
/// `slice`, keeping the relative order of both groups, and returns the
/// index where the suffix group starts.
///
/// Divide and conquer: partition both halves, then rotate the middle so the
/// back half's prefix group lands ahead of the front half's suffix group.
/// Each element is tested exactly once.
pub fn stable_partition<T, P>(slice: &mut [T], mut is_suffix: P) -> usize
where
    P: FnMut(&T) -> bool,
{
    partition_in(slice, &mut is_suffix)
}

fn partition_in<T, P>(slice: &mut [T], is_suffix: &mut P) -> usize
where
    P: FnMut(&T) -> bool,
{
    match slice.len() {
        0 => 0,
        1 => {
            if is_suffix(&slice[0]) {
                0
            } else {
                1
            }
        }
        n => {
            let half = n / 2;
            let (front, back) = slice.split_at_mut(half);
            let j = partition_in(front, is_suffix);
            let k = half + partition_in(back, is_suffix);

            // [j, half) holds the front's suffix group, [half, k) the back's
            // prefix group; swap them in place.
            slice[j..k].rotate_left(half - j);
            j + (k - half)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_and_single() {
        let mut empty: [u8; 0] = [];
        assert_eq!(stable_partition(&mut empty, |_| true), 0);

        let mut one = [7];
        assert_eq!(stable_partition(&mut one, |&x| x == 7), 0);
        assert_eq!(stable_partition(&mut one, |&x| x == 8), 1);
    }

    #[test]
    fn test_keeps_relative_order() {
        let mut values = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        let start = stable_partition(&mut values, |&x| x % 3 == 0);
        assert_eq!(start, 6);
        assert_eq!(values, [1, 2, 4, 5, 7, 8, 3, 6, 9]);
    }

    #[test]
    fn test_all_or_nothing() {
        let mut values = ['a', 'b', 'c'];
        assert_eq!(stable_partition(&mut values, |_| false), 3);
        assert_eq!(values, ['a', 'b', 'c']);
        assert_eq!(stable_partition(&mut values, |_| true), 0);
        assert_eq!(values, ['a', 'b', 'c']);
    }

    #[test]
    fn test_predicate_called_once_per_element() {
        let mut values = [0u32; 13];
        let mut calls = 0;
        stable_partition(&mut values, |_| {
            calls += 1;
            false
        });
        assert_eq!(calls, 13);
    }

    proptest! {
        #[test]
        fn matches_filter_order(values in proptest::collection::vec(0u8..10, 0..64)) {
            let expected_front: Vec<u8> = values.iter().copied().filter(|v| v % 2 == 0).collect();
            let expected_back: Vec<u8> = values.iter().copied().filter(|v| v % 2 == 1).collect();

            let mut partitioned = values.clone();
            let start = stable_partition(&mut partitioned, |v| v % 2 == 1);

            prop_assert_eq!(start, expected_front.len());
            prop_assert_eq!(&partitioned[..start], &expected_front[..]);
            prop_assert_eq!(&partitioned[start..], &expected_back[..]);
        }
    }
}
