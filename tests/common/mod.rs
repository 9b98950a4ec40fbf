#![allow(dead_code)]

use challenge_core::challenge::DepositSlot;

/// Deposits with the given values, none paid.
pub fn slots(values: &[f64]) -> Vec<DepositSlot> {
    values.iter().copied().map(DepositSlot::new).collect()
}

/// Sum of the truncated values of the chosen deposits.
pub fn whole_sum(slots: &[DepositSlot], picked: &[usize]) -> usize {
    picked
        .iter()
        .map(|&index| slots[index].value.trunc() as usize)
        .sum()
}

/// Largest subset sum of eligible truncated values not above `capacity`,
/// by exhaustive enumeration.
pub fn brute_force_best(slots: &[DepositSlot], capacity: usize) -> usize {
    let eligible: Vec<usize> = slots
        .iter()
        .filter(|slot| !slot.done)
        .map(|slot| slot.value.trunc() as usize)
        .collect();
    let mut best = 0;
    for mask in 0u32..(1u32 << eligible.len()) {
        let sum: usize = eligible
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, value)| *value)
            .sum();
        if sum <= capacity && sum > best {
            best = sum;
        }
    }
    best
}

/// Straightforward DP that keeps the full index list for every reachable
/// sum. Slower and hungrier than the library, but its tie-break is easy to
/// read: slots in original order, descending sums, first list to reach a
/// sum wins.
pub fn list_table_selection(slots: &[DepositSlot], capacity: usize) -> Vec<usize> {
    let eligible: Vec<(usize, usize)> = slots
        .iter()
        .enumerate()
        .filter(|(_, slot)| !slot.done)
        .map(|(index, slot)| (index, slot.value.trunc().max(0.0) as usize))
        .collect();
    if capacity == 0 || eligible.is_empty() {
        return Vec::new();
    }

    let mut table: Vec<Option<Vec<usize>>> = vec![None; capacity + 1];
    table[0] = Some(Vec::new());
    for &(index, value) in &eligible {
        if value == 0 || value > capacity {
            continue;
        }
        for sum in (value..=capacity).rev() {
            if table[sum].is_none() {
                if let Some(previous) = table[sum - value].clone() {
                    let mut path = previous;
                    path.push(index);
                    table[sum] = Some(path);
                }
            }
        }
    }
    (0..=capacity)
        .rev()
        .find_map(|sum| table[sum].clone())
        .unwrap_or_default()
}
