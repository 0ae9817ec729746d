/// Number of members of each of the `k` groups.
pub fn group_sizes(assignment: &[usize], k: usize) -> Vec<usize> {
    let mut sizes = vec![0usize; k];
    for &group in assignment {
        sizes[group] += 1;
    }
    sizes
}

/// Moves members out of the largest group into empty groups until none is
/// empty.
///
/// The lowest empty group receives every other member of the largest group
/// (first, third, fifth, ... in index order). Ties for the largest group go to
/// the lowest group id. Nothing happens when `k >= 2 * n`, and the pass gives
/// up once the largest group has a single member, which only happens for
/// `k > n`.
///
/// Returns the number of repairs performed.
pub fn rebalance(assignment: &mut [usize], k: usize) -> usize {
    if k >= 2 * assignment.len() {
        return 0;
    }

    let mut repairs = 0;
    let mut sizes = group_sizes(assignment, k);
    while let Some(empty) = sizes.iter().position(|&s| s == 0) {
        let largest = first_largest(&sizes);
        if sizes[largest] < 2 {
            break;
        }

        let mut toggle = false;
        for group in assignment.iter_mut().filter(|g| **g == largest) {
            toggle = !toggle;
            if toggle {
                *group = empty;
            }
        }

        sizes = group_sizes(assignment, k);
        repairs += 1;
    }
    repairs
}

fn first_largest(sizes: &[usize]) -> usize {
    let mut best = 0;
    for (group, &size) in sizes.iter().enumerate() {
        if size > sizes[best] {
            best = group;
        }
    }
    best
}
