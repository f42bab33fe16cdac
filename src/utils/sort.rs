/// Create the indices that sort the given keys (stable counting sort).
///
/// ```rust
/// use moldyn::utils::get_sort_indices;
///
/// let cells = vec![2, 0, 1, 0];
/// let indices = get_sort_indices(&cells, 3);
/// assert_eq!(indices, vec![1, 3, 2, 0]);
/// ```
pub fn get_sort_indices(keys: &[usize], num_keys: usize) -> Vec<usize> {
    let mut counts = bucket_starts(keys, num_keys);
    let mut output = vec![0; keys.len()];
    for (i, &key) in keys.iter().enumerate() {
        output[counts[key]] = i;
        counts[key] += 1;
    }
    output
}

/// Offsets of each bucket in the sorted order, with a trailing total.
///
/// Bucket `k` occupies `starts[k]..starts[k + 1]` of the array produced by
/// [`get_sort_indices`].
///
/// ```rust
/// use moldyn::utils::bucket_starts;
///
/// assert_eq!(bucket_starts(&[2, 0, 1, 0], 4), vec![0, 2, 3, 4, 4]);
/// ```
pub fn bucket_starts(keys: &[usize], num_keys: usize) -> Vec<usize> {
    let mut starts = vec![0; num_keys + 1];
    for &key in keys {
        starts[key + 1] += 1;
    }
    for k in 1..=num_keys {
        starts[k] += starts[k - 1];
    }
    starts
}
