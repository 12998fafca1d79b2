//! Stable grouping of rows by a derived string key.

use std::collections::HashMap;

/// Ordered buckets produced by [`group_by`].
///
/// Buckets are kept in the order their key was first seen; rows inside a bucket keep input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Groups<T> {
    buckets: Vec<(String, Vec<T>)>,
}

impl<T> Groups<T> {
    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `true` if there are no buckets.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Sum of all bucket sizes.
    pub fn total_rows(&self) -> usize {
        self.buckets.iter().map(|(_, rows)| rows.len()).sum()
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(key, _)| key.as_str())
    }

    /// Rows of the bucket for `key`.
    pub fn get(&self, key: &str) -> Option<&[T]> {
        self.buckets
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, rows)| rows.as_slice())
    }

    /// Iterate `(key, rows)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.buckets
            .iter()
            .map(|(key, rows)| (key.as_str(), rows.as_slice()))
    }
}

impl<T> IntoIterator for Groups<T> {
    type Item = (String, Vec<T>);
    type IntoIter = std::vec::IntoIter<(String, Vec<T>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Groups<T> {
    type Item = &'a (String, Vec<T>);
    type IntoIter = std::slice::Iter<'a, (String, Vec<T>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

/// Partition `rows` into buckets keyed by `selector(row)`.
///
/// No sorting happens here; order rows before or after grouping as needed.
pub fn group_by<T, F>(rows: impl IntoIterator<Item = T>, mut selector: F) -> Groups<T>
where
    F: FnMut(&T) -> String,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(String, Vec<T>)> = Vec::new();

    for row in rows {
        let key = selector(&row);
        match positions.get(&key) {
            Some(&idx) => buckets[idx].1.push(row),
            None => {
                positions.insert(key.clone(), buckets.len());
                buckets.push((key, vec![row]));
            }
        }
    }

    Groups { buckets }
}

#[cfg(test)]
mod tests {
    use super::group_by;

    #[test]
    fn buckets_follow_first_seen_order() {
        let rows = vec![("b", 1), ("a", 2), ("b", 3), ("c", 4), ("a", 5)];
        let groups = group_by(rows, |(k, _)| k.to_string());

        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(groups.get("b"), Some(&[("b", 1), ("b", 3)][..]));
        assert_eq!(groups.get("a"), Some(&[("a", 2), ("a", 5)][..]));
        assert_eq!(groups.get("missing"), None);
    }

    #[test]
    fn every_row_lands_in_exactly_one_bucket() {
        let rows: Vec<u32> = (0..50).collect();
        let groups = group_by(rows.clone(), |n| (n % 7).to_string());

        assert_eq!(groups.len(), 7);
        assert_eq!(groups.total_rows(), rows.len());

        let mut seen: Vec<u32> = groups.into_iter().flat_map(|(_, bucket)| bucket).collect();
        seen.sort_unstable();
        assert_eq!(seen, rows);
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        let groups = group_by(Vec::<u8>::new(), |n| n.to_string());
        assert!(groups.is_empty());
        assert_eq!(groups.total_rows(), 0);
    }

    #[test]
    fn composite_keys_split_equal_dates_by_relation() {
        let rows = vec![("girl", 3, 1), ("girl", 3, 1), ("boy", 3, 1)];
        let groups = group_by(rows, |(rel, m, d)| format!("{rel}-{m}-{d}"));
        let sizes: Vec<_> = groups.iter().map(|(_, rows)| rows.len()).collect();
        assert_eq!(sizes, vec![2, 1]);
    }
}
