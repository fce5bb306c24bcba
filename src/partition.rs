// Job partitioning for wordfuzz
// Splits the wordlist into contiguous batches, one per worker

/// Number of workers actually used for `word_count` words.
///
/// Never more workers than words; zero words means zero workers.
pub fn effective_workers(word_count: usize, requested: usize) -> usize {
    requested.max(1).min(word_count)
}

/// Split `words` into contiguous, non-overlapping batches.
///
/// The first `len % workers` batches get one extra word, so sizes differ
/// by at most one and concatenating the batches gives back `words`.
pub fn partition_jobs<T: Clone>(words: &[T], requested: usize) -> Vec<Vec<T>> {
    let workers = effective_workers(words.len(), requested);
    if workers == 0 {
        return Vec::new();
    }

    let base = words.len() / workers;
    let remainder = words.len() % workers;

    let mut batches = Vec::with_capacity(workers);
    let mut start = 0;
    for i in 0..workers {
        let size = base + usize::from(i < remainder);
        let end = start + size;
        batches.push(words[start..end].to_vec());
        start = end;
    }
    batches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("w{}", i)).collect()
    }

    #[test]
    fn concatenation_reproduces_input() {
        for w in 0..40 {
            for t in 1..12 {
                let input = words(w);
                let batches = partition_jobs(&input, t);
                let joined: Vec<String> = batches.iter().flatten().cloned().collect();
                assert_eq!(joined, input, "w={} t={}", w, t);

                if let (Some(max), Some(min)) = (
                    batches.iter().map(Vec::len).max(),
                    batches.iter().map(Vec::len).min(),
                ) {
                    assert!(max - min <= 1, "w={} t={}", w, t);
                }
            }
        }
    }

    #[test]
    fn remainder_goes_to_leading_batches() {
        let batches = partition_jobs(&words(7), 3);
        let sizes: Vec<usize> = batches.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 2, 2]);
    }

    #[test]
    fn fewer_words_than_workers() {
        let batches = partition_jobs(&words(3), 10);
        assert_eq!(batches.len(), 3);
        assert!(batches.iter().all(|b| b.len() == 1));
    }

    #[test]
    fn empty_wordlist_yields_no_batches() {
        let batches = partition_jobs::<String>(&[], 10);
        assert!(batches.is_empty());
        assert_eq!(effective_workers(0, 10), 0);
    }

    #[test]
    fn deterministic() {
        let input = words(23);
        assert_eq!(partition_jobs(&input, 4), partition_jobs(&input, 4));
    }
}
