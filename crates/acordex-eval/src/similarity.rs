use std::collections::HashMap;

use crate::normalize::normalize;

/// Similarity between two strings, in `[0.0, 1.0]`.
///
/// Both empty counts as a perfect match; exactly one empty as no match.
/// Otherwise both sides are normalized and scored with a greedy
/// longest-matching-block ratio: `2 * M / T`, where `M` is the total length of
/// the matching blocks and `T` the summed length of both strings. This is
/// block matching, not a global alignment, so scores can differ from
/// Levenshtein-based similarity near the decision threshold.
pub fn string_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a: Vec<char> = normalize(a).chars().collect();
    let b: Vec<char> = normalize(b).chars().collect();
    sequence_ratio(&a, &b)
}

/// Greedy longest-matching-block ratio over two character sequences.
///
/// Repeatedly finds the longest common contiguous block, then recurses into
/// the regions left and right of it. Two empty sequences score 1.0.
fn sequence_ratio(a: &[char], b: &[char]) -> f64 {
    let length = a.len() + b.len();
    if length == 0 {
        return 1.0;
    }

    // positions of each character in b, ascending
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        b2j.entry(ch).or_default().push(j);
    }

    let mut matches = 0usize;
    let mut queue = vec![(0usize, a.len(), 0usize, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, size) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if size > 0 {
            matches += size;
            queue.push((alo, i, blo, j));
            queue.push((i + size, ahi, j + size, bhi));
        }
    }

    2.0 * matches as f64 / length as f64
}

/// Longest block with `a[i..i+size] == b[j..j+size]`, `alo <= i <= ahi - size`
/// and `blo <= j <= bhi - size`. Ties resolve to the earliest block in `a`,
/// then the earliest in `b`.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best_i = alo;
    let mut best_j = blo;
    let mut best_size = 0usize;

    // j2len[j] = length of the longest block ending at a[i], b[j]
    let mut j2len: HashMap<usize, usize> = HashMap::new();
    for i in alo..ahi {
        let mut next_j2len = HashMap::new();
        if let Some(positions) = b2j.get(&a[i]) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let size = if j > blo {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                next_j2len.insert(j, size);
                if size > best_size {
                    best_i = i + 1 - size;
                    best_j = j + 1 - size;
                    best_size = size;
                }
            }
        }
        j2len = next_j2len;
    }

    (best_i, best_j, best_size)
}
