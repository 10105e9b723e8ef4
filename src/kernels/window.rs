//! Scalar helpers for the columns the 4-wide bulk pass can't cover.

/// Dot product of one `FS`×`FS` input window with a filter block.
///
/// `rows[i]` is the offset of input row `i` of the window, `col` the first
/// column. Taps are visited row-major and split by parity into two sums,
/// the same order `lanes::accumulate` uses, so a column computed here is
/// bit-identical to the same column computed by a vector group.
#[inline(always)]
pub fn dot<const FS: usize>(input: &[f32], rows: &[usize; FS], col: usize, coeffs: &[f32]) -> f32 {
    debug_assert!(coeffs.len() >= FS * FS);
    let mut even = 0.0f32;
    let mut odd = 0.0f32;
    for (i, &row) in rows.iter().enumerate() {
        let window = &input[row + col..row + col + FS];
        let taps = &coeffs[i * FS..(i + 1) * FS];
        for (j, (&x, &k)) in window.iter().zip(taps).enumerate() {
            if (i * FS + j) % 2 == 0 {
                even += x * k;
            } else {
                odd += x * k;
            }
        }
    }
    even + odd
}

/// How many of the `groups` vector groups of an output row can be loaded
/// without leaving `input`.
///
/// Group `s` reads `[last_row + s * advance, last_row + s * advance + span)`
/// where `last_row` is the offset of the window's bottom row (the highest
/// address). The loads run a few elements past the window, so the very last
/// groups of a buffer may have to fall back to [`dot`].
#[inline(always)]
pub fn vector_groups(input_len: usize, last_row: usize, groups: usize, advance: usize, span: usize) -> usize {
    match input_len.checked_sub(last_row + span) {
        Some(room) => groups.min(room / advance + 1),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_reads_the_3x3_window() {
        // 4x5 plane holding its own index
        let input: Vec<f32> = (0..20).map(|i| i as f32).collect();
        let mut coeffs = [0.0f32; 9];
        coeffs[5] = 1.0; // row 1, col 2
        assert_eq!(dot(&input, &[5, 10, 15], 1, &coeffs), 13.0);
    }

    #[test]
    fn dot_sums_the_4x4_window() {
        let input = vec![1.0f32; 32];
        let coeffs = [1.0f32; 16];
        assert_eq!(dot(&input, &[0, 8, 16, 24], 2, &coeffs), 16.0);
    }

    #[test]
    fn vector_groups_stops_before_end() {
        assert_eq!(vector_groups(100, 0, 3, 4, 8), 3);
        // last row at 10: group 0 needs [10, 18), group 1 [14, 22)
        assert_eq!(vector_groups(20, 10, 3, 4, 8), 1);
        assert_eq!(vector_groups(17, 10, 3, 4, 8), 0);
        assert_eq!(vector_groups(22, 10, 3, 4, 8), 2);
    }
}
