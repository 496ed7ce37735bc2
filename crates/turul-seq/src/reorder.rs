//! In-place reordering.

/// Reverse `s` in place.
pub fn reverse<T>(s: &mut [T]) {
    s.reverse();
}

/// Rotate left by `positions`, wrapping modulo the length.
/// Sequences with fewer than two elements are left alone.
pub fn rotate_left<T>(s: &mut [T], positions: usize) {
    if s.len() < 2 {
        return;
    }
    let positions = positions % s.len();
    s.rotate_left(positions);
}

/// Rotate right by `positions`, wrapping modulo the length.
/// Sequences with fewer than two elements are left alone.
pub fn rotate_right<T>(s: &mut [T], positions: usize) {
    if s.len() < 2 {
        return;
    }
    let positions = positions % s.len();
    s.rotate_right(positions);
}

/// Uniformly shuffle `s` in place (Fisher–Yates).
pub fn shuffle<T>(s: &mut [T]) {
    for i in (1..s.len()).rev() {
        let j = rand::random_range(0..=i);
        s.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse() {
        let mut s = [1, 2, 3];
        reverse(&mut s);
        assert_eq!(s, [3, 2, 1]);
    }

    #[test]
    fn test_rotate_left() {
        let mut s = [1, 2, 3, 4, 5];
        rotate_left(&mut s, 2);
        assert_eq!(s, [3, 4, 5, 1, 2]);

        // Wraps modulo the length.
        rotate_left(&mut s, 5);
        assert_eq!(s, [3, 4, 5, 1, 2]);
        rotate_left(&mut s, 7);
        assert_eq!(s, [5, 1, 2, 3, 4]);
    }

    #[test]
    fn test_rotate_right() {
        let mut s = [1, 2, 3, 4, 5];
        rotate_right(&mut s, 2);
        assert_eq!(s, [4, 5, 1, 2, 3]);
    }

    #[test]
    fn test_rotate_short_sequences() {
        let mut one = [9];
        rotate_left(&mut one, 3);
        assert_eq!(one, [9]);

        let mut empty: [i32; 0] = [];
        rotate_right(&mut empty, 1);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut s: Vec<u32> = (0..100).collect();
        shuffle(&mut s);
        assert_eq!(s.len(), 100);
        let mut sorted = s.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..100).collect::<Vec<_>>());
    }
}
