//! Small numeric helpers shared by several algorithm families.

/// Block length for jump search over `len` elements: `ceil(sqrt(len))`,
/// never zero.
#[inline]
pub fn jump_block_size(len: usize) -> usize {
    if len <= 1 {
        1
    } else {
        let mut b = (len as f64).sqrt() as usize;
        while b * b < len {
            b += 1;
        }
        while b > 1 && (b - 1) * (b - 1) >= len {
            b -= 1;
        }
        b
    }
}

/// Whether city `i` is in the visited-set bitmask.
#[inline]
pub fn mask_contains(mask: usize, i: usize) -> bool {
    mask & (1 << i) != 0
}

/// Members of `mask` in ascending order.
pub fn mask_members(mask: usize) -> Vec<usize> {
    let mut members = Vec::with_capacity(mask.count_ones() as usize);
    let mut rest = mask;
    while rest != 0 {
        let i = rest.trailing_zeros() as usize;
        members.push(i);
        rest &= rest - 1;
    }
    members
}

/// `{0, 3}` style rendering of a bitmask for step descriptions.
pub fn mask_label(mask: usize) -> String {
    let members: Vec<String> = mask_members(mask).iter().map(|m| m.to_string()).collect();
    format!("{{{}}}", members.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_one_for_small_len() {
        assert_eq!(jump_block_size(0), 1);
        assert_eq!(jump_block_size(1), 1);
    }

    #[test]
    fn sqrt_ceiling_behavior() {
        assert_eq!(jump_block_size(2), 2);
        assert_eq!(jump_block_size(4), 2);
        assert_eq!(jump_block_size(5), 3);
        assert_eq!(jump_block_size(100), 10);
        assert_eq!(jump_block_size(101), 11);
        assert_eq!(jump_block_size(10_001), 101);
    }

    #[test]
    fn monotonic_non_decreasing() {
        let mut prev = 0;
        for n in 0..500 {
            let b = jump_block_size(n);
            assert!(b >= prev, "block size decreased at n={n}: {b} < {prev}");
            prev = b;
        }
    }

    #[test]
    fn mask_helpers() {
        assert!(mask_contains(0b101, 2));
        assert!(!mask_contains(0b101, 1));
        assert_eq!(mask_members(0b1011), vec![0, 1, 3]);
        assert_eq!(mask_label(0b1001), "{0, 3}");
        assert_eq!(mask_label(0), "{}");
    }
}
