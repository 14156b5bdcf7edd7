//! Byte-buffer helpers shared by the loading code.

/// Repeatedly copies `src` into `dest` starting at `start` until the end of
/// `dest` is reached. The final copy is truncated so the fill ends exactly at
/// the end of the destination. Used to mirror undersized images across a
/// larger address range.
pub fn mirror_fill(dest: &mut [u8], start: usize, src: &[u8]) {
    // An empty source would tile forever.
    if src.is_empty() {
        return;
    }
    let Some(tail) = dest.get_mut(start..) else {
        return;
    };
    for chunk in tail.chunks_mut(src.len()) {
        chunk.copy_from_slice(&src[..chunk.len()]);
    }
}

/// Swaps each adjacent byte pair in place (16-bit byte order correction).
/// A trailing odd byte is left untouched.
pub fn byte_swap16(buf: &mut [u8]) {
    for pair in buf.chunks_exact_mut(2) {
        pair.swap(0, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_fill_tiles_source() {
        for (dest_len, src_len) in [(16usize, 4usize), (10, 3), (7, 7), (5, 8), (1, 2)] {
            let src: Vec<u8> = (1..=src_len as u8).collect();
            let mut dest = vec![0u8; dest_len];
            mirror_fill(&mut dest, 0, &src);
            for (i, &byte) in dest.iter().enumerate() {
                assert_eq!(
                    byte,
                    src[i % src.len()],
                    "dest[{}] with dest_len={} src_len={}",
                    i,
                    dest_len,
                    src_len
                );
            }
        }
    }

    #[test]
    fn test_mirror_fill_from_offset() {
        let mut dest = [0xAAu8; 8];
        mirror_fill(&mut dest, 5, &[1, 2]);
        assert_eq!(dest, [0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 1, 2, 1]);
    }

    #[test]
    fn test_mirror_fill_empty_source_is_noop() {
        let mut dest = [7u8; 4];
        mirror_fill(&mut dest, 0, &[]);
        assert_eq!(dest, [7, 7, 7, 7]);
    }

    #[test]
    fn test_mirror_fill_start_past_end_is_noop() {
        let mut dest = [7u8; 4];
        mirror_fill(&mut dest, 9, &[1, 2, 3]);
        assert_eq!(dest, [7, 7, 7, 7]);
    }

    #[test]
    fn test_byte_swap16_swaps_pairs() {
        let mut buf = [0x11u8, 0x22, 0x33, 0x44];
        byte_swap16(&mut buf);
        assert_eq!(buf, [0x22, 0x11, 0x44, 0x33]);
    }

    #[test]
    fn test_byte_swap16_is_its_own_inverse() {
        let original: Vec<u8> = (0..64u32).map(|i| (i * 17 % 251) as u8).collect();
        let mut buf = original.clone();
        byte_swap16(&mut buf);
        byte_swap16(&mut buf);
        assert_eq!(buf, original);
    }

    #[test]
    fn test_byte_swap16_leaves_odd_tail() {
        let mut buf = [1u8, 2, 3];
        byte_swap16(&mut buf);
        assert_eq!(buf, [2, 1, 3]);
    }
}
