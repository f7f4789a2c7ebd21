// Variable-length integers: 7 bits per byte, least significant group first,
// high bit set while more bytes follow.

/// Decode the v-int starting at `offset`.
#[inline]
pub fn read_vint(data: &[u8], offset: usize) -> usize {
    let mut pos = offset;
    let mut b = data[pos];
    let mut value = (b & 0x7f) as usize;
    let mut shift = 7;
    while b & 0x80 != 0 {
        pos += 1;
        b = data[pos];
        value |= ((b & 0x7f) as usize) << shift;
        shift += 7;
    }
    value
}

/// Offset of the first byte after the v-int starting at `offset`.
#[inline]
pub fn skip_vint(data: &[u8], offset: usize) -> usize {
    let mut pos = offset;
    while data[pos] & 0x80 != 0 {
        pos += 1;
    }
    pos + 1
}

/// Bounds-checked decode. Returns the value and the offset after it, or
/// `None` if the v-int runs past the end of `data` or overflows `usize`.
pub fn try_read_vint(data: &[u8], offset: usize) -> Option<(usize, usize)> {
    let mut pos = offset;
    let mut value = 0usize;
    let mut shift = 0u32;
    loop {
        let b = *data.get(pos)?;
        if shift >= usize::BITS {
            return None;
        }
        value |= ((b & 0x7f) as usize).checked_shl(shift)?;
        pos += 1;
        if b & 0x80 == 0 {
            return Some((value, pos));
        }
        shift += 7;
    }
}

/// Append the v-int encoding of `value` to `out`.
pub fn write_vint(out: &mut Vec<u8>, mut value: usize) {
    while value >= 0x80 {
        out.push((value & 0x7f) as u8 | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Number of bytes `write_vint` emits for `value`.
pub fn vint_len(mut value: usize) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}
