//! Packed color helpers
//!
//! Colors cross the rule boundary as opaque `u32` values laid out as
//! `A<<24 | B<<16 | G<<8 | R`, which is RGBA byte order on little-endian.

/// Pack channels into `A<<24 | B<<16 | G<<8 | R`
#[inline]
pub fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (a as u32) << 24 | (b as u32) << 16 | (g as u32) << 8 | r as u32
}

/// Split a packed color back into `[r, g, b, a]`
#[inline]
pub fn unpack_rgba(color: u32) -> [u8; 4] {
    color.to_le_bytes()
}

/// Scale the RGB channels by `factor`, leaving alpha alone
pub fn shade(color: u32, factor: f32) -> u32 {
    let [r, g, b, a] = unpack_rgba(color);
    let scale = |channel: u8| (channel as f32 * factor).round().clamp(0.0, 255.0) as u8;
    pack_rgba(scale(r), scale(g), scale(b), a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_layout() {
        assert_eq!(pack_rgba(0x11, 0x22, 0x33, 0x44), 0x4433_2211);
        assert_eq!(pack_rgba(255, 0, 0, 255), 0xFF00_00FF);
    }

    #[test]
    fn test_unpack() {
        assert_eq!(unpack_rgba(0x4433_2211), [0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn test_shade_darkens_and_keeps_alpha() {
        let color = pack_rgba(200, 100, 50, 128);
        assert_eq!(unpack_rgba(shade(color, 0.5)), [100, 50, 25, 128]);
    }

    #[test]
    fn test_shade_clamps() {
        let color = pack_rgba(200, 10, 0, 255);
        assert_eq!(unpack_rgba(shade(color, 2.0)), [255, 20, 0, 255]);
        assert_eq!(unpack_rgba(shade(color, -1.0)), [0, 0, 0, 255]);
    }
}
