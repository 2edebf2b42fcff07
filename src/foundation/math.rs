pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

pub(crate) fn premul_rgba8(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    let a16 = u16::from(a);
    [
        mul_div255_u8(u16::from(r), a16),
        mul_div255_u8(u16::from(g), a16),
        mul_div255_u8(u16::from(b), a16),
        a,
    ]
}

pub(crate) fn unpremul_rgba8(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    if a == 0 {
        return [0, 0, 0, 0];
    }
    if a == 255 {
        return rgba;
    }
    let a32 = u32::from(a);
    let un = |c: u8| -> u8 { ((u32::from(c) * 255 + a32 / 2) / a32).min(255) as u8 };
    [un(r), un(g), un(b), a]
}

/// Source-over of a premultiplied RGBA8 pixel onto an opaque RGB8 pixel.
pub(crate) fn premul_over_rgb(dst: [u8; 3], src: [u8; 4]) -> [u8; 3] {
    let inv = 255 - u16::from(src[3]);
    let ch = |s: u8, d: u8| -> u8 {
        (u16::from(s) + u16::from(mul_div255_u8(u16::from(d), inv))).min(255) as u8
    };
    [ch(src[0], dst[0]), ch(src[1], dst[1]), ch(src[2], dst[2])]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
