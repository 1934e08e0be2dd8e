//! Reference 3D Perlin gradient noise.
//!
//! Uses Ken Perlin's fixed permutation table, duplicated to 512 entries so
//! that corner hashing never needs a wraparound branch.

use noise::NoiseFn;

const PERM_BASE: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

const PERM: [usize; 512] = build_perm();

const fn build_perm() -> [usize; 512] {
    let mut out = [0usize; 512];
    let mut i = 0;
    while i < 512 {
        out[i] = PERM_BASE[i & 255] as usize;
        i += 1;
    }
    out
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product of the offset with one of 12 cube-edge gradients.
#[inline]
fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}

/// Sample reference Perlin noise at `(x, y, z)`.
///
/// Output lies in `[-1, 1]` and is exactly zero on integer lattice points.
pub fn noise3(x: f64, y: f64, z: f64) -> f64 {
    let (fx, fy, fz) = (x.floor(), y.floor(), z.floor());
    // Lattice cell, wrapped into the permutation table.
    let xi = (fx as i64 & 255) as usize;
    let yi = (fy as i64 & 255) as usize;
    let zi = (fz as i64 & 255) as usize;
    let (xf, yf, zf) = (x - fx, y - fy, z - fz);

    let u = fade(xf);
    let v = fade(yf);
    let w = fade(zf);

    let a = PERM[xi] + yi;
    let aa = PERM[a] + zi;
    let ab = PERM[a + 1] + zi;
    let b = PERM[xi + 1] + yi;
    let ba = PERM[b] + zi;
    let bb = PERM[b + 1] + zi;

    let x1 = lerp(grad(PERM[aa], xf, yf, zf), grad(PERM[ba], xf - 1.0, yf, zf), u);
    let x2 = lerp(
        grad(PERM[ab], xf, yf - 1.0, zf),
        grad(PERM[bb], xf - 1.0, yf - 1.0, zf),
        u,
    );
    let y1 = lerp(x1, x2, v);

    let x3 = lerp(
        grad(PERM[aa + 1], xf, yf, zf - 1.0),
        grad(PERM[ba + 1], xf - 1.0, yf, zf - 1.0),
        u,
    );
    let x4 = lerp(
        grad(PERM[ab + 1], xf, yf - 1.0, zf - 1.0),
        grad(PERM[bb + 1], xf - 1.0, yf - 1.0, zf - 1.0),
        u,
    );
    let y2 = lerp(x3, x4, v);

    lerp(y1, y2, w)
}

/// Reference Perlin noise as a [`NoiseFn`] source.
///
/// Unlike [`noise::Perlin`] this source is unseeded: it always uses the
/// reference permutation, so terrain built on it is reproducible everywhere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Perlin3;

impl NoiseFn<f64, 3> for Perlin3 {
    fn get(&self, point: [f64; 3]) -> f64 {
        noise3(point[0], point[1], point[2])
    }
}
