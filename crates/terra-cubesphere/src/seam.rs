//! Texture-coordinate seam correction.

/// Unwrap UV.x discontinuities triangle by triangle.
///
/// For every triangle the three *original* `u` values are compared pairwise.
/// When a pair differs by more than 0.5 the smaller coordinate (the one below
/// 0.5) is pushed past 1.0 instead of wrapping the larger one back. Vertex data
/// is shared, so the correction is written to the vertex itself. Triangles
/// that reference missing vertices are skipped.
pub fn fix_uv_seams(uvs: &mut [[f32; 2]], indices: &[u32]) {
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (Some(ua), Some(ub), Some(uc)) = (uvs.get(a), uvs.get(b), uvs.get(c)) else {
            continue;
        };
        let original = [ua[0], ub[0], uc[0]];
        let corners = [a, b, c];

        for (i, j) in [(0, 1), (0, 2), (1, 2)] {
            if (original[i] - original[j]).abs() > 0.5 {
                let k = if original[i] < 0.5 { i } else { j };
                uvs[corners[k]][0] = original[k] + 1.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_spread(uvs: &[[f32; 2]], tri: &[u32]) -> f32 {
        let us: Vec<f32> = tri.iter().map(|&i| uvs[i as usize][0]).collect();
        let hi = us.iter().copied().fold(f32::MIN, f32::max);
        let lo = us.iter().copied().fold(f32::MAX, f32::min);
        hi - lo
    }

    #[test]
    fn test_small_u_is_pushed_past_one() {
        let mut uvs = [[0.02, 0.0], [0.98, 0.0], [0.97, 1.0]];
        fix_uv_seams(&mut uvs, &[0, 1, 2]);
        assert!((uvs[0][0] - 1.02).abs() < 1e-6);
        assert_eq!(uvs[1][0], 0.98);
        assert_eq!(uvs[2][0], 0.97);
        assert!(max_spread(&uvs, &[0, 1, 2]) <= 0.5);
    }

    #[test]
    fn test_two_small_coordinates_both_unwrap() {
        let mut uvs = [[0.98, 0.0], [0.02, 0.0], [0.03, 1.0]];
        fix_uv_seams(&mut uvs, &[0, 1, 2]);
        assert_eq!(uvs[0][0], 0.98);
        assert!((uvs[1][0] - 1.02).abs() < 1e-6);
        assert!((uvs[2][0] - 1.03).abs() < 1e-6);
        assert!(max_spread(&uvs, &[0, 1, 2]) <= 0.5);
    }

    #[test]
    fn test_continuous_triangle_untouched() {
        let mut uvs = [[0.2, 0.0], [0.3, 0.0], [0.25, 0.1]];
        let before = uvs;
        fix_uv_seams(&mut uvs, &[0, 1, 2]);
        assert_eq!(uvs, before);
    }

    #[test]
    fn test_v_coordinate_never_changes() {
        let mut uvs = [[0.01, 0.9], [0.99, 0.1], [0.95, 0.5]];
        fix_uv_seams(&mut uvs, &[0, 1, 2]);
        assert_eq!([uvs[0][1], uvs[1][1], uvs[2][1]], [0.9, 0.1, 0.5]);
    }

    #[test]
    fn test_out_of_range_triangle_skipped() {
        let mut uvs = [[0.01, 0.0], [0.99, 0.0]];
        fix_uv_seams(&mut uvs, &[0, 1, 7]);
        assert_eq!(uvs, [[0.01, 0.0], [0.99, 0.0]]);
    }

    #[test]
    fn test_seam_strip_is_continuous_after_fix() {
        // A strip of quads straddling u = 0/1, each triangle with its own vertices.
        let mut uvs = Vec::new();
        let mut indices = Vec::new();
        for row in 0..8 {
            let v0 = row as f32 / 8.0;
            let v1 = (row + 1) as f32 / 8.0;
            let base = uvs.len() as u32;
            uvs.extend_from_slice(&[[0.95, v0], [0.05, v0], [0.95, v1]]);
            uvs.extend_from_slice(&[[0.05, v0], [0.05, v1], [0.95, v1]]);
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 3, base + 4, base + 5]);
        }
        fix_uv_seams(&mut uvs, &indices);
        for tri in indices.chunks_exact(3) {
            assert!(max_spread(&uvs, tri) <= 0.5, "triangle {tri:?} still wraps");
        }
    }
}
