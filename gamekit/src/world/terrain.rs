//! Terrain Heights
//!
//! Cheap value noise for height maps. Not smooth (neighbouring samples are
//! uncorrelated unless `scale` is small), but stable across runs.

/// Fractional sine hash of (x, y), in [0, 1).
pub fn noise2(x: f64, y: f64) -> f64 {
    let s = (x * 12.9898 + y * 78.233).sin() * 43758.5453;
    s - s.floor()
}

/// `height` rows of `width` samples of [`noise2`] at `(x*scale, y*scale)`.
pub fn height_map(width: usize, height: usize, scale: f64) -> Vec<Vec<f64>> {
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| noise2(x as f64 * scale, y as f64 * scale))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_unit_range() {
        for i in 0..200 {
            let v = noise2(i as f64 * 0.37, i as f64 * -1.3);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_height_map_shape_and_stability() {
        let a = height_map(4, 3, 0.1);
        assert_eq!(a.len(), 3);
        assert!(a.iter().all(|row| row.len() == 4));
        assert_eq!(a, height_map(4, 3, 0.1));
        assert_eq!(a[0][0], 0.0);
    }
}
