//! Depth classification: one static bucket table shared by the classifier
//! and the legend. Bucket edges live here and nowhere else.

/// A contiguous depth range mapped to one display color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthBucket {
    /// Lower bound in km as shown in the legend.
    pub floor: f64,
    /// Inclusive upper edge in km; `None` marks the open-ended last bucket.
    pub ceiling: Option<f64>,
    /// sRGB hex token handed to the rendering surface.
    pub color: &'static str,
}

/// Ascending, contiguous, non-overlapping. Classification only reads the
/// ceilings; the floors are display values for the legend.
pub const BUCKETS: [DepthBucket; 6] = [
    DepthBucket { floor: -10.0, ceiling: Some(10.0), color: "#66ff00" }, // bright green
    DepthBucket { floor: 10.0, ceiling: Some(30.0), color: "#ccff00" },  // fluorescent yellow
    DepthBucket { floor: 30.0, ceiling: Some(50.0), color: "#ffcc33" },  // sunglow
    DepthBucket { floor: 50.0, ceiling: Some(70.0), color: "#ff9933" },  // deep saffron
    DepthBucket { floor: 70.0, ceiling: Some(90.0), color: "#ff8243" },  // mango tango
    DepthBucket { floor: 90.0, ceiling: None, color: "#ff0000" },        // red
];

/// Map a depth in km to its bucket color: first bucket whose inclusive
/// ceiling the depth does not exceed, last bucket for everything deeper.
/// Total over all real inputs; boundary values resolve to the lower bucket.
pub fn color_for_depth(depth_km: f64) -> &'static str {
    for bucket in &BUCKETS {
        if let Some(edge) = bucket.ceiling {
            if depth_km <= edge {
                return bucket.color;
            }
        }
    }
    BUCKETS[BUCKETS.len() - 1].color
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        assert_eq!(BUCKETS.len(), 6);
        // Floors strictly ascending, ranges contiguous: each ceiling is the
        // next bucket's floor. Only the last bucket is open-ended.
        for pair in BUCKETS.windows(2) {
            assert!(pair[0].floor < pair[1].floor);
            assert_eq!(pair[0].ceiling, Some(pair[1].floor));
        }
        assert!(BUCKETS[BUCKETS.len() - 1].ceiling.is_none());
    }

    #[test]
    fn test_shallow_and_negative_depths() {
        assert_eq!(color_for_depth(-5.0), "#66ff00");
        assert_eq!(color_for_depth(0.0), "#66ff00");
        assert_eq!(color_for_depth(9.99), "#66ff00");
    }

    #[test]
    fn test_boundaries_resolve_downward() {
        // The boundary value takes the lower bucket; just above it takes the next.
        let cases = [
            (10.0, "#66ff00", "#ccff00"),
            (30.0, "#ccff00", "#ffcc33"),
            (50.0, "#ffcc33", "#ff9933"),
            (70.0, "#ff9933", "#ff8243"),
            (90.0, "#ff8243", "#ff0000"),
        ];
        for (edge, at, above) in cases {
            assert_eq!(color_for_depth(edge), at, "at edge {}", edge);
            assert_eq!(color_for_depth(edge + 0.01), above, "above edge {}", edge);
        }
    }

    #[test]
    fn test_deep_catch_all() {
        assert_eq!(color_for_depth(95.0), "#ff0000");
        assert_eq!(color_for_depth(700.0), "#ff0000");
    }

    #[test]
    fn test_total_and_deterministic() {
        let colors: Vec<&str> = BUCKETS.iter().map(|b| b.color).collect();
        let mut depth = -50.0;
        while depth < 200.0 {
            let c = color_for_depth(depth);
            assert!(colors.contains(&c), "unknown color for depth {}", depth);
            assert_eq!(c, color_for_depth(depth));
            depth += 0.25;
        }
    }

    #[test]
    fn test_buckets_monotonic_in_depth() {
        // Deeper depth never maps to an earlier bucket.
        let index_of = |depth: f64| {
            let c = color_for_depth(depth);
            BUCKETS.iter().position(|b| b.color == c).unwrap()
        };
        let samples = [-20.0, 5.0, 15.0, 35.0, 55.0, 75.0, 120.0];
        for pair in samples.windows(2) {
            assert!(index_of(pair[0]) <= index_of(pair[1]));
        }
    }
}
