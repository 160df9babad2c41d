//! Practice problems and timer formatting.

use serde::{Deserialize, Serialize};

/// Kind of generated practice problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemKind {
    /// `ax + b = c`
    Linear,
    /// `px² + qx + r = 0`
    Quadratic,
}

impl ProblemKind {
    /// Generate a random problem of this kind.
    #[must_use]
    pub fn generate(self, rng: &mut fastrand::Rng) -> String {
        match self {
            Self::Linear => {
                let a = rng.i32(1..=10);
                let b = rng.i32(1..=20);
                let c = rng.i32(1..=50);
                format!("{a}x + {b} = {c}")
            }
            Self::Quadratic => {
                let p = rng.i32(1..=10);
                let q = rng.i32(-10..10);
                let r = rng.i32(-10..10);
                format!("{p}x² {}x {} = 0", signed(q), signed(r))
            }
        }
    }
}

fn signed(n: i32) -> String {
    if n >= 0 {
        format!("+{n}")
    } else {
        n.to_string()
    }
}

/// Format a duration in seconds as `MM:SS`.
#[must_use]
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_shape() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..50 {
            let problem = ProblemKind::Linear.generate(&mut rng);
            let (lhs, rhs) = problem.split_once(" = ").expect("equals sign");
            let (ax, b) = lhs.split_once("x + ").expect("linear form");
            let a: i32 = ax.parse().expect("a");
            let b: i32 = b.parse().expect("b");
            let c: i32 = rhs.parse().expect("c");
            assert!((1..=10).contains(&a));
            assert!((1..=20).contains(&b));
            assert!((1..=50).contains(&c));
        }
    }

    #[test]
    fn test_quadratic_signs() {
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..50 {
            let problem = ProblemKind::Quadratic.generate(&mut rng);
            assert!(problem.ends_with(" = 0"));
            assert!(problem.contains("x² "));
            assert!(!problem.contains("+-"));
        }
    }

    #[test]
    fn test_generation_is_seeded() {
        let a = ProblemKind::Quadratic.generate(&mut fastrand::Rng::with_seed(1));
        let b = ProblemKind::Quadratic.generate(&mut fastrand::Rng::with_seed(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(600), "10:00");
    }
}
