/// Historical hit rate the confidence scale is anchored to.
const BASE_CONFIDENCE: i32 = 92;

/// Final recommendation label for one matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recommendation {
    Yes,
    Maybe,
    No,
    /// One or both teams lack a qualifying sample; the score is not meaningful.
    Unverified,
    /// No minimum alternate line offered for this game.
    Skip,
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::Yes => "YES",
            Recommendation::Maybe => "MAYBE",
            Recommendation::No => "NO",
            Recommendation::Unverified => "UNVERIFIED",
            Recommendation::Skip => "SKIP",
        }
    }
}

/// Confidence sub-tier within a YES recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesTier {
    /// score < 18, reported at 90%+.
    High,
    /// 18 <= score < 24, reported at 80-89%.
    Mid,
    /// 24 <= score < 30, reported at 70-79%.
    Low,
}

/// Data availability for the matchup, decided before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataAvailability {
    Verified,
    Unverified,
    NoLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub recommendation: Recommendation,
    pub yes_tier: Option<YesTier>,
    /// Present only for scored matchups.
    pub confidence_pct: Option<u8>,
}

/// Map (risk score, data availability) to a decision. Pure table lookup:
/// no memory across calls, identical inputs always yield identical output.
///
/// Score bands partition the non-negative integers:
///   [0, 18) YES-high | [18, 24) YES-mid | [24, 30) YES-low |
///   [30, 45) MAYBE   | [45, ..) NO
pub fn decide(score: i32, availability: DataAvailability) -> Decision {
    match availability {
        DataAvailability::Unverified => {
            return Decision {
                recommendation: Recommendation::Unverified,
                yes_tier: None,
                confidence_pct: None,
            }
        }
        DataAvailability::NoLine => {
            return Decision {
                recommendation: Recommendation::Skip,
                yes_tier: None,
                confidence_pct: None,
            }
        }
        DataAvailability::Verified => {}
    }

    let base = (BASE_CONFIDENCE - score).clamp(40, BASE_CONFIDENCE);
    let (recommendation, yes_tier, confidence) = if score >= 45 {
        (Recommendation::No, None, base.min(50))
    } else if score >= 30 {
        (Recommendation::Maybe, None, base)
    } else if score >= 24 {
        (Recommendation::Yes, Some(YesTier::Low), base.clamp(70, 79))
    } else if score >= 18 {
        (Recommendation::Yes, Some(YesTier::Mid), base.clamp(80, 89))
    } else {
        (Recommendation::Yes, Some(YesTier::High), base.max(90))
    };

    Decision {
        recommendation,
        yes_tier,
        confidence_pct: Some(confidence as u8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_partition_scores() {
        // Every non-negative score maps to exactly one band, no gap, no overlap.
        for score in 0..200 {
            let d = decide(score, DataAvailability::Verified);
            let expected = match score {
                s if s >= 45 => (Recommendation::No, None),
                s if s >= 30 => (Recommendation::Maybe, None),
                s if s >= 24 => (Recommendation::Yes, Some(YesTier::Low)),
                s if s >= 18 => (Recommendation::Yes, Some(YesTier::Mid)),
                _ => (Recommendation::Yes, Some(YesTier::High)),
            };
            assert_eq!((d.recommendation, d.yes_tier), expected, "score {}", score);
        }
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(decide(17, DataAvailability::Verified).yes_tier, Some(YesTier::High));
        assert_eq!(decide(18, DataAvailability::Verified).yes_tier, Some(YesTier::Mid));
        assert_eq!(decide(23, DataAvailability::Verified).yes_tier, Some(YesTier::Mid));
        assert_eq!(decide(24, DataAvailability::Verified).yes_tier, Some(YesTier::Low));
        assert_eq!(
            decide(29, DataAvailability::Verified).recommendation,
            Recommendation::Yes
        );
        assert_eq!(
            decide(30, DataAvailability::Verified).recommendation,
            Recommendation::Maybe
        );
        assert_eq!(
            decide(44, DataAvailability::Verified).recommendation,
            Recommendation::Maybe
        );
        assert_eq!(
            decide(45, DataAvailability::Verified).recommendation,
            Recommendation::No
        );
    }

    #[test]
    fn test_confidence_ranges_match_bands() {
        for score in 0..18 {
            let c = decide(score, DataAvailability::Verified).confidence_pct.unwrap();
            assert!(c >= 90, "score {} conf {}", score, c);
        }
        for score in 18..24 {
            let c = decide(score, DataAvailability::Verified).confidence_pct.unwrap();
            assert!((80..=89).contains(&c), "score {} conf {}", score, c);
        }
        for score in 24..30 {
            let c = decide(score, DataAvailability::Verified).confidence_pct.unwrap();
            assert!((70..=79).contains(&c), "score {} conf {}", score, c);
        }
        for score in 45..120 {
            let c = decide(score, DataAvailability::Verified).confidence_pct.unwrap();
            assert!(c <= 50, "score {} conf {}", score, c);
        }
    }

    #[test]
    fn test_unverified_ignores_score() {
        for score in [0, 17, 30, 45, 500] {
            let d = decide(score, DataAvailability::Unverified);
            assert_eq!(d.recommendation, Recommendation::Unverified);
            assert_eq!(d.confidence_pct, None);
        }
    }

    #[test]
    fn test_no_line_is_skip() {
        let d = decide(0, DataAvailability::NoLine);
        assert_eq!(d.recommendation, Recommendation::Skip);
    }

    #[test]
    fn test_pure_function() {
        let a = decide(33, DataAvailability::Verified);
        let b = decide(33, DataAvailability::Verified);
        assert_eq!(a, b);
    }
}
