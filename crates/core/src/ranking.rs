use crate::CandidateResult;

/// Keeps results scoring at least `threshold`, best first.
///
/// The sort is stable, so equal scores stay in processing order.
pub fn rank_candidates(results: Vec<CandidateResult>, threshold: f64) -> Vec<CandidateResult> {
    let mut ranked: Vec<CandidateResult> = results
        .into_iter()
        .filter(|result| result.score >= threshold)
        .collect();

    ranked.sort_by(|left, right| right.score.total_cmp(&left.score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::rank_candidates;
    use crate::CandidateResult;

    fn result(name: &str, score: f64) -> CandidateResult {
        CandidateResult {
            file_name: name.to_string(),
            email: None,
            score,
            text: String::new(),
        }
    }

    fn names(ranked: &[CandidateResult]) -> Vec<&str> {
        ranked.iter().map(|item| item.file_name.as_str()).collect()
    }

    #[test]
    fn threshold_partitions_results() {
        let results = vec![
            result("a", 12.0),
            result("b", 50.0),
            result("c", 49.999),
            result("d", 88.5),
        ];

        for threshold in [0.0, 12.0, 49.999, 50.0, 88.5, 100.0] {
            let ranked = rank_candidates(results.clone(), threshold);
            assert!(ranked.iter().all(|item| item.score >= threshold));

            let excluded = results
                .iter()
                .filter(|item| !ranked.iter().any(|kept| kept.file_name == item.file_name));
            assert!(excluded.into_iter().all(|item| item.score < threshold));
        }
    }

    #[test]
    fn ranked_set_is_descending() {
        let ranked = rank_candidates(
            vec![result("a", 12.0), result("b", 90.0), result("c", 55.0)],
            0.0,
        );
        assert_eq!(names(&ranked), vec!["b", "c", "a"]);
        assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn equal_scores_keep_processing_order() {
        let ranked = rank_candidates(
            vec![
                result("first", 70.0),
                result("top", 95.0),
                result("second", 70.0),
                result("third", 70.0),
            ],
            50.0,
        );
        assert_eq!(names(&ranked), vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn nothing_above_threshold_is_an_empty_set() {
        let ranked = rank_candidates(vec![result("a", 10.0)], 50.0);
        assert!(ranked.is_empty());
        assert!(rank_candidates(Vec::new(), 0.0).is_empty());
    }
}
