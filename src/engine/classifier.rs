use super::interest::InterestCategory;

/// Interest vocabulary observed at training time, in sorted order. A
/// category's code is its position here; anything outside the vocabulary
/// encodes to 0 instead of failing.
const INTEREST_VOCAB: &[&str] = &[
    "art",
    "biology",
    "business",
    "coding",
    "engineering",
    "medicine",
    "physics",
];

/// The fixed labeled set the classifier is fitted on: math score, science
/// score, interest label, career label. Ten examples, trained once at
/// startup, never retrained.
const TRAINING_SET: &[(i64, i64, &str, &str)] = &[
    (80, 85, "coding", "Software Engineer"),
    (90, 95, "biology", "Doctor"),
    (60, 65, "art", "Designer"),
    (70, 75, "business", "Manager"),
    (85, 90, "coding", "Data Scientist"),
    (55, 60, "art", "Artist"),
    (95, 90, "physics", "Physicist"),
    (65, 70, "business", "Entrepreneur"),
    (75, 80, "engineering", "Engineer"),
    (88, 92, "medicine", "Doctor"),
];

pub fn interest_code(label: &str) -> usize {
    INTEREST_VOCAB.iter().position(|v| *v == label).unwrap_or(0)
}

#[derive(Debug, Clone)]
pub struct FeatureVector {
    pub math: i64,
    pub science: i64,
    pub interest: InterestCategory,
}

impl FeatureVector {
    fn encode(&self) -> [f64; 3] {
        [
            self.math as f64,
            self.science as f64,
            interest_code(self.interest.as_str()) as f64,
        ]
    }
}

#[derive(Debug, Clone)]
struct Sample {
    features: [f64; 3],
    label: &'static str,
}

#[derive(Debug)]
enum Node {
    Leaf(&'static str),
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn classify(&self, features: &[f64; 3]) -> &'static str {
        match self {
            Node::Leaf(label) => *label,
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if features[*feature] <= *threshold {
                    left.classify(features)
                } else {
                    right.classify(features)
                }
            }
        }
    }
}

/// Decision tree over (math, science, interest code), fitted with greedy
/// Gini splits at startup. Inference is stateless and always yields exactly
/// one label; no confidence is exposed.
#[derive(Debug)]
pub struct CareerClassifier {
    root: Node,
}

impl CareerClassifier {
    pub fn train() -> Self {
        let samples: Vec<Sample> = TRAINING_SET
            .iter()
            .map(|(math, science, interest, career)| Sample {
                features: [*math as f64, *science as f64, interest_code(interest) as f64],
                label: *career,
            })
            .collect();

        Self {
            root: build_node(&samples),
        }
    }

    pub fn predict(&self, input: &FeatureVector) -> &'static str {
        self.root.classify(&input.encode())
    }
}

fn build_node(samples: &[Sample]) -> Node {
    if samples.iter().all(|s| s.label == samples[0].label) {
        return Node::Leaf(samples[0].label);
    }

    let Some((feature, threshold)) = best_split(samples) else {
        return Node::Leaf(majority_label(samples));
    };

    let (left, right): (Vec<Sample>, Vec<Sample>) = samples
        .iter()
        .cloned()
        .partition(|s| s.features[feature] <= threshold);

    Node::Split {
        feature,
        threshold,
        left: Box::new(build_node(&left)),
        right: Box::new(build_node(&right)),
    }
}

/// Picks the (feature, threshold) with the lowest weighted Gini impurity.
/// Candidate thresholds are midpoints between consecutive distinct values,
/// scanned in fixed feature/value order, strictly-better-wins, so training
/// is fully deterministic.
fn best_split(samples: &[Sample]) -> Option<(usize, f64)> {
    let parent = gini(samples);
    let mut best: Option<(usize, f64)> = None;
    let mut best_impurity = parent;

    for feature in 0..3 {
        let mut values: Vec<f64> = samples.iter().map(|s| s.features[feature]).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup();

        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;
            let (left, right): (Vec<&Sample>, Vec<&Sample>) = samples
                .iter()
                .partition(|s| s.features[feature] <= threshold);

            let weighted = (left.len() as f64 * gini_refs(&left)
                + right.len() as f64 * gini_refs(&right))
                / samples.len() as f64;

            if weighted < best_impurity {
                best_impurity = weighted;
                best = Some((feature, threshold));
            }
        }
    }

    best
}

fn gini(samples: &[Sample]) -> f64 {
    let refs: Vec<&Sample> = samples.iter().collect();
    gini_refs(&refs)
}

fn gini_refs(samples: &[&Sample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let mut counts: Vec<(&str, usize)> = Vec::new();
    for sample in samples {
        match counts.iter_mut().find(|(label, _)| *label == sample.label) {
            Some((_, count)) => *count += 1,
            None => counts.push((sample.label, 1)),
        }
    }

    let total = samples.len() as f64;
    1.0 - counts
        .iter()
        .map(|(_, count)| {
            let p = *count as f64 / total;
            p * p
        })
        .sum::<f64>()
}

fn majority_label(samples: &[Sample]) -> &'static str {
    let mut counts: Vec<(&'static str, usize)> = Vec::new();
    for sample in samples {
        match counts.iter_mut().find(|(label, _)| *label == sample.label) {
            Some((_, count)) => *count += 1,
            None => counts.push((sample.label, 1)),
        }
    }
    // Ties resolve to the earliest-seen label.
    let mut best: Option<(&'static str, usize)> = None;
    for (label, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label).unwrap_or("Software Engineer")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(label: &str) -> InterestCategory {
        match label {
            "coding" => InterestCategory::Coding,
            "biology" => InterestCategory::Biology,
            "art" => InterestCategory::Art,
            "business" => InterestCategory::Business,
            "physics" => InterestCategory::Physics,
            other => panic!("not a canonical category: {other}"),
        }
    }

    #[test]
    fn interest_codes_follow_sorted_vocabulary() {
        assert_eq!(interest_code("art"), 0);
        assert_eq!(interest_code("biology"), 1);
        assert_eq!(interest_code("coding"), 3);
        assert_eq!(interest_code("physics"), 6);
    }

    #[test]
    fn unknown_interest_encodes_to_zero() {
        assert_eq!(interest_code("astrology"), 0);
        assert_eq!(interest_code(""), 0);
    }

    #[test]
    fn tree_reproduces_the_training_set() {
        let classifier = CareerClassifier::train();

        // Only the five canonical categories are reachable through the
        // normalizer, so check those rows end-to-end.
        for (math, science, interest, career) in TRAINING_SET {
            if !matches!(*interest, "coding" | "biology" | "art" | "business" | "physics") {
                continue;
            }
            let input = FeatureVector {
                math: *math,
                science: *science,
                interest: category(interest),
            };
            assert_eq!(classifier.predict(&input), *career, "row {interest}/{math}/{science}");
        }
    }

    #[test]
    fn training_is_deterministic() {
        let a = CareerClassifier::train();
        let b = CareerClassifier::train();

        for math in [40, 70, 95] {
            for science in [40, 70, 95] {
                for interest in [
                    InterestCategory::Coding,
                    InterestCategory::Biology,
                    InterestCategory::Art,
                    InterestCategory::Business,
                    InterestCategory::Physics,
                ] {
                    let input = FeatureVector {
                        math,
                        science,
                        interest,
                    };
                    assert_eq!(a.predict(&input), b.predict(&input));
                }
            }
        }
    }

    #[test]
    fn predict_always_returns_a_known_label() {
        let classifier = CareerClassifier::train();
        let known: Vec<&str> = TRAINING_SET.iter().map(|(_, _, _, c)| *c).collect();

        let input = FeatureVector {
            math: 0,
            science: 100,
            interest: InterestCategory::Art,
        };
        assert!(known.contains(&classifier.predict(&input)));
    }
}
