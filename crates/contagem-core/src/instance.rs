// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::rng::Mulberry32;
use crate::rng::shuffle;

/// Place values of the four cards, most significant first.
pub const CARDS: [u8; 4] = [8, 4, 2, 1];

const LABELS: [&str; 4] = ["A", "B", "C", "D"];

/// Cap on distractor draws. A healthy stream produces three distinct
/// distractors within a handful of draws; the cap only guards against a
/// degenerate stream.
const MAX_DISTRACTOR_DRAWS: usize = 512;

/// One answer choice. The `correct` flag is server-side only; it must
/// never reach the quiz-taking client (see [`QuizInstance::redact`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub id: String,
    pub label: String,
    pub value: u8,
    pub correct: bool,
}

/// A fully derived counting-bits quiz instance. Pure function of the
/// seed; not persisted anywhere.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizInstance {
    pub cards: [u8; 4],
    pub bits: [u8; 4],
    pub decimal: u8,
    pub alternatives: Vec<Alternative>,
    pub seed: u32,
}

/// An answer choice as delivered to the client: no correctness flag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientAlternative {
    pub id: String,
    pub label: String,
    pub value: u8,
}

/// A quiz instance as delivered to the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientInstance {
    pub cards: [u8; 4],
    pub bits: [u8; 4],
    pub decimal: u8,
    pub alternatives: Vec<ClientAlternative>,
    pub seed: u32,
}

/// The distractor retry loop ran out of draws. Only reachable with a
/// degenerate stream; never produces a malformed instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceGenerationFailure {
    pub seed: u32,
}

impl Display for InstanceGenerationFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to generate three distinct distractors for seed {} within {} draws",
            self.seed, MAX_DISTRACTOR_DRAWS
        )
    }
}

impl Error for InstanceGenerationFailure {}

/// Derive the quiz instance for a seed. Calling twice with the same seed
/// yields identical output, including the alternative order.
pub fn generate(seed: u32) -> Result<QuizInstance, InstanceGenerationFailure> {
    let mut rng = Mulberry32::from_seed(seed);

    // One draw per card, most significant first.
    let mut bits = [0u8; 4];
    for bit in bits.iter_mut() {
        *bit = if rng.next_f64() > 0.5 { 1 } else { 0 };
    }
    let decimal: u8 = CARDS
        .iter()
        .zip(bits.iter())
        .map(|(card, bit)| card * bit)
        .sum();

    // Three distinct wrong values near the answer, clamped to [0, 15].
    let mut wrong: Vec<u8> = Vec::with_capacity(3);
    let mut draws = 0;
    while wrong.len() < 3 {
        if draws >= MAX_DISTRACTOR_DRAWS {
            return Err(InstanceGenerationFailure { seed });
        }
        draws += 1;
        let delta = ((rng.next_f64() - 0.5) * 8.0).floor() as i32;
        let candidate = (i32::from(decimal) + delta).clamp(0, 15) as u8;
        if candidate != decimal && !wrong.contains(&candidate) {
            wrong.push(candidate);
        }
    }

    // Correct value first, then shuffle, so the answer's position is a
    // function of the stream rather than of the list construction.
    let mut values = [decimal, wrong[0], wrong[1], wrong[2]];
    shuffle(&mut values, &mut rng);

    let alternatives = values
        .iter()
        .zip(LABELS)
        .map(|(&value, label)| Alternative {
            id: format!("alt-{}", label.to_lowercase()),
            label: label.to_string(),
            value,
            correct: value == decimal,
        })
        .collect();

    Ok(QuizInstance {
        cards: CARDS,
        bits,
        decimal,
        alternatives,
        seed,
    })
}

/// Re-derive the instance for a server-held seed and check a submitted
/// alternative id against it. Client-echoed correctness is never trusted.
pub fn grade(seed: u32, alternative_id: &str) -> Fallible<bool> {
    let instance = generate(seed)?;
    match instance
        .alternatives
        .iter()
        .find(|alt| alt.id == alternative_id)
    {
        Some(alt) => Ok(alt.correct),
        None => fail(format!("unknown alternative id: '{alternative_id}'.")),
    }
}

impl QuizInstance {
    /// The client-facing view of this instance, with the per-alternative
    /// correctness flags stripped.
    pub fn redact(&self) -> ClientInstance {
        ClientInstance {
            cards: self.cards,
            bits: self.bits,
            decimal: self.decimal,
            alternatives: self
                .alternatives
                .iter()
                .map(|alt| ClientAlternative {
                    id: alt.id.clone(),
                    label: alt.label.clone(),
                    value: alt.value,
                })
                .collect(),
            seed: self.seed,
        }
    }

    pub fn correct_alternative(&self) -> &Alternative {
        // generate() guarantees exactly one.
        self.alternatives
            .iter()
            .find(|alt| alt.correct)
            .expect("instance has no correct alternative")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_seed_12345() {
        let instance = generate(12345).unwrap();
        assert_eq!(instance.cards, [8, 4, 2, 1]);
        assert_eq!(instance.bits, [1, 0, 0, 1]);
        assert_eq!(instance.decimal, 9);
        assert_eq!(instance.seed, 12345);
        let values: Vec<u8> = instance.alternatives.iter().map(|a| a.value).collect();
        assert_eq!(values, vec![7, 9, 5, 11]);
        let labels: Vec<&str> = instance
            .alternatives
            .iter()
            .map(|a| a.label.as_str())
            .collect();
        assert_eq!(labels, vec!["A", "B", "C", "D"]);
        let correct = instance.correct_alternative();
        assert_eq!(correct.label, "B");
        assert_eq!(correct.id, "alt-b");
        assert_eq!(correct.value, 9);
    }

    #[test]
    fn test_golden_seed_0() {
        // All cards face down; distractor clamping kicks in at the low end.
        let instance = generate(0).unwrap();
        assert_eq!(instance.bits, [0, 0, 0, 0]);
        assert_eq!(instance.decimal, 0);
        let values: Vec<u8> = instance.alternatives.iter().map(|a| a.value).collect();
        assert_eq!(values, vec![2, 0, 1, 3]);
        assert_eq!(instance.correct_alternative().label, "B");
    }

    #[test]
    fn test_golden_seed_42() {
        let instance = generate(42).unwrap();
        assert_eq!(instance.bits, [1, 0, 1, 1]);
        assert_eq!(instance.decimal, 11);
        let values: Vec<u8> = instance.alternatives.iter().map(|a| a.value).collect();
        assert_eq!(values, vec![9, 13, 11, 8]);
        assert_eq!(instance.correct_alternative().label, "C");
    }

    #[test]
    fn test_determinism() {
        for seed in 0..100 {
            assert_eq!(generate(seed).unwrap(), generate(seed).unwrap());
        }
    }

    #[test]
    fn test_invariants() {
        for seed in 0..1000 {
            let instance = generate(seed).unwrap();
            // Decimal matches the weighted sum of the bits.
            let dot: u8 = instance
                .cards
                .iter()
                .zip(instance.bits.iter())
                .map(|(card, bit)| card * bit)
                .sum();
            assert_eq!(instance.decimal, dot);
            assert!(instance.decimal <= 15);
            // Four distinct values, all in range.
            assert_eq!(instance.alternatives.len(), 4);
            let mut values: Vec<u8> = instance.alternatives.iter().map(|a| a.value).collect();
            for value in &values {
                assert!(*value <= 15);
            }
            values.sort();
            values.dedup();
            assert_eq!(values.len(), 4, "duplicate values for seed {seed}");
            // Exactly one correct alternative, and it holds the answer.
            let correct: Vec<&Alternative> = instance
                .alternatives
                .iter()
                .filter(|a| a.correct)
                .collect();
            assert_eq!(correct.len(), 1, "expected one correct for seed {seed}");
            assert_eq!(correct[0].value, instance.decimal);
        }
    }

    #[test]
    fn test_seed_wraparound() {
        let instance = generate(u32::MAX).unwrap();
        assert_eq!(instance, generate(u32::MAX).unwrap());
    }

    #[test]
    fn test_redact_strips_correctness() {
        let instance = generate(12345).unwrap();
        let payload = serde_json::to_string(&instance.redact()).unwrap();
        assert!(!payload.contains("correct"));
        // Everything else survives the redaction.
        let client = instance.redact();
        assert_eq!(client.bits, instance.bits);
        assert_eq!(client.decimal, instance.decimal);
        assert_eq!(client.seed, instance.seed);
        for (client_alt, alt) in client.alternatives.iter().zip(instance.alternatives.iter()) {
            assert_eq!(client_alt.id, alt.id);
            assert_eq!(client_alt.label, alt.label);
            assert_eq!(client_alt.value, alt.value);
        }
    }

    #[test]
    fn test_grade() {
        assert!(grade(12345, "alt-b").unwrap());
        assert!(!grade(12345, "alt-a").unwrap());
        assert!(!grade(12345, "alt-c").unwrap());
        assert!(!grade(12345, "alt-d").unwrap());
    }

    #[test]
    fn test_grade_unknown_id() {
        let result = grade(12345, "alt-z");
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: unknown alternative id: 'alt-z'.");
    }
}
