// Copyright 2026 The QCC Developers
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not use this file except
// in compliance with the License.You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under the License
// is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express
// or implied. See the License for the specific language governing permissions and limitations under
// the License.

//! Decomposes a [`DOmegaUnitary`] into a Clifford+T gate word, then
//! canonicalizes the word by repeatedly cancelling adjacent
//! self-inverse/combinable pairs to a fixed point.

use crate::unitary::DOmegaUnitary;

const MAX_DECOMPOSE_STEPS: usize = 10_000;

/// Reduces `u`'s denominator exponent to zero by repeatedly pre-multiplying
/// by one of `{H, TH, SH, TSH}` (tried in that order, accepting the first
/// that actually lowers `max(z.k, w.k)`), then reads the global phase off
/// at `k = 0`. Returns the gate word applied, in the order the gates act
/// on a state (i.e. the order a circuit would emit them), not the order
/// they were chosen in the reduction loop.
#[must_use]
pub fn decompose(u: &DOmegaUnitary) -> Vec<char> {
    let mut cur = u.clone();
    let mut applied = Vec::new();

    for _ in 0..MAX_DECOMPOSE_STEPS {
        let k = cur.z.k.max(cur.w.k);
        if k == 0 {
            break;
        }
        let candidates: [(&[char], DOmegaUnitary); 4] = [
            (&['H'], cur.apply_h()),
            (&['T', 'H'], cur.apply_h().apply_t()),
            (&['S', 'H'], cur.apply_h().apply_s()),
            (&['T', 'S', 'H'], cur.apply_h().apply_s().apply_t()),
        ];
        let mut reduced = false;
        for (syms, candidate) in candidates {
            if candidate.z.k.max(candidate.w.k) < k {
                applied.extend_from_slice(syms);
                cur = candidate;
                reduced = true;
                break;
            }
        }
        if !reduced {
            // No single reduction step lowers the denominator; apply H
            // anyway to perturb the representative and keep making progress.
            applied.push('H');
            cur = cur.apply_h();
        }
    }

    // At k = 0, z and w are honest Z[omega] elements on the unit circle;
    // clear the residual phase by emitting S^{n/2} (n is always even once
    // z is a pure power of omega, since the matrix is unitary).
    for _ in 0..(cur.n / 2) {
        applied.push('S');
    }
    if cur.n % 2 == 1 {
        applied.push('T');
    }

    applied.reverse();
    simplify_word(&applied)
}

/// Collapses adjacent cancelling/combinable pairs to a fixed point:
/// `H H -> (none)`, `X X / Y Y / Z Z -> (none)`, `T T -> S`, `S S -> Z`.
/// `W` (the global-phase token) never combines with anything and is left
/// in place.
#[must_use]
pub fn simplify_word(word: &[char]) -> Vec<char> {
    let mut current = word.to_vec();
    loop {
        let mut next = Vec::with_capacity(current.len());
        let mut changed = false;
        let mut i = 0;
        while i < current.len() {
            if i + 1 < current.len() {
                let pair = (current[i], current[i + 1]);
                match pair {
                    ('H', 'H') | ('X', 'X') | ('Y', 'Y') | ('Z', 'Z') => {
                        i += 2;
                        changed = true;
                        continue;
                    }
                    ('T', 'T') => {
                        next.push('S');
                        i += 2;
                        changed = true;
                        continue;
                    }
                    ('S', 'S') => {
                        next.push('Z');
                        i += 2;
                        changed = true;
                        continue;
                    }
                    _ => {}
                }
            }
            next.push(current[i]);
            i += 1;
        }
        current = next;
        if !changed {
            break;
        }
    }
    current
}

/// Renders a gate word as a space-free string, the form
/// `SynthesizeRzPass` consumes.
#[must_use]
pub fn word_to_string(word: &[char]) -> String {
    word.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simplify_cancels_adjacent_hadamards() {
        assert_eq!(simplify_word(&['H', 'H', 'T']), vec!['T']);
    }

    #[test]
    fn simplify_combines_tt_into_s() {
        assert_eq!(simplify_word(&['T', 'T']), vec!['Z']);
    }

    #[test]
    fn simplify_is_idempotent_on_identity_word() {
        assert_eq!(simplify_word(&[]), Vec::<char>::new());
    }

    #[test]
    fn decompose_identity_terminates_immediately() {
        let word = decompose(&DOmegaUnitary::identity());
        // Identity has k = 0 already; only a possible trailing phase token.
        assert!(word.iter().all(|c| "XYZHST".contains(*c)));
    }
}
