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

//! contagem-core: Core library for the counting-bits activity.
//!
//! This library provides the pure, I/O-free parts of contagem:
//! - A deterministic seeded PRNG (Mulberry32)
//! - Quiz instance derivation and grading
//! - Client payload redaction

pub mod error;
pub mod instance;
pub mod rng;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use instance::{
    Alternative, CARDS, ClientAlternative, ClientInstance, InstanceGenerationFailure,
    QuizInstance, generate, grade,
};
pub use rng::{Mulberry32, shuffle};
