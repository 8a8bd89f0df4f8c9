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

use contagem_core::error::Fallible;
use contagem_core::instance::generate;

use crate::utils::clock_seed;

/// Print the full server-side instance for a seed, `correct` flags
/// included. For debugging and for seeding grading fixtures; never
/// exposed to quiz takers.
pub fn print_instance(seed: Option<i64>) -> Fallible<()> {
    let seed = match seed {
        Some(seed) => seed as u32,
        None => clock_seed(),
    };
    let instance = generate(seed)?;
    let json = serde_json::to_string_pretty(&instance)?;
    println!("{json}");
    Ok(())
}
