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

use contagem_core::instance::ClientInstance;
use maud::DOCTYPE;
use maud::Markup;
use maud::html;

use crate::cmd::serve::server::TITULO;

pub fn page_template(body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-br" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (TITULO) }
                link rel="stylesheet" href="/style.css";
            }
            body {
                (body)
            }
        }
    }
}

/// The practice page: the four cards and one button per alternative. The
/// rendered markup only sees the redacted instance, so the answer cannot
/// be scraped out of the page source.
pub fn quiz_page(instance: &ClientInstance) -> Markup {
    page_template(html! {
        main {
            h1 { (TITULO) }
            p.prompt { "Quantos pontos os cartões virados para cima mostram no total?" }
            div.cards {
                @for (card, bit) in instance.cards.iter().zip(instance.bits.iter()) {
                    @if *bit == 1 {
                        div.card.face-up { (card) }
                    } @else {
                        div.card.face-down { "?" }
                    }
                }
            }
            form method="post" action="/" {
                input type="hidden" name="seed" value=(instance.seed);
                div.alternatives {
                    @for alt in &instance.alternatives {
                        button.alternative type="submit" name="alternative" value=(alt.id) {
                            span.label { (alt.label) }
                            span.value { (alt.value) }
                        }
                    }
                }
            }
        }
    })
}

pub fn answer_page(correct: bool) -> Markup {
    page_template(html! {
        main {
            h1 { (TITULO) }
            @if correct {
                p.result.right { "Correto!" }
            } @else {
                p.result.wrong { "Incorreto." }
            }
            p { a href="/" { "Tentar outra" } }
        }
    })
}
