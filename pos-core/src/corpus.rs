//! # Corpus de Demonstração em Inglês com Tags POS
//!
//! Pequeno corpus anotado à mão, embutido no binário, usado pelos testes e
//! pelo servidor quando nenhum arquivo de treino é informado. Não substitui
//! um corpus real (ex: Brown): serve para exercitar o pipeline de ponta a
//! ponta com vocabulário controlado.
//!
//! ## Tags
//!
//! | Tag   | Classe            | Exemplos             |
//! |-------|-------------------|----------------------|
//! | DET   | Determinante      | the, a, every        |
//! | NOUN  | Substantivo       | dog, city, happiness |
//! | PRON  | Pronome           | she, they, it        |
//! | VERB  | Verbo             | runs, was, barking   |
//! | ADJ   | Adjetivo          | old, famous, quick   |
//! | ADV   | Advérbio          | loudly, very, often  |
//! | ADP   | Preposição        | in, on, with         |
//! | CONJ  | Conjunção         | and, but             |
//! | PUNCT | Pontuação         | . ,                  |

/// Uma sentença anotada: pares (palavra, tag POS).
pub struct AnnotatedSentence {
    /// O texto da sentença, só para exibição.
    pub text: &'static str,
    /// Domínio temático.
    pub domain: &'static str,
    /// Pares (palavra, tag). Exemplo: `[("the", "DET"), ("dog", "NOUN")]`
    pub annotations: &'static [(&'static str, &'static str)],
}

impl AsRef<[(&'static str, &'static str)]> for AnnotatedSentence {
    fn as_ref(&self) -> &[(&'static str, &'static str)] {
        self.annotations
    }
}

/// Retorna o corpus anotado completo.
pub fn get_corpus() -> Vec<AnnotatedSentence> {
    vec![
        // ===== ANIMAIS =====
        AnnotatedSentence {
            text: "The old dog was barking loudly in the yard.",
            domain: "animais",
            annotations: &[
                ("the", "DET"), ("old", "ADJ"), ("dog", "NOUN"), ("was", "VERB"),
                ("barking", "VERB"), ("loudly", "ADV"), ("in", "ADP"), ("the", "DET"),
                ("yard", "NOUN"), (".", "PUNCT"),
            ],
        },
        AnnotatedSentence {
            text: "A quick fox jumped over the lazy dog.",
            domain: "animais",
            annotations: &[
                ("a", "DET"), ("quick", "ADJ"), ("fox", "NOUN"), ("jumped", "VERB"),
                ("over", "ADP"), ("the", "DET"), ("lazy", "ADJ"), ("dog", "NOUN"), (".", "PUNCT"),
            ],
        },
        AnnotatedSentence {
            text: "The cat is sleeping on the warm sofa.",
            domain: "animais",
            annotations: &[
                ("the", "DET"), ("cat", "NOUN"), ("is", "VERB"), ("sleeping", "VERB"),
                ("on", "ADP"), ("the", "DET"), ("warm", "ADJ"), ("sofa", "NOUN"), (".", "PUNCT"),
            ],
        },
        AnnotatedSentence {
            text: "Birds sing beautifully in the morning.",
            domain: "animais",
            annotations: &[
                ("birds", "NOUN"), ("sing", "VERB"), ("beautifully", "ADV"), ("in", "ADP"),
                ("the", "DET"), ("morning", "NOUN"), (".", "PUNCT"),
            ],
        },
        // ===== CIDADE =====
        AnnotatedSentence {
            text: "The city council approved the new station.",
            domain: "cidade",
            annotations: &[
                ("the", "DET"), ("city", "NOUN"), ("council", "NOUN"), ("approved", "VERB"),
                ("the", "DET"), ("new", "ADJ"), ("station", "NOUN"), (".", "PUNCT"),
            ],
        },
        AnnotatedSentence {
            text: "They walked slowly to the famous museum.",
            domain: "cidade",
            annotations: &[
                ("they", "PRON"), ("walked", "VERB"), ("slowly", "ADV"), ("to", "ADP"),
                ("the", "DET"), ("famous", "ADJ"), ("museum", "NOUN"), (".", "PUNCT"),
            ],
        },
        AnnotatedSentence {
            text: "Traffic is heavy in the city during the evening.",
            domain: "cidade",
            annotations: &[
                ("traffic", "NOUN"), ("is", "VERB"), ("heavy", "ADJ"), ("in", "ADP"),
                ("the", "DET"), ("city", "NOUN"), ("during", "ADP"), ("the", "DET"),
                ("evening", "NOUN"), (".", "PUNCT"),
            ],
        },
        AnnotatedSentence {
            text: "She was waiting for the bus and reading a book.",
            domain: "cidade",
            annotations: &[
                ("she", "PRON"), ("was", "VERB"), ("waiting", "VERB"), ("for", "ADP"),
                ("the", "DET"), ("bus", "NOUN"), ("and", "CONJ"), ("reading", "VERB"),
                ("a", "DET"), ("book", "NOUN"), (".", "PUNCT"),
            ],
        },
        // ===== CIÊNCIA =====
        AnnotatedSentence {
            text: "The researchers published a remarkable discovery.",
            domain: "ciência",
            annotations: &[
                ("the", "DET"), ("researchers", "NOUN"), ("published", "VERB"), ("a", "DET"),
                ("remarkable", "ADJ"), ("discovery", "NOUN"), (".", "PUNCT"),
            ],
        },
        AnnotatedSentence {
            text: "The new theory explains the movement of galaxies.",
            domain: "ciência",
            annotations: &[
                ("the", "DET"), ("new", "ADJ"), ("theory", "NOUN"), ("explains", "VERB"),
                ("the", "DET"), ("movement", "NOUN"), ("of", "ADP"), ("galaxies", "NOUN"),
                (".", "PUNCT"),
            ],
        },
        AnnotatedSentence {
            text: "Scientists often test the stability of a solution.",
            domain: "ciência",
            annotations: &[
                ("scientists", "NOUN"), ("often", "ADV"), ("test", "VERB"), ("the", "DET"),
                ("stability", "NOUN"), ("of", "ADP"), ("a", "DET"), ("solution", "NOUN"),
                (".", "PUNCT"),
            ],
        },
        AnnotatedSentence {
            text: "It is a very useful and reliable method.",
            domain: "ciência",
            annotations: &[
                ("it", "PRON"), ("is", "VERB"), ("a", "DET"), ("very", "ADV"),
                ("useful", "ADJ"), ("and", "CONJ"), ("reliable", "ADJ"), ("method", "NOUN"),
                (".", "PUNCT"),
            ],
        },
        // ===== ESPORTES =====
        AnnotatedSentence {
            text: "The team played brilliantly but lost the final.",
            domain: "esportes",
            annotations: &[
                ("the", "DET"), ("team", "NOUN"), ("played", "VERB"), ("brilliantly", "ADV"),
                ("but", "CONJ"), ("lost", "VERB"), ("the", "DET"), ("final", "NOUN"),
                (".", "PUNCT"),
            ],
        },
        AnnotatedSentence {
            text: "Every player was training hard for the international tournament.",
            domain: "esportes",
            annotations: &[
                ("every", "DET"), ("player", "NOUN"), ("was", "VERB"), ("training", "VERB"),
                ("hard", "ADV"), ("for", "ADP"), ("the", "DET"), ("international", "ADJ"),
                ("tournament", "NOUN"), (".", "PUNCT"),
            ],
        },
        AnnotatedSentence {
            text: "The fans cheered with great happiness.",
            domain: "esportes",
            annotations: &[
                ("the", "DET"), ("fans", "NOUN"), ("cheered", "VERB"), ("with", "ADP"),
                ("great", "ADJ"), ("happiness", "NOUN"), (".", "PUNCT"),
            ],
        },
        // ===== COTIDIANO =====
        AnnotatedSentence {
            text: "We are cooking dinner and they are cleaning the kitchen.",
            domain: "cotidiano",
            annotations: &[
                ("we", "PRON"), ("are", "VERB"), ("cooking", "VERB"), ("dinner", "NOUN"),
                ("and", "CONJ"), ("they", "PRON"), ("are", "VERB"), ("cleaning", "VERB"),
                ("the", "DET"), ("kitchen", "NOUN"), (".", "PUNCT"),
            ],
        },
        AnnotatedSentence {
            text: "The children laughed happily at the funny clown.",
            domain: "cotidiano",
            annotations: &[
                ("the", "DET"), ("children", "NOUN"), ("laughed", "VERB"), ("happily", "ADV"),
                ("at", "ADP"), ("the", "DET"), ("funny", "ADJ"), ("clown", "NOUN"), (".", "PUNCT"),
            ],
        },
        AnnotatedSentence {
            text: "He quietly opened the heavy door.",
            domain: "cotidiano",
            annotations: &[
                ("he", "PRON"), ("quietly", "ADV"), ("opened", "VERB"), ("the", "DET"),
                ("heavy", "ADJ"), ("door", "NOUN"), (".", "PUNCT"),
            ],
        },
    ]
}

/// O corpus como sentenças `[(palavra, tag)]`, no formato do treino.
pub fn demo_corpus() -> Vec<Vec<(&'static str, &'static str)>> {
    get_corpus()
        .into_iter()
        .map(|s| s.annotations.to_vec())
        .collect()
}

/// Sentenças sem tags para demonstração, com palavras conhecidas e inéditas.
pub fn demo_sentences() -> Vec<Vec<&'static str>> {
    vec![
        vec!["the", "old", "dog", "was", "barking", "loudly", "in", "the", "yard", "."],
        vec!["the", "tired", "horse", "is", "running", "quickly", "."],
        vec!["she", "carefully", "painted", "the", "wooden", "fence", "."],
        vec!["the", "committee", "announced", "a", "surprising", "decision", "."],
        vec!["they", "are", "singing", "and", "dancing", "in", "the", "park", "."],
        vec![],
        vec!["interesting"],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_text_matches_annotations() {
        for sentence in get_corpus() {
            let first = sentence.annotations[0].0;
            assert!(
                sentence.text.to_lowercase().starts_with(first),
                "{}",
                sentence.text
            );
            assert_eq!(sentence.annotations.last().map(|a| a.1), Some("PUNCT"));
        }
    }

    #[test]
    fn test_annotated_sentence_trains_directly() {
        let corpus = get_corpus();
        let counts = crate::counts::Counts::from_sentences(&corpus);
        assert_eq!(counts.num_sentences, corpus.len());
        assert_eq!(counts.num_tags(), 9);
    }

    #[test]
    fn test_demo_sentences_include_edge_cases() {
        let sentences = demo_sentences();
        assert!(sentences.iter().any(|s| s.is_empty()));
        assert!(sentences.iter().any(|s| s.len() == 1));
    }
}
