//! # Agregador de Contagens
//!
//! Primeiro estágio do treino: percorre as sentenças anotadas e acumula
//! as frequências brutas que o estimador transforma em probabilidades.
//!
//! - `count(t)`: unigramas de tag
//! - `count(prev, t)`: bigramas de tag, com `START` como predecessor da
//!   primeira tag de cada sentença (nenhum bigrama cruza sentenças)
//! - `count(t, w)`: pares (tag, palavra)
//!
//! Entrada vazia é válida e produz tabelas vazias.

use std::collections::HashMap;

use crate::tagset::{TagId, TagSet};

/// Frequências brutas extraídas de um corpus anotado.
///
/// As tabelas são densas e indexadas por [`TagId`]; o conjunto de tags é
/// fechado antes da contagem, então nenhuma consulta depende de "zero por
/// omissão".
#[derive(Debug, Clone, Default)]
pub struct Counts {
    pub tagset: TagSet,
    pub num_sentences: usize,
    /// `count(t)`, indexado por tag.
    pub tag_counts: Vec<u64>,
    /// `count(START, t)`.
    pub start_counts: Vec<u64>,
    /// `count(prev, t)` em ordem row-major: `prev * n + t`.
    pub bigram_counts: Vec<u64>,
    /// `count(t, w)` por tag.
    pub word_counts: Vec<HashMap<String, u64>>,
    /// Frequência de cada palavra no corpus inteiro (todas as tags somadas).
    pub vocabulary: HashMap<String, u64>,
}

impl Counts {
    /// Conta um corpus de sentenças `[(palavra, tag)]`.
    ///
    /// Duas passadas: a primeira interna todas as tags (fixando a ordem de
    /// enumeração), a segunda preenche as tabelas já dimensionadas.
    pub fn from_sentences<S, W, T>(sentences: &[S]) -> Self
    where
        S: AsRef<[(W, T)]>,
        W: AsRef<str>,
        T: AsRef<str>,
    {
        let mut tagset = TagSet::new();
        for sentence in sentences {
            for (_, tag) in sentence.as_ref() {
                tagset.intern(tag.as_ref());
            }
        }

        let n = tagset.len();
        let mut counts = Self {
            num_sentences: sentences.len(),
            tag_counts: vec![0; n],
            start_counts: vec![0; n],
            bigram_counts: vec![0; n * n],
            word_counts: vec![HashMap::new(); n],
            vocabulary: HashMap::new(),
            tagset,
        };

        for sentence in sentences {
            let mut prev: Option<TagId> = None;
            for (word, tag) in sentence.as_ref() {
                let word = word.as_ref();
                // Interna na 1ª passada; sempre presente aqui.
                let Some(t) = counts.tagset.get(tag.as_ref()) else {
                    continue;
                };

                counts.tag_counts[t.0] += 1;
                match prev {
                    None => counts.start_counts[t.0] += 1,
                    Some(p) => counts.bigram_counts[p.0 * n + t.0] += 1,
                }
                *counts.word_counts[t.0].entry(word.to_string()).or_insert(0) += 1;
                *counts.vocabulary.entry(word.to_string()).or_insert(0) += 1;

                prev = Some(t);
            }
        }

        tracing::debug!(
            sentences = counts.num_sentences,
            tags = n,
            vocabulary = counts.vocabulary.len(),
            "contagens agregadas"
        );

        counts
    }

    pub fn num_tags(&self) -> usize {
        self.tagset.len()
    }

    pub fn tag_count(&self, t: TagId) -> u64 {
        self.tag_counts[t.0]
    }

    pub fn bigram(&self, prev: TagId, t: TagId) -> u64 {
        self.bigram_counts[prev.0 * self.num_tags() + t.0]
    }

    pub fn start(&self, t: TagId) -> u64 {
        self.start_counts[t.0]
    }

    /// Palavras que ocorrem exatamente uma vez no corpus, com a tag dessa
    /// única ocorrência. Ordenadas pela palavra.
    pub fn hapax_words(&self) -> Vec<(&str, TagId)> {
        let mut hapax: Vec<(&str, TagId)> = Vec::new();
        for t in self.tagset.ids() {
            for (word, &count) in &self.word_counts[t.0] {
                if count == 1 && self.vocabulary.get(word.as_str()) == Some(&1) {
                    hapax.push((word.as_str(), t));
                }
            }
        }
        hapax.sort();
        hapax
    }
}
