//! # Modelo HMM Estimado
//!
//! Guarda as três tabelas de probabilidade do HMM de primeira ordem e a
//! família de distribuições de reserva para palavras desconhecidas:
//!
//! 1. **Inicial**: $P(t)$ no início da sentença
//! 2. **Transição**: $P(t_i | t_{i-1})$, com `START` como predecessor extra
//! 3. **Emissão conhecida**: $P(w | t)$ apenas para pares `(t, w)` observados
//! 4. **Reserva**: por balde de forma, $P(\text{desconhecida} | t)$
//!
//! As probabilidades ficam em espaço linear (não-log); o [`crate::decoder`]
//! converte para log no uso, verificando o domínio.
//!
//! A ausência de um par em (3) é o sinal de "emissão desconhecida": o teste é
//! de **pertinência**, nunca de valor. Um valor suavizado minúsculo continua
//! sendo uma emissão conhecida.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::HmmConfig;
use crate::error::Result;
use crate::shape::{classify, ShapeRule, CATCH_ALL};
use crate::tagset::{TagId, TagSet};

/// Predecessor de uma transição: o início sintético ou uma tag real.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predecessor {
    Start,
    Tag(TagId),
}

/// De onde veio a probabilidade de emissão de uma palavra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "bucket", rename_all = "snake_case")]
pub enum EmissionSource {
    /// Par `(tag, palavra)` observado no treino.
    Known,
    /// Distribuição de reserva do balde com este índice.
    Fallback(usize),
}

/// Distribuição de reserva de um balde de forma.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackBucket {
    pub name: String,
    /// Quantas palavras hapax caíram neste balde.
    pub hapax_words: usize,
    /// Quantas tags distintas aparecem entre essas palavras.
    pub tag_cardinality: usize,
    /// Probabilidade por tag, indexada por [`TagId`].
    pub probs: Vec<f64>,
}

/// O modelo treinado: tabelas fechadas, pré-populadas e indexadas por tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HmmModel {
    pub(crate) tagset: TagSet,
    pub(crate) initial: Vec<f64>,
    pub(crate) initial_epsilon: f64,
    pub(crate) start_transition: Vec<f64>,
    /// Row-major: `prev * n + t`.
    pub(crate) transition: Vec<f64>,
    pub(crate) emission: Vec<HashMap<String, f64>>,
    pub(crate) rules: Vec<ShapeRule>,
    /// `rules.len() + 1` baldes; o último é o genérico.
    pub(crate) buckets: Vec<FallbackBucket>,
}

impl HmmModel {
    /// Conta e estima em um passo.
    pub fn train<S, W, T>(sentences: &[S], config: &HmmConfig) -> Result<Self>
    where
        S: AsRef<[(W, T)]>,
        W: AsRef<str>,
        T: AsRef<str>,
    {
        let counts = crate::counts::Counts::from_sentences(sentences);
        crate::estimator::estimate(&counts, config)
    }

    pub fn tagset(&self) -> &TagSet {
        &self.tagset
    }

    pub fn num_tags(&self) -> usize {
        self.tagset.len()
    }

    /// Probabilidade inicial de uma tag pelo rótulo.
    ///
    /// Tags fora da tabela recebem o ε configurado em vez de zero.
    pub fn initial_prob(&self, label: &str) -> f64 {
        self.tagset
            .get(label)
            .and_then(|t| self.initial.get(t.0).copied())
            .unwrap_or(self.initial_epsilon)
    }

    pub fn transition(&self, prev: Predecessor, t: TagId) -> f64 {
        match prev {
            Predecessor::Start => self.start_transition[t.0],
            Predecessor::Tag(p) => self.transition[p.0 * self.num_tags() + t.0],
        }
    }

    /// Emissão observada no treino, se houver.
    pub fn known_emission(&self, t: TagId, word: &str) -> Option<f64> {
        self.emission[t.0].get(word).copied()
    }

    /// Índice do balde de forma da palavra (o genérico se nenhuma regra casar).
    pub fn bucket_for(&self, word: &str) -> usize {
        classify(&self.rules, word).unwrap_or(self.rules.len())
    }

    pub fn buckets(&self) -> &[FallbackBucket] {
        &self.buckets
    }

    pub fn bucket(&self, name: &str) -> Option<&FallbackBucket> {
        self.buckets.iter().find(|b| b.name == name)
    }

    pub fn catch_all(&self) -> &FallbackBucket {
        &self.buckets[self.rules.len()]
    }

    /// Probabilidade de emissão usada pelo decodificador.
    ///
    /// `bucket` é o balde da palavra, já calculado por [`Self::bucket_for`];
    /// ele só é consultado quando o par `(t, word)` não foi observado.
    pub fn emission(&self, t: TagId, word: &str, bucket: usize) -> (f64, EmissionSource) {
        match self.known_emission(t, word) {
            Some(p) => (p, EmissionSource::Known),
            None => (self.buckets[bucket].probs[t.0], EmissionSource::Fallback(bucket)),
        }
    }

    /// Nome legível de uma fonte de emissão.
    pub fn source_name(&self, source: EmissionSource) -> &str {
        match source {
            EmissionSource::Known => "known",
            EmissionSource::Fallback(b) => &self.buckets[b].name,
        }
    }

    pub fn vocabulary_size(&self) -> usize {
        let mut words: Vec<&str> = self
            .emission
            .iter()
            .flat_map(|m| m.keys().map(String::as_str))
            .collect();
        words.sort_unstable();
        words.dedup();
        words.len()
    }

    /// Visão resumida do modelo para relatórios.
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            tags: self.tagset.labels().to_vec(),
            vocabulary: self.vocabulary_size(),
            hapax_words: self.buckets.iter().map(|b| b.hapax_words).sum(),
            buckets: self
                .buckets
                .iter()
                .map(|b| (b.name.clone(), b.hapax_words))
                .collect(),
        }
    }
}

/// Estatísticas do modelo (serializáveis para a API HTTP).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub tags: Vec<String>,
    pub vocabulary: usize,
    pub hapax_words: usize,
    /// `(nome do balde, palavras hapax)`, na ordem de prioridade.
    pub buckets: Vec<(String, usize)>,
}

impl ModelSummary {
    pub fn catch_all_words(&self) -> usize {
        self.buckets
            .iter()
            .find(|(name, _)| name == CATCH_ALL)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}
