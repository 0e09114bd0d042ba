//! # Pipeline de Etiquetagem — Treino + Decodificação
//!
//! O fluxo de dados é de mão única:
//!
//! ```text
//! sentenças anotadas ─► Counts ─► estimate ─► HmmModel ─► Decoder ─► sentenças etiquetadas
//! ```
//!
//! [`PosTagger`] é dono do modelo e expõe as operações de alto nível. As
//! tabelas ficam completas antes da primeira decodificação e nunca mudam
//! depois, então um `PosTagger` pode ser compartilhado entre threads.

use crate::config::HmmConfig;
use crate::counts::Counts;
use crate::decoder::{Decoder, TaggedSentence, ViterbiResult};
use crate::error::Result;
use crate::estimator::estimate;
use crate::model::{HmmModel, ModelSummary};

/// Etiquetador POS treinado.
#[derive(Debug, Clone)]
pub struct PosTagger {
    model: HmmModel,
    config: HmmConfig,
}

impl PosTagger {
    /// Valida a configuração, agrega as contagens e estima o modelo.
    pub fn train<S, W, T>(sentences: &[S], config: HmmConfig) -> Result<Self>
    where
        S: AsRef<[(W, T)]>,
        W: AsRef<str>,
        T: AsRef<str>,
    {
        let counts = Counts::from_sentences(sentences);
        let model = estimate(&counts, &config)?;
        // Falha cedo se alguma transição não puder ir para log-space.
        Decoder::new(&model)?;
        Ok(Self { model, config })
    }

    /// Etiquetador treinado sobre o corpus embutido de demonstração.
    pub fn demo(config: HmmConfig) -> Result<Self> {
        Self::train(&crate::corpus::demo_corpus(), config)
    }

    pub fn model(&self) -> &HmmModel {
        &self.model
    }

    pub fn config(&self) -> &HmmConfig {
        &self.config
    }

    pub fn decoder(&self) -> Result<Decoder<'_>> {
        Decoder::new(&self.model)
    }

    pub fn tag<S, W>(&self, sentences: &[S]) -> Result<Vec<TaggedSentence>>
    where
        S: AsRef<[W]>,
        W: AsRef<str>,
    {
        self.decoder()?.decode_all(sentences)
    }

    pub fn tag_parallel<S, W>(&self, sentences: &[S]) -> Result<Vec<TaggedSentence>>
    where
        S: AsRef<[W]> + Sync,
        W: AsRef<str> + Sync,
    {
        self.decoder()?.decode_all_parallel(sentences)
    }

    pub fn tag_sentence<W: AsRef<str>>(&self, words: &[W]) -> Result<TaggedSentence> {
        self.decoder()?.decode(words)
    }

    pub fn trace_sentence<W: AsRef<str>>(&self, words: &[W]) -> Result<ViterbiResult> {
        self.decoder()?.decode_traced(words)
    }

    pub fn summary(&self) -> ModelSummary {
        self.model.summary()
    }
}

/// Treina sobre `train` e etiqueta `test` em uma chamada.
///
/// ```rust
/// use pos_core::{viterbi, HmmConfig};
///
/// let train = vec![vec![("the", "DET"), ("dog", "NOUN"), ("runs", "VERB")]];
/// let test = vec![vec!["the", "dog", "runs"]];
/// let out = viterbi(&train, &test, HmmConfig::default()).unwrap();
/// assert_eq!(out[0][1], ("dog".to_string(), "NOUN".to_string()));
/// ```
pub fn viterbi<S, W, T, Q, X>(
    train: &[S],
    test: &[Q],
    config: HmmConfig,
) -> Result<Vec<TaggedSentence>>
where
    S: AsRef<[(W, T)]>,
    W: AsRef<str>,
    T: AsRef<str>,
    Q: AsRef<[X]>,
    X: AsRef<str>,
{
    PosTagger::train(train, config)?.tag(test)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{demo_corpus, demo_sentences};
    use crate::error::PosError;

    #[test]
    fn test_demo_tagger_tags_demo_sentences() {
        let tagger = PosTagger::demo(HmmConfig::default()).unwrap();
        let out = tagger.tag(&demo_sentences()).unwrap();
        assert_eq!(out.len(), demo_sentences().len());

        let first: Vec<&str> = out[0].iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(
            first,
            vec!["DET", "ADJ", "NOUN", "VERB", "VERB", "ADV", "ADP", "DET", "NOUN", "PUNCT"]
        );
        assert!(out[5].is_empty());
    }

    #[test]
    fn test_parallel_equals_sequential() {
        let tagger = PosTagger::demo(HmmConfig::default()).unwrap();
        let sentences = demo_sentences();
        assert_eq!(
            tagger.tag(&sentences).unwrap(),
            tagger.tag_parallel(&sentences).unwrap()
        );
    }

    #[test]
    fn test_invalid_config_fails_training() {
        let mut config = HmmConfig::default();
        config.initial_epsilon = 0.0;
        let err = PosTagger::train(&demo_corpus(), config).unwrap_err();
        assert!(matches!(err, PosError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_training_set_is_valid() {
        let empty: Vec<Vec<(&str, &str)>> = vec![];
        let tagger = PosTagger::train(&empty, HmmConfig::default()).unwrap();
        assert_eq!(tagger.summary().tags.len(), 0);
        let none: Vec<Vec<&str>> = vec![vec![]];
        assert_eq!(tagger.tag(&none).unwrap(), vec![Vec::new()]);
    }

    #[test]
    fn test_viterbi_one_call() {
        let train = vec![vec![("the", "DET"), ("dog", "NOUN"), ("runs", "VERB")]];
        let test = vec![vec!["the", "dog", "runs"], vec![]];
        let out = viterbi(&train, &test, HmmConfig::base()).unwrap();
        let tags: Vec<&str> = out[0].iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(tags, vec!["DET", "NOUN", "VERB"]);
        assert!(out[1].is_empty());
    }
}
