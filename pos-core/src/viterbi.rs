//! # Passo do Trellis de Viterbi
//!
//! O algoritmo de Viterbi encontra a sequência de tags mais provável por
//! **programação dinâmica** sobre o trellis (posição × tag). Este módulo
//! implementa **uma** transição da programação dinâmica: dada a palavra
//! observada e a coluna anterior, calcula a coluna atual.
//!
//! ```text
//! Posição 0: δ₀(t) = log e(t, w₀) + log a(START, t)
//!
//! Posição i: δᵢ(t) = max_p [ δᵢ₋₁(p) + log e(t, wᵢ) + log a(p, t) ]
//!            ψᵢ(t) = argmax_p (...)
//! ```
//!
//! Tudo é feito em log-space. Os logaritmos passam por uma verificação de
//! domínio: um `ln` de zero ou negativo vira [`PosError::NumericalDomain`].
//!
//! ## Desempate
//!
//! A comparação é estritamente maior e os predecessores são visitados na
//! ordem fixa do [`crate::tagset::TagSet`]: em empate vence o primeiro.

use serde::{Deserialize, Serialize};

use crate::error::{checked_ln, PosError, Result};
use crate::model::{EmissionSource, HmmModel, Predecessor};
use crate::tagset::TagId;

/// Uma coluna do trellis: o melhor log-score de cada tag e de onde veio.
///
/// Efêmera: o decodificador guarda apenas os back-pointers e descarta o resto
/// assim que a próxima coluna é calculada.
#[derive(Debug, Clone)]
pub struct Column {
    /// δᵢ(t), indexado por [`TagId`].
    pub scores: Vec<f64>,
    /// ψᵢ(t): o predecessor ótimo (`Start` na posição 0).
    pub backptr: Vec<Predecessor>,
    /// `log e(t, wᵢ)`.
    pub emission: Vec<f64>,
    /// `log a(ψᵢ(t), t)`.
    pub transition: Vec<f64>,
    pub sources: Vec<EmissionSource>,
}

impl Column {
    /// Tag com o maior score (primeira em caso de empate).
    pub fn best(&self) -> Option<(TagId, f64)> {
        let mut best: Option<(TagId, f64)> = None;
        for (i, &score) in self.scores.iter().enumerate() {
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((TagId(i), score));
            }
        }
        best
    }
}

/// Executa passos do trellis sobre um [`HmmModel`].
///
/// As transições são convertidas para log uma única vez na construção; a
/// emissão depende da palavra e é convertida a cada passo.
#[derive(Debug, Clone)]
pub struct TrellisStepper<'m> {
    model: &'m HmmModel,
    log_start: Vec<f64>,
    /// Row-major: `prev * n + t`.
    log_transition: Vec<f64>,
}

impl<'m> TrellisStepper<'m> {
    pub fn new(model: &'m HmmModel) -> Result<Self> {
        let tags = model.tagset();
        let n = model.num_tags();

        let mut log_start = Vec::with_capacity(n);
        for t in tags.ids() {
            let p = model.transition(Predecessor::Start, t);
            log_start.push(checked_ln(p, || format!("transição START→{}", tags.label(t)))?);
        }

        let mut log_transition = Vec::with_capacity(n * n);
        for prev in tags.ids() {
            for t in tags.ids() {
                let p = model.transition(Predecessor::Tag(prev), t);
                log_transition.push(checked_ln(p, || {
                    format!("transição {}→{}", tags.label(prev), tags.label(t))
                })?);
            }
        }

        Ok(Self {
            model,
            log_start,
            log_transition,
        })
    }

    pub fn model(&self) -> &'m HmmModel {
        self.model
    }

    /// Calcula a coluna da palavra `word`.
    ///
    /// `prev = None` indica a posição 0 (predecessor `START`).
    pub fn step(&self, word: &str, prev: Option<&Column>) -> Result<Column> {
        let n = self.model.num_tags();
        if n == 0 {
            return Err(PosError::EmptyTagSet { words: 1 });
        }

        // Emissão independe do predecessor: uma vez por tag.
        let bucket = self.model.bucket_for(word);
        let mut emission = Vec::with_capacity(n);
        let mut sources = Vec::with_capacity(n);
        for t in self.model.tagset().ids() {
            let (p, source) = self.model.emission(t, word, bucket);
            let log_e = checked_ln(p, || {
                format!(
                    "emissão {}/{word} ({})",
                    self.model.tagset().label(t),
                    self.model.source_name(source)
                )
            })?;
            emission.push(log_e);
            sources.push(source);
        }

        let mut scores = Vec::with_capacity(n);
        let mut backptr = Vec::with_capacity(n);
        let mut transition = Vec::with_capacity(n);

        match prev {
            None => {
                for t in 0..n {
                    scores.push(emission[t] + self.log_start[t]);
                    backptr.push(Predecessor::Start);
                    transition.push(self.log_start[t]);
                }
            }
            Some(prev) => {
                for t in 0..n {
                    let mut best_score = f64::NEG_INFINITY;
                    let mut best_prev = 0;
                    for p in 0..n {
                        let score = prev.scores[p] + emission[t] + self.log_transition[p * n + t];
                        if score > best_score {
                            best_score = score;
                            best_prev = p;
                        }
                    }
                    scores.push(best_score);
                    backptr.push(Predecessor::Tag(TagId(best_prev)));
                    transition.push(self.log_transition[best_prev * n + t]);
                }
            }
        }

        tracing::trace!(word, bucket = self.model.buckets()[bucket].name.as_str(), "coluna do trellis");

        Ok(Column {
            scores,
            backptr,
            emission,
            transition,
            sources,
        })
    }
}

/// Score de uma tag em um passo do Viterbi (para visualização).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagScore {
    pub tag: String,
    /// Log-score acumulado δᵢ(t).
    pub score: f64,
    /// Predecessor ótimo (`START` na posição 0).
    pub best_prev: String,
    pub emission: f64,
    pub transition: f64,
    /// `known` ou o nome do balde de reserva usado.
    pub source: String,
}

/// Estado do Viterbi em uma posição da sentença.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViterbiStep {
    pub token_index: usize,
    pub word: String,
    pub scores: Vec<TagScore>,
    pub best_tag: String,
    pub best_score: f64,
}

impl ViterbiStep {
    pub(crate) fn from_column(model: &HmmModel, token_index: usize, word: &str, column: &Column) -> Self {
        let tags = model.tagset();
        let scores = tags
            .ids()
            .map(|t| TagScore {
                tag: tags.label(t).to_string(),
                score: column.scores[t.0],
                best_prev: match column.backptr[t.0] {
                    Predecessor::Start => crate::tagset::START.to_string(),
                    Predecessor::Tag(p) => tags.label(p).to_string(),
                },
                emission: column.emission[t.0],
                transition: column.transition[t.0],
                source: model.source_name(column.sources[t.0]).to_string(),
            })
            .collect();
        let (best, best_score) = column.best().unwrap_or((TagId(0), f64::NEG_INFINITY));
        Self {
            token_index,
            word: word.to_string(),
            scores,
            best_tag: tags.label(best).to_string(),
            best_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HmmConfig;

    fn model() -> HmmModel {
        let corpus = vec![
            vec![("the", "DET"), ("dog", "NOUN"), ("runs", "VERB")],
            vec![("a", "DET"), ("cat", "NOUN"), ("sleeps", "VERB")],
        ];
        HmmModel::train(&corpus, &HmmConfig::default()).unwrap()
    }

    #[test]
    fn test_first_column_uses_start_transition() {
        let model = model();
        let stepper = TrellisStepper::new(&model).unwrap();
        let col = stepper.step("the", None).unwrap();
        let det = model.tagset().get("DET").unwrap();

        assert!(col.backptr.iter().all(|p| *p == Predecessor::Start));
        let expected = model.known_emission(det, "the").unwrap().ln()
            + model.transition(Predecessor::Start, det).ln();
        assert!((col.scores[det.0] - expected).abs() < 1e-12);
        assert_eq!(col.best().unwrap().0, det);
        assert_eq!(col.sources[det.0], EmissionSource::Known);
    }

    #[test]
    fn test_recursion_picks_best_predecessor() {
        let model = model();
        let stepper = TrellisStepper::new(&model).unwrap();
        let c0 = stepper.step("the", None).unwrap();
        let c1 = stepper.step("dog", Some(&c0)).unwrap();
        let det = model.tagset().get("DET").unwrap();
        let noun = model.tagset().get("NOUN").unwrap();

        assert_eq!(c1.backptr[noun.0], Predecessor::Tag(det));
        assert_eq!(c1.best().unwrap().0, noun);

        // Máximo explícito sobre os predecessores.
        let manual = model
            .tagset()
            .ids()
            .map(|p| {
                c0.scores[p.0]
                    + model.known_emission(noun, "dog").unwrap().ln()
                    + model.transition(Predecessor::Tag(p), noun).ln()
            })
            .fold(f64::NEG_INFINITY, f64::max);
        assert!((c1.scores[noun.0] - manual).abs() < 1e-12);
    }

    #[test]
    fn test_tie_keeps_first_predecessor() {
        let model = model();
        let stepper = TrellisStepper::new(&model).unwrap();
        let n = model.num_tags();
        let flat = Column {
            scores: vec![0.0; n],
            backptr: vec![Predecessor::Start; n],
            emission: vec![0.0; n],
            transition: vec![0.0; n],
            sources: vec![EmissionSource::Known; n],
        };
        assert_eq!(flat.best().unwrap().0, TagId(0));

        // Palavra desconhecida após coluna plana: cada tag escolhe o predecessor
        // com a maior transição, e só empata se as transições empatarem.
        let col = stepper.step("zzz", Some(&flat)).unwrap();
        for t in model.tagset().ids() {
            let Predecessor::Tag(p) = col.backptr[t.0] else {
                panic!("posição > 0 não pode apontar para START");
            };
            for q in model.tagset().ids().take(p.0) {
                assert!(
                    model.transition(Predecessor::Tag(q), t)
                        < model.transition(Predecessor::Tag(p), t)
                );
            }
        }
    }

    #[test]
    fn test_empty_tagset_is_an_error() {
        let empty: Vec<Vec<(&str, &str)>> = vec![];
        let model = HmmModel::train(&empty, &HmmConfig::default()).unwrap();
        let stepper = TrellisStepper::new(&model).unwrap();
        assert!(matches!(
            stepper.step("x", None),
            Err(PosError::EmptyTagSet { .. })
        ));
    }

    #[test]
    fn test_corrupted_table_fails_fast() {
        let mut model = model();
        model.transition[0] = 0.0;
        let err = TrellisStepper::new(&model).unwrap_err();
        assert!(matches!(err, PosError::NumericalDomain { .. }));

        let mut model = self::model();
        model.buckets.last_mut().unwrap().probs[0] = -1.0;
        let stepper = TrellisStepper::new(&model).unwrap();
        let err = stepper.step("zzz", None).unwrap_err();
        assert!(matches!(err, PosError::NumericalDomain { .. }));
    }

    #[test]
    fn test_trace_step_labels() {
        let model = model();
        let stepper = TrellisStepper::new(&model).unwrap();
        let col = stepper.step("jumping", None).unwrap();
        let step = ViterbiStep::from_column(&model, 0, "jumping", &col);
        assert_eq!(step.scores.len(), 3);
        assert!(step.scores.iter().all(|s| s.best_prev == "START"));
        assert!(step.scores.iter().all(|s| s.source == "-ing"));
    }
}
