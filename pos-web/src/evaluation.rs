//! # Avaliação de Acurácia
//!
//! Compara a saída do etiquetador com o padrão-ouro, token a token:
//!
//! - **geral**: todos os tokens;
//! - **multi-tag**: palavras que aparecem com mais de uma tag no treino;
//! - **inéditas**: palavras fora do vocabulário de treino.
//!
//! Também conta os erros e acertos mais frequentes como triplas
//! `(palavra, tag prevista, tag correta)`.

use std::collections::{HashMap, HashSet};
use std::fmt;

use pos_core::TaggedSentence;
use serde::Serialize;

use crate::corpus_io::Sentence;

/// Acertos sobre total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Accuracy {
    pub correct: usize,
    pub total: usize,
}

impl Accuracy {
    fn record(&mut self, hit: bool) {
        self.total += 1;
        if hit {
            self.correct += 1;
        }
    }

    /// Fração de acertos; zero quando não há tokens.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}% ({}/{})",
            self.ratio() * 100.0,
            self.correct,
            self.total
        )
    }
}

/// `(palavra, prevista, correta)` com a contagem de ocorrências.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub word: String,
    pub predicted: String,
    pub gold: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub overall: Accuracy,
    pub multi_tag: Accuracy,
    pub unseen: Accuracy,
    pub top_wrong: Vec<Outcome>,
    pub top_correct: Vec<Outcome>,
}

/// Avalia `predicted` contra `gold`, usando `train` para classificar palavras.
///
/// Sentenças com comprimentos diferentes são comparadas até o menor deles,
/// com aviso; o decodificador sempre devolve uma tag por palavra.
pub fn evaluate(
    train: &[Sentence],
    gold: &[Sentence],
    predicted: &[TaggedSentence],
    top_k: usize,
) -> EvaluationReport {
    let mut tags_per_word: HashMap<&str, HashSet<&str>> = HashMap::new();
    for (word, tag) in train.iter().flatten() {
        tags_per_word.entry(word).or_default().insert(tag);
    }

    let mut overall = Accuracy::default();
    let mut multi_tag = Accuracy::default();
    let mut unseen = Accuracy::default();
    let mut wrong: HashMap<(&str, &str, &str), usize> = HashMap::new();
    let mut correct: HashMap<(&str, &str, &str), usize> = HashMap::new();

    for (i, (gold_sentence, out)) in gold.iter().zip(predicted).enumerate() {
        if gold_sentence.len() != out.len() {
            tracing::warn!(
                sentence = i,
                gold = gold_sentence.len(),
                predicted = out.len(),
                "comprimentos divergentes"
            );
        }
        for ((word, gold_tag), (_, tag)) in gold_sentence.iter().zip(out) {
            let hit = gold_tag == tag;
            overall.record(hit);
            match tags_per_word.get(word.as_str()) {
                None => unseen.record(hit),
                Some(tags) if tags.len() > 1 => multi_tag.record(hit),
                Some(_) => {}
            }
            let key = (word.as_str(), tag.as_str(), gold_tag.as_str());
            let table = if hit { &mut correct } else { &mut wrong };
            *table.entry(key).or_insert(0) += 1;
        }
    }

    EvaluationReport {
        overall,
        multi_tag,
        unseen,
        top_wrong: top_outcomes(wrong, top_k),
        top_correct: top_outcomes(correct, top_k),
    }
}

/// Os `k` mais frequentes; empates em ordem lexicográfica para saída estável.
fn top_outcomes(table: HashMap<(&str, &str, &str), usize>, k: usize) -> Vec<Outcome> {
    let mut entries: Vec<_> = table.into_iter().collect();
    entries.sort_by(|(a, ca), (b, cb)| cb.cmp(ca).then_with(|| a.cmp(b)));
    entries
        .into_iter()
        .take(k)
        .map(|((word, predicted, gold), count)| Outcome {
            word: word.to_string(),
            predicted: predicted.to_string(),
            gold: gold.to_string(),
            count,
        })
        .collect()
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Acurácia geral:      {}", self.overall)?;
        writeln!(f, "Acurácia multi-tag:  {}", self.multi_tag)?;
        writeln!(f, "Acurácia inéditas:   {}", self.unseen)?;
        writeln!(f)?;
        writeln!(f, "Erros mais frequentes (palavra, prevista, correta):")?;
        for o in &self.top_wrong {
            writeln!(f, "  {:>5}  {} {} {}", o.count, o.word, o.predicted, o.gold)?;
        }
        writeln!(f, "Acertos mais frequentes (palavra, prevista, correta):")?;
        for o in &self.top_correct {
            writeln!(f, "  {:>5}  {} {} {}", o.count, o.word, o.predicted, o.gold)?;
        }
        Ok(())
    }
}
