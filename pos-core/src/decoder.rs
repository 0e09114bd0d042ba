//! # Decodificador Viterbi
//!
//! Conduz o [`TrellisStepper`] posição a posição, guardando só os
//! back-pointers de cada coluna. Ao fim da sentença escolhe a tag final de
//! maior score e reconstrói o caminho de trás para frente, descartando o
//! `START` sintético.
//!
//! Sentenças são independentes: nenhum estado atravessa a fronteira entre
//! elas, e as tabelas do modelo são só-leitura. Por isso
//! [`Decoder::decode_all_parallel`] simplesmente distribui as sentenças entre
//! as threads do Rayon.
//!
//! ## Complexidade
//! $O(N \cdot T^2)$ por sentença, com $N$ palavras e $T$ tags.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{PosError, Result};
use crate::model::{HmmModel, Predecessor};
use crate::tagset::TagId;
use crate::viterbi::{Column, TrellisStepper, ViterbiStep};

/// Sentença etiquetada: pares `(palavra, tag)` alinhados com a entrada.
pub type TaggedSentence = Vec<(String, String)>;

/// Resultado completo de uma decodificação com rastro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViterbiResult {
    pub tagged: TaggedSentence,
    /// Log-probabilidade do melhor caminho.
    pub best_score: f64,
    /// Uma entrada por posição, para visualização.
    pub steps: Vec<ViterbiStep>,
}

/// Decodificador sobre um modelo já estimado.
#[derive(Debug, Clone)]
pub struct Decoder<'m> {
    stepper: TrellisStepper<'m>,
}

impl<'m> Decoder<'m> {
    /// Prepara as tabelas de transição em log-space.
    ///
    /// Falha com [`PosError::NumericalDomain`] se alguma transição não for
    /// estritamente positiva.
    pub fn new(model: &'m HmmModel) -> Result<Self> {
        Ok(Self {
            stepper: TrellisStepper::new(model)?,
        })
    }

    pub fn model(&self) -> &'m HmmModel {
        self.stepper.model()
    }

    /// Etiqueta uma sentença.
    pub fn decode<W: AsRef<str>>(&self, words: &[W]) -> Result<TaggedSentence> {
        let (path, _) = self.run(words, None)?;
        Ok(self.pair(words, &path))
    }

    /// Etiqueta uma sentença guardando o estado de cada coluna.
    pub fn decode_traced<W: AsRef<str>>(&self, words: &[W]) -> Result<ViterbiResult> {
        let mut steps = Vec::with_capacity(words.len());
        let (path, best_score) = self.run(words, Some(&mut steps))?;
        Ok(ViterbiResult {
            tagged: self.pair(words, &path),
            best_score,
            steps,
        })
    }

    /// Etiqueta várias sentenças em sequência.
    pub fn decode_all<S, W>(&self, sentences: &[S]) -> Result<Vec<TaggedSentence>>
    where
        S: AsRef<[W]>,
        W: AsRef<str>,
    {
        sentences.iter().map(|s| self.decode(s.as_ref())).collect()
    }

    /// Etiqueta várias sentenças em paralelo; a saída mantém a ordem da entrada.
    pub fn decode_all_parallel<S, W>(&self, sentences: &[S]) -> Result<Vec<TaggedSentence>>
    where
        S: AsRef<[W]> + Sync,
        W: AsRef<str> + Sync,
    {
        sentences
            .par_iter()
            .map(|s| self.decode(s.as_ref()))
            .collect()
    }

    /// Forward + backtracking. Devolve o caminho de tags e o score final.
    fn run<W: AsRef<str>>(
        &self,
        words: &[W],
        mut trace: Option<&mut Vec<ViterbiStep>>,
    ) -> Result<(Vec<TagId>, f64)> {
        if words.is_empty() {
            return Ok((Vec::new(), 0.0));
        }
        let model = self.model();
        if model.num_tags() == 0 {
            return Err(PosError::EmptyTagSet { words: words.len() });
        }

        let mut backptrs: Vec<Vec<Predecessor>> = Vec::with_capacity(words.len());
        let mut column: Option<Column> = None;

        for (i, word) in words.iter().enumerate() {
            let word = word.as_ref();
            let mut next = self.stepper.step(word, column.as_ref())?;
            if let Some(steps) = trace.as_deref_mut() {
                steps.push(ViterbiStep::from_column(model, i, word, &next));
            }
            backptrs.push(std::mem::take(&mut next.backptr));
            column = Some(next);
        }

        // `words` não é vazio: há ao menos uma coluna com ao menos uma tag.
        let (last, best_score) = column
            .as_ref()
            .and_then(Column::best)
            .ok_or(PosError::EmptyTagSet { words: words.len() })?;

        let mut path = Vec::with_capacity(words.len());
        let mut current = last;
        for pointers in backptrs.iter().rev() {
            path.push(current);
            match pointers[current.0] {
                Predecessor::Tag(prev) => current = prev,
                Predecessor::Start => break,
            }
        }
        path.reverse();
        debug_assert_eq!(path.len(), words.len());

        tracing::trace!(words = words.len(), best_score, "sentença decodificada");
        Ok((path, best_score))
    }

    fn pair<W: AsRef<str>>(&self, words: &[W], path: &[TagId]) -> TaggedSentence {
        let tags = self.model().tagset();
        words
            .iter()
            .zip(path)
            .map(|(w, &t)| (w.as_ref().to_string(), tags.label(t).to_string()))
            .collect()
    }
}
