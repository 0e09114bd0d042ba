//! # pos-core — Etiquetador Morfossintático (POS) com HMM
//!
//! Este crate implementa um etiquetador de classes gramaticais baseado em um
//! **Hidden Markov Model de primeira ordem**: as tags formam uma cadeia de
//! Markov oculta e as palavras são emissões da tag atual. A melhor sequência
//! de tags é encontrada pelo **algoritmo de Viterbi**, inteiramente em
//! log-space.
//!
//! ## Arquitetura
//!
//! O fluxo é de mão única, do treino à etiquetagem:
//!
//! 1.  **Contagem** ([`counts`]): unigramas, bigramas (com `START`) e pares (tag, palavra).
//! 2.  **Estimação** ([`estimator`]): tabelas suavizadas (Laplace) inicial, de
//!     transição e de emissão, mais distribuições de reserva para palavras
//!     inéditas, uma por balde de forma ([`shape`]).
//! 3.  **Passo do trellis** ([`viterbi`]): uma coluna da programação dinâmica.
//! 4.  **Decodificação** ([`decoder`]): conduz os passos e faz o backtracking.
//!
//! O [`pipeline`] amarra tudo em [`PosTagger`].
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use pos_core::{HmmConfig, PosTagger};
//!
//! let train = vec![
//!     vec![("the", "DET"), ("dog", "NOUN"), ("runs", "VERB")],
//! ];
//! let tagger = PosTagger::train(&train, HmmConfig::default()).unwrap();
//!
//! let tagged = tagger.tag(&[vec!["the", "dog", "runs"]]).unwrap();
//! for (word, tag) in &tagged[0] {
//!     println!("{word}/{tag}");
//! }
//! assert_eq!(tagged[0][2].1, "VERB");
//! ```
//!
//! ## Variantes
//!
//! - [`HmmConfig::suffix_aware`] (padrão): baldes de sufixo/prefixo + genérico.
//! - [`HmmConfig::base`]: apenas o balde genérico de hapax.

pub mod config;
pub mod corpus;
pub mod counts;
pub mod decoder;
pub mod error;
pub mod estimator;
pub mod model;
pub mod pipeline;
pub mod shape;
pub mod tagset;
pub mod viterbi;

pub use config::HmmConfig;
pub use decoder::{Decoder, TaggedSentence, ViterbiResult};
pub use error::{PosError, Result};
pub use model::{EmissionSource, HmmModel, ModelSummary, Predecessor};
pub use pipeline::{viterbi, PosTagger};
pub use shape::{Affix, ShapeRule};
pub use tagset::{TagId, TagSet, START};
