//! # Conjunto de Tags Internadas
//!
//! As tags POS (ex: `DET`, `NOUN`, `VERB`) são rótulos opacos vindos do corpus
//! de treino. Para indexar tabelas densas e garantir uma ordem de iteração
//! fixa (usada em todos os desempates do Viterbi), cada rótulo é internado
//! como um inteiro pequeno [`TagId`].
//!
//! ## Ordem
//!
//! A ordem é a de **primeira aparição** no corpus de treino. Mesmo corpus →
//! mesma numeração → mesma saída, bit a bit.
//!
//! ## START
//!
//! O predecessor sintético `START` **não** é membro do conjunto: ele é uma
//! linha à parte na tabela de transição ([`crate::model::HmmModel`]). Uma tag
//! literal `"START"` vinda do corpus é tratada como qualquer outra.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Nome do predecessor sintético do início da sentença.
pub const START: &str = "START";

/// Índice denso de uma tag dentro de um [`TagSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TagId(pub usize);

impl TagId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Tabela bidirecional rótulo ↔ [`TagId`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet {
    labels: Vec<String>,
    index: HashMap<String, TagId>,
}

impl From<Vec<String>> for TagSet {
    fn from(labels: Vec<String>) -> Self {
        let mut tags = TagSet::new();
        for label in &labels {
            tags.intern(label);
        }
        tags
    }
}

impl From<TagSet> for Vec<String> {
    fn from(tags: TagSet) -> Self {
        tags.labels
    }
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Devolve o id da tag, registrando-a no fim da ordem se for nova.
    pub fn intern(&mut self, label: &str) -> TagId {
        if let Some(&id) = self.index.get(label) {
            return id;
        }
        let id = TagId(self.labels.len());
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), id);
        id
    }

    pub fn get(&self, label: &str) -> Option<TagId> {
        self.index.get(label).copied()
    }

    pub fn label(&self, id: TagId) -> &str {
        &self.labels[id.0]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Todas as tags na ordem fixa de enumeração.
    pub fn ids(&self) -> impl Iterator<Item = TagId> + '_ {
        (0..self.labels.len()).map(TagId)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl std::fmt::Display for TagId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_keeps_first_seen_order() {
        let mut tags = TagSet::new();
        let noun = tags.intern("NOUN");
        let det = tags.intern("DET");
        assert_eq!(tags.intern("NOUN"), noun);
        assert_eq!(noun, TagId(0));
        assert_eq!(det, TagId(1));
        assert_eq!(tags.labels(), &["NOUN".to_string(), "DET".to_string()]);
    }

    #[test]
    fn test_ids_and_lookup() {
        let mut tags = TagSet::new();
        for t in ["A", "B", "C"] {
            tags.intern(t);
        }
        let ids: Vec<TagId> = tags.ids().collect();
        assert_eq!(ids, vec![TagId(0), TagId(1), TagId(2)]);
        assert_eq!(tags.get("B"), Some(TagId(1)));
        assert_eq!(tags.get(START), None);
        assert_eq!(tags.label(TagId(2)), "C");
    }

    #[test]
    fn test_serde_round_trip_rebuilds_index() {
        let mut tags = TagSet::new();
        tags.intern("X");
        tags.intern("Y");
        let json = serde_json::to_string(&tags).unwrap();
        assert_eq!(json, r#"["X","Y"]"#);
        let back: TagSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get("Y"), Some(TagId(1)));
    }

    #[test]
    fn test_literal_start_is_ordinary_tag() {
        let mut tags = TagSet::new();
        let id = tags.intern(START);
        assert_eq!(tags.get("START"), Some(id));
        assert_eq!(tags.len(), 1);
    }
}
