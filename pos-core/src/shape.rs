//! # Regras de Forma de Palavra (Sufixos e Prefixos)
//!
//! Palavras nunca vistas no treino não têm emissão conhecida. Para elas o
//! modelo usa distribuições de reserva estimadas sobre as palavras *hapax*,
//! separadas em "baldes" pela forma da palavra: terminações como `-ing`
//! (gerúndio) ou `-ly` (advérbio) são fortes pistas da classe gramatical.
//!
//! Cada regra é um dado, não código: `{nome, afixo, escala}`. As regras são
//! testadas em ordem e a **primeira** que casa vence; uma palavra que não casa
//! com nenhuma cai no balde genérico [`CATCH_ALL`].
//!
//! ## Lista padrão
//!
//! ```text
//! -ing -ly -ion -er -en -ity -ness -ed -es -al -ive -ic -ous -able
//! inter- -co -at -ful -a -i -s
//! ```
//!
//! A lista e as escalas são hiperparâmetros ajustados empiricamente; a ordem
//! importa (ex: `-ness` precisa vir antes de `-s`).

use serde::{Deserialize, Serialize};

/// Nome do balde genérico, sempre o último.
pub const CATCH_ALL: &str = "hapax";

/// Escala `K` padrão dos baldes de afixo.
pub const DEFAULT_RULE_SCALE: f64 = 500.0;

/// Posição do afixo testado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affix {
    Suffix(String),
    Prefix(String),
}

impl Affix {
    pub fn matches(&self, word: &str) -> bool {
        match self {
            Affix::Suffix(s) => word.ends_with(s.as_str()),
            Affix::Prefix(p) => word.starts_with(p.as_str()),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Affix::Suffix(s) | Affix::Prefix(s) => s,
        }
    }
}

/// Uma regra de balde: nome, afixo e constante de escala `K`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRule {
    pub name: String,
    pub affix: Affix,
    #[serde(default = "default_rule_scale")]
    pub scale: f64,
}

fn default_rule_scale() -> f64 {
    DEFAULT_RULE_SCALE
}

impl ShapeRule {
    /// Regra `-sufixo` (ex: `ShapeRule::suffix("ing")` → balde `-ing`).
    pub fn suffix(s: &str) -> Self {
        Self {
            name: format!("-{s}"),
            affix: Affix::Suffix(s.to_string()),
            scale: DEFAULT_RULE_SCALE,
        }
    }

    /// Regra `prefixo-` (ex: `ShapeRule::prefix("inter")` → balde `inter-`).
    pub fn prefix(p: &str) -> Self {
        Self {
            name: format!("{p}-"),
            affix: Affix::Prefix(p.to_string()),
            scale: DEFAULT_RULE_SCALE,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn matches(&self, word: &str) -> bool {
        self.affix.matches(word)
    }
}

/// Lista padrão de regras, na ordem de prioridade.
pub fn default_rules() -> Vec<ShapeRule> {
    const SUFFIXES_BEFORE_INTER: [&str; 14] = [
        "ing", "ly", "ion", "er", "en", "ity", "ness", "ed", "es", "al", "ive", "ic", "ous",
        "able",
    ];
    const SUFFIXES_AFTER_INTER: [&str; 6] = ["co", "at", "ful", "a", "i", "s"];

    let mut rules: Vec<ShapeRule> = SUFFIXES_BEFORE_INTER
        .iter()
        .map(|s| ShapeRule::suffix(s))
        .collect();
    rules.push(ShapeRule::prefix("inter"));
    rules.extend(SUFFIXES_AFTER_INTER.iter().map(|s| ShapeRule::suffix(s)));
    rules
}

/// Índice da primeira regra que casa com a palavra, ou `None` (balde genérico).
pub fn classify(rules: &[ShapeRule], word: &str) -> Option<usize> {
    rules.iter().position(|rule| rule.matches(word))
}
