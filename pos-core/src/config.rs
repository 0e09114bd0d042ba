//! # Hiperparâmetros do HMM
//!
//! Todos os valores numéricos do estimador vivem aqui, serializáveis em JSON
//! para que experimentos não exijam recompilar.
//!
//! ```json
//! {
//!   "alpha": 1e-7,
//!   "initial_epsilon": 1e-5,
//!   "catch_all_scale": 1000.0,
//!   "shape_rules": [{ "name": "-ing", "affix": { "suffix": "ing" }, "scale": 500.0 }]
//! }
//! ```
//!
//! Campos ausentes assumem o valor padrão.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PosError, Result};
use crate::shape::{default_rules, ShapeRule, CATCH_ALL};

/// Configuração do estimador de probabilidades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HmmConfig {
    /// Constante α da suavização aditiva (Laplace).
    pub alpha: f64,
    /// Probabilidade inicial usada para tags ausentes da tabela inicial.
    pub initial_epsilon: f64,
    /// Escala `K` do balde genérico `hapax`.
    pub catch_all_scale: f64,
    /// Regras de forma, em ordem de prioridade. Vazia = variante base.
    pub shape_rules: Vec<ShapeRule>,
}

impl Default for HmmConfig {
    fn default() -> Self {
        Self::suffix_aware()
    }
}

impl HmmConfig {
    /// Variante completa: baldes de sufixo/prefixo + balde genérico.
    pub fn suffix_aware() -> Self {
        Self {
            alpha: 1e-7,
            initial_epsilon: 1e-5,
            catch_all_scale: 1000.0,
            shape_rules: default_rules(),
        }
    }

    /// Variante base: só o balde genérico de hapax.
    pub fn base() -> Self {
        Self {
            shape_rules: Vec::new(),
            ..Self::suffix_aware()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Verifica que todas as constantes produzem probabilidades estritamente
    /// positivas e que os nomes de balde são únicos.
    pub fn validate(&self) -> Result<()> {
        positive("alpha", self.alpha)?;
        positive("initial_epsilon", self.initial_epsilon)?;
        positive("catch_all_scale", self.catch_all_scale)?;

        let mut names = HashSet::new();
        names.insert(CATCH_ALL);
        for rule in &self.shape_rules {
            positive(&format!("scale da regra {}", rule.name), rule.scale)?;
            if rule.affix.text().is_empty() {
                return Err(PosError::InvalidConfig(format!(
                    "regra {} tem afixo vazio",
                    rule.name
                )));
            }
            if !names.insert(rule.name.as_str()) {
                return Err(PosError::InvalidConfig(format!(
                    "nome de balde repetido: {}",
                    rule.name
                )));
            }
        }
        Ok(())
    }
}

fn positive(field: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PosError::InvalidConfig(format!(
            "{field} deve ser finito e > 0, recebido {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Affix;

    #[test]
    fn test_defaults_are_valid() {
        HmmConfig::default().validate().unwrap();
        HmmConfig::base().validate().unwrap();
        assert!(HmmConfig::base().shape_rules.is_empty());
        assert_eq!(HmmConfig::default().shape_rules.len(), 21);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = HmmConfig::from_json_str(r#"{"alpha": 0.001, "shape_rules": []}"#).unwrap();
        assert_eq!(config.alpha, 0.001);
        assert_eq!(config.initial_epsilon, 1e-5);
        assert_eq!(config.catch_all_scale, 1000.0);
        assert!(config.shape_rules.is_empty());
    }

    #[test]
    fn test_rejects_non_positive_alpha() {
        let err = HmmConfig::from_json_str(r#"{"alpha": 0.0}"#).unwrap_err();
        assert!(matches!(err, PosError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_duplicate_and_reserved_names() {
        let mut config = HmmConfig::base();
        config.shape_rules = vec![ShapeRule::suffix("ing"), ShapeRule::suffix("ing")];
        assert!(matches!(config.validate(), Err(PosError::InvalidConfig(_))));

        config.shape_rules = vec![ShapeRule {
            name: CATCH_ALL.to_string(),
            affix: Affix::Suffix("x".to_string()),
            scale: 1.0,
        }];
        assert!(matches!(config.validate(), Err(PosError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_empty_affix() {
        let mut config = HmmConfig::base();
        config.shape_rules = vec![ShapeRule::prefix("")];
        assert!(matches!(config.validate(), Err(PosError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json() {
        let err = HmmConfig::from_json_str("{alpha").unwrap_err();
        assert!(matches!(err, PosError::ConfigParse(_)));
    }
}
