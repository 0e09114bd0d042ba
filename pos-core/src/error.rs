//! # Taxonomia de Erros
//!
//! O núcleo é uma computação pura e determinística sobre dados em memória:
//! não há nada transitório para repetir, então todo erro sobe imediatamente
//! ao chamador.
//!
//! - [`PosError::NumericalDomain`]: tentativa de `ln` de zero/negativo. Indica bug
//!   de suavização ou de construção de tabela, nunca entrada do usuário.
//! - [`PosError::InvalidConfig`]: hiperparâmetros fora do domínio.
//! - [`PosError::EmptyTagSet`]: decodificar palavras com um modelo sem tags.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PosError {
    /// Logaritmo de valor fora de `(0, +inf)`.
    #[error("violação de domínio numérico em {context}: ln({value})")]
    NumericalDomain { context: String, value: f64 },

    #[error("configuração inválida: {0}")]
    InvalidConfig(String),

    #[error("falha ao interpretar configuração JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("falha de E/S: {0}")]
    Io(#[from] std::io::Error),

    /// O modelo foi treinado sem nenhuma tag, mas a sentença tem palavras.
    #[error("modelo sem tags não consegue etiquetar uma sentença de {words} palavra(s)")]
    EmptyTagSet { words: usize },
}

pub type Result<T> = std::result::Result<T, PosError>;

/// Logaritmo natural verificado.
///
/// Tabelas suavizadas nunca contêm zero; se um valor não positivo chegar aqui,
/// a construção das tabelas está quebrada e o erro é fatal para o chamador.
pub(crate) fn checked_ln(value: f64, context: impl FnOnce() -> String) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value.ln())
    } else {
        Err(PosError::NumericalDomain {
            context: context(),
            value,
        })
    }
}
