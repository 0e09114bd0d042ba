//! # Estimador de Probabilidades
//!
//! Converte as contagens brutas em tabelas suavizadas. Toda suavização é
//! aditiva (Laplace) com um α pequeno, o que evita probabilidades zero sem
//! deslocar de forma perceptível os eventos frequentes.
//!
//! ```text
//! inicial(t)      = (count(t) + α) / (N_sent + α·N_tags)
//! transição(p, t) = (count(p, t) + α) / (count(p) + α·N_tags)
//! emissão(t, w)   = (count(t, w) + α) / (count(t) + α·(|V_t| + 1))
//! ```
//!
//! ## Palavras desconhecidas
//!
//! As palavras hapax (frequência 1 no corpus) servem de amostra do que é uma
//! palavra rara. Elas são particionadas pelos baldes de forma e, para cada
//! balde `b` e tag `t`, com `s = hapax_b(t) / hapax_b` e `C_b` o número de
//! tags distintas no balde:
//!
//! ```text
//! s ≠ 0:  P_b(t) = s·K·α / (count(t) + s·K·α·(C_b + 1))
//! s = 0:  P_b(t) = α / (count(t) + α·(C_b + 1))
//! ```
//!
//! As transições de um predecessor fixo não somam exatamente 1 (a suavização
//! não renormaliza); isso é comportamento aceito do modelo.

use std::collections::HashMap;

use crate::config::HmmConfig;
use crate::counts::Counts;
use crate::error::Result;
use crate::model::{FallbackBucket, HmmModel};
use crate::shape::{classify, CATCH_ALL};
use crate::tagset::TagId;

/// Estima o [`HmmModel`] a partir das contagens.
pub fn estimate(counts: &Counts, config: &HmmConfig) -> Result<HmmModel> {
    config.validate()?;

    let alpha = config.alpha;
    let n = counts.num_tags();
    let n_f = n as f64;

    let initial: Vec<f64> = counts
        .tagset
        .ids()
        .map(|t| {
            (counts.tag_count(t) as f64 + alpha) / (counts.num_sentences as f64 + alpha * n_f)
        })
        .collect();

    // count(START) = número de sentenças não vazias.
    let start_total: u64 = counts.start_counts.iter().sum();
    let start_transition: Vec<f64> = counts
        .tagset
        .ids()
        .map(|t| (counts.start(t) as f64 + alpha) / (start_total as f64 + alpha * n_f))
        .collect();

    let mut transition = vec![0.0; n * n];
    for prev in counts.tagset.ids() {
        let prev_count = counts.tag_count(prev) as f64;
        for t in counts.tagset.ids() {
            transition[prev.0 * n + t.0] =
                (counts.bigram(prev, t) as f64 + alpha) / (prev_count + alpha * n_f);
        }
    }

    let emission: Vec<HashMap<String, f64>> = counts
        .tagset
        .ids()
        .map(|t| {
            let words = &counts.word_counts[t.0];
            let denom = counts.tag_count(t) as f64 + alpha * (words.len() as f64 + 1.0);
            words
                .iter()
                .map(|(word, &c)| (word.clone(), (c as f64 + alpha) / denom))
                .collect()
        })
        .collect();

    let buckets = estimate_fallback(counts, config);

    tracing::info!(
        tags = n,
        sentences = counts.num_sentences,
        buckets = buckets.len(),
        "modelo HMM estimado"
    );

    Ok(HmmModel {
        tagset: counts.tagset.clone(),
        initial,
        initial_epsilon: config.initial_epsilon,
        start_transition,
        transition,
        emission,
        rules: config.shape_rules.clone(),
        buckets,
    })
}

/// Particiona os hapax pelos baldes e estima uma distribuição por balde.
///
/// Um único laço parametrizado por `(nome, escala)` cobre todas as regras e o
/// balde genérico, que recebe os hapax que não casam com nenhuma regra.
fn estimate_fallback(counts: &Counts, config: &HmmConfig) -> Vec<FallbackBucket> {
    let rules = &config.shape_rules;
    let mut members: Vec<Vec<TagId>> = vec![Vec::new(); rules.len() + 1];
    for (word, tag) in counts.hapax_words() {
        let bucket = classify(rules, word).unwrap_or(rules.len());
        members[bucket].push(tag);
    }

    let specs = rules
        .iter()
        .map(|r| (r.name.as_str(), r.scale))
        .chain(std::iter::once((CATCH_ALL, config.catch_all_scale)));

    specs
        .zip(members)
        .map(|((name, scale), tags)| {
            let bucket = bucket_distribution(counts, name, &tags, scale, config.alpha);
            tracing::debug!(
                bucket = name,
                hapax = bucket.hapax_words,
                cardinality = bucket.tag_cardinality,
                "balde de reserva"
            );
            bucket
        })
        .collect()
}

fn bucket_distribution(
    counts: &Counts,
    name: &str,
    hapax_tags: &[TagId],
    scale: f64,
    alpha: f64,
) -> FallbackBucket {
    let mut per_tag = vec![0usize; counts.num_tags()];
    for t in hapax_tags {
        per_tag[t.0] += 1;
    }
    let total = hapax_tags.len();
    let cardinality = per_tag.iter().filter(|&&c| c > 0).count();
    let card_term = cardinality as f64 + 1.0;

    let probs = counts
        .tagset
        .ids()
        .map(|t| {
            let tag_count = counts.tag_count(t) as f64;
            let smoothing = if total == 0 {
                0.0
            } else {
                per_tag[t.0] as f64 / total as f64
            };
            if smoothing != 0.0 {
                let weight = smoothing * scale * alpha;
                weight / (tag_count + weight * card_term)
            } else {
                alpha / (tag_count + alpha * card_term)
            }
        })
        .collect();

    FallbackBucket {
        name: name.to_string(),
        hapax_words: total,
        tag_cardinality: cardinality,
        probs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Predecessor;
    use crate::shape::ShapeRule;

    const ALPHA: f64 = 1e-7;

    fn close(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() < 1e-12
    }

    fn corpus() -> Vec<Vec<(&'static str, &'static str)>> {
        vec![
            vec![("the", "DET"), ("dog", "NOUN"), ("is", "VERB"), ("barking", "VERB")],
            vec![("the", "DET"), ("fox", "NOUN"), ("is", "VERB"), ("sleeping", "VERB")],
            vec![("a", "DET"), ("bird", "NOUN"), ("sings", "VERB"), ("loudly", "ADV")],
        ]
    }

    fn model(config: &HmmConfig) -> (Counts, HmmModel) {
        let counts = Counts::from_sentences(&corpus());
        let model = estimate(&counts, config).unwrap();
        (counts, model)
    }

    #[test]
    fn test_formulas() {
        let (counts, model) = model(&HmmConfig::default());
        let det = counts.tagset.get("DET").unwrap();
        let noun = counts.tagset.get("NOUN").unwrap();
        let verb = counts.tagset.get("VERB").unwrap();
        let n = 4.0;

        // DET: 3 ocorrências, 3 sentenças.
        assert!(close(model.initial[det.0], (3.0 + ALPHA) / (3.0 + ALPHA * n)));
        assert!(close(
            model.transition(Predecessor::Start, det),
            (3.0 + ALPHA) / (3.0 + ALPHA * n)
        ));
        assert!(close(
            model.transition(Predecessor::Start, noun),
            ALPHA / (3.0 + ALPHA * n)
        ));
        // VERB: 5 ocorrências; VERB→VERB 2 vezes.
        assert!(close(
            model.transition(Predecessor::Tag(verb), verb),
            (2.0 + ALPHA) / (5.0 + ALPHA * n)
        ));
        // VERB emite {is, barking, sleeping, sings}: |V| = 4.
        assert!(close(
            model.known_emission(verb, "is").unwrap(),
            (2.0 + ALPHA) / (5.0 + ALPHA * 5.0)
        ));
        assert!(model.known_emission(verb, "the").is_none());
    }

    #[test]
    fn test_no_zero_probabilities() {
        let (counts, model) = model(&HmmConfig::default());
        for t in counts.tagset.ids() {
            assert!(model.initial[t.0] > 0.0);
            assert!(model.transition(Predecessor::Start, t) > 0.0);
            for p in counts.tagset.ids() {
                assert!(model.transition(Predecessor::Tag(p), t) > 0.0);
            }
            for p in model.emission[t.0].values() {
                assert!(*p > 0.0);
            }
            for bucket in model.buckets() {
                assert!(bucket.probs[t.0] > 0.0, "{} / {}", bucket.name, t);
            }
        }
    }

    #[test]
    fn test_hapax_partition() {
        let (_, model) = model(&HmmConfig::default());
        // Hapax: dog, barking, fox, sleeping, a, bird, sings, loudly.
        assert_eq!(model.bucket("-ing").unwrap().hapax_words, 2);
        assert_eq!(model.bucket("-ly").unwrap().hapax_words, 1);
        assert_eq!(model.bucket("-a").unwrap().hapax_words, 1);
        assert_eq!(model.bucket("-s").unwrap().hapax_words, 1);
        assert_eq!(model.catch_all().hapax_words, 3);
        assert_eq!(model.bucket("-ion").unwrap().hapax_words, 0);
        let total: usize = model.buckets().iter().map(|b| b.hapax_words).sum();
        assert_eq!(total, 8);
    }

    #[test]
    fn test_bucket_formula_both_branches() {
        let (counts, model) = model(&HmmConfig::default());
        let verb = counts.tagset.get("VERB").unwrap();
        let noun = counts.tagset.get("NOUN").unwrap();
        let ing = model.bucket("-ing").unwrap();
        assert_eq!(ing.tag_cardinality, 1);

        // s = 1, K = 500, C = 1.
        let w = 500.0 * ALPHA;
        assert!(close(ing.probs[verb.0], w / (5.0 + w * 2.0)));
        // s = 0.
        assert!(close(ing.probs[noun.0], ALPHA / (3.0 + ALPHA * 2.0)));
        assert!(ing.probs[verb.0] > ing.probs[noun.0]);

        // Genérico: dog, fox, bird → NOUN; s = 1, K = 1000.
        let catch_all = model.catch_all();
        let w = 1000.0 * ALPHA;
        assert!(close(catch_all.probs[noun.0], w / (3.0 + w * 2.0)));
    }

    #[test]
    fn test_empty_bucket_is_well_defined() {
        let (counts, model) = model(&HmmConfig::default());
        let ion = model.bucket("-ion").unwrap();
        assert_eq!(ion.tag_cardinality, 0);
        for t in counts.tagset.ids() {
            let expected = ALPHA / (counts.tag_count(t) as f64 + ALPHA);
            assert!(close(ion.probs[t.0], expected));
        }
    }

    #[test]
    fn test_base_variant_has_single_bucket() {
        let (_, model) = model(&HmmConfig::base());
        assert_eq!(model.buckets().len(), 1);
        assert_eq!(model.catch_all().hapax_words, 8);
        assert_eq!(model.bucket_for("jumping"), 0);
    }

    #[test]
    fn test_hapax_only_touches_its_own_bucket() {
        let config = HmmConfig::default();
        let (_, before) = model(&config);

        let mut extended = corpus();
        extended.push(vec![("quickly", "ADV")]);
        let counts = Counts::from_sentences(&extended);
        let after = estimate(&counts, &config).unwrap();

        let adv = counts.tagset.get("ADV").unwrap();
        for (old, new) in before.buckets().iter().zip(after.buckets()) {
            if old.name == "-ly" {
                assert_eq!(new.hapax_words, old.hapax_words + 1);
                continue;
            }
            assert_eq!(old.hapax_words, new.hapax_words, "{}", old.name);
            for t in counts.tagset.ids().filter(|&t| t != adv) {
                assert_eq!(old.probs[t.0], new.probs[t.0], "{}", old.name);
            }
        }
    }

    #[test]
    fn test_custom_scale_is_used() {
        let mut config = HmmConfig::base();
        config.shape_rules = vec![ShapeRule::suffix("ing").with_scale(50.0)];
        let (counts, model) = model(&config);
        let verb = counts.tagset.get("VERB").unwrap();
        let w = 50.0 * ALPHA;
        assert!(close(model.buckets()[0].probs[verb.0], w / (5.0 + w * 2.0)));
    }

    #[test]
    fn test_empty_corpus() {
        let counts = Counts::from_sentences::<Vec<(&str, &str)>, &str, &str>(&[]);
        let model = estimate(&counts, &HmmConfig::default()).unwrap();
        assert_eq!(model.num_tags(), 0);
        assert_eq!(model.buckets().len(), 22);
        assert!(model.catch_all().probs.is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let counts = Counts::from_sentences(&corpus());
        let mut config = HmmConfig::default();
        config.alpha = -1.0;
        assert!(estimate(&counts, &config).is_err());
    }
}
