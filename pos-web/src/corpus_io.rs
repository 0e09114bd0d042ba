//! Leitura de corpora anotados em texto.
//!
//! Formato: uma sentença por linha, tokens separados por espaço, cada token
//! no formato `palavra=TAG`. O separador é o **último** `=`, então palavras
//! como `a=b=NOUN` mantêm `a=b` como forma. Linhas em branco são ignoradas.

use std::path::Path;

use tracing::warn;

/// Sentença anotada lida do disco.
pub type Sentence = Vec<(String, String)>;

/// Carrega um corpus anotado a partir de um arquivo.
pub fn load_corpus(path: impl AsRef<Path>) -> pos_core::Result<Vec<Sentence>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let corpus = parse_corpus(&text);
    tracing::info!(
        path = %path.display(),
        sentences = corpus.len(),
        "corpus carregado"
    );
    Ok(corpus)
}

/// Interpreta o conteúdo de um corpus. Tokens malformados são descartados
/// com aviso (número da linha a partir de 1).
pub fn parse_corpus(text: &str) -> Vec<Sentence> {
    let mut corpus = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut sentence = Vec::new();
        for token in line.split_whitespace() {
            match parse_token(token) {
                Some(pair) => sentence.push(pair),
                None => warn!(line = lineno + 1, token, "token malformado ignorado"),
            }
        }
        if !sentence.is_empty() {
            corpus.push(sentence);
        }
    }
    corpus
}

fn parse_token(token: &str) -> Option<(String, String)> {
    let (word, tag) = token.rsplit_once('=')?;
    if word.is_empty() || tag.is_empty() {
        return None;
    }
    Some((word.to_string(), tag.to_string()))
}

/// Remove as tags, deixando só as palavras (lado de teste).
pub fn strip_tags(corpus: &[Sentence]) -> Vec<Vec<String>> {
    corpus
        .iter()
        .map(|s| s.iter().map(|(w, _)| w.clone()).collect())
        .collect()
}
