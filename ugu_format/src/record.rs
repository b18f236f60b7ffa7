use std::collections::HashMap;

use oruri::{Sentence, Token};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NpLabel {
    Begin,
    Inside,
}

impl NpLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            NpLabel::Begin  => "NP_B",
            NpLabel::Inside => "NP_I",
        }
    }
}

/// Builds the per-sentence map from token index to noun phrase label: the
/// first token of each chunk is labelled `NP_B`, every other token the
/// chunk covers `NP_I`. Chunks are applied in order, so a later chunk
/// overwrites an earlier label at an index both cover.
pub fn noun_phrase_labels(sentence: &Sentence) -> HashMap<usize, NpLabel> {
    let mut labels = HashMap::new();

    for chunk in &sentence.noun_chunks {
        labels.insert(chunk.start, NpLabel::Begin);
        for i in chunk.start + 1..chunk.end {
            labels.insert(i, NpLabel::Inside);
        }
    }

    labels
}

/// Encodes one token as the ten tab separated fields of the output format.
pub fn token_record(token: &Token, np_labels: &HashMap<usize, NpLabel>) -> String {
    let misc = misc_column(token, np_labels);

    let dep = match token.dep.as_deref() {
        Some(dep) => dep.to_lowercase(),
        None => "_".to_owned(),
    };

    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        token.index + 1,
        token.surface,
        token.lemma,
        token.pos.as_str(),
        fine_tag(&token.tag),
        if token.pos.is_num() { "NumType=Card" } else { "_" },
        if token.is_root() { 0 } else { token.head + 1 },
        dep,
        "_",
        if misc.is_empty() { "_" } else { misc.as_str() },
    )
}

/// Renders one analyzed sentence: an optional echo of the source text as a
/// comment, one record per token in index order, then a blank separator
/// line.
pub fn sentence_block(sentence: &Sentence, echo_text: bool) -> String {
    let np_labels = noun_phrase_labels(sentence);

    let mut block = String::new();

    if echo_text {
        block.push_str("# text = ");
        block.push_str(&sentence.text);
        block.push('\n');
    }

    for token in &sentence.tokens {
        block.push_str(&token_record(token, &np_labels));
        block.push('\n');
    }

    block.push('\n');
    block
}

fn fine_tag(tag: &str) -> String {
    let tag = tag.strip_suffix(",*").unwrap_or(tag);
    tag.replace(',', "-")
}

fn misc_column(token: &Token, np_labels: &HashMap<usize, NpLabel>) -> String {
    let mut parts = Vec::new();

    if let Some(label) = &token.bunsetu_bi {
        parts.push(format!("BunsetuBILabel={}", label));
    }

    if let Some(label) = &token.bunsetu_position {
        parts.push(format!("BunsetuPositionType={}", label));
    }

    if !token.whitespace_after {
        parts.push("SpaceAfter=No".to_owned());
    }

    if let Some(label) = np_labels.get(&token.index) {
        parts.push(label.as_str().to_owned());
    }

    if let Some(entity) = &token.entity {
        parts.push(format!("NE={}_{}", entity.label, entity.position.as_str()));
    }

    parts.join("|")
}
