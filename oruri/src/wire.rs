use serde::{Serialize, Deserialize};

/// A message to the engine process, one JSON object per line on its stdin.
/// The engine answers each request with one reply line on its stdout, in
/// the same order.
#[derive(Serialize, Debug)]
#[serde(tag = "op", rename_all = "snake_case")]
pub(crate) enum Request<'a> {
    Init {
        model: Option<&'a str>,
        mode: &'static str,
        disable_pipes: &'a [String],
        split_sentences: bool,
    },
    Analyze {
        text: &'a str,
    },
}

#[derive(Deserialize, Debug)]
pub(crate) struct InitReply {
    pub(crate) error: Option<String>,
    #[serde(default)]
    pub(crate) pipe_names: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct AnalyzeReply {
    pub(crate) error: Option<String>,
    pub(crate) sentence: Option<Sentence>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct Sentence {
    pub(crate) text: Option<String>,
    #[serde(default)]
    pub(crate) tokens: Vec<Token>,
    #[serde(default)]
    pub(crate) noun_chunks: Vec<NounChunk>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct Token {
    pub(crate) index: Option<usize>,
    pub(crate) surface: Option<String>,
    pub(crate) lemma: Option<String>,
    pub(crate) pos: Option<String>,
    pub(crate) tag: Option<String>,
    #[serde(default)]
    pub(crate) whitespace_after: bool,
    pub(crate) head: Option<usize>,
    #[serde(default)]
    pub(crate) dep: String,
    #[serde(default)]
    pub(crate) ent_type: String,
    #[serde(default)]
    pub(crate) ent_iob: String,
    #[serde(default)]
    pub(crate) bunsetu_bi: String,
    #[serde(default)]
    pub(crate) bunsetu_position: String,
}

#[derive(Deserialize, Debug)]
pub(crate) struct NounChunk {
    pub(crate) start: Option<usize>,
    pub(crate) end: Option<usize>,
}
