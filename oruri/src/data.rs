#[derive(Clone, Debug)]
pub struct Sentence {
    pub text: String,
    pub tokens: Vec<Token>,
    pub noun_chunks: Vec<NounChunk>,
}

#[derive(Clone, Debug)]
pub struct Token {
    pub index: usize,
    pub surface: String,
    pub lemma: String,
    pub pos: Upos,
    pub tag: String,
    pub whitespace_after: bool,
    pub head: usize,
    pub dep: Option<String>,
    pub entity: Option<Entity>,
    pub bunsetu_bi: Option<String>,
    pub bunsetu_position: Option<String>,
}

impl Token {
    pub fn is_root(&self) -> bool {
        self.head == self.index
    }
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub label: String,
    pub position: IobMark,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IobMark {
    Begin,
    Inside,
    Outside,
}

impl IobMark {
    pub fn as_str(self) -> &'static str {
        match self {
            IobMark::Begin   => "B",
            IobMark::Inside  => "I",
            IobMark::Outside => "O",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NounChunk {
    pub start: usize,
    pub end: usize,
}

#[derive(Clone, Debug)]
pub enum Upos {
    /// Adjective
    ADJ,
    /// Adposition
    ADP,
    /// Adverb
    ADV,
    /// Auxiliary
    AUX,
    /// Conjunction, coordinating
    CCONJ,
    /// Determiner
    DET,
    /// Interjection
    INTJ,
    /// Noun
    NOUN,
    /// Numeral
    NUM,
    /// Particle
    PART,
    /// Pronoun
    PRON,
    /// Noun, proper
    PROPN,
    /// Punctuation
    PUNCT,
    /// Conjunction, subordinating
    SCONJ,
    /// Symbol
    SYM,
    /// Verb
    VERB,
    /// Unclassifiable
    X,
    Other(String),
}

impl Upos {
    pub fn as_str(&self) -> &str {
        match self {
            Upos::ADJ      => "ADJ",
            Upos::ADP      => "ADP",
            Upos::ADV      => "ADV",
            Upos::AUX      => "AUX",
            Upos::CCONJ    => "CCONJ",
            Upos::DET      => "DET",
            Upos::INTJ     => "INTJ",
            Upos::NOUN     => "NOUN",
            Upos::NUM      => "NUM",
            Upos::PART     => "PART",
            Upos::PRON     => "PRON",
            Upos::PROPN    => "PROPN",
            Upos::PUNCT    => "PUNCT",
            Upos::SCONJ    => "SCONJ",
            Upos::SYM      => "SYM",
            Upos::VERB     => "VERB",
            Upos::X        => "X",
            Upos::Other(s) => s,
        }
    }

    pub fn is_num(&self) -> bool {
        match self {
            Upos::NUM => true,
            _         => false,
        }
    }
}
