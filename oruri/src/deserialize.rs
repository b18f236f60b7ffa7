use crate::data::*;
use crate::wire;
use crate::error::{DeserializationError, DeserializationResult, Exists};

pub(crate) trait Deserialize<T> {
    fn deserialize(self) -> DeserializationResult<T>;
}

impl<S, T> Deserialize<Option<T>> for Option<S> where S: Deserialize<T> {
    fn deserialize(self) -> DeserializationResult<Option<T>> {
        self
            .map(S::deserialize)
            .map_or(Ok(None), |x| x.map(Some))
    }
}

impl<S, T> Deserialize<Vec<T>> for Vec<S> where S: Deserialize<T> {
    fn deserialize(self) -> DeserializationResult<Vec<T>> {
        self
            .into_iter()
            .map(S::deserialize)
            .collect()
    }
}

impl Deserialize<Sentence> for wire::Sentence {
    fn deserialize(self) -> DeserializationResult<Sentence> {
        let tokens: Vec<Token> = self.tokens.deserialize()?;
        let noun_chunks: Vec<NounChunk> = self.noun_chunks.deserialize()?;

        // Token indices must match their positions, and heads and chunk
        // spans must stay within the token list.
        for (i, token) in tokens.iter().enumerate() {
            if token.index != i || token.head >= tokens.len() {
                return Err(DeserializationError::FieldOutOfRange);
            }
        }

        for chunk in &noun_chunks {
            if chunk.start >= chunk.end || chunk.end > tokens.len() {
                return Err(DeserializationError::FieldOutOfRange);
            }
        }

        Ok(Sentence{
            text: self.text.exists()?,
            tokens,
            noun_chunks,
        })
    }
}

impl Deserialize<Token> for wire::Token {
    fn deserialize(self) -> DeserializationResult<Token> {
        let entity = if self.ent_type.is_empty() {
            None
        } else {
            Some(Entity{
                label: self.ent_type,
                position: self.ent_iob.deserialize()?,
            })
        };

        Ok(Token{
            index: self.index.exists()?,
            surface: self.surface.exists()?,
            lemma: self.lemma.exists()?,
            pos: self.pos.exists()?.deserialize()?,
            tag: self.tag.exists()?,
            whitespace_after: self.whitespace_after,
            head: self.head.exists()?,
            dep: if self.dep.is_empty() {
                None
            } else {
                Some(self.dep)
            },
            entity,
            bunsetu_bi: if self.bunsetu_bi.is_empty() {
                None
            } else {
                Some(self.bunsetu_bi)
            },
            bunsetu_position: if self.bunsetu_position.is_empty() {
                None
            } else {
                Some(self.bunsetu_position)
            },
        })
    }
}

impl Deserialize<NounChunk> for wire::NounChunk {
    fn deserialize(self) -> DeserializationResult<NounChunk> {
        Ok(NounChunk{
            start: self.start.exists()?,
            end: self.end.exists()?,
        })
    }
}

impl Deserialize<Upos> for String {
    fn deserialize(self) -> DeserializationResult<Upos> {
        Ok(match self.as_str() {
            "ADJ"   => Upos::ADJ,
            "ADP"   => Upos::ADP,
            "ADV"   => Upos::ADV,
            "AUX"   => Upos::AUX,
            "CCONJ" => Upos::CCONJ,
            "DET"   => Upos::DET,
            "INTJ"  => Upos::INTJ,
            "NOUN"  => Upos::NOUN,
            "NUM"   => Upos::NUM,
            "PART"  => Upos::PART,
            "PRON"  => Upos::PRON,
            "PROPN" => Upos::PROPN,
            "PUNCT" => Upos::PUNCT,
            "SCONJ" => Upos::SCONJ,
            "SYM"   => Upos::SYM,
            "VERB"  => Upos::VERB,
            "X"     => Upos::X,
            _       => Upos::Other(self),
        })
    }
}

impl Deserialize<IobMark> for String {
    fn deserialize(self) -> DeserializationResult<IobMark> {
        match self.as_str() {
            "B" => Ok(IobMark::Begin),
            "I" => Ok(IobMark::Inside),
            "O" => Ok(IobMark::Outside),
            _   => Err(DeserializationError::FieldOutOfRange),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Deserialize;
    use crate::data::{IobMark, Upos};
    use crate::error::DeserializationError;
    use crate::wire;

    fn wire_token(index: usize, surface: &str, head: usize) -> wire::Token {
        wire::Token{
            index: Some(index),
            surface: Some(surface.to_owned()),
            lemma: Some(surface.to_owned()),
            pos: Some("NOUN".to_owned()),
            tag: Some("名詞,普通名詞,一般".to_owned()),
            whitespace_after: false,
            head: Some(head),
            dep: String::new(),
            ent_type: String::new(),
            ent_iob: String::new(),
            bunsetu_bi: String::new(),
            bunsetu_position: String::new(),
        }
    }

    fn wire_sentence(text: &str, tokens: Vec<wire::Token>) -> wire::Sentence {
        wire::Sentence{
            text: Some(text.to_owned()),
            tokens,
            noun_chunks: Vec::new(),
        }
    }

    #[test]
    fn test_deserialize_sentence() {
        let mut raw = wire_sentence("猫がいる", vec![
            wire_token(0, "猫", 2),
            wire_token(1, "が", 0),
            wire_token(2, "いる", 2),
        ]);
        raw.noun_chunks.push(wire::NounChunk{ start: Some(0), end: Some(1) });

        let sentence: crate::data::Sentence = raw.deserialize().unwrap();
        assert_eq!(sentence.text, "猫がいる");
        assert_eq!(sentence.tokens.len(), 3);
        assert_eq!(sentence.tokens[1].surface, "が");
        assert_eq!(sentence.tokens[1].head, 0);
        assert!(sentence.tokens[2].is_root());
        assert_eq!(sentence.noun_chunks, vec![crate::data::NounChunk{ start: 0, end: 1 }]);
    }

    #[test]
    fn test_missing_field() {
        let mut token = wire_token(0, "猫", 0);
        token.surface = None;
        let raw = wire_sentence("猫", vec![token]);
        let res: Result<crate::data::Sentence, _> = raw.deserialize();
        assert_eq!(res.err(), Some(DeserializationError::FieldMissing));
    }

    #[test]
    fn test_head_out_of_range() {
        let raw = wire_sentence("猫", vec![wire_token(0, "猫", 5)]);
        let res: Result<crate::data::Sentence, _> = raw.deserialize();
        assert_eq!(res.err(), Some(DeserializationError::FieldOutOfRange));
    }

    #[test]
    fn test_index_mismatch() {
        let raw = wire_sentence("猫", vec![wire_token(1, "猫", 0)]);
        let res: Result<crate::data::Sentence, _> = raw.deserialize();
        assert_eq!(res.err(), Some(DeserializationError::FieldOutOfRange));
    }

    #[test]
    fn test_chunk_out_of_range() {
        let mut raw = wire_sentence("猫", vec![wire_token(0, "猫", 0)]);
        raw.noun_chunks.push(wire::NounChunk{ start: Some(0), end: Some(2) });
        let res: Result<crate::data::Sentence, _> = raw.deserialize();
        assert_eq!(res.err(), Some(DeserializationError::FieldOutOfRange));
    }

    #[test]
    fn test_empty_chunk() {
        let mut raw = wire_sentence("猫", vec![wire_token(0, "猫", 0)]);
        raw.noun_chunks.push(wire::NounChunk{ start: Some(1), end: Some(1) });
        let res: Result<crate::data::Sentence, _> = raw.deserialize();
        assert_eq!(res.err(), Some(DeserializationError::FieldOutOfRange));
    }

    #[test]
    fn test_entity() {
        let mut token = wire_token(0, "花子", 0);
        token.ent_type = "Person".to_owned();
        token.ent_iob = "B".to_owned();
        let raw = wire_sentence("花子", vec![token]);

        let sentence: crate::data::Sentence = raw.deserialize().unwrap();
        let entity = sentence.tokens[0].entity.as_ref().unwrap();
        assert_eq!(entity.label, "Person");
        assert_eq!(entity.position, IobMark::Begin);
    }

    #[test]
    fn test_bad_iob() {
        let mut token = wire_token(0, "花子", 0);
        token.ent_type = "Person".to_owned();
        token.ent_iob = "Q".to_owned();
        let raw = wire_sentence("花子", vec![token]);
        let res: Result<crate::data::Sentence, _> = raw.deserialize();
        assert_eq!(res.err(), Some(DeserializationError::FieldOutOfRange));
    }

    #[test]
    fn test_empty_fields_absent() {
        let raw = wire_sentence("猫", vec![wire_token(0, "猫", 0)]);
        let sentence: crate::data::Sentence = raw.deserialize().unwrap();
        let token = &sentence.tokens[0];
        assert!(token.dep.is_none());
        assert!(token.entity.is_none());
        assert!(token.bunsetu_bi.is_none());
        assert!(token.bunsetu_position.is_none());
    }

    #[test]
    fn test_unknown_pos() {
        let mut token = wire_token(0, "ねこ", 0);
        token.pos = Some("NOUN2".to_owned());
        let raw = wire_sentence("ねこ", vec![token]);
        let sentence: crate::data::Sentence = raw.deserialize().unwrap();
        assert!(matches!(sentence.tokens[0].pos, Upos::Other(ref s) if s == "NOUN2"));
    }
}
