use std::error;
use std::fmt;
use std::io::{self, Write};

use oruri::Sentence;
use oruri::error::{RequestError, RequestResult};

/// Annotates a stream of input lines in order, skipping any lines that the
/// engine reports it could not analyze.
pub(crate) fn annotate_lines<W, I, F>(
    writer: &mut W,
    lines: I,
    mut analyze: F,
) -> Result<(), AnnotateFailure>
where
    W: Write,
    I: Iterator<Item = io::Result<String>>,
    F: FnMut(&str) -> RequestResult<Sentence>,
{
    for line in lines {
        let line = line.map_err(AnnotateFailure::read_error)?;

        match annotate_line(writer, &line, true, &mut analyze) {
            Ok(()) => {},

            Err(NotAnnotated::AnalysisFailed(reason)) => {
                eprintln!("skip line {:?}: {}", line, reason);
            },

            Err(NotAnnotated::AnnotateFailure(err)) => return Err(err),
        }
    }

    Ok(())
}

/// Annotates a single line. Comment lines pass through untouched and empty
/// lines produce no output; anything else is analyzed via `analyze` and
/// written as one block. The block is rendered in full before any of it is
/// written, so a failed line emits nothing.
pub(crate) fn annotate_line<W, F>(
    writer: &mut W,
    line: &str,
    echo_text: bool,
    analyze: F,
) -> Result<(), NotAnnotated>
where
    W: Write,
    F: FnOnce(&str) -> RequestResult<Sentence>,
{
    if line.is_empty() {
        return Ok(());
    }

    if line.starts_with('#') {
        writeln!(writer, "{}", line).map_err(AnnotateFailure::write_error)?;
        writer.flush().map_err(AnnotateFailure::write_error)?;
        return Ok(());
    }

    let sentence = analyze(line)?;
    let block = ugu_format::sentence_block(&sentence, echo_text);

    writer.write_all(block.as_bytes()).map_err(AnnotateFailure::write_error)?;
    writer.flush().map_err(AnnotateFailure::write_error)?;

    Ok(())
}

/// Contains information about why a line was not successfully annotated.
#[derive(Debug)]
pub(crate) enum NotAnnotated {
    /// Case when the engine could not analyze the line; later lines are
    /// unaffected.
    AnalysisFailed(String),
    /// Case when a serious unexpected error occurred.
    AnnotateFailure(AnnotateFailure),
}

impl fmt::Display for NotAnnotated {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::AnalysisFailed(reason) => write!(f, "analysis failed: {}", reason),
            Self::AnnotateFailure(err) => err.fmt(f),
        }
    }
}

impl error::Error for NotAnnotated {}

impl From<AnnotateFailure> for NotAnnotated {
    fn from(err: AnnotateFailure) -> Self {
        Self::AnnotateFailure(err)
    }
}

impl From<RequestError> for NotAnnotated {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Engine(reason) => Self::AnalysisFailed(reason),
            err => Self::AnnotateFailure(AnnotateFailure::EngineError(Box::new(err))),
        }
    }
}

#[derive(Debug)]
pub(crate) enum AnnotateFailure {
    ReadError(Box<io::Error>),
    WriteError(Box<io::Error>),
    EngineError(Box<RequestError>),
}

impl AnnotateFailure {
    fn read_error(err: io::Error) -> Self {
        Self::ReadError(Box::new(err))
    }

    fn write_error(err: io::Error) -> Self {
        Self::WriteError(Box::new(err))
    }
}

impl fmt::Display for AnnotateFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ReadError(err) => write!(f, "failed to read input line: {}", err),
            Self::WriteError(err) => write!(f, "failed to write output: {}", err),
            Self::EngineError(err) => err.fmt(f),
        }
    }
}

impl error::Error for AnnotateFailure {}

#[cfg(test)]
mod tests {
    use oruri::{Sentence, Token, Upos};
    use oruri::error::RequestError;

    use super::*;

    fn dog_sentence() -> Sentence {
        Sentence{
            text: "犬".to_owned(),
            tokens: vec![Token{
                index: 0,
                surface: "犬".to_owned(),
                lemma: "犬".to_owned(),
                pos: Upos::NOUN,
                tag: "名詞,一般,*".to_owned(),
                whitespace_after: false,
                head: 0,
                dep: None,
                entity: None,
                bunsetu_bi: None,
                bunsetu_position: None,
            }],
            noun_chunks: Vec::new(),
        }
    }

    const DOG_BLOCK: &str = "# text = 犬\n1\t犬\t犬\tNOUN\t名詞-一般\t_\t0\t_\t_\tSpaceAfter=No\n\n";

    #[test]
    fn test_comment_passthrough() {
        let mut out = Vec::new();
        annotate_line(&mut out, "# comment", true, |_| unreachable!()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "# comment\n");
    }

    #[test]
    fn test_empty_line_skipped() {
        let mut out = Vec::new();
        annotate_line(&mut out, "", true, |_| unreachable!()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_annotated_block() {
        let mut out = Vec::new();
        annotate_line(&mut out, "犬", true, |_| Ok(dog_sentence())).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), DOG_BLOCK);
    }

    #[test]
    fn test_analysis_failure_emits_nothing() {
        let mut out = Vec::new();
        let res = annotate_line(&mut out, "犬", true, |_| {
            Err(RequestError::Engine("unsupported input".to_owned()))
        });
        assert!(matches!(res, Err(NotAnnotated::AnalysisFailed(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_transport_failure_is_fatal() {
        let mut out = Vec::new();
        let res = annotate_line(&mut out, "犬", true, |_| Err(RequestError::EngineClosed));
        assert!(matches!(
            res,
            Err(NotAnnotated::AnnotateFailure(AnnotateFailure::EngineError(_))),
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_annotate_lines_skips_failed_line() {
        let lines = vec![
            Ok("# header".to_owned()),
            Ok("壊".to_owned()),
            Ok("犬".to_owned()),
            Ok("".to_owned()),
        ];

        let mut out = Vec::new();
        annotate_lines(&mut out, lines.into_iter(), |text| {
            if text == "壊" {
                Err(RequestError::Engine("bad line".to_owned()))
            } else {
                Ok(dog_sentence())
            }
        })
        .unwrap();

        let expected = format!("# header\n{}", DOG_BLOCK);
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_annotate_lines_read_failure() {
        let lines = vec![
            Ok("犬".to_owned()),
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad byte")),
        ];

        let mut out = Vec::new();
        let res = annotate_lines(&mut out, lines.into_iter(), |_| Ok(dog_sentence()));
        assert!(matches!(res, Err(AnnotateFailure::ReadError(_))));
        assert_eq!(String::from_utf8(out).unwrap(), DOG_BLOCK);
    }
}
