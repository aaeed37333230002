use std::convert::Infallible;
use std::io::BufRead;

use tracing::{debug, trace};

use super::{Contents, trim};
use crate::{ConfigOptions, Error};

/// A source of physical lines with the `\n` or `\r\n` terminator removed.
trait LineSource {
    type Error;

    fn next_line(&mut self) -> Result<Option<String>, Self::Error>;

    fn line_number(&self) -> usize;
}

struct ReaderLines<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
}

impl<R: BufRead> LineSource for ReaderLines<R> {
    type Error = std::io::Error;

    fn next_line(&mut self) -> Result<Option<String>, Self::Error> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        self.line += 1;
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }

    fn line_number(&self) -> usize {
        self.line
    }
}

struct StrLines<'a> {
    lines: std::str::SplitInclusive<'a, char>,
    line: usize,
}

impl LineSource for StrLines<'_> {
    type Error = Infallible;

    fn next_line(&mut self) -> Result<Option<String>, Self::Error> {
        Ok(self.lines.next().map(|raw| {
            self.line += 1;
            raw.strip_suffix('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line))
                .unwrap_or(raw)
                .to_string()
        }))
    }

    fn line_number(&self) -> usize {
        self.line
    }
}

fn strip_comment<'a>(line: &'a str, comment: &str) -> &'a str {
    if comment.is_empty() {
        return line;
    }
    match line.find(comment) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_lines<S: LineSource>(
    source: &mut S,
    options: &ConfigOptions,
    contents: &mut Contents,
) -> Result<(), S::Error> {
    let delimiter = options.delimiter();
    let comment = options.comment();
    // Lookahead line that ended a continuation and still needs processing.
    let mut pending: Option<String> = None;

    loop {
        let raw = match pending.take() {
            Some(line) => line,
            None => match source.next_line()? {
                Some(line) => line,
                None => break,
            },
        };

        let line = strip_comment(&raw, comment);
        if options.matches_sentry(line) {
            debug!(line = source.line_number(), "sentry reached, ignoring remaining input");
            return Ok(());
        }

        let Some(pos) = line.find(delimiter) else {
            trace!(line = source.line_number(), "no delimiter, line ignored");
            continue;
        };
        let key = trim(&line[..pos]).to_string();
        let mut value = trim(&line[pos + delimiter.len()..]).to_string();

        while let Some(next) = source.next_line()? {
            let stripped = strip_comment(&next, comment);
            if trim(stripped).is_empty() {
                break;
            }
            if stripped.contains(delimiter) || options.matches_sentry(stripped) {
                pending = Some(next);
                break;
            }
            if !trim(&value).is_empty() {
                value.push('\n');
            }
            value.push_str(stripped);
        }

        trace!(key = %key, "entry parsed");
        contents.insert(key, trim(&value).to_string());
    }

    Ok(())
}

/// Parse configuration text from `reader` into an existing mapping.
///
/// Existing keys are overwritten when they appear again in the input; keys not
/// present in the input are left untouched. Parsing stops at end of input or
/// at the first line containing the configured sentry.
///
/// Malformed lines never cause an error. Invalid UTF-8 is decoded lossily;
/// only I/O failures of the reader are reported. Entries parsed before such a
/// failure stay in `contents`.
pub fn parse_config_into<R: BufRead>(
    reader: R,
    options: &ConfigOptions,
    contents: &mut Contents,
) -> Result<(), Error> {
    let mut source = ReaderLines {
        reader,
        buf: Vec::new(),
        line: 0,
    };
    parse_lines(&mut source, options, contents)?;
    Ok(())
}

/// Parse configuration text from `reader` into a new mapping.
pub fn parse_config<R: BufRead>(reader: R, options: &ConfigOptions) -> Result<Contents, Error> {
    let mut contents = Contents::new();
    parse_config_into(reader, options, &mut contents)?;
    Ok(contents)
}

/// Parse configuration text already held in memory.
pub fn parse_config_str(text: &str, options: &ConfigOptions) -> Contents {
    let mut contents = Contents::new();
    let mut source = StrLines {
        lines: text.split_inclusive('\n'),
        line: 0,
    };
    match parse_lines(&mut source, options, &mut contents) {
        Ok(()) => contents,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Contents {
        parse_config_str(text, &ConfigOptions::default())
    }

    #[test]
    fn test_parse_simple_pairs() {
        let contents = parse("name = kvconf\n  port=8080  \n");
        assert_eq!(contents.len(), 2);
        assert_eq!(contents["name"], "kvconf");
        assert_eq!(contents["port"], "8080");
    }

    #[test]
    fn test_parse_strips_trailing_comment() {
        let contents = parse("a = b # comment\n# whole line\n");
        assert_eq!(contents.len(), 1);
        assert_eq!(contents["a"], "b");
    }

    #[test]
    fn test_comment_before_delimiter_hides_entry() {
        let contents = parse("#a = b\nx # = y\n");
        assert!(contents.is_empty());
    }

    #[test]
    fn test_value_keeps_later_delimiters() {
        let contents = parse("url = http://host/?a=1&b=2\n");
        assert_eq!(contents["url"], "http://host/?a=1&b=2");
    }

    #[test]
    fn test_continuation_until_blank_line() {
        let contents = parse("key = line1\nline2\n\nother = x\n");
        assert_eq!(contents["key"], "line1\nline2");
        assert_eq!(contents["other"], "x");
    }

    #[test]
    fn test_continuation_stops_at_next_key() {
        let contents = parse("a = 1\n  more\nb = 2\nc = 3");
        assert_eq!(contents["a"], "1\n  more");
        assert_eq!(contents["b"], "2");
        assert_eq!(contents["c"], "3");
    }

    #[test]
    fn test_continuation_on_empty_first_value() {
        let contents = parse("text =\nfirst\nsecond\n");
        assert_eq!(contents["text"], "first\nsecond");
    }

    #[test]
    fn test_continuation_line_comment_stripped() {
        let contents = parse("a = one\ntwo # note\n");
        assert_eq!(contents["a"], "one\ntwo");
    }

    #[test]
    fn test_comment_only_line_ends_continuation() {
        let contents = parse("a = one\n# note\ntwo\n");
        assert_eq!(contents["a"], "one");
        assert_eq!(contents.len(), 1);
    }

    #[test]
    fn test_lines_without_delimiter_ignored() {
        let contents = parse("garbage\n\n   \nk = v\n");
        assert_eq!(contents.len(), 1);
        assert_eq!(contents["k"], "v");
    }

    #[test]
    fn test_repeated_key_last_wins() {
        let contents = parse("k = first\nk = second\n");
        assert_eq!(contents["k"], "second");
    }

    #[test]
    fn test_empty_key_is_stored() {
        let contents = parse("= value\n");
        assert_eq!(contents[""], "value");
    }

    #[test]
    fn test_sentry_stops_parsing() {
        let options = ConfigOptions::default().with_sentry("EOF");
        let contents = parse_config_str("a = 1\nEOF\nb = 2\n", &options);
        assert_eq!(contents.len(), 1);
        assert_eq!(contents["a"], "1");
    }

    #[test]
    fn test_sentry_substring_match_ends_continuation() {
        let options = ConfigOptions::default().with_sentry("END");
        let contents = parse_config_str("a = 1\nmore\n--- END ---\nb = 2\n", &options);
        assert_eq!(contents["a"], "1\nmore");
        assert!(!contents.contains_key("b"));
    }

    #[test]
    fn test_sentry_on_key_line() {
        let options = ConfigOptions::default().with_sentry("STOP");
        let contents = parse_config_str("a = STOP\nb = 2\n", &options);
        assert!(contents.is_empty());
    }

    #[test]
    fn test_sentry_inside_comment_ignored() {
        let options = ConfigOptions::default().with_sentry("EOF");
        let contents = parse_config_str("a = 1 # not EOF yet\nb = 2\n", &options);
        assert_eq!(contents.len(), 2);
    }

    #[test]
    fn test_multi_character_tokens() {
        let options = ConfigOptions::default()
            .with_delimiter(":=")
            .with_comment("//");
        let contents = parse_config_str("a := b = c // trailing\nx = y\n\nz := 1\n", &options);
        assert_eq!(contents["a"], "b = c\nx = y");
        assert_eq!(contents["z"], "1");
        assert!(!contents.contains_key("x"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let contents = parse("a = 1\r\nb = 2\r\n\r\n");
        assert_eq!(contents["a"], "1");
        assert_eq!(contents["b"], "2");
    }

    #[test]
    fn test_crlf_multi_line_value_matches_lf() {
        let lf = "a = one\ntwo\nthree\n\nb = 2\n";
        let crlf = lf.replace('\n', "\r\n");
        assert_eq!(parse(&crlf), parse(lf));
        assert_eq!(parse(&crlf)["a"], "one\ntwo\nthree");

        let from_reader = parse_config(crlf.as_bytes(), &ConfigOptions::default()).unwrap();
        assert_eq!(from_reader["a"], "one\ntwo\nthree");
    }

    #[test]
    fn test_reader_matches_str() {
        let text = "a = 1\nlong\nvalue\n\nb=2 # c\nnoise\n";
        let from_reader = parse_config(text.as_bytes(), &ConfigOptions::default()).unwrap();
        assert_eq!(from_reader, parse(text));
    }

    #[test]
    fn test_reader_invalid_utf8_is_lossy() {
        let input: &[u8] = b"a = \xFF\xFEok\nb = 2\n";
        let contents = parse_config(input, &ConfigOptions::default()).unwrap();
        assert!(contents["a"].ends_with("ok"));
        assert_eq!(contents["b"], "2");
    }

    #[test]
    fn test_parse_into_keeps_existing_keys() {
        let mut contents = Contents::new();
        contents.insert("kept".into(), "yes".into());
        contents.insert("k".into(), "old".into());
        parse_config_into("k = new\n".as_bytes(), &ConfigOptions::default(), &mut contents)
            .unwrap();
        assert_eq!(contents["kept"], "yes");
        assert_eq!(contents["k"], "new");
    }

    #[test]
    fn test_empty_comment_marker_disables_comments() {
        let options = ConfigOptions::default().with_comment("");
        let contents = parse_config_str("color = #ff0000\n", &options);
        assert_eq!(contents["color"], "#ff0000");
    }

    struct BrokenPipe;

    impl std::io::Read for BrokenPipe {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "reader gone"))
        }
    }

    #[test]
    fn test_reader_error_is_reported() {
        use std::io::Read;

        let reader = std::io::BufReader::new("a = 1\nb = 2\n".as_bytes().chain(BrokenPipe));
        let err = parse_config(reader, &ConfigOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn test_reader_error_keeps_earlier_entries() {
        use std::io::Read;

        let reader = std::io::BufReader::new("a = 1\n\nb = 2\n".as_bytes().chain(BrokenPipe));
        let mut contents = Contents::new();
        let result = parse_config_into(reader, &ConfigOptions::default(), &mut contents);
        assert!(matches!(result, Err(Error::Io(_))));
        assert_eq!(contents["a"], "1");
    }
}
