use std::cell::RefCell;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::config::DiffConfiguration;
use crate::cursor::{NodeCursor, ReaderCursor, TreeCursor, WhitespaceCursor};
use crate::parser::ParseError;
use crate::tree::XmlDocument;

/// Where a document comes from.
///
/// Two inputs are equal when they denote the same source: strings and bytes
/// by value, files by resolved path, streams and parsed documents by handle.
#[derive(Debug, Clone)]
pub enum XmlInput {
    Text(String),
    Bytes(Vec<u8>),
    File(PathBuf),
    Reader(SharedReader),
    Document(Rc<XmlDocument>),
}

impl XmlInput {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        XmlInput::Bytes(bytes.into())
    }

    /// A file path; relative paths resolve against the configured base URI.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        XmlInput::File(path.into())
    }

    /// A byte stream. The stream is read once; clones share it.
    pub fn from_reader(reader: impl Read + 'static) -> Self {
        XmlInput::Reader(SharedReader(Rc::new(RefCell::new(reader))))
    }

    pub fn from_document(document: impl Into<XmlDocument>) -> Self {
        XmlInput::Document(Rc::new(document.into()))
    }

    /// Open a cursor honoring the whitespace and parsing settings of `config`.
    pub fn open<'a>(
        &'a self,
        config: &DiffConfiguration,
    ) -> Result<Box<dyn NodeCursor + 'a>, ParseError> {
        let strict = config.use_validating_parser();
        let handling = config.whitespace_handling();

        let cursor: Box<dyn NodeCursor + 'a> = match self {
            XmlInput::Text(text) => Box::new(WhitespaceCursor::new(
                ReaderCursor::new(text.as_bytes(), strict),
                handling,
            )),
            XmlInput::Bytes(bytes) => Box::new(WhitespaceCursor::new(
                ReaderCursor::new(bytes.as_slice(), strict),
                handling,
            )),
            XmlInput::File(path) => {
                let file = File::open(resolve_path(path, config.base_uri()))?;
                Box::new(WhitespaceCursor::new(
                    ReaderCursor::new(BufReader::new(file), strict),
                    handling,
                ))
            }
            XmlInput::Reader(reader) => Box::new(WhitespaceCursor::new(
                ReaderCursor::new(BufReader::new(reader.clone()), strict),
                handling,
            )),
            XmlInput::Document(document) => {
                Box::new(WhitespaceCursor::new(TreeCursor::new(document), handling))
            }
        };
        Ok(cursor)
    }

    /// True when `self` and `other` denote the same source, resolving
    /// relative file paths against `base_uri`.
    pub fn same_source(&self, other: &XmlInput, base_uri: &str) -> bool {
        match (self, other) {
            (XmlInput::Text(a), XmlInput::Text(b)) => a == b,
            (XmlInput::Bytes(a), XmlInput::Bytes(b)) => a == b,
            (XmlInput::File(a), XmlInput::File(b)) => {
                normalize_for_compare(&resolve_path(a, base_uri))
                    == normalize_for_compare(&resolve_path(b, base_uri))
            }
            (XmlInput::Reader(a), XmlInput::Reader(b)) => Rc::ptr_eq(&a.0, &b.0),
            (XmlInput::Document(a), XmlInput::Document(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq for XmlInput {
    fn eq(&self, other: &Self) -> bool {
        self.same_source(other, ".")
    }
}

impl From<&str> for XmlInput {
    fn from(text: &str) -> Self {
        XmlInput::Text(text.to_string())
    }
}

impl From<String> for XmlInput {
    fn from(text: String) -> Self {
        XmlInput::Text(text)
    }
}

impl From<&Path> for XmlInput {
    fn from(path: &Path) -> Self {
        XmlInput::File(path.to_path_buf())
    }
}

impl From<XmlDocument> for XmlInput {
    fn from(document: XmlDocument) -> Self {
        XmlInput::from_document(document)
    }
}

/// Shared handle to a byte stream.
#[derive(Clone)]
pub struct SharedReader(Rc<RefCell<dyn Read>>);

impl Read for SharedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.borrow_mut().read(buf)
    }
}

impl fmt::Debug for SharedReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedReader(..)")
    }
}

fn resolve_path(path: &Path, base_uri: &str) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        Path::new(base_uri).join(path)
    }
}

fn normalize_for_compare(path: &Path) -> PathBuf {
    // canonicalize resolves symlinks and `..` for paths that exist on disk.
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
