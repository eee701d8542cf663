//! Plain-text graph format.
//!
//! ```text
//! 3            # node count
//! 2            # edge count
//! directed     # or undirected / gerichtet / ungerichtet / g / u / G / U
//! A 0 0        # name x y
//! B 1 0
//! C 2 0
//! AB A B       # name head tail
//! BC B C
//! ```
//!
//! Everything after `#` is a comment. Blank lines are skipped and never count
//! as records. Reading is all-or-nothing: any malformed record aborts the load
//! and no partial graph is returned.
//!
//! Writing emits allowed nodes and edges in ascending index order. Because
//! a fresh load assigns indices in file order, reading and writing a
//! comment-free file reproduces it byte for byte.

use crate::entity::{Edge, Node};
use crate::error::{EntityKind, GraphError};
use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

// ============================================================================
// Errors
// ============================================================================

/// Errors that can occur while reading or writing graph text.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to read graph file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write graph file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One of the three header lines is missing or unparsable
    #[error("line {line}: malformed header: {reason}")]
    MalformedHeader { line: usize, reason: String },

    #[error("line {line}: unknown directedness token '{token}'")]
    InvalidDirectedness { line: usize, token: String },

    /// The file ends before all declared records were read
    #[error("expected {expected} {kind} records, found {found}")]
    MissingRecords {
        kind: EntityKind,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: malformed {kind} record '{record}': {reason}")]
    MalformedRecord {
        line: usize,
        kind: EntityKind,
        record: String,
        reason: String,
    },

    #[error("line {line}: edge '{edge}' references unknown node '{node}'")]
    UnresolvedReference {
        line: usize,
        edge: String,
        node: String,
    },

    #[error("line {line}: node name '{name}' is declared twice")]
    DuplicateName { line: usize, name: String },

    #[error("node '{name}' has no coordinates and cannot be written")]
    MissingCoordinates { name: String },

    /// The name would not survive the whitespace-separated record format
    #[error("{kind} name '{name}' contains whitespace or '#' and cannot be written")]
    UnwritableName { kind: EntityKind, name: String },

    #[error("output path '{0}' is neither a .gra file nor a directory")]
    InvalidOutputPath(PathBuf),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

impl CodecError {
    fn malformed(line: usize, kind: EntityKind, record: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            kind,
            record: record.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

// ============================================================================
// Language
// ============================================================================

/// Vocabulary used for the directedness token and annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    German,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::German => "german",
        }
    }

    /// Token written on the third header line
    pub fn directedness_token(&self, directed: bool) -> &'static str {
        match (self, directed) {
            (Language::English, true) => "directed",
            (Language::English, false) => "undirected",
            (Language::German, true) => "gerichtet",
            (Language::German, false) => "ungerichtet",
        }
    }

    fn count_labels(&self) -> (&'static str, &'static str) {
        match self {
            Language::English => ("nodes", "edges"),
            Language::German => ("Knoten", "Kanten"),
        }
    }

    fn node_header(&self) -> &'static str {
        match self {
            Language::English => "# NodeName xCoord yCoord",
            Language::German => "# Knotenname xKoord yKoord",
        }
    }

    fn edge_header(&self) -> &'static str {
        match self {
            Language::English => "# EdgeName NodeName1 NodeName2",
            Language::German => "# Kantenname Knotenname1 Knotenname2",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" | "eng" | "en" => Ok(Language::English),
            "german" | "ger" | "de" => Ok(Language::German),
            _ => Err(format!(
                "unknown language '{}', expected 'english' or 'german'",
                s
            )),
        }
    }
}

/// Parse a directedness token into `(directed, language)`.
///
/// The single-letter forms are abbreviations of the German words.
pub fn parse_directedness(token: &str) -> Option<(bool, Language)> {
    match token {
        "directed" => Some((true, Language::English)),
        "undirected" => Some((false, Language::English)),
        "gerichtet" | "g" | "G" => Some((true, Language::German)),
        "ungerichtet" | "u" | "U" => Some((false, Language::German)),
        _ => None,
    }
}

// ============================================================================
// Reading
// ============================================================================

/// A non-blank line with its comment removed.
#[derive(Debug, Clone, Copy)]
struct ContentLine<'a> {
    /// 1-based line number in the source text
    number: usize,
    text: &'a str,
}

fn content_lines(text: &str) -> Vec<ContentLine<'_>> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let content = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line,
            }
            .trim();
            (!content.is_empty()).then_some(ContentLine {
                number: i + 1,
                text: content,
            })
        })
        .collect()
}

/// Node record before insertion.
#[derive(Debug, Clone, PartialEq)]
struct RawNode<'a> {
    line: usize,
    name: &'a str,
    x: f64,
    y: f64,
}

/// Edge record before name resolution.
#[derive(Debug, Clone, PartialEq)]
struct RawEdge<'a> {
    line: usize,
    name: &'a str,
    head: &'a str,
    tail: &'a str,
}

fn three_fields<'a>(line: &ContentLine<'a>, kind: EntityKind) -> Result<[&'a str; 3]> {
    let fields: Vec<&str> = line.text.split_whitespace().collect();
    <[&str; 3]>::try_from(fields).map_err(|fields| {
        CodecError::malformed(
            line.number,
            kind,
            line.text,
            format!("expected 3 fields, found {}", fields.len()),
        )
    })
}

fn parse_node<'a>(line: &ContentLine<'a>) -> Result<RawNode<'a>> {
    let [name, x, y] = three_fields(line, EntityKind::Node)?;
    let coordinate = |value: &str, axis: &str| {
        value.parse::<f64>().map_err(|_| {
            CodecError::malformed(
                line.number,
                EntityKind::Node,
                line.text,
                format!("invalid {} coordinate '{}'", axis, value),
            )
        })
    };
    Ok(RawNode {
        line: line.number,
        name,
        x: coordinate(x, "x")?,
        y: coordinate(y, "y")?,
    })
}

fn parse_edge<'a>(line: &ContentLine<'a>) -> Result<RawEdge<'a>> {
    let [name, head, tail] = three_fields(line, EntityKind::Edge)?;
    Ok(RawEdge {
        line: line.number,
        name,
        head,
        tail,
    })
}

fn parse_count(line: Option<&ContentLine<'_>>, last_line: usize, what: &str) -> Result<usize> {
    let line = line.ok_or_else(|| CodecError::MalformedHeader {
        line: last_line,
        reason: format!("missing {} count", what),
    })?;
    line.text
        .parse::<usize>()
        .map_err(|_| CodecError::MalformedHeader {
            line: line.number,
            reason: format!("invalid {} count '{}'", what, line.text),
        })
}

/// Take the next `expected` lines as records of `kind`.
fn record_block<'l, 'a>(
    lines: &'l [ContentLine<'a>],
    expected: usize,
    kind: EntityKind,
) -> Result<&'l [ContentLine<'a>]> {
    if lines.len() < expected {
        return Err(CodecError::MissingRecords {
            kind,
            expected,
            found: lines.len(),
        });
    }
    Ok(&lines[..expected])
}

/// A decoded graph together with the vocabulary its header used.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub graph: Graph,
    pub language: Language,
}

/// Parse graph text, reporting the language of the directedness token.
pub fn decode(text: &str) -> Result<Decoded> {
    let lines = content_lines(text);
    let last_line = text.lines().count();

    let node_count = parse_count(lines.first(), last_line, "node")?;
    let edge_count = parse_count(lines.get(1), last_line, "edge")?;
    let token = lines.get(2).ok_or_else(|| CodecError::MalformedHeader {
        line: last_line,
        reason: "missing directedness".to_string(),
    })?;
    let (directed, language) =
        parse_directedness(token.text).ok_or_else(|| CodecError::InvalidDirectedness {
            line: token.number,
            token: token.text.to_string(),
        })?;

    let body = &lines[3..];
    let node_lines = record_block(body, node_count, EntityKind::Node)?;
    let edge_lines = record_block(&body[node_count..], edge_count, EntityKind::Edge)?;
    let trailing = &body[node_count + edge_count..];
    if let Some(first) = trailing.first() {
        warn!(
            line = first.number,
            ignored = trailing.len(),
            "ignoring lines after the declared records"
        );
    }

    let raw_nodes = node_lines
        .iter()
        .map(parse_node)
        .collect::<Result<Vec<_>>>()?;
    let raw_edges = edge_lines
        .iter()
        .map(parse_edge)
        .collect::<Result<Vec<_>>>()?;

    // Name map in declaration order; on a fresh graph that is also index order.
    let mut names: HashMap<&str, usize> = HashMap::with_capacity(raw_nodes.len());
    for (i, node) in raw_nodes.iter().enumerate() {
        if names.insert(node.name, i).is_some() {
            return Err(CodecError::DuplicateName {
                line: node.line,
                name: node.name.to_string(),
            });
        }
    }

    let resolve = |edge: &RawEdge<'_>, node: &str| {
        names
            .get(node)
            .copied()
            .ok_or_else(|| CodecError::UnresolvedReference {
                line: edge.line,
                edge: edge.name.to_string(),
                node: node.to_string(),
            })
    };
    let edges = raw_edges
        .iter()
        .map(|raw| -> Result<Edge> {
            Ok(Edge::new(raw.name, resolve(raw, raw.head)?, resolve(raw, raw.tail)?))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut graph = Graph::with_capacity(directed, node_count, edge_count);
    for raw in &raw_nodes {
        let index = graph.add_node(Node::with_coordinates(raw.name, raw.x, raw.y))?;
        debug_assert_eq!(index, names[raw.name]);
    }
    for edge in edges {
        graph.add_edge(edge)?;
    }

    debug!(
        directed,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "decoded graph"
    );
    Ok(Decoded { graph, language })
}

/// Parse graph text.
pub fn read_str(text: &str) -> Result<Graph> {
    decode(text).map(|decoded| decoded.graph)
}

impl FromStr for Graph {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        read_str(s)
    }
}

// ============================================================================
// Writing
// ============================================================================

/// A record field must be one whitespace-free token outside any comment.
fn is_writable_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(|c: char| c.is_whitespace() || c == '#')
}

/// Output layout options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Vocabulary for the directedness token and annotations
    pub language: Language,

    /// Add count labels, block comments and blank separators
    pub annotate: bool,
}

impl WriteOptions {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            annotate: false,
        }
    }

    pub fn annotated(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }
}

/// Serializes graphs into the text format.
#[derive(Debug, Clone, Default)]
pub struct GraphWriter {
    options: WriteOptions,
}

impl GraphWriter {
    pub fn new(options: WriteOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Render the whole graph into a string.
    pub fn write_string(&self, graph: &Graph) -> Result<String> {
        if let Some((_, node)) = graph.nodes().find(|(_, n)| n.coordinates.is_none()) {
            return Err(CodecError::MissingCoordinates {
                name: node.name.clone(),
            });
        }
        if let Some((_, node)) = graph.nodes().find(|(_, n)| !is_writable_name(&n.name)) {
            return Err(CodecError::UnwritableName {
                kind: EntityKind::Node,
                name: node.name.clone(),
            });
        }
        if let Some((_, edge)) = graph.edges().find(|(_, e)| !is_writable_name(&e.name)) {
            return Err(CodecError::UnwritableName {
                kind: EntityKind::Edge,
                name: edge.name.clone(),
            });
        }

        let language = self.options.language;
        let annotate = self.options.annotate;
        let mut out = String::new();

        if annotate {
            let (nodes_label, edges_label) = language.count_labels();
            out.push_str(&format!("{}   # {}\n", graph.node_count(), nodes_label));
            out.push_str(&format!("{}   # {}\n", graph.edge_count(), edges_label));
        } else {
            out.push_str(&format!("{}\n{}\n", graph.node_count(), graph.edge_count()));
        }
        out.push_str(language.directedness_token(graph.is_directed()));
        out.push('\n');

        if annotate {
            out.push('\n');
            out.push_str(language.node_header());
            out.push_str("\n\n");
        }
        for (_, node) in graph.nodes() {
            if let Some(c) = node.coordinates {
                // f64 Display is the shortest round-trip form and drops ".0".
                out.push_str(&format!("{} {} {}\n", node.name, c.x, c.y));
            }
        }

        if annotate {
            out.push('\n');
            out.push_str(language.edge_header());
            out.push_str("\n\n");
        }
        for (_, edge) in graph.edges() {
            let head = graph.node(edge.head)?;
            let tail = graph.node(edge.tail)?;
            out.push_str(&format!("{} {} {}\n", edge.name, head.name, tail.name));
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ABC: &str = "3\n2\ndirected\nA 0 0\nB 1 0\nC 2 0\nAB A B\nBC B C\n";

    #[test]
    fn test_content_lines_strip_comments() {
        let lines = content_lines("3   # nodes\n\n   \n# only comment\n  A 1 2  \n");
        let texts: Vec<_> = lines.iter().map(|l| (l.number, l.text)).collect();
        assert_eq!(texts, vec![(1, "3"), (5, "A 1 2")]);
    }

    #[test]
    fn test_parse_directedness() {
        assert_eq!(parse_directedness("directed"), Some((true, Language::English)));
        assert_eq!(parse_directedness("ungerichtet"), Some((false, Language::German)));
        assert_eq!(parse_directedness("G"), Some((true, Language::German)));
        assert_eq!(parse_directedness("u"), Some((false, Language::German)));
        assert_eq!(parse_directedness("Directed"), None);
    }

    #[test]
    fn test_decode_simple() {
        let decoded = decode(ABC).unwrap();
        let graph = decoded.graph;
        assert_eq!(decoded.language, Language::English);
        assert!(graph.is_directed());
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.node(2).unwrap().x(), Some(2.0));
        assert_eq!(graph.endpoints(1).unwrap(), (1, 2));
    }

    #[test]
    fn test_round_trip_is_byte_identical() {
        let graph: Graph = ABC.parse().unwrap();
        let text = GraphWriter::default().write_string(&graph).unwrap();
        assert_eq!(text, ABC);
    }

    #[test]
    fn test_parse_node_float_coordinates() {
        let line = ContentLine {
            number: 4,
            text: "test 2.3 3.14159",
        };
        assert_eq!(
            parse_node(&line).unwrap(),
            RawNode {
                line: 4,
                name: "test",
                x: 2.3,
                y: 3.14159
            }
        );
    }

    #[test]
    fn test_node_record_field_count() {
        let err = read_str("1\n0\nu\nA 0\n").unwrap_err();
        match err {
            CodecError::MalformedRecord {
                line, kind, reason, ..
            } => {
                assert_eq!(line, 4);
                assert_eq!(kind, EntityKind::Node);
                assert_eq!(reason, "expected 3 fields, found 2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_edge_record_field_count() {
        let err = read_str("2\n1\nu\nA 0 0\nB 1 0\nAB A B C\n").unwrap_err();
        assert!(matches!(
            err,
            CodecError::MalformedRecord {
                kind: EntityKind::Edge,
                line: 6,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_coordinate() {
        let err = read_str("1\n0\nu\nA zero 0\n").unwrap_err();
        assert!(err.to_string().contains("invalid x coordinate 'zero'"));
    }

    #[test]
    fn test_unresolved_reference() {
        let err = read_str("2\n1\ng\nA 0 0\nB 1 0\nAC A C\n").unwrap_err();
        match err {
            CodecError::UnresolvedReference { line, edge, node } => {
                assert_eq!(line, 6);
                assert_eq!(edge, "AC");
                assert_eq!(node, "C");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_errors() {
        assert!(matches!(
            read_str("three\n0\nu\n"),
            Err(CodecError::MalformedHeader { line: 1, .. })
        ));
        assert!(matches!(
            read_str("0\n"),
            Err(CodecError::MalformedHeader { .. })
        ));
        assert!(matches!(
            read_str("0\n0\nsideways\n"),
            Err(CodecError::InvalidDirectedness { line: 3, .. })
        ));
        assert!(matches!(
            read_str(""),
            Err(CodecError::MalformedHeader { line: 0, .. })
        ));
    }

    #[test]
    fn test_missing_records() {
        let err = read_str("3\n0\nu\nA 0 0\nB 1 0\n").unwrap_err();
        assert!(matches!(
            err,
            CodecError::MissingRecords {
                kind: EntityKind::Node,
                expected: 3,
                found: 2
            }
        ));

        let err = read_str("1\n2\nu\nA 0 0\nAA A A\n").unwrap_err();
        assert!(matches!(
            err,
            CodecError::MissingRecords {
                kind: EntityKind::Edge,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_duplicate_node_name() {
        let err = read_str("2\n0\nu\nA 0 0\nA 1 1\n").unwrap_err();
        assert!(matches!(err, CodecError::DuplicateName { line: 5, .. }));
    }

    #[test]
    fn test_trailing_lines_ignored() {
        let graph = read_str("1\n0\nu\nA 0 0\nB 1 1\n").unwrap();
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_writer_skips_tombstones() {
        let mut graph: Graph = ABC.parse().unwrap();
        graph.delete_node(0).unwrap();

        let text = GraphWriter::default().write_string(&graph).unwrap();
        assert_eq!(text, "2\n1\ndirected\nB 1 0\nC 2 0\nBC B C\n");
    }

    #[test]
    fn test_writer_german_annotated() {
        let graph = read_str("2\n1\nundirected\nA 0 0\nB 1.5 -2\nAB A B\n").unwrap();
        let writer = GraphWriter::new(WriteOptions::new(Language::German).annotated(true));
        let text = writer.write_string(&graph).unwrap();
        assert_eq!(
            text,
            "2   # Knoten\n1   # Kanten\nungerichtet\n\n\
             # Knotenname xKoord yKoord\n\nA 0 0\nB 1.5 -2\n\n\
             # Kantenname Knotenname1 Knotenname2\n\nAB A B\n"
        );

        // Annotated output reads back into the same structure.
        let reread = read_str(&text).unwrap();
        assert_eq!(reread.stats(), graph.stats());
        assert_eq!(reread.node(1).unwrap(), graph.node(1).unwrap());
    }

    #[test]
    fn test_writer_requires_coordinates() {
        let mut graph = Graph::undirected();
        graph.add_node(Node::new("A")).unwrap();
        let err = GraphWriter::default().write_string(&graph).unwrap_err();
        assert!(matches!(err, CodecError::MissingCoordinates { name } if name == "A"));
    }

    #[test]
    fn test_writer_rejects_names_that_break_records() {
        let mut graph = Graph::directed();
        let a = graph.add_node(Node::with_coordinates("New York", 0.0, 0.0)).unwrap();
        let b = graph.add_node(Node::with_coordinates("B", 1.0, 0.0)).unwrap();
        graph.add_edge(Edge::new("AB", a, b)).unwrap();

        let err = GraphWriter::default().write_string(&graph).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnwritableName { kind: EntityKind::Node, ref name } if name == "New York"
        ));

        graph.delete_node(a).unwrap();
        let c = graph.add_node(Node::with_coordinates("C", 2.0, 0.0)).unwrap();
        graph.add_edge(Edge::new("B#2", b, c)).unwrap();
        let err = GraphWriter::default().write_string(&graph).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnwritableName { kind: EntityKind::Edge, ref name } if name == "B#2"
        ));

        graph.delete_edge(graph.edge_index("B#2").unwrap()).unwrap();
        let text = GraphWriter::default().write_string(&graph).unwrap();
        let reloaded = read_str(&text).unwrap();
        assert_eq!(reloaded.node_count(), 2);
        assert_eq!(reloaded.edge_count(), 0);
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("German".parse::<Language>().unwrap(), Language::German);
        assert_eq!("eng".parse::<Language>().unwrap(), Language::English);
        assert!("french".parse::<Language>().is_err());
    }
}
