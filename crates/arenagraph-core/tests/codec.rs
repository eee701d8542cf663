//! Reading and writing graph files against the fixtures in `tests/fixtures`.

mod common;

use arenagraph_core::{
    read_file, read_str, write_file, CodecError, GraphWriter, Language, Node, WriteOptions,
};
use common::{adjacency_violations, fixture};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn test_read_graph9() {
    let decoded = read_file(&fixture("graph9.gra")).unwrap();
    let graph = decoded.graph;

    assert_eq!(decoded.language, Language::German);
    assert!(!graph.is_directed());
    assert_eq!(graph.node_count(), 9);
    assert_eq!(graph.edge_count(), 9);

    let expected_nodes = [
        ("A", 0.0, 0.0),
        ("B", 1.0, 0.0),
        ("C", 2.0, 0.0),
        ("D", 0.0, 1.0),
        ("E", 1.0, 1.0),
        ("F", 2.0, 1.0),
        ("G", 0.0, 2.0),
        ("H", 1.0, 2.0),
        ("I", 2.0, 2.0),
    ];
    for (i, (name, x, y)) in expected_nodes.iter().enumerate() {
        assert_eq!(graph.node(i).unwrap(), &Node::with_coordinates(*name, *x, *y));
    }

    let expected_edges = [
        ("AB", "A", "B"),
        ("BC", "B", "C"),
        ("AD", "A", "D"),
        ("AE", "A", "E"),
        ("BE", "B", "E"),
        ("DG", "D", "G"),
        ("EG", "E", "G"),
        ("FI", "F", "I"),
        ("HI", "H", "I"),
    ];
    for (j, (name, head, tail)) in expected_edges.iter().enumerate() {
        let edge = graph.edge(j).unwrap();
        assert_eq!(&edge.name, name);
        assert_eq!(&graph.node(edge.head).unwrap().name, head);
        assert_eq!(&graph.node(edge.tail).unwrap().name, tail);
    }

    // E touches A, B and G.
    let e = graph.node_index("E").unwrap();
    assert_eq!(graph.extent(e).unwrap(), 3);
    assert!(adjacency_violations(&graph).is_empty());
}

#[test]
fn test_graph9_annotated_round_trip() {
    let original = std::fs::read_to_string(fixture("graph9.gra")).unwrap();
    let decoded = read_file(&fixture("graph9.gra")).unwrap();

    let writer = GraphWriter::new(WriteOptions::new(decoded.language).annotated(true));
    assert_eq!(writer.write_string(&decoded.graph).unwrap(), original);
}

#[test]
fn test_plain_round_trip() {
    let original = std::fs::read_to_string(fixture("abc_directed.gra")).unwrap();
    let decoded = read_file(&fixture("abc_directed.gra")).unwrap();

    assert_eq!(decoded.language, Language::English);
    let text = GraphWriter::new(WriteOptions::new(decoded.language))
        .write_string(&decoded.graph)
        .unwrap();
    assert_eq!(text, original);
}

#[test]
fn test_commented_fixture() {
    let decoded = read_file(&fixture("commented.gra")).unwrap();
    let graph = decoded.graph;

    assert!(graph.is_directed());
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.node_by_name("Start").unwrap().y(), Some(-1.25));
    assert_eq!(graph.node_by_name("End").unwrap().x(), Some(7.75));

    let mid = graph.node_index("Mid").unwrap();
    assert_eq!(graph.forward_extent(mid).unwrap(), 1);
    assert_eq!(graph.backward_extent(mid).unwrap(), 1);

    let text = GraphWriter::default().write_string(&graph).unwrap();
    assert_eq!(
        text,
        "4\n3\ndirected\nStart 0.5 -1.25\nMid 3 4\nEnd 7.75 0\nSpur 10 10\n\
         r1 Start Mid\nr2 Mid End\nr3 End Spur\n"
    );
}

#[test]
fn test_language_translation() {
    let decoded = read_file(&fixture("abc_directed.gra")).unwrap();
    let text = GraphWriter::new(WriteOptions::new(Language::German))
        .write_string(&decoded.graph)
        .unwrap();
    assert!(text.starts_with("3\n2\ngerichtet\n"));
    assert_eq!(read_str(&text).unwrap().stats(), decoded.graph.stats());
}

#[test]
fn test_write_after_deletions_reindexes_on_reload() {
    let dir = TempDir::new().unwrap();
    let mut graph = read_file(&fixture("graph9.gra")).unwrap().graph;

    let e = graph.node_index("E").unwrap();
    graph.delete_node(e).unwrap();
    let written = write_file(&graph, Some(dir.path()), WriteOptions::default()).unwrap();
    assert_eq!(
        written.file_name().unwrap(),
        "graph_directed-false_8-nodes_6-edges.gra"
    );

    let reloaded = read_file(&written).unwrap().graph;
    assert_eq!(reloaded.node_count(), 8);
    assert_eq!(reloaded.edge_count(), 6);
    assert_eq!(reloaded.node_slots(), 8);
    // F moved down one slot because the tombstone at E is not written.
    assert_eq!(reloaded.node_index("F").unwrap(), 4);
    assert!(reloaded.node_by_name("E").is_err());
}

#[test]
fn test_failed_read_returns_no_graph() {
    let err = read_str("2\n2\nu\nA 0 0\nB 0 1\nAB A B\nBX B X\n").unwrap_err();
    assert!(matches!(err, CodecError::UnresolvedReference { ref node, .. } if node == "X"));
    assert_eq!(
        err.to_string(),
        "line 7: edge 'BX' references unknown node 'X'"
    );
}
