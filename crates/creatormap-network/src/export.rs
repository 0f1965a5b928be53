//! GraphML export for external visualisation tools.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::ExportError;
use crate::graph::SimilarityGraph;

const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";

/// `(key id, element it applies to, GraphML attribute type)`.
const KEYS: &[(&str, &str, &str)] = &[
    ("title", "node", "string"),
    ("subscriber_count", "node", "long"),
    ("video_count", "node", "long"),
    ("view_count", "node", "long"),
    ("engagement_rate", "node", "double"),
    ("country", "node", "string"),
    ("keywords", "node", "string"),
    ("weight", "edge", "double"),
];

fn xml_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Xml(e.to_string())
}

fn write_data<W: Write>(writer: &mut Writer<W>, key: &str, value: &str) -> Result<(), ExportError> {
    writer
        .write_event(Event::Start(
            BytesStart::new("data").with_attributes([("key", key)]),
        ))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("data")))
        .map_err(xml_err)
}

/// Write the graph as GraphML to any writer.
///
/// # Errors
///
/// Returns [`ExportError::Xml`] if an XML event cannot be written.
pub fn write_graphml<W: Write>(graph: &SimilarityGraph, out: W) -> Result<(), ExportError> {
    let mut writer = Writer::new_with_indent(out, b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Start(
            BytesStart::new("graphml").with_attributes([("xmlns", GRAPHML_NS)]),
        ))
        .map_err(xml_err)?;

    for (id, target, kind) in KEYS {
        writer
            .write_event(Event::Empty(BytesStart::new("key").with_attributes([
                ("id", *id),
                ("for", *target),
                ("attr.name", *id),
                ("attr.type", *kind),
            ])))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::Start(
            BytesStart::new("graph")
                .with_attributes([("id", "creators"), ("edgedefault", "undirected")]),
        ))
        .map_err(xml_err)?;

    for node in graph.nodes() {
        writer
            .write_event(Event::Start(
                BytesStart::new("node").with_attributes([("id", node.id.as_str())]),
            ))
            .map_err(xml_err)?;
        write_data(&mut writer, "title", &node.title)?;
        write_data(&mut writer, "subscriber_count", &node.subscriber_count.to_string())?;
        write_data(&mut writer, "video_count", &node.video_count.to_string())?;
        write_data(&mut writer, "view_count", &node.view_count.to_string())?;
        write_data(&mut writer, "engagement_rate", &node.engagement_rate.to_string())?;
        write_data(&mut writer, "country", &node.country)?;
        write_data(&mut writer, "keywords", &node.keywords.join(","))?;
        writer
            .write_event(Event::End(BytesEnd::new("node")))
            .map_err(xml_err)?;
    }

    for edge in graph.edges() {
        writer
            .write_event(Event::Start(BytesStart::new("edge").with_attributes([
                ("source", edge.source.as_str()),
                ("target", edge.target.as_str()),
            ])))
            .map_err(xml_err)?;
        write_data(&mut writer, "weight", &edge.weight.to_string())?;
        writer
            .write_event(Event::End(BytesEnd::new("edge")))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("graph")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("graphml")))
        .map_err(xml_err)?;

    let mut out = writer.into_inner();
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// Write the graph as GraphML to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be created or written, or
/// [`ExportError::Xml`] if serialisation fails.
pub fn write_graphml_file(graph: &SimilarityGraph, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_graphml(graph, BufWriter::new(file))?;
    tracing::info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "wrote GraphML export"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use creatormap_core::CandidateProfile;

    use super::*;
    use crate::graph::build_graph;
    use crate::types::NetworkConfig;

    fn profile(id: &str, title: &str, keywords: &[&str]) -> CandidateProfile {
        CandidateProfile {
            id: id.to_string(),
            title: title.to_string(),
            subscriber_count: 1_000,
            view_count: 50_000,
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            ..CandidateProfile::default()
        }
    }

    fn export(candidates: &[CandidateProfile]) -> String {
        let graph = build_graph(candidates, &NetworkConfig::default());
        let mut buf = Vec::new();
        write_graphml(&graph, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn graphml_lists_nodes_edges_and_keys() {
        let xml = export(&[
            profile("UC1", "Lift Daily", &["fitness", "vlog"]),
            profile("UC2", "Yoga Hour", &["fitness", "yoga"]),
        ]);

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<graph id=\"creators\" edgedefault=\"undirected\">"));
        assert!(xml.contains("<key id=\"weight\" for=\"edge\" attr.name=\"weight\" attr.type=\"double\"/>"));
        assert!(xml.contains("<node id=\"UC1\">"));
        assert!(xml.contains("<data key=\"keywords\">fitness,vlog</data>"));
        assert!(xml.contains("<data key=\"engagement_rate\">50</data>"));
        assert!(xml.contains("<edge source=\"UC1\" target=\"UC2\">"));
        assert!(xml.trim_end().ends_with("</graphml>"));
    }

    #[test]
    fn graphml_escapes_text() {
        let xml = export(&[profile("UC1", "Tips & <Tricks>", &[])]);
        assert!(xml.contains("Tips &amp; &lt;Tricks&gt;"));
        assert!(!xml.contains("<edge"));
    }

    #[test]
    fn missing_directory_is_io_error() {
        let graph = build_graph(&[], &NetworkConfig::default());
        let err = write_graphml_file(&graph, Path::new("/nonexistent/creatormap/out.graphml"))
            .unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
