//! Declared-topology parser.
//!
//! Reads the operator-authored `topology.dot` adjacency description and
//! extracts the set of declared undirected edges. Each relevant line has
//! the shape:
//!
//! ```text
//! "devA:portA" -- "devB:portB" [label="40G"]
//! ```
//!
//! The bracketed annotation is stripped before parsing. Lines without
//! `--` or starting with a comment marker are skipped; malformed lines
//! (wrong quoted-token count, missing `:`) are skipped with a log, not
//! fatal. Duplicate declarations in either orientation collapse to one
//! edge.

use fabricmon_types::{DeclaredEdge, DeclaredTopology, Endpoint};
use tracing::{debug, warn};

/// Parses declared-topology text into an ordered, deduplicated edge set.
pub fn parse_declared(text: &str) -> DeclaredTopology {
    let mut topology = DeclaredTopology::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }
        if !line.contains("--") {
            continue;
        }

        let line = strip_bracket_annotation(line);
        let quoted: Vec<&str> = extract_quoted(line);
        if quoted.len() != 2 {
            warn!(
                "Skipping malformed topology line (expected 2 quoted endpoints, got {}): {}",
                quoted.len(),
                line
            );
            continue;
        }

        let (Some(a), Some(b)) = (parse_endpoint(quoted[0]), parse_endpoint(quoted[1])) else {
            warn!("Skipping topology line with malformed endpoint: {}", line);
            continue;
        };

        if !topology.insert(DeclaredEdge::new(a, b)) {
            debug!("Duplicate declared edge: {}", line);
        }
    }

    topology
}

/// Drops a trailing `[...]` annotation, if any.
fn strip_bracket_annotation(line: &str) -> &str {
    match line.find('[') {
        Some(idx) => line[..idx].trim_end(),
        None => line,
    }
}

/// Returns the quoted segments of a line, in order.
fn extract_quoted(line: &str) -> Vec<&str> {
    line.split('"')
        .enumerate()
        .filter_map(|(i, part)| (i % 2 == 1).then_some(part))
        .collect()
}

/// Parses one `"device:port"` token.
fn parse_endpoint(token: &str) -> Option<Endpoint> {
    let (device, port) = token.split_once(':')?;
    if device.is_empty() || port.is_empty() {
        return None;
    }
    Some(Endpoint::new(device, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_edge() {
        let topo = parse_declared("\"sw1:swp1\" -- \"sw2:swp3\"\n");
        assert_eq!(topo.len(), 1);
        assert!(topo.contains_pair("sw1", "swp1", "sw2", "swp3"));
    }

    #[test]
    fn test_bracket_annotation_stripped() {
        let topo = parse_declared("\"sw1:swp1\" -- \"sw2:swp3\" [label=\"40G\", color=red]\n");
        assert_eq!(topo.len(), 1);
        assert!(topo.contains_pair("sw2", "swp3", "sw1", "swp1"));
    }

    #[test]
    fn test_comment_and_structural_lines_skipped() {
        let text = r#"
# full-line comment
// another comment
graph fabric {
"sw1:swp1" -- "sw2:swp1"
}
"#;
        let topo = parse_declared(text);
        assert_eq!(topo.len(), 1);
    }

    #[test]
    fn test_malformed_lines_skipped_not_fatal() {
        let text = r#"
"sw1:swp1" -- "sw2:swp1"
"only-one-endpoint" --
"sw1:swp2" -- "sw2:swp2" -- "sw3:swp2"
"noport" -- "sw2:swp9"
"#;
        let topo = parse_declared(text);
        assert_eq!(topo.len(), 1);
        assert!(topo.contains_pair("sw1", "swp1", "sw2", "swp1"));
    }

    #[test]
    fn test_duplicates_collapse_across_orientations() {
        let text = r#"
"sw1:swp1" -- "sw2:swp1"
"sw2:swp1" -- "sw1:swp1"
"sw1:swp1" -- "sw2:swp1"
"#;
        let topo = parse_declared(text);
        assert_eq!(topo.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_declared("").is_empty());
    }

    #[test]
    fn test_none_sentinel_edge_parses() {
        let topo = parse_declared("\"sw1:swp40\" -- \"None:None\"\n");
        assert!(topo.contains_pair("sw1", "swp40", "None", "None"));
    }
}
